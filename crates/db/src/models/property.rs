//! Property entity model and DTOs.

use rentdesk_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Availability of a property, stored in the `property_status` enum column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "property_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Available,
    Occupied,
    Maintenance,
}

impl PropertyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyStatus::Available => "available",
            PropertyStatus::Occupied => "occupied",
            PropertyStatus::Maintenance => "maintenance",
        }
    }

    /// Whether an admin edit may move a property from `self` to `to`.
    ///
    /// `occupied` is entered only by creating a rental and left only by
    /// terminating or expiring one, so edits may only move between
    /// `available` and `maintenance`.
    pub fn allows_manual_change_to(self, to: PropertyStatus) -> bool {
        self == to || (self != PropertyStatus::Occupied && to != PropertyStatus::Occupied)
    }
}

/// Kind of rentable unit, stored in the `property_type` enum column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "property_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Shop,
    Partition,
    Office,
    Warehouse,
}

/// Location embedded in the `properties.location` JSONB column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub street: String,
    pub area: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    pub landmark: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Facilities embedded in the `properties.features` JSONB column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub has_electricity: bool,
    pub has_water: bool,
    pub has_parking: bool,
    pub has_security: bool,
    pub has_ac: bool,
    pub has_wifi: bool,
    pub is_furnished: bool,
    pub has_restroom: bool,
}

/// A property row from the `properties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub location: Json<Location>,
    pub rent_per_month: Amount,
    pub security_deposit: Amount,
    /// Floor area in square feet.
    pub area: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub features: Json<Features>,
    pub status: PropertyStatus,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new property. New listings always start `available`.
#[derive(Debug, Clone)]
pub struct CreateProperty {
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub location: Location,
    pub rent_per_month: Amount,
    pub security_deposit: Amount,
    pub area: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub features: Features,
    pub created_by: DbId,
}

/// DTO for updating an existing property. All fields are optional.
///
/// Only these fields can be patched; any other key in the request body is
/// rejected during deserialization. `status` is further limited by
/// [`PropertyStatus::allows_manual_change_to`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProperty {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub location: Option<Location>,
    pub rent_per_month: Option<Amount>,
    pub security_deposit: Option<Amount>,
    pub area: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub features: Option<Features>,
    pub status: Option<PropertyStatus>,
}

/// Result of [`PropertyRepo::update`](crate::repositories::PropertyRepo::update).
#[derive(Debug)]
pub enum UpdatePropertyOutcome {
    Updated(Property),
    NotFound,
    /// The requested status change belongs to the rental ledger; nothing
    /// was written.
    StatusLocked {
        current: PropertyStatus,
        requested: PropertyStatus,
    },
}

/// Listing filters. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub status: Option<PropertyStatus>,
    pub property_type: Option<PropertyType>,
    /// Case-insensitive substring of `location.city`.
    pub city: Option<String>,
}
