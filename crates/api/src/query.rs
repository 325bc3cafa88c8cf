//! Query parameter types for API handlers.

use rentdesk_db::models::property::{PropertyStatus, PropertyType};
use serde::Deserialize;

/// Property listing parameters (`?page=&limit=&status=&type=&city=`).
///
/// Page and limit are clamped in the handler via
/// `rentdesk_core::pagination`.
#[derive(Debug, Default, Deserialize)]
pub struct PropertyListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<PropertyStatus>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
}

/// `?path=` parameter of the image delete endpoint.
#[derive(Debug, Deserialize)]
pub struct ImagePathParams {
    pub path: String,
}
