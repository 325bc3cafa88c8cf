//! Handlers for the `/properties` resource.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rentdesk_core::error::CoreError;
use rentdesk_core::messages;
use rentdesk_core::pagination::{clamp_limit, clamp_page, offset_for, total_pages};
use rentdesk_core::types::{Amount, DbId};
use rentdesk_db::models::property::{
    CreateProperty, Features, Location, Property, PropertyFilter, PropertyStatus, PropertyType,
    UpdateProperty, UpdatePropertyOutcome,
};
use rentdesk_db::repositories::PropertyRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ValidJson};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PropertyListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /properties`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub location: Location,
    #[validate(range(exclusive_min = 0.0, message = "rent_per_month must be greater than zero"))]
    pub rent_per_month: Amount,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "security_deposit must not be negative"))]
    pub security_deposit: Amount,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "area must not be negative"))]
    pub area: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Features,
}

/// Page metadata of a property listing.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// A page of properties.
#[derive(Debug, Serialize)]
pub struct PropertyPage {
    pub items: Vec<Property>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/properties
///
/// Public, paginated listing with optional `status`, `type` and `city`
/// filters, newest first.
pub async fn list_properties(
    State(state): State<AppState>,
    params: Result<Query<PropertyListParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<PropertyPage>>> {
    let Query(params) = params?;
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit);

    let filter = PropertyFilter {
        status: params.status,
        property_type: params.property_type,
        city: params.city,
    };

    let total = PropertyRepo::count(&state.pool, &filter).await?;
    let items = PropertyRepo::list(&state.pool, &filter, limit, offset_for(page, limit)).await?;

    let body = PropertyPage {
        items,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        },
    };
    Ok(Json(DataResponse::new(body, messages::PROPERTIES_FOUND)))
}

/// GET /api/v1/properties/{id}
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Property>>> {
    let property = find_or_404(&state, id).await?;
    Ok(Json(DataResponse::new(property, messages::PROPERTY_FOUND)))
}

/// POST /api/v1/properties
///
/// New listings always start `available` and record the creating admin.
pub async fn create_property(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidJson(input): ValidJson<CreatePropertyRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Property>>)> {
    let create = CreateProperty {
        title: input.title.trim().to_string(),
        description: input.description,
        property_type: input.property_type,
        location: input.location,
        rent_per_month: input.rent_per_month,
        security_deposit: input.security_deposit,
        area: input.area,
        amenities: input.amenities,
        images: input.images,
        features: input.features,
        created_by: admin.user_id,
    };

    let property = PropertyRepo::create(&state.pool, &create).await?;
    tracing::info!(property_id = property.id, admin_id = admin.user_id, "Property created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(property, messages::PROPERTY_CREATED)),
    ))
}

/// PUT /api/v1/properties/{id}
///
/// Partial update. Only the fields of [`UpdateProperty`] are accepted; any
/// other key in the body is a 400.
pub async fn update_property(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateProperty>,
) -> AppResult<Json<DataResponse<Property>>> {
    validate_update(&input)?;

    let property = match PropertyRepo::update(&state.pool, id, &input).await? {
        UpdatePropertyOutcome::Updated(property) => property,
        UpdatePropertyOutcome::NotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Property",
                id,
            }));
        }
        UpdatePropertyOutcome::StatusLocked { current, requested } => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Property status cannot be changed from {} to {} by an edit",
                current.as_str(),
                requested.as_str()
            ))));
        }
    };
    tracing::info!(property_id = id, admin_id = admin.user_id, "Property updated");

    Ok(Json(DataResponse::new(property, messages::PROPERTY_UPDATED)))
}

/// DELETE /api/v1/properties/{id}
///
/// Returns 409 while rentals still reference the property.
pub async fn delete_property(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<()>>> {
    let deleted = PropertyRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id,
        }));
    }
    tracing::info!(property_id = id, admin_id = admin.user_id, "Property deleted");

    Ok(Json(DataResponse::new((), messages::PROPERTY_DELETED)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_or_404(state: &AppState, id: DbId) -> AppResult<Property> {
    PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id,
        }))
}

fn validate_update(input: &UpdateProperty) -> Result<(), CoreError> {
    if input.status == Some(PropertyStatus::Occupied) {
        return Err(CoreError::Validation(
            "status 'occupied' is set by creating a rental".into(),
        ));
    }
    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(CoreError::Validation("Title must not be empty".into()));
        }
    }
    if let Some(rent) = input.rent_per_month {
        if !rent.is_finite() || rent <= 0.0 {
            return Err(CoreError::Validation(
                "rent_per_month must be greater than zero".into(),
            ));
        }
    }
    if input.security_deposit.is_some_and(|d| d < 0.0) {
        return Err(CoreError::Validation(
            "security_deposit must not be negative".into(),
        ));
    }
    if input.area.is_some_and(|a| a < 0.0) {
        return Err(CoreError::Validation("area must not be negative".into()));
    }
    Ok(())
}
