//! Handlers for the `/admin` resource: dashboard, user management and
//! rental reports.

use axum::extract::{Path, State};
use axum::Json;
use rentdesk_core::error::CoreError;
use rentdesk_core::messages;
use rentdesk_core::types::DbId;
use rentdesk_db::models::dashboard::DashboardStats;
use rentdesk_db::models::rental::RentalWithParties;
use rentdesk_db::models::user::UserResponse;
use rentdesk_db::repositories::{DashboardRepo, RentalRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse::new(stats, messages::DASHBOARD)))
}

/// GET /api/v1/admin/users
///
/// All users, newest first, without credential hashes.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let users = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse::new(users, messages::ALL_USERS)))
}

/// PATCH /api/v1/admin/users/{id}/toggle-status
///
/// Flip a user's activation flag. Deactivated users cannot log in.
pub async fn toggle_user_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::toggle_active(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    tracing::info!(
        user_id = id,
        is_active = user.is_active,
        admin_id = admin.user_id,
        "User status toggled"
    );
    Ok(Json(DataResponse::new(
        user.into(),
        messages::USER_STATUS_CHANGED,
    )))
}

/// GET /api/v1/admin/rentals
pub async fn list_rentals(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<RentalWithParties>>>> {
    let rentals = RentalRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse::new(rentals, messages::ALL_RENTALS)))
}

/// GET /api/v1/admin/overdue
///
/// Active rentals with money owed, earliest due date first.
pub async fn overdue_rentals(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<RentalWithParties>>>> {
    let rentals = RentalRepo::list_overdue(&state.pool).await?;
    Ok(Json(DataResponse::new(rentals, messages::OVERDUE_RENTALS)))
}
