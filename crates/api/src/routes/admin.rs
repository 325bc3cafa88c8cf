//! Route definitions for the `/admin` resource. Every route requires the
//! `admin` role.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET   /dashboard                -> dashboard
/// GET   /users                    -> list_users
/// PATCH /users/{id}/toggle-status -> toggle_user_status
/// GET   /rentals                  -> list_rentals
/// GET   /overdue                  -> overdue_rentals
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/toggle-status", patch(admin::toggle_user_status))
        .route("/rentals", get(admin::list_rentals))
        .route("/overdue", get(admin::overdue_rentals))
}
