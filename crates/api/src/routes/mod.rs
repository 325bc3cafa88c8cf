pub mod admin;
pub mod auth;
pub mod health;
pub mod property;
pub mod rental;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register tenant (public)
/// /auth/login                           login (public)
/// /auth/profile                         caller profile (auth)
///
/// /user/profile                         caller profile (auth)
///
/// /properties                           list (public), create (admin)
/// /properties/{id}                      get (public), update, delete (admin)
/// /properties/upload                    upload images (admin)
/// /properties/image?path=               delete image (admin)
///
/// /rentals                              create (admin)
/// /rentals/my-rentals                   caller's rentals (auth)
/// /rentals/my-dues                      caller's outstanding rent (auth)
/// /rentals/{id}                         detail (tenant or admin)
/// /rentals/{id}/payment                 record payment (tenant or admin)
/// /rentals/{id}/terminate               terminate (admin)
///
/// /admin/dashboard                      counters and revenue (admin)
/// /admin/users                          list users (admin)
/// /admin/users/{id}/toggle-status       (de)activate user (admin)
/// /admin/rentals                        all rentals (admin)
/// /admin/overdue                        overdue rentals (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", user::router())
        .nest("/properties", property::router())
        .nest("/rentals", rental::router())
        .nest("/admin", admin::router())
}
