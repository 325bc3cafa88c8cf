//! Route definitions for the `/rentals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rental;
use crate::state::AppState;

/// Routes mounted at `/rentals`.
///
/// ```text
/// POST /                  -> create_rental (admin)
/// GET  /my-rentals        -> my_rentals
/// GET  /my-dues           -> my_dues
/// GET  /{id}              -> get_rental (tenant or admin)
/// POST /{id}/payment      -> record_payment (tenant or admin)
/// POST /{id}/terminate    -> terminate_rental (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(rental::create_rental))
        .route("/my-rentals", get(rental::my_rentals))
        .route("/my-dues", get(rental::my_dues))
        .route("/{id}", get(rental::get_rental))
        .route("/{id}/payment", post(rental::record_payment))
        .route("/{id}/terminate", post(rental::terminate_rental))
}
