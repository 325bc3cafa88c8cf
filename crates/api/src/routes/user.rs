use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET /profile  -> profile (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/profile", get(auth::profile))
}
