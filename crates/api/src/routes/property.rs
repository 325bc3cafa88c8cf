//! Route definitions for the `/properties` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use rentdesk_core::uploads::{MAX_IMAGES_PER_UPLOAD, MAX_IMAGE_BYTES};

use crate::handlers::{property, upload};
use crate::state::AppState;

/// Request body cap for image uploads, leaving room for multipart framing.
const UPLOAD_BODY_LIMIT: usize = MAX_IMAGES_PER_UPLOAD * MAX_IMAGE_BYTES + 1024 * 1024;

/// Routes mounted at `/properties`.
///
/// ```text
/// GET    /          -> list_properties
/// POST   /          -> create_property (admin)
/// POST   /upload    -> upload_images (admin, multipart)
/// DELETE /image     -> delete_image (admin, ?path=)
/// GET    /{id}      -> get_property
/// PUT    /{id}      -> update_property (admin)
/// DELETE /{id}      -> delete_property (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(property::list_properties).post(property::create_property),
        )
        .route(
            "/upload",
            post(upload::upload_images).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/image", delete(upload::delete_image))
        .route(
            "/{id}",
            get(property::get_property)
                .put(property::update_property)
                .delete(property::delete_property),
        )
}
