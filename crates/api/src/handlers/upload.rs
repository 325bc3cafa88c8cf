//! Handlers for property image upload and deletion.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::Json;
use rentdesk_core::messages;
use rentdesk_core::uploads::{
    image_extension, ALLOWED_IMAGE_EXTENSIONS, MAX_IMAGES_PER_UPLOAD, MAX_IMAGE_BYTES,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ImagePathParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::{delete_property_image, save_property_images, DeleteImage, StorageError};

/// Multipart field carrying image files.
const IMAGES_FIELD: &str = "images";

/// Public paths of the stored images, in upload order.
#[derive(Debug, Serialize)]
pub struct UploadedImages {
    pub files: Vec<String>,
}

/// POST /api/v1/properties/upload
///
/// Accepts a multipart form with one or more `images` fields. Every file is
/// checked before any is written, and a failed write removes the files
/// already stored, so a rejected request stores nothing.
pub async fn upload_images(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<UploadedImages>>> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGES_FIELD) {
            continue; // ignore unknown fields
        }

        let filename = field.file_name().unwrap_or("").to_string();
        if image_extension(&filename).is_none() {
            return Err(AppError::BadRequest(format!(
                "Invalid file format for '{filename}'. Allowed: {}",
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            )));
        }
        if files.len() == MAX_IMAGES_PER_UPLOAD {
            return Err(AppError::BadRequest(format!(
                "At most {MAX_IMAGES_PER_UPLOAD} images can be uploaded at once"
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if data.len() > MAX_IMAGE_BYTES {
            return Err(AppError::BadRequest(format!(
                "'{filename}' exceeds the {} MB limit",
                MAX_IMAGE_BYTES / (1024 * 1024)
            )));
        }
        files.push((filename, data.to_vec()));
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files uploaded".into()));
    }

    let stored = save_property_images(&state.config.upload_dir, &files)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to save files: {e}")))?;
    tracing::info!(count = stored.len(), admin_id = admin.user_id, "Property images uploaded");

    Ok(Json(DataResponse::new(
        UploadedImages { files: stored },
        messages::IMAGES_UPLOADED,
    )))
}

/// DELETE /api/v1/properties/image?path=/uploads/properties/<file>
pub async fn delete_image(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    params: Result<Query<ImagePathParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<()>>> {
    let Query(params) = params?;

    match delete_property_image(&state.config.upload_dir, &params.path).await {
        Ok(DeleteImage::Deleted) => {
            tracing::info!(path = %params.path, admin_id = admin.user_id, "Property image deleted");
            Ok(Json(DataResponse::new((), messages::IMAGE_DELETED)))
        }
        Ok(DeleteImage::NotFound) => Err(AppError::NotFound("Image not found".into())),
        Err(StorageError::InvalidPath(e)) => Err(AppError::Core(e)),
        Err(StorageError::Io(e)) => Err(AppError::InternalError(format!(
            "Failed to delete image: {e}"
        ))),
    }
}
