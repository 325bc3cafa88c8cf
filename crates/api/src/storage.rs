//! Local filesystem storage for property images.
//!
//! Files live under `{upload_dir}/properties/` and are served by the static
//! `/uploads` route. Naming and path checks come from
//! [`rentdesk_core::uploads`].

use std::io;
use std::path::{Path, PathBuf};

use rentdesk_core::error::CoreError;
use rentdesk_core::uploads::{
    public_path, stored_file_name, stored_name_from_public_path, PROPERTY_IMAGE_DIR,
};

/// Directory holding property images below the upload root.
pub fn property_image_dir(upload_dir: &Path) -> PathBuf {
    upload_dir.join(PROPERTY_IMAGE_DIR)
}

/// Write an uploaded image and return its public path.
///
/// The stored name is `{unix_ts}_{uuid}_{sanitized original}`.
pub async fn save_property_image(
    upload_dir: &Path,
    original_name: &str,
    data: &[u8],
) -> io::Result<String> {
    let dir = property_image_dir(upload_dir);
    tokio::fs::create_dir_all(&dir).await?;

    let stored = stored_file_name(
        chrono::Utc::now().timestamp(),
        &uuid::Uuid::new_v4().simple().to_string(),
        original_name,
    );
    tokio::fs::write(dir.join(&stored), data).await?;
    Ok(public_path(&stored))
}

/// Write a batch of images, all or nothing.
///
/// If any write fails, the images this call already wrote are removed
/// before the error is returned.
pub async fn save_property_images(
    upload_dir: &Path,
    files: &[(String, Vec<u8>)],
) -> io::Result<Vec<String>> {
    let mut stored = Vec::with_capacity(files.len());
    for (original_name, data) in files {
        match save_property_image(upload_dir, original_name, data).await {
            Ok(public) => stored.push(public),
            Err(e) => {
                discard_images(upload_dir, &stored).await;
                return Err(e);
            }
        }
    }
    Ok(stored)
}

async fn discard_images(upload_dir: &Path, public_paths: &[String]) {
    for public in public_paths {
        if let Err(e) = delete_property_image(upload_dir, public).await {
            tracing::warn!(path = %public, error = %e, "Failed to remove image from an aborted upload");
        }
    }
}

/// Outcome of deleting a stored image.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteImage {
    Deleted,
    NotFound,
}

/// Errors from [`delete_property_image`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    InvalidPath(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Delete the image behind a public `/uploads/properties/...` path.
pub async fn delete_property_image(
    upload_dir: &Path,
    public: &str,
) -> Result<DeleteImage, StorageError> {
    let name = stored_name_from_public_path(public)?;
    let path = property_image_dir(upload_dir).join(name);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => Ok(DeleteImage::Deleted),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(DeleteImage::NotFound),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("rentdesk-storage-{}", uuid::Uuid::new_v4().simple()))
    }

    #[tokio::test]
    async fn saved_image_can_be_deleted_once() {
        let root = temp_root();
        let public = save_property_image(&root, "Shop Front.png", b"png").await.unwrap();

        assert!(public.starts_with("/uploads/properties/"));
        assert!(public.ends_with("Shop_Front.png"));
        let name = public.trim_start_matches("/uploads/properties/");
        assert!(property_image_dir(&root).join(name).is_file());

        assert_eq!(
            delete_property_image(&root, &public).await.unwrap(),
            DeleteImage::Deleted
        );
        assert_eq!(
            delete_property_image(&root, &public).await.unwrap(),
            DeleteImage::NotFound
        );
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn failed_batch_leaves_no_files_behind() {
        let root = temp_root();
        // Far past the 255-byte file name limit, so this write fails.
        let too_long = format!("{}.png", "x".repeat(300));
        let files = vec![
            ("front.png".to_string(), b"png".to_vec()),
            ("inside.jpg".to_string(), b"jpg".to_vec()),
            (too_long, b"png".to_vec()),
        ];

        assert!(save_property_images(&root, &files).await.is_err());
        let left = std::fs::read_dir(property_image_dir(&root)).unwrap().count();
        assert_eq!(left, 0);
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn batch_keeps_upload_order() {
        let root = temp_root();
        let files = vec![
            ("a.png".to_string(), b"a".to_vec()),
            ("b.webp".to_string(), b"b".to_vec()),
        ];

        let stored = save_property_images(&root, &files).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored[0].ends_with("_a.png"));
        assert!(stored[1].ends_with("_b.webp"));
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn delete_rejects_paths_outside_the_image_dir() {
        let root = temp_root();
        assert_matches!(
            delete_property_image(&root, "/uploads/properties/../secret.txt").await,
            Err(StorageError::InvalidPath(CoreError::Validation(_)))
        );
        assert_matches!(
            delete_property_image(&root, "relative.png").await,
            Err(StorageError::InvalidPath(_))
        );
    }
}
