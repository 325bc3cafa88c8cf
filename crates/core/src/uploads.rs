//! Naming and path rules for property image uploads.
//!
//! Images are stored under `{upload_dir}/properties/` and served publicly
//! below [`PUBLIC_PREFIX`]. Only the file-name component of a client path
//! is ever used, so stored names cannot escape the upload directory.

use crate::error::CoreError;

/// Image extensions accepted for upload (lowercase, without the dot).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Most images accepted in one upload request.
pub const MAX_IMAGES_PER_UPLOAD: usize = 10;

/// Sub-directory of the upload root holding property images.
pub const PROPERTY_IMAGE_DIR: &str = "properties";

/// Public URL prefix under which stored property images are served.
pub const PUBLIC_PREFIX: &str = "/uploads/properties/";

/// Return the lowercase extension of `file_name` if it is an allowed image type.
pub fn image_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    ALLOWED_IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// Reduce a client-supplied file name to a safe, single path component.
///
/// Directory parts are dropped and every character outside
/// `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// Build the stored file name: `{unix_ts}_{unique}_{sanitized original}`.
pub fn stored_file_name(timestamp: i64, unique: &str, original: &str) -> String {
    format!("{timestamp}_{unique}_{}", sanitize_file_name(original))
}

/// Public path of a stored image.
pub fn public_path(stored_name: &str) -> String {
    format!("{PUBLIC_PREFIX}{stored_name}")
}

/// Extract the stored file name from a public image path.
///
/// Rejects anything outside [`PUBLIC_PREFIX`] or containing further path
/// components.
pub fn stored_name_from_public_path(path: &str) -> Result<&str, CoreError> {
    let name = path
        .strip_prefix(PUBLIC_PREFIX)
        .ok_or_else(|| CoreError::Validation("Invalid image path".into()))?;
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(CoreError::Validation("Invalid image path".into()));
    }
    Ok(name)
}
