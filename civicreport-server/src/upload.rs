//! Uploaded image handling

use std::path::Path;

use uuid::Uuid;

use crate::error::AppError;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Write an uploaded image into the upload directory under a generated
/// filename and return the stored filename. The client-supplied name is
/// used only to pick an extension; it never reaches the filesystem.
pub fn save_image(upload_dir: &str, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    let ext = extension_of(original_name)
        .ok_or_else(|| AppError::Validation("Unsupported image type".to_string()))?;

    std::fs::create_dir_all(upload_dir)
        .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;

    let filename = format!("{}.{}", Uuid::new_v4(), ext);
    std::fs::write(Path::new(upload_dir).join(&filename), bytes)
        .map_err(|e| AppError::Internal(format!("Failed to store image: {}", e)))?;

    Ok(filename)
}

fn extension_of(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
