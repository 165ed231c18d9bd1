//! Uploaded file storage under the configured media root.
//!
//! Files are written as `<dir>/<uuid>.<ext>` and only that relative path is
//! persisted. The router serves the media root read-only at `/media`.

use std::collections::HashMap;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::Multipart;
use pawlink_core::error::CoreError;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Image extensions accepted for every upload kind.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Content-specific directory under the media root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaDir {
    AnimalGallery,
    ShelterImages,
    DonationReceipts,
    UserAvatars,
}

impl MediaDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaDir::AnimalGallery => "animal_gallery",
            MediaDir::ShelterImages => "shelter_images",
            MediaDir::DonationReceipts => "donation_receipts",
            MediaDir::UserAvatars => "user_avatars",
        }
    }
}

/// One uploaded file.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// A parsed multipart body: the file part (if sent) plus text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<Upload>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// The file part, or a validation error naming `field`.
    pub fn require_file(&mut self, field: &str) -> Result<Upload, CoreError> {
        self.file
            .take()
            .filter(|f| !f.bytes.is_empty())
            .ok_or_else(|| CoreError::validation(field, "A file is required"))
    }

    /// Checkbox-style flag: `true`, `on`, `1` and `yes` count as set.
    pub fn flag(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .is_some_and(|v| matches!(v.trim(), "true" | "on" | "1" | "yes"))
    }
}

/// Read every part of a multipart body. The part named `file_field` is kept
/// as bytes; every other part is read as text.
pub async fn read_multipart(mut multipart: Multipart, file_field: &str) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == file_field {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            form.file = Some(Upload { file_name, bytes });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read field '{name}': {e}")))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// Lowercased extension of `file_name`, if it is an accepted image type.
pub fn image_extension(field: &str, file_name: &str) -> Result<String, CoreError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::validation(
            field,
            format!(
                "Unsupported file type. Allowed: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ),
        ))
    }
}

/// Write `upload` under `root/<dir>/` with a generated name and return the
/// relative path to persist.
pub async fn store(root: &Path, dir: MediaDir, field: &str, upload: &Upload) -> AppResult<String> {
    let ext = image_extension(field, &upload.file_name)?;
    let relative = format!("{}/{}.{ext}", dir.as_str(), Uuid::new_v4());

    let target_dir = root.join(dir.as_str());
    tokio::fs::create_dir_all(&target_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create media directory: {e}")))?;
    tokio::fs::write(root.join(&relative), &upload.bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;

    tracing::debug!(path = %relative, bytes = upload.bytes.len(), "Stored upload");
    Ok(relative)
}
