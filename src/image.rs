//! Photo loading: reads an image file and encodes it for the AI request

use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose};
use thiserror::Error;

use crate::model::CapturedImage;

/// Inline request data is capped by the service, keep well under it
pub const MAX_PHOTO_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("No photo path given")]
    EmptyPath,
    #[error("Unsupported photo type: {0} (use jpg, png, webp, gif or heic)")]
    UnsupportedType(String),
    #[error("Photo is too large ({0} bytes, max 20 MB)")]
    TooLarge(u64),
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn mime_type_for(path: &Path) -> Result<&'static str, PhotoError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        "heic" => Ok("image/heic"),
        "heif" => Ok("image/heif"),
        "" => Err(PhotoError::UnsupportedType("no extension".to_string())),
        other => Err(PhotoError::UnsupportedType(other.to_string())),
    }
}

/// Read and encode a photo. A leading `~/` is expanded from `HOME`.
pub async fn load_photo(raw_path: &str) -> Result<CapturedImage, PhotoError> {
    let raw_path = raw_path.trim().trim_matches(|c| c == '"' || c == '\'');
    if raw_path.is_empty() {
        return Err(PhotoError::EmptyPath);
    }

    let path = match (raw_path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(raw_path),
    };

    let mime_type = mime_type_for(&path)?;
    let io_err = |source| PhotoError::Io { path: path.clone(), source };

    let metadata = tokio::fs::metadata(&path).await.map_err(io_err)?;
    if metadata.len() > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge(metadata.len()));
    }

    let bytes = tokio::fs::read(&path).await.map_err(io_err)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), mime_type, "Photo loaded");

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| raw_path.to_string());

    Ok(CapturedImage {
        file_name,
        mime_type: mime_type.to_string(),
        data_base64: general_purpose::STANDARD.encode(&bytes),
    })
}
