//! Image upload handling for product photos, promo banners and payment QR
//! codes.
//!
//! Files land in the configured upload directory under a timestamped,
//! sanitized name and are served back by the static file route as
//! `/static/uploads/{file}`.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

/// Errors from storing an uploaded file.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The original filename sanitized down to nothing.
    #[error("unusable filename: {0:?}")]
    BadFilename(String),

    /// Writing the file failed.
    #[error("failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Keep only characters safe for a filesystem name.
///
/// Path separators, dots-only names and control characters all collapse
/// away; whatever survives keeps its order.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    cleaned.trim_matches(['.', '_']).to_owned()
}

/// Store an uploaded file, returning its public URL path.
///
/// Empty uploads (the browser submits the file field even when nothing was
/// chosen) return `Ok(None)`. The stored name is prefixed with the current
/// Unix timestamp so repeated uploads of the same file never collide.
///
/// # Errors
///
/// Returns `UploadError::BadFilename` if nothing survives sanitization, or
/// `UploadError::Io` if the write fails.
pub async fn store_image(
    upload_dir: &Path,
    original_name: &str,
    data: &[u8],
) -> Result<Option<String>, UploadError> {
    if data.is_empty() || original_name.is_empty() {
        return Ok(None);
    }

    let safe_name = sanitize_filename(original_name);
    if safe_name.is_empty() {
        return Err(UploadError::BadFilename(original_name.to_owned()));
    }

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let stored_name = format!("{timestamp}_{safe_name}");

    let path: PathBuf = upload_dir.join(&stored_name);
    tokio::fs::create_dir_all(upload_dir).await?;
    tokio::fs::write(&path, data).await?;

    info!(file = %stored_name, bytes = data.len(), "Stored uploaded image");

    Ok(Some(format!("/static/uploads/{stored_name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("photo.png"), "photo.png");
        assert_eq!(sanitize_filename("my-image_2.jpg"), "my-image_2.jpg");
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("a/b\\c.png"), "a_b_c.png");
    }

    #[test]
    fn test_sanitize_rejects_dot_only_names() {
        assert_eq!(sanitize_filename(".."), "");
        assert_eq!(sanitize_filename("..."), "");
    }

    #[tokio::test]
    async fn test_empty_upload_is_none() {
        let dir = std::env::temp_dir();
        let stored = store_image(&dir, "photo.png", &[]).await.expect("store");
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_store_writes_and_returns_url() {
        let dir = std::env::temp_dir().join("himal-upload-test");
        let stored = store_image(&dir, "banner.png", b"png-bytes")
            .await
            .expect("store")
            .expect("some url");
        assert!(stored.starts_with("/static/uploads/"));
        assert!(stored.ends_with("_banner.png"));

        let file = dir.join(stored.rsplit('/').next().expect("file name"));
        let bytes = tokio::fs::read(&file).await.expect("read back");
        assert_eq!(bytes, b"png-bytes");
        let _ = tokio::fs::remove_file(&file).await;
    }
}
