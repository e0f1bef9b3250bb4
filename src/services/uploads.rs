//! Disk storage for accepted image uploads.

use crate::error::AppError;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Extensions accepted by the upload endpoint.
const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// A file persisted by the upload store.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Timestamp-prefixed, sanitized name; unique per request.
    pub stored_name: String,
    pub path: PathBuf,
}

/// Writes uploads under a fixed directory, created eagerly at startup.
///
/// Stored files are never deleted by this service; cleanup is out of band.
#[derive(Clone)]
pub struct UploadStore {
    upload_dir: PathBuf,
}

impl UploadStore {
    pub async fn new(upload_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let upload_dir = upload_dir.into();
        if !upload_dir.exists() {
            fs::create_dir_all(&upload_dir).await?;
        }
        Ok(Self { upload_dir })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Persist the uploaded bytes under a unique stored name.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredUpload, AppError> {
        let sanitized = sanitize_filename(original_name);
        // Microsecond-resolution prefix keeps names unique per request.
        let stored_name = format!("{}_{}", Utc::now().format("%Y%m%d%H%M%S%6f"), sanitized);
        let path = self.upload_dir.join(&stored_name);

        fs::write(&path, data).await?;

        Ok(StoredUpload { stored_name, path })
    }
}

/// Whether the filename carries an allowed image extension.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Strip path components and unsafe characters from a client filename.
///
/// Keeps ASCII alphanumerics, '.', '_' and '-'; whitespace becomes '_', every
/// other character is dropped. Falls back to "file" when nothing survives.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = match filename.rfind(['/', '\\']) {
        Some(idx) => &filename[idx + 1..],
        None => filename,
    };

    let cleaned: String = basename
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_' || c == '-');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}
