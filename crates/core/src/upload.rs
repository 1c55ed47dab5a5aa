//! Upload validation and content-addressed naming.

use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// File extensions accepted by `/common/upload`.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "pdf"];

/// Default upper bound on an uploaded file (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Lower-cased extension of `filename`, if it is on the allow list.
pub fn validate_extension(filename: &str) -> Result<String, CoreError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported file type '.{ext}'. Supported: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )))
    }
}

pub fn validate_size(len: usize, max: usize) -> Result<(), CoreError> {
    if len == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".to_string()));
    }
    if len > max {
        return Err(CoreError::Validation(format!(
            "Uploaded file is {len} bytes; the limit is {max} bytes"
        )));
    }
    Ok(())
}

/// Storage name derived from the file content, so re-uploads dedupe.
pub fn stored_file_name(data: &[u8], ext: &str) -> String {
    let digest = Sha256::digest(data);
    format!("{digest:x}.{ext}")
}
