//! Field-level validation shared by intake and storage.

use crate::error::{PlaintsError, Result};
use std::path::Path;

/// Largest accepted attachment, in bytes (5 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Attachment extensions accepted, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// Maximum allowed length for a complaint or tracking ID.
pub const MAX_ID_LENGTH: usize = 50;

/// Characters forbidden in IDs to prevent path traversal.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '\\', '\0'];

/// Returns the trimmed value, or `MissingField(field)` when it is empty.
pub fn require(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PlaintsError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Like [`require`] for a value that may be absent.
pub fn require_present(field: &'static str, value: Option<&str>) -> Result<String> {
    require(field, value.unwrap_or_default())
}

/// Lowercased extension of an attachment name, if it is on the allow-list.
pub fn attachment_extension(file_name: &str) -> Result<String> {
    let extension = Path::new(file_name.trim())
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(PlaintsError::UnsupportedFileType(if extension.is_empty() {
            file_name.to_string()
        } else {
            format!(".{}", extension)
        }))
    }
}

pub fn validate_attachment_size(size: u64) -> Result<()> {
    if size > MAX_ATTACHMENT_BYTES {
        tracing::debug!(size, limit = MAX_ATTACHMENT_BYTES, "Attachment over size limit");
        return Err(PlaintsError::FileTooLarge {
            limit: MAX_ATTACHMENT_BYTES,
        });
    }
    Ok(())
}

/// Validates a complaint ID to prevent path traversal attacks.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(PlaintsError::MalformedRequest(
            "ID cannot be empty".to_string(),
        ));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(PlaintsError::MalformedRequest(format!(
            "ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }
    if id.contains("..") {
        return Err(PlaintsError::MalformedRequest(
            "ID cannot contain '..' (path traversal)".to_string(),
        ));
    }
    for c in FORBIDDEN_ID_CHARS {
        if id.contains(*c) {
            return Err(PlaintsError::MalformedRequest(format!(
                "ID cannot contain '{}'",
                c
            )));
        }
    }
    Ok(())
}
