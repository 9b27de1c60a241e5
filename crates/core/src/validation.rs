//! Upload form validation.
//!
//! These checks mirror what the upload view enforces inline: a trimmed,
//! non-empty title, bounded description, and a size cap on the image file
//! itself. Violations are recoverable -- the caller surfaces them and the
//! user corrects the input.

use validator::Validate;

use crate::error::CoreError;

/// Largest accepted upload, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum board title length.
pub const MAX_TITLE_LEN: u64 = 100;

/// Maximum board description length.
pub const MAX_DESCRIPTION_LEN: u64 = 500;

/// The user-supplied fields of the create-board form.
///
/// Construct via [`UploadForm::new`], which trims both fields so that
/// whitespace-only titles fail the `min = 1` rule.
#[derive(Debug, Clone, Validate)]
pub struct UploadForm {
    #[validate(length(min = 1, max = MAX_TITLE_LEN, message = "title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = MAX_DESCRIPTION_LEN, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl UploadForm {
    pub fn new(title: &str, description: Option<&str>) -> Self {
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Self {
            title: title.trim().to_string(),
            description,
        }
    }

    /// Run all field rules, collapsing violations into one message.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(|errors| {
            let message = errors
                .field_errors()
                .into_values()
                .flatten()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .collect::<Vec<_>>()
                .join("; ");
            CoreError::Validation(message)
        })
    }
}

/// Reject files over [`MAX_UPLOAD_BYTES`] before any decoding happens.
pub fn check_upload_size(len: u64) -> Result<(), CoreError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(
            "image must be smaller than 10MB".to_string(),
        ));
    }
    Ok(())
}
