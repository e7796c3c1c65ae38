//! Data models for the catalog
//!
//! Each top-level model is stored as one document in its own collection.

mod playlist;
mod video;

pub use playlist::*;
pub use video::*;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{ValidateUrl, ValidationError};

/// Response returned after a document has been inserted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    /// Store-generated identifier of the new document
    pub id: String,
}

/// Rejects U+0000, which PostgreSQL text and `jsonb` cannot store.
pub fn validate_no_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        Err(ValidationError::new("nul_character").with_message("must not contain NUL".into()))
    } else {
        Ok(())
    }
}

/// [`validate_no_nul`] for every element of a list field.
pub fn validate_no_nul_items(values: &[String]) -> Result<(), ValidationError> {
    values.iter().try_for_each(|value| validate_no_nul(value))
}

/// Accepts absolute `http`/`https` URLs only.
pub(crate) fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let lower = value.to_ascii_lowercase();
    let has_http_scheme = lower.starts_with("http://") || lower.starts_with("https://");
    validate_no_nul(value)?;
    if has_http_scheme && value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("http_url").with_message("must be an http(s) URL".into()))
    }
}
