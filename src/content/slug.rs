//! Slug validation and upload filename sanitizing

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    /// Lowercase alphanumerics and inner hyphens; no leading or trailing hyphen
    static ref SLUG_PATTERN: Regex = Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").unwrap();
    static ref UNSAFE_NAME_CHARS: Regex = Regex::new(r"[^a-z0-9]").unwrap();
}

/// Check whether a slug is safe to use as a file name and URL segment
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}

/// Validate a slug, returning it back on success
pub fn validate_slug(slug: &str) -> Result<&str> {
    if is_valid_slug(slug) {
        Ok(slug)
    } else {
        Err(Error::InvalidSlug(slug.to_string()))
    }
}

/// Turn an uploaded file name into a filesystem-safe fragment
///
/// The name is lowercased and every character outside `[a-z0-9]` becomes `-`,
/// so `"My Photo.PNG"` turns into `"my-photo-png"`.
pub fn sanitize_file_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let cleaned = UNSAFE_NAME_CHARS.replace_all(&lowered, "-").to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}
