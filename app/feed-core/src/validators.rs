//! Input validation for the two write paths.
//!
//! Every check runs before any network call; the returned string is the
//! trimmed value that actually gets stored.

use error_types::{AppError, Result};

pub const MAX_CAPTION_CHARS: usize = 500;
pub const MAX_BIO_CHARS: usize = 200;

/// Caption: required, 1–500 characters after trimming.
pub fn validate_caption(caption: &str) -> Result<String> {
    let trimmed = caption.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Please add a caption to your post"));
    }
    if trimmed.chars().count() > MAX_CAPTION_CHARS {
        return Err(AppError::validation(format!(
            "Caption must be at most {MAX_CAPTION_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Name: required, non-empty after trimming.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Please enter your name"));
    }
    Ok(trimmed.to_string())
}

/// Bio: optional, at most 200 characters after trimming.
pub fn validate_bio(bio: &str) -> Result<String> {
    let trimmed = bio.trim();
    if trimmed.chars().count() > MAX_BIO_CHARS {
        return Err(AppError::validation(format!(
            "Bio must be at most {MAX_BIO_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_is_trimmed() {
        assert_eq!(validate_caption("  Hello world  ").unwrap(), "Hello world");
    }

    #[test]
    fn whitespace_only_caption_is_rejected() {
        let err = validate_caption("   ").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn caption_length_is_capped_in_characters() {
        assert!(validate_caption(&"x".repeat(500)).is_ok());
        assert!(validate_caption(&"x".repeat(501)).unwrap_err().is_validation());
        // Multi-byte characters count once.
        assert!(validate_caption(&"ü".repeat(500)).is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(validate_name("").unwrap_err().is_validation());
        assert!(validate_name(" \t ").unwrap_err().is_validation());
        assert_eq!(validate_name(" Ada ").unwrap(), "Ada");
    }

    #[test]
    fn empty_bio_is_fine() {
        assert_eq!(validate_bio("").unwrap(), "");
        assert!(validate_bio(&"b".repeat(201)).unwrap_err().is_validation());
    }
}
