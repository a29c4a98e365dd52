//! Anonymous message rules.

/// Content length bounds in characters (inclusive), measured on the trimmed content.
pub const CONTENT_MIN_LEN: usize = 10;
pub const CONTENT_MAX_LEN: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContentViolation {
    #[error("Content must be at least 10 characters")]
    TooShort,
    #[error("Content must not be longer than 300 characters")]
    TooLong,
}

pub fn validate_content(content: &str) -> Result<(), ContentViolation> {
    let len = content.trim().chars().count();
    if len < CONTENT_MIN_LEN {
        return Err(ContentViolation::TooShort);
    }
    if len > CONTENT_MAX_LEN {
        return Err(ContentViolation::TooLong);
    }
    Ok(())
}
