//! Site content slugs and settings keys.

use crate::error::CoreError;

/// Longest accepted slug or settings key.
pub const MAX_KEY_LENGTH: usize = 64;

/// Validate a content slug / settings key: lowercase ASCII letters, digits,
/// `-` and `_`, not empty.
pub fn validate_key(kind: &str, key: &str) -> Result<(), CoreError> {
    if key.is_empty() || key.len() > MAX_KEY_LENGTH {
        return Err(CoreError::Validation(format!(
            "{kind} must be between 1 and {MAX_KEY_LENGTH} characters"
        )));
    }
    let ok = key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if !ok {
        return Err(CoreError::Validation(format!(
            "{kind} '{key}' may only contain lowercase letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys() {
        assert!(validate_key("Slug", "mass-timings").is_ok());
        assert!(validate_key("Slug", "church_name").is_ok());
        assert!(validate_key("Slug", "").is_err());
        assert!(validate_key("Slug", "About Us").is_err());
        assert!(validate_key("Slug", &"a".repeat(65)).is_err());
    }
}
