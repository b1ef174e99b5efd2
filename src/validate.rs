//! Input validation and email normalization for the registration and
//! authentication flows.
//!
//! Checks are fail-fast in declaration order (email, display name, secret),
//! so the reported violation for a given input is deterministic.

use crate::error::ValidationError;
use crate::models::RegistrationRequest;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Canonical form of an email for lookup and storage: trimmed, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check every field of a registration request, first violation wins.
///
/// The role needs no check here: `RegistrationRequest.role` is typed, so an
/// out-of-set role string has already failed at parse time.
pub fn validate_registration(request: &RegistrationRequest) -> Result<(), ValidationError> {
    validate_email(&request.email)?;
    validate_display_name(&request.display_name)?;
    validate_secret(&request.secret)?;
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::new("email", "must not be empty"));
    }
    if !EMAIL_SHAPE.is_match(email) {
        return Err(ValidationError::new("email", "is not a valid email address"));
    }
    Ok(())
}

/// Display name length is counted in characters, not bytes.
pub fn validate_display_name(display_name: &str) -> Result<(), ValidationError> {
    let length = display_name.trim().chars().count();
    if !(2..=100).contains(&length) {
        return Err(ValidationError::new(
            "display_name",
            "must be between 2 and 100 characters",
        ));
    }
    Ok(())
}

pub fn validate_secret(secret: &str) -> Result<(), ValidationError> {
    let length = secret.chars().count();
    if !(6..=255).contains(&length) {
        return Err(ValidationError::new(
            "secret",
            "must be between 6 and 255 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn request(email: &str, secret: &str, display_name: &str) -> RegistrationRequest {
        RegistrationRequest {
            email: email.to_string(),
            secret: secret.to_string(),
            display_name: display_name.to_string(),
            role: Some(Role::Member),
        }
    }

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("reader.one@library.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("two@@signs.com").is_err());
        assert!(validate_email("spa ce@b.com").is_err());
    }

    #[test]
    fn test_display_name_bounds_in_characters() {
        assert!(validate_display_name("An").is_ok());
        assert!(validate_display_name(&"x".repeat(100)).is_ok());
        // Two multi-byte characters are two characters, not six bytes.
        assert!(validate_display_name("安娜").is_ok());

        assert!(validate_display_name("A").is_err());
        assert!(validate_display_name(" A ").is_err());
        assert!(validate_display_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_secret_bounds() {
        assert!(validate_secret("abcdef").is_ok());
        assert!(validate_secret(&"s".repeat(255)).is_ok());

        assert!(validate_secret("abcde").is_err());
        assert!(validate_secret(&"s".repeat(256)).is_err());
    }

    #[test]
    fn test_first_violation_wins_in_declaration_order() {
        // Both email and secret are bad; email is reported.
        let err = validate_registration(&request("bad", "x", "Ana")).unwrap_err();
        assert_eq!(err.field, "email");

        // Email fine, display name and secret bad; display name is reported.
        let err = validate_registration(&request("a@b.com", "x", "A")).unwrap_err();
        assert_eq!(err.field, "display_name");

        let err = validate_registration(&request("a@b.com", "x", "Ana")).unwrap_err();
        assert_eq!(err.field, "secret");

        assert!(validate_registration(&request("a@b.com", "abcdef", "Ana")).is_ok());
    }
}
