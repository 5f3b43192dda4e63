use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Input validation utilities for the auth service

// Compile regex patterns once at startup
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // This regex is hardcoded and validated - it is a compile-time constant in practice
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

/// Minimum plaintext password length, enforced here rather than by the hasher.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Validate password length policy
pub fn validate_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
}

/// One-time codes are fixed-length digit strings.
pub fn validate_otp(code: &str, expected_len: usize) -> bool {
    code.len() == expected_len && code.chars().all(|c| c.is_ascii_digit())
}

/// validator crate compatible custom validator for email shape
pub fn validate_email_shape_validator(email: &str) -> Result<(), ValidationError> {
    if validate_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("test.user+tag@sub.example.co.uk"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!validate_email("invalid"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email(""));
        assert!(!validate_email(&format!("{}@example.com", "a".repeat(255))));
    }

    #[test]
    fn test_password_length_policy() {
        assert!(validate_password("secret1"));
        assert!(validate_password("123456"));
        assert!(!validate_password("12345"));
        assert!(!validate_password(""));
    }

    #[test]
    fn test_otp_format() {
        assert!(validate_otp("048213", 6));
        assert!(!validate_otp("48213", 6)); // too short
        assert!(!validate_otp("0482134", 6)); // too long
        assert!(!validate_otp("04821a", 6)); // non-digit
    }
}
