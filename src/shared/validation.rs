use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::shared::constants::MIN_PASSWORD_LENGTH;

lazy_static! {
    /// At least one ASCII digit anywhere in the string
    pub static ref DIGIT_REGEX: Regex = Regex::new(r"[0-9]").unwrap();

    /// At least one uppercase ASCII letter anywhere in the string
    pub static ref UPPERCASE_REGEX: Regex = Regex::new(r"[A-Z]").unwrap();
}

/// Outcome of each password rule, so forms can show which one failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCheck {
    pub min_length: bool,
    pub has_digit: bool,
    pub has_uppercase: bool,
}

impl PasswordCheck {
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_digit: DIGIT_REGEX.is_match(password),
            has_uppercase: UPPERCASE_REGEX.is_match(password),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min_length && self.has_digit && self.has_uppercase
    }

    /// Human readable list of the rules that failed
    pub fn failures(&self) -> Vec<String> {
        let mut failures = Vec::new();
        if !self.min_length {
            failures.push(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ));
        }
        if !self.has_digit {
            failures.push("Password must contain at least one number".to_string());
        }
        if !self.has_uppercase {
            failures.push("Password must contain at least one capital letter".to_string());
        }
        failures
    }
}

/// `validator` hook for password fields
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let check = PasswordCheck::evaluate(password);
    if check.is_valid() {
        return Ok(());
    }

    let mut error = ValidationError::new("password_strength");
    error.message = Some(check.failures().join(", ").into());
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_password_fails_capital_rule() {
        let check = PasswordCheck::evaluate("abc123");
        assert!(check.min_length);
        assert!(check.has_digit);
        assert!(!check.has_uppercase);
        assert!(!check.is_valid());
    }

    #[test]
    fn test_password_with_capital_digit_and_length_is_valid() {
        assert!(PasswordCheck::evaluate("Abc123").is_valid());
        assert!(validate_password_strength("Abc123").is_ok());
    }

    #[test]
    fn test_short_password() {
        let check = PasswordCheck::evaluate("Ab1");
        assert!(!check.min_length);
        assert!(!check.is_valid());
        assert_eq!(check.failures().len(), 1);
    }

    #[test]
    fn test_password_without_digit() {
        let check = PasswordCheck::evaluate("Abcdefgh");
        assert!(!check.has_digit);
        assert!(validate_password_strength("Abcdefgh").is_err());
    }

    #[test]
    fn test_failure_message_lists_every_rule() {
        let err = validate_password_strength("").unwrap_err();
        let message = err.message.unwrap();
        assert!(message.contains("at least 6 characters"));
        assert!(message.contains("number"));
        assert!(message.contains("capital letter"));
    }
}
