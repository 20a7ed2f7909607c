use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

pub(crate) const USER_ID_MESSAGE: &str = "User ID must be exactly 8 digits.";
pub(crate) const EMAIL_MESSAGE: &str = "Invalid email format.";
pub(crate) const PASSWORD_MESSAGE: &str =
    "Password must be at least 8 characters long and contain at least one letter and one number.";

const MIN_PASSWORD_LEN: usize = 8;

/// First rule a form failed. Shown inline; no request is sent.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{message}")]
pub(crate) struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn user_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{8}$").expect("static regex"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

fn letter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z]").expect("static regex"))
}

fn digit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]").expect("static regex"))
}

/// Exactly eight ASCII digits.
pub(crate) fn is_valid_user_id(s: &str) -> bool {
    user_id_re().is_match(s)
}

/// `local@domain.tld`, checked after trimming surrounding whitespace.
pub(crate) fn is_valid_email(s: &str) -> bool {
    email_re().is_match(s.trim())
}

/// The one password policy used by both registration and profile update.
pub(crate) fn is_valid_password(s: &str) -> bool {
    s.chars().count() >= MIN_PASSWORD_LEN && letter_re().is_match(s) && digit_re().is_match(s)
}

pub(crate) fn check_user_id(s: &str) -> Result<(), ValidationError> {
    if is_valid_user_id(s) {
        Ok(())
    } else {
        Err(ValidationError::new(USER_ID_MESSAGE))
    }
}

pub(crate) fn check_email(s: &str) -> Result<(), ValidationError> {
    if is_valid_email(s) {
        Ok(())
    } else {
        Err(ValidationError::new(EMAIL_MESSAGE))
    }
}

pub(crate) fn check_password(s: &str) -> Result<(), ValidationError> {
    if is_valid_password(s) {
        Ok(())
    } else {
        Err(ValidationError::new(PASSWORD_MESSAGE))
    }
}

pub(crate) fn check_required(label: &str, s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        Err(ValidationError::new(format!("{label} is required.")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_accepts_eight_digits() {
        assert!(is_valid_user_id("12345678"));
        assert!(is_valid_user_id("00000000"));
    }

    #[test]
    fn test_user_id_rejects_wrong_length_or_non_digits() {
        assert!(!is_valid_user_id("1234567"));
        assert!(!is_valid_user_id("123456789"));
        assert!(!is_valid_user_id("1234567a"));
        assert!(!is_valid_user_id(" 12345678"));
        assert!(!is_valid_user_id(""));
        // Non-ASCII digits are not accepted.
        assert!(!is_valid_user_id("１２３４５６７８"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("  first.last@sub.example.org  "));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("ab.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password_policy() {
        assert!(is_valid_password("abcdefg1"));
        assert!(is_valid_password("Passw0rd!"));
        assert!(!is_valid_password("abc1"));
        assert!(!is_valid_password("abcdefgh"));
        assert!(!is_valid_password("12345678"));
        // The old profile-update rule (6 chars + a digit) no longer passes.
        assert!(!is_valid_password("12345a"));
    }

    #[test]
    fn test_check_helpers_carry_fixed_messages() {
        assert_eq!(
            check_user_id("1").unwrap_err().message,
            "User ID must be exactly 8 digits."
        );
        assert_eq!(check_email("x").unwrap_err().to_string(), EMAIL_MESSAGE);
        assert_eq!(check_password("x").unwrap_err().message, PASSWORD_MESSAGE);
        assert_eq!(
            check_required("Skill name", "  ").unwrap_err().message,
            "Skill name is required."
        );
        assert!(check_required("Skill name", "Rust").is_ok());
    }
}
