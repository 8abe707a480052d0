//! # Policy Validation
//!
//! Hard pass/fail validation against a fixed policy and a common-password
//! denylist.
//!
//! Unlike the generator, nothing here is lenient: out-of-policy input is
//! reported as issues, never clamped or defaulted away.

use crate::pool::{has_digit, has_lower, has_special, has_upper};
use serde::{Deserialize, Serialize};

/// Minimum acceptable password length.
pub const MIN_LENGTH: usize = 8;

/// Passwords seen so often in breach corpora that they are rejected outright.
const COMMON_PASSWORDS: [&str; 29] = [
    "password",
    "123456",
    "12345678",
    "qwerty",
    "abc123",
    "monkey",
    "letmein",
    "trustno1",
    "dragon",
    "baseball",
    "iloveyou",
    "master",
    "sunshine",
    "ashley",
    "bailey",
    "passw0rd",
    "shadow",
    "superman",
    "qazwsx",
    "michael",
    "football",
    "welcome",
    "jesus",
    "ninja",
    "mustang",
    "password123",
    "123123",
    "1234567890",
    "admin",
];

/// Outcome of policy validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` when no rule was violated.
    pub is_valid: bool,
    /// Violated rules in check order, empty when valid.
    pub issues: Vec<String>,
}

/// Checks the password against the denylist, case-insensitively.
#[must_use]
pub fn is_common_password(password: &str) -> bool {
    let lowered = password.to_lowercase();
    COMMON_PASSWORDS.iter().any(|common| *common == lowered)
}

/// Validates a password against the fixed policy.
///
/// Issues are appended in a fixed order: length, denylist membership, then
/// the four required character classes.
#[must_use]
pub fn validate(password: &str) -> ValidationResult {
    let mut issues = Vec::new();

    if password.chars().count() < MIN_LENGTH {
        issues.push("Password must be at least 8 characters long".to_owned());
    }
    if is_common_password(password) {
        issues.push("This password is too common".to_owned());
    }
    if !has_upper(password) {
        issues.push("Password must contain uppercase letters".to_owned());
    }
    if !has_lower(password) {
        issues.push("Password must contain lowercase letters".to_owned());
    }
    if !has_digit(password) {
        issues.push("Password must contain numbers".to_owned());
    }
    if !has_special(password) {
        issues.push("Password must contain special characters".to_owned());
    }

    ValidationResult { is_valid: issues.is_empty(), issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_passwords_are_rejected_case_insensitively() {
        assert!(is_common_password("password"));
        assert!(is_common_password("PASSWORD"));
        assert!(is_common_password("Passw0rd"));
        assert!(!is_common_password("uncommon-unique-phrase"));
    }

    #[test]
    fn denylisted_password_reports_the_common_issue() {
        let result = validate("password");

        assert!(!result.is_valid);
        assert!(result.issues.contains(&"This password is too common".to_owned()));
    }

    #[test]
    fn issues_appear_in_check_order() {
        let result = validate("abc");

        assert_eq!(
            result.issues,
            vec![
                "Password must be at least 8 characters long".to_owned(),
                "Password must contain uppercase letters".to_owned(),
                "Password must contain numbers".to_owned(),
                "Password must contain special characters".to_owned(),
            ]
        );
    }

    #[test]
    fn compliant_password_is_valid() {
        let result = validate("Str0ng!Passphrase");

        assert!(result.is_valid);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn validator_never_clamps() {
        // The generator would clamp a 3-character request; the validator
        // reports it instead.
        let result = validate("Ab1!");
        assert!(!result.is_valid);
        assert_eq!(result.issues, vec!["Password must be at least 8 characters long".to_owned()]);
    }
}
