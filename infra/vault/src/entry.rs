//! # Secret Entries
//!
//! A typed credential record with the sanitization and validation rules the
//! storage layer expects. Entries are sealable as a single envelope via
//! [`Vault::seal`](crate::Vault::seal) or the
//! [`Sealable`](crate::extensions::Sealable) extension.

use crate::error::VaultError;
use crate::types::Tagged;
use serde::{Deserialize, Serialize};

const MAX_SERVICE_NAME: usize = 120;
const MAX_USERNAME: usize = 120;
const MAX_URL: usize = 255;
const MAX_NOTES: usize = 1000;

/// A single credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretEntry {
    /// The service this credential belongs to.
    pub service_name: String,
    /// Account name at the service.
    pub username: String,
    /// The secret itself, stored verbatim.
    pub password: String,
    /// Optional service URL.
    pub url: Option<String>,
    /// Optional free-form notes.
    pub notes: Option<String>,
}

impl Tagged for SecretEntry {
    const TAG: &'static str = "v1.secret_entry";
}

impl SecretEntry {
    /// Returns a copy with surrounding whitespace trimmed from text fields
    /// and empty optional fields normalized to `None`.
    ///
    /// The password is kept verbatim: leading or trailing whitespace may be
    /// intentional there.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            service_name: self.service_name.trim().to_owned(),
            username: self.username.trim().to_owned(),
            password: self.password.clone(),
            url: normalize(self.url.as_deref()),
            notes: normalize(self.notes.as_deref()),
        }
    }

    /// Validates required fields and length caps.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidInput`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.service_name.is_empty() {
            return Err(invalid("Missing required field: service_name"));
        }
        if self.username.is_empty() {
            return Err(invalid("Missing required field: username"));
        }
        if self.password.is_empty() {
            return Err(invalid("Password cannot be empty"));
        }
        if self.service_name.chars().count() > MAX_SERVICE_NAME {
            return Err(invalid("Service name too long (max 120 characters)"));
        }
        if self.username.chars().count() > MAX_USERNAME {
            return Err(invalid("Username too long (max 120 characters)"));
        }
        if self.url.as_deref().is_some_and(|url| url.chars().count() > MAX_URL) {
            return Err(invalid("URL too long (max 255 characters)"));
        }
        if self.notes.as_deref().is_some_and(|notes| notes.chars().count() > MAX_NOTES) {
            return Err(invalid("Notes too long (max 1000 characters)"));
        }

        Ok(())
    }
}

fn normalize(field: Option<&str>) -> Option<String> {
    field.map(str::trim).filter(|s| !s.is_empty()).map(ToOwned::to_owned)
}

fn invalid(message: &'static str) -> VaultError {
    VaultError::InvalidInput { message: message.into(), context: Some("Entry validation".into()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> SecretEntry {
        SecretEntry {
            service_name: "example.com".to_owned(),
            username: "ada".to_owned(),
            password: "correct-horse-battery".to_owned(),
            url: Some("https://example.com/login".to_owned()),
            notes: None,
        }
    }

    #[test]
    fn valid_entry_passes() {
        assert!(sample_entry().validate().is_ok());
    }

    #[test]
    fn missing_required_fields_are_rejected_in_order() {
        let mut entry = sample_entry();
        entry.service_name.clear();
        entry.username.clear();

        let err = entry.validate().unwrap_err();
        assert!(err.to_string().contains("service_name"));
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let mut entry = sample_entry();
        entry.notes = Some("x".repeat(1001));

        let err = entry.validate().unwrap_err();
        assert!(matches!(err, VaultError::InvalidInput { .. }));
    }

    #[test]
    fn sanitize_trims_text_and_normalizes_empty_options() {
        let entry = SecretEntry {
            service_name: "  example.com  ".to_owned(),
            username: " ada ".to_owned(),
            password: "  spaces kept  ".to_owned(),
            url: Some("   ".to_owned()),
            notes: Some(" note ".to_owned()),
        };

        let clean = entry.sanitized();
        assert_eq!(clean.service_name, "example.com");
        assert_eq!(clean.username, "ada");
        assert_eq!(clean.password, "  spaces kept  ");
        assert_eq!(clean.url, None);
        assert_eq!(clean.notes, Some("note".to_owned()));
    }
}
