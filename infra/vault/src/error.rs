//! # Vault Errors
//!
//! This module defines the [`VaultError`] enum and [`VaultErrorExt`] context
//! helper used throughout the vault crate for reporting cryptographic,
//! configuration, and input failures.

use std::borrow::Cow;

/// A specialized [`VaultError`] enum for vault-related failures.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// Failure during the encryption process.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during the decryption process.
    ///
    /// This usually indicates an incorrect key, a mismatched cryptographic
    /// context (AAD), or tampered data.
    #[error("Decryption error{}: {message}", format_context(.context))]
    Decryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during Postcard serialization or deserialization of sealed records.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization { source: postcard::Error, context: Option<Cow<'static, str>> },

    /// Failure when the vault or builder is incorrectly configured.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure when the provided envelope is malformed or too short.
    #[error("Invalid envelope{}: {message}", format_context(.context))]
    InvalidPayload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Rejected caller input, such as an empty passphrase.
    #[error("Invalid input{}: {message}", format_context(.context))]
    InvalidInput { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal vault error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Attaches human-readable context to vault results.
pub trait VaultErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, VaultError>;
}

impl<T> VaultErrorExt<T> for Result<T, VaultError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                VaultError::Encryption { context: c, .. }
                | VaultError::Decryption { context: c, .. }
                | VaultError::Serialization { context: c, .. }
                | VaultError::InvalidConfiguration { context: c, .. }
                | VaultError::InvalidPayload { context: c, .. }
                | VaultError::InvalidInput { context: c, .. }
                | VaultError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl From<postcard::Error> for VaultError {
    #[inline]
    fn from(source: postcard::Error) -> Self {
        Self::Serialization { source, context: None }
    }
}

impl<T> VaultErrorExt<T> for Result<T, postcard::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, VaultError> {
        self.map_err(|source| VaultError::Serialization { source, context: Some(context.into()) })
    }
}

impl From<&'static str> for VaultError {
    #[inline]
    fn from(s: &'static str) -> Self {
        Self::Internal { message: Cow::Borrowed(s), context: None }
    }
}

impl From<String> for VaultError {
    #[inline]
    fn from(s: String) -> Self {
        Self::Internal { message: Cow::Owned(s), context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_attached_to_existing_errors() {
        let result: Result<(), VaultError> = Err(VaultError::Decryption {
            message: "Decryption failed".into(),
            context: None,
        });

        let err = result.context("unsealing user secret").unwrap_err();
        assert_eq!(err.to_string(), "Decryption error (unsealing user secret): Decryption failed");
    }

    #[test]
    fn display_without_context_has_no_parentheses() {
        let err = VaultError::InvalidPayload { message: "Envelope too short".into(), context: None };
        assert_eq!(err.to_string(), "Invalid envelope: Envelope too short");
    }
}
