//! # Vault Extensions
//!
//! This module provides the [`Sealable`] extension trait, which simplifies
//! the process of sealing serializable records into encrypted envelopes.
//!
//! By using this trait, you can call cryptographic methods directly on your
//! data structures, reducing boilerplate and ensuring consistent use of type
//! tags as cryptographic contexts.

use crate::engine::Vault;
use crate::error::VaultError;
use crate::types::{Envelope, VaultCipher, VaultSerde};

/// An extension trait for tagged types to provide ergonomic sealing.
///
/// This trait is automatically implemented for any type that implements
/// [`serde::Serialize`], [`serde::de::DeserializeOwned`], and
/// [`crate::types::Tagged`].
pub trait Sealable: VaultSerde {
    /// Seals the record into an [`Envelope`].
    ///
    /// The type tag is bound as authenticated associated data, so the sealed
    /// record can only be opened as the type that produced it.
    ///
    /// # Results
    /// Returns a self-contained printable [`Envelope`].
    ///
    /// # Errors
    /// * [`VaultError::Serialization`] if the record cannot be encoded.
    /// * [`VaultError::Encryption`] if the AEAD cipher fails.
    fn seal<C>(&self, vault: &Vault<C>) -> Result<Envelope, VaultError>
    where
        C: VaultCipher,
        Self: Sized,
    {
        vault.seal(self)
    }

    /// Opens a sealed [`Envelope`] back into the original type.
    ///
    /// # Results
    /// Returns the decoded record.
    ///
    /// # Errors
    /// * [`VaultError::Decryption`] if the tag, key, or data is invalid.
    /// * [`VaultError::Serialization`] if the decrypted bytes cannot be
    ///   parsed.
    fn open<C>(vault: &Vault<C>, envelope: &Envelope) -> Result<Self, VaultError>
    where
        C: VaultCipher,
        Self: Sized,
    {
        vault.open(envelope)
    }
}

impl<T: VaultSerde> Sealable for T {}
