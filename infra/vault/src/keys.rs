//! # Key Material
//!
//! Master-key initialization and passphrase key derivation.
//!
//! The master key is process-wide: loaded from a configured secret when one
//! is present, generated fresh otherwise. A generated key is never persisted,
//! so every envelope encrypted under it becomes permanently undecryptable
//! after a restart. Initialization reports that state through
//! [`KeyProvenance`] and a `tracing` warning instead of hiding it.
//!
//! Passphrase-derived keys use PBKDF2-HMAC-SHA256 with a 16-byte salt. The
//! salt must be persisted by the caller; it is required to re-derive the same
//! key.

use crate::error::VaultError;
use config::{Config, Environment};
use getrandom::fill;
use hkdf::Hkdf;
use pbkdf2::pbkdf2_hmac;
use serde::Deserialize;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key length for the AEAD ciphers (`AES-256-GCM` / `ChaCha20Poly1305`).
pub const KEY_LEN: usize = 32;

/// Salt length for passphrase derivation.
pub const SALT_LEN: usize = 16;

/// Lower bound for PBKDF2 iteration counts.
///
/// The count is a security parameter: configured values below the floor are
/// raised to it rather than silently weakening the derivation.
pub const MIN_KDF_ITERATIONS: u32 = 100_000;

const ENV_PREFIX: &str = "PGUARD";
const ENV_SEPARATOR: &str = "__";

const MASTER_SALT: &[u8] = b"pguard.master";
const MASTER_INFO: &[u8] = b"v1_master:";

/// Engine settings consumed from the environment.
///
/// * `PGUARD__MASTER_KEY`: master key secret. When absent, an ephemeral key
///   is generated at startup.
/// * `PGUARD__KDF_ITERATIONS`: PBKDF2 iteration count, floored at
///   [`MIN_KDF_ITERATIONS`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    pub master_key: Option<String>,
    pub kdf_iterations: u32,
}

impl Default for KeySettings {
    fn default() -> Self {
        Self { master_key: None, kdf_iterations: MIN_KDF_ITERATIONS }
    }
}

impl KeySettings {
    /// Loads settings from `PGUARD__*` environment variables.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if the environment holds
    /// values that cannot be deserialized (e.g., a non-numeric iteration
    /// count).
    pub fn load() -> Result<Self, VaultError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .convert_case(config::Case::Snake),
            )
            .build()
            .map_err(|e| VaultError::InvalidConfiguration {
                message: e.to_string().into(),
                context: Some("Failed to read environment".into()),
            })?;

        config.try_deserialize::<Self>().map_err(|e| VaultError::InvalidConfiguration {
            message: e.to_string().into(),
            context: Some("Failed to deserialize settings".into()),
        })
    }

    /// Effective PBKDF2 iteration count, never below [`MIN_KDF_ITERATIONS`].
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        if self.kdf_iterations < MIN_KDF_ITERATIONS {
            MIN_KDF_ITERATIONS
        } else {
            self.kdf_iterations
        }
    }
}

/// How the process master key came to exist.
///
/// [`KeyProvenance::Generated`] keys live only as long as the process:
/// envelopes encrypted under one cannot be decrypted after a restart. Callers
/// should surface that state in their own startup diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyProvenance {
    /// Key material was expanded from a configured secret.
    Loaded,
    /// No secret was configured; a fresh random key was generated.
    Generated,
}

/// The process-wide master symmetric key.
///
/// Write-once at startup, read-only afterwards; safe to share across any
/// number of threads. Key bytes are zeroed when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_LEN]);

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must never reach logs.
        f.write_str("MasterKey(..)")
    }
}

impl MasterKey {
    /// Initializes the master key from settings.
    ///
    /// A configured secret is expanded deterministically, so every process
    /// sharing the secret derives the same key. Without a configured secret,
    /// a random key is generated and a warning is emitted: secrets encrypted
    /// under it will not survive a restart.
    ///
    /// # Errors
    /// * [`VaultError::InvalidConfiguration`] if key expansion fails.
    /// * [`VaultError::Internal`] if the system RNG fails while generating an
    ///   ephemeral key.
    pub fn initialize(settings: &KeySettings) -> Result<(Self, KeyProvenance), VaultError> {
        match settings.master_key.as_deref() {
            Some(secret) if !secret.is_empty() => {
                Ok((Self::from_secret(secret)?, KeyProvenance::Loaded))
            },
            _ => {
                let key = Self::generate()?;
                tracing::warn!(
                    provenance = "generated",
                    "No master key configured; generated an ephemeral key. Secrets \
                     encrypted under it become undecryptable after restart"
                );
                Ok((key, KeyProvenance::Generated))
            },
        }
    }

    /// Expands a secret string into key bytes using HKDF-SHA256.
    ///
    /// Deterministic: the same secret always yields the same key.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if the HKDF expansion
    /// fails.
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Result<Self, VaultError> {
        let (_, hk) = Hkdf::<Sha256>::extract(Some(MASTER_SALT), secret.as_ref());
        let mut key = [0u8; KEY_LEN];

        hk.expand(MASTER_INFO, &mut key).map_err(|_| VaultError::InvalidConfiguration {
            message: "HKDF expansion failed for master key".into(),
            context: None,
        })?;

        Ok(Self(key))
    }

    /// Generates a fresh random key from the OS CSPRNG.
    ///
    /// # Errors
    /// Returns [`VaultError::Internal`] if the system entropy source fails.
    pub fn generate() -> Result<Self, VaultError> {
        let mut key = [0u8; KEY_LEN];
        fill(&mut key).map_err(|e| VaultError::Internal {
            message: e.to_string().into(),
            context: Some("Failed to generate master key".into()),
        })?;
        Ok(Self(key))
    }

    pub(crate) const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// A passphrase-derived key plus the salt required to re-derive it.
///
/// The caller must persist the salt alongside whatever the key protects. Key
/// bytes are zeroed on drop; the salt is not secret.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    pub key: [u8; KEY_LEN],
    #[zeroize(skip)]
    pub salt: [u8; SALT_LEN],
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").field("key", &"..").field("salt", &self.salt).finish()
    }
}

/// Derives a 32-byte key from a passphrase using PBKDF2-HMAC-SHA256.
///
/// A fresh 16-byte salt is generated when `salt` is `None`. Derivation is
/// deterministic for equal `(passphrase, salt, iterations)`; different salts
/// yield independent keys. Iteration counts below [`MIN_KDF_ITERATIONS`] are
/// raised to the floor.
///
/// # Errors
/// * [`VaultError::InvalidInput`] if the passphrase is empty.
/// * [`VaultError::Internal`] if the system RNG fails while generating a salt.
pub fn derive_key(
    passphrase: &str,
    salt: Option<[u8; SALT_LEN]>,
    iterations: u32,
) -> Result<DerivedKey, VaultError> {
    if passphrase.is_empty() {
        return Err(VaultError::InvalidInput {
            message: "Passphrase must not be empty".into(),
            context: Some("Key derivation".into()),
        });
    }

    let salt = match salt {
        Some(salt) => salt,
        None => {
            let mut salt = [0u8; SALT_LEN];
            fill(&mut salt).map_err(|e| VaultError::Internal {
                message: e.to_string().into(),
                context: Some("Failed to generate salt".into()),
            })?;
            salt
        },
    };

    let rounds = iterations.max(MIN_KDF_ITERATIONS);
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), &salt, rounds, &mut key);

    Ok(DerivedKey { key, salt })
}
