//! A thread-safe cryptographic vault for stored secrets.
//!
//! This crate provides authenticated encryption for secret strings and typed
//! records, plus master-key management and passphrase key derivation.
//!
//! ## Envelope Format
//!
//! Encrypted secrets are emitted as URL-safe base64 (no padding) over a
//! binary blob with an explicit header:
//!
//! ```text
//! [V(1)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! The header enables forward-compatible upgrades; everything needed for
//! decryption besides the key travels inside the envelope, so it can be
//! stored as an opaque text column.
//!
//! Before encryption, an 8-byte random token (hex) and a `:` separator are
//! prepended to the plaintext. Two encryptions of the same secret therefore
//! differ at the plaintext layer as well as through the AEAD nonce. The
//! token is logically redundant with the nonce but is part of the stored
//! format contract; `decrypt` strips it by splitting once on `:`.
//!
//! ## Nonce Policy
//!
//! Every encryption uses a **random 96-bit nonce**. This is the standard
//! approach for `AES-GCM` and `ChaCha20Poly1305`, but it is probabilistic.
//! If you expect extremely high-volume encryption per key, consider a
//! stricter nonce strategy and rotate keys appropriately.
//!
//! ## Known Limitation: Caller Context
//!
//! [`Vault::encrypt`] accepts an `owner` parameter that is **not** bound
//! into the authenticated data. Binding it would prevent cross-owner
//! envelope swapping, but would also make every existing envelope
//! undecryptable, so the parameter stays reserved. Typed record sealing
//! ([`Vault::seal`]) is a newer surface and does bind the record's type tag
//! as associated data.
//!
//! ## Ephemeral Keys
//!
//! [`MasterKey::initialize`] falls back to a generated key when no secret is
//! configured. That state is observable (a `tracing` warning plus
//! [`KeyProvenance::Generated`]) because secrets encrypted under an
//! ephemeral key do not survive a process restart.
//!
//! ## Examples
//!
//! ```rust
//! use pguard_vault::prelude::*;
//!
//! # fn main() -> Result<(), VaultError> {
//! let (master, provenance) = MasterKey::initialize(&KeySettings::default())?;
//! assert_eq!(provenance, KeyProvenance::Generated);
//!
//! let vault = Vault::<Aes>::builder().master_key(&master).build()?;
//!
//! let envelope = vault.encrypt("correct-horse-battery", None)?;
//! assert_eq!(vault.decrypt(&envelope)?, "correct-horse-battery");
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod entry;
mod error;
pub mod extensions;
pub mod keys;
mod types;

pub use builder::VaultBuilder;
pub use engine::Vault;
pub use entry::SecretEntry;
pub use error::{VaultError, VaultErrorExt};
pub use keys::{DerivedKey, KeyProvenance, KeySettings, MasterKey, derive_key};
pub use types::{Envelope, Tagged, VaultSerde};

pub mod prelude {
    pub use crate::builder::VaultBuilder;
    pub use crate::engine::Vault;
    pub use crate::entry::SecretEntry;
    pub use crate::error::{VaultError, VaultErrorExt};
    pub use crate::extensions::Sealable;
    pub use crate::keys::{DerivedKey, KeyProvenance, KeySettings, MasterKey, derive_key};
    pub use crate::types::{Aes, ChaCha, Envelope, Tagged};
}

pub mod algorithms {
    pub use crate::types::{Aes, ChaCha, VaultCipher};
}
