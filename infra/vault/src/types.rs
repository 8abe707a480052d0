use aead::{AeadInOut, KeyInit};
use aes_gcm::Aes256Gcm;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chacha20poly1305::ChaCha20Poly1305;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// --- Aliases ---

pub type Aes = Aes256Gcm;
pub type ChaCha = ChaCha20Poly1305;

pub trait VaultCipher: AeadInOut + KeyInit + 'static {}
impl<T: AeadInOut + KeyInit + 'static> VaultCipher for T {}

// --- Envelope format constants ---

/// Envelope format version.
pub(crate) const ENVELOPE_VERSION_V1: u8 = 1;

/// Header layout: `[version: u8]`
pub(crate) const HEADER_LEN: usize = 1;

/// AEAD nonce length (96-bit).
pub(crate) const NONCE_LEN: usize = 12;

/// AEAD tag length (128-bit).
pub(crate) const TAG_LEN: usize = 16;

/// Length in bytes of the random token mixed into the plaintext.
pub(crate) const TOKEN_LEN: usize = 8;

/// Separator between the hex-rendered token and the plaintext.
pub(crate) const TOKEN_SEPARATOR: char = ':';

// --- Container ---

/// An opaque, printable container for an encrypted secret.
///
/// The envelope is URL-safe base64 over the following memory layout:
///
/// ```text
/// [V(1)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]
/// ```
///
/// - `V` is the envelope format version.
/// - Everything required for decryption besides the key travels inside the
///   envelope; it is safe to store as a text column and replaced wholesale on
///   every update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Envelope(pub(crate) String);

impl Envelope {
    /// Returns the envelope as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the envelope and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the envelope format version, if the payload is decodable.
    #[must_use]
    pub fn version(&self) -> Option<u8> {
        URL_SAFE_NO_PAD.decode(&self.0).ok()?.first().copied()
    }
}

impl AsRef<str> for Envelope {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Envelope {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// --- Sealing ---

/// Names the stable type tag bound into sealed records.
pub trait Tagged {
    const TAG: &'static str;
}

/// Marker trait for types that support vault sealing.
pub trait VaultSerde: Serialize + DeserializeOwned + Tagged {}

impl<T: Serialize + DeserializeOwned + Tagged> VaultSerde for T {}
