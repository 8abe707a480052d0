use aead::Nonce;
use aead::inout::InOutBuf;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use getrandom::fill;
use std::sync::Arc;

use crate::builder::VaultBuilder;
use crate::error::{VaultError, VaultErrorExt};
use crate::types::{
    Aes, ENVELOPE_VERSION_V1, Envelope, HEADER_LEN, NONCE_LEN, TAG_LEN, TOKEN_LEN, TOKEN_SEPARATOR,
    VaultCipher, VaultSerde,
};

/// Vault state shared behind the [`Arc`].
#[allow(unreachable_pub)]
#[derive(Debug)]
pub struct VaultInner<C = Aes>
where
    C: VaultCipher,
{
    pub cipher: C,
}

/// A thread-safe container for cryptographic operations on stored secrets.
///
/// `Vault` is the primary interface for encrypting and decrypting secrets.
/// It wraps its cipher state in an [`Arc`], making it cheaply clonable and
/// safe to share across threads or asynchronous tasks; all operations are
/// synchronous, CPU-bound, and lock-free.
///
/// ### Generic Parameters
/// * `C`: The cipher implementation. Defaults to [`Aes`] (AES-256-GCM) for
///   high performance and hardware acceleration support.
///
/// ### Example
/// ```rust
/// use pguard_vault::prelude::*;
///
/// # fn main() -> Result<(), VaultError> {
/// let master = MasterKey::from_secret("master-secret")?;
/// let vault = Vault::<Aes>::builder().master_key(&master).build()?;
///
/// let envelope = vault.encrypt("correct-horse-battery", None)?;
/// assert_eq!(vault.decrypt(&envelope)?, "correct-horse-battery");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Vault<C = Aes>
where
    C: VaultCipher,
{
    pub(crate) inner: Arc<VaultInner<C>>,
}

impl<C: VaultCipher> Clone for Vault<C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C> Vault<C>
where
    C: VaultCipher,
{
    /// Returns a new [`VaultBuilder`] to configure the vault.
    ///
    /// # Results
    /// Returns a new builder instance.
    ///
    /// # Errors
    /// None.
    #[must_use]
    pub fn builder() -> VaultBuilder<C> {
        VaultBuilder::<C>::new()
    }

    /// Generates a fresh random 96-bit nonce.
    #[inline]
    fn next_nonce() -> Result<Nonce<C>, VaultError> {
        let mut nonce = Nonce::<C>::default();
        fill(&mut nonce).map_err(|e| VaultError::Internal {
            message: e.to_string().into(),
            context: Some("System RNG unavailable for nonce generation".into()),
        })?;
        Ok(nonce)
    }

    /// Encrypts a plaintext secret into an opaque printable [`Envelope`].
    ///
    /// An 8-byte random token (rendered as hex) and a `:` separator are
    /// prepended to the plaintext before encryption, so encrypting the same
    /// secret twice never yields related inputs even at the plaintext layer.
    /// The result is URL-safe base64 over
    /// `[V(1)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]`, a single printable
    /// string, safe to store as a text column.
    ///
    /// `owner` is reserved: it is accepted for call-site stability but is not
    /// bound into the authenticated data. Wiring it in would make existing
    /// envelopes undecryptable; see the crate-level documentation.
    ///
    /// # Results
    /// Returns a self-contained [`Envelope`].
    ///
    /// # Errors
    /// * [`VaultError::Encryption`] if the AEAD encryption fails.
    /// * [`VaultError::Internal`] if the system RNG fails.
    pub fn encrypt(&self, plaintext: &str, owner: Option<&str>) -> Result<Envelope, VaultError> {
        let _ = owner;

        let mut token = [0u8; TOKEN_LEN];
        fill(&mut token).map_err(|e| VaultError::Internal {
            message: e.to_string().into(),
            context: Some("System RNG unavailable for token generation".into()),
        })?;

        let mut payload = String::with_capacity(TOKEN_LEN * 2 + 1 + plaintext.len());
        payload.push_str(&hex::encode(token));
        payload.push(TOKEN_SEPARATOR);
        payload.push_str(plaintext);

        let blob = self.encrypt_bytes(payload.as_bytes(), b"")?;
        Ok(Envelope(URL_SAFE_NO_PAD.encode(blob)))
    }

    /// Decrypts an [`Envelope`] back into the original secret.
    ///
    /// Accepts anything string-like, so envelopes read back from storage can
    /// be passed directly. The random token prefix is stripped after
    /// authentication; a payload without a separator is returned whole.
    ///
    /// # Results
    /// Returns the original plaintext.
    ///
    /// # Errors
    /// * [`VaultError::InvalidPayload`] if the envelope is not valid base64,
    ///   is truncated, or carries an unsupported version.
    /// * [`VaultError::Decryption`] if authentication fails: tampered data
    ///   or a wrong key. Never a silently corrupted plaintext.
    pub fn decrypt(&self, envelope: impl AsRef<str>) -> Result<String, VaultError> {
        let blob = URL_SAFE_NO_PAD.decode(envelope.as_ref()).map_err(|_| {
            VaultError::InvalidPayload {
                message: "Envelope is not valid base64".into(),
                context: None,
            }
        })?;

        let payload = self.decrypt_bytes(&blob, b"")?;
        let payload = String::from_utf8(payload).map_err(|_| VaultError::Decryption {
            message: "Decrypted payload is not valid UTF-8".into(),
            context: None,
        })?;

        match payload.split_once(TOKEN_SEPARATOR) {
            Some((_, plaintext)) => Ok(plaintext.to_owned()),
            None => Ok(payload),
        }
    }

    /// Seals a serializable record into an [`Envelope`].
    ///
    /// The record is encoded with `postcard` and its type tag
    /// ([`crate::types::Tagged::TAG`]) is bound as authenticated associated
    /// data, so a sealed record can only be opened as the type that produced
    /// it.
    ///
    /// # Results
    /// Returns a self-contained [`Envelope`].
    ///
    /// # Errors
    /// * [`VaultError::Serialization`] if the value cannot be encoded.
    /// * [`VaultError::Encryption`] if the AEAD encryption fails.
    pub fn seal<T>(&self, value: &T) -> Result<Envelope, VaultError>
    where
        T: VaultSerde,
    {
        let bytes = postcard::to_stdvec(value).context("Postcard encoding failed")?;
        let blob = self.encrypt_bytes(&bytes, T::TAG.as_bytes())?;
        Ok(Envelope(URL_SAFE_NO_PAD.encode(blob)))
    }

    /// Opens a sealed record produced by [`Vault::seal`].
    ///
    /// # Results
    /// Returns the decoded record.
    ///
    /// # Errors
    /// * [`VaultError::InvalidPayload`] if the envelope is malformed.
    /// * [`VaultError::Decryption`] if the tag, key, or data is invalid.
    /// * [`VaultError::Serialization`] if the decrypted bytes cannot be
    ///   parsed.
    pub fn open<T>(&self, envelope: impl AsRef<str>) -> Result<T, VaultError>
    where
        T: VaultSerde,
    {
        let blob = URL_SAFE_NO_PAD.decode(envelope.as_ref()).map_err(|_| {
            VaultError::InvalidPayload {
                message: "Envelope is not valid base64".into(),
                context: None,
            }
        })?;

        let bytes = self.decrypt_bytes(&blob, T::TAG.as_bytes())?;
        postcard::from_bytes(&bytes).context("Postcard decoding failed")
    }

    fn encrypt_bytes(&self, data: &[u8], aad: &[u8]) -> Result<Vec<u8>, VaultError> {
        let nonce = Self::next_nonce()?;

        let mut buf = Vec::with_capacity(HEADER_LEN + NONCE_LEN + data.len() + TAG_LEN);
        buf.push(ENVELOPE_VERSION_V1);
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(data);

        let (_hdr, rest) = buf.split_at_mut(HEADER_LEN);
        let (_nonce_part, data_part) = rest.split_at_mut(nonce.len());
        let in_out = InOutBuf::from(data_part);

        let tag = self.inner.cipher.encrypt_inout_detached(&nonce, aad, in_out).map_err(|_| {
            VaultError::Encryption {
                message: "Encryption failed".into(),
                context: Some("AEAD encryption failed".into()),
            }
        })?;

        buf.extend_from_slice(tag.as_slice());
        Ok(buf)
    }

    fn decrypt_bytes(&self, blob: &[u8], aad: &[u8]) -> Result<Vec<u8>, VaultError> {
        if blob.len() < (HEADER_LEN + NONCE_LEN + TAG_LEN) {
            return Err(VaultError::InvalidPayload {
                message: format!(
                    "Envelope too short ({} bytes). Expected at least {} bytes",
                    blob.len(),
                    HEADER_LEN + NONCE_LEN + TAG_LEN
                )
                .into(),
                context: None,
            });
        }

        let version = blob[0];
        if version != ENVELOPE_VERSION_V1 {
            return Err(VaultError::InvalidPayload {
                message: "Unsupported envelope version".into(),
                context: Some(format!("version={version}").into()),
            });
        }

        let rest = &blob[HEADER_LEN..];
        let (nonce_slice, rest) = rest.split_at(NONCE_LEN);
        let (ciphertext, tag_slice) = rest.split_at(rest.len() - TAG_LEN);

        let nonce = nonce_slice.try_into().map_err(|_| VaultError::Decryption {
            message: "Invalid nonce length".into(),
            context: None,
        })?;

        let tag = tag_slice.try_into().map_err(|_| VaultError::Decryption {
            message: "Invalid tag length".into(),
            context: None,
        })?;

        let mut buf = ciphertext.to_vec();
        let in_out = InOutBuf::from(&mut buf[..]);

        self.inner.cipher.decrypt_inout_detached(&nonce, aad, in_out, &tag).map_err(|_| {
            VaultError::Decryption {
                message: "Decryption failed".into(),
                context: Some("AEAD authentication failed".into()),
            }
        })?;

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn setup_vault() -> Vault<ChaCha> {
        let master = MasterKey::from_secret("engine-test-secret").unwrap();
        Vault::builder().master_key(&master).build().expect("Vault should build")
    }

    #[test]
    fn test_vault_builder() {
        let master = MasterKey::from_secret("master").unwrap();
        let vault = Vault::<ChaCha>::builder().master_key(&master).build();
        assert!(vault.is_ok(), "Vault should build from a master key");
    }

    #[test]
    fn test_nonce_uniqueness() {
        let n1 = Vault::<ChaCha>::next_nonce().unwrap();
        let n2 = Vault::<ChaCha>::next_nonce().unwrap();

        assert_ne!(n1, n2);
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let vault = setup_vault();

        let envelope = vault.encrypt("s3cr3t-value", None).unwrap();
        assert_eq!(vault.decrypt(&envelope).unwrap(), "s3cr3t-value");
    }

    #[test]
    fn test_encrypt_is_nondeterministic() {
        let vault = setup_vault();

        let a = vault.encrypt("same-plaintext", None).unwrap();
        let b = vault.encrypt("same-plaintext", None).unwrap();

        assert_ne!(a, b, "two envelopes of the same plaintext must differ");
    }

    #[test]
    fn test_plaintext_with_separator_survives_roundtrip() {
        let vault = setup_vault();

        let plaintext = "left:right:rest";
        let envelope = vault.encrypt(plaintext, None).unwrap();
        assert_eq!(vault.decrypt(&envelope).unwrap(), plaintext);
    }

    #[test]
    fn test_decrypt_fails_with_wrong_key() {
        let vault = setup_vault();
        let envelope = vault.encrypt("data", None).unwrap();

        let other_master = MasterKey::from_secret("a-different-secret").unwrap();
        let other: Vault<ChaCha> = Vault::builder().master_key(&other_master).build().unwrap();

        let result = other.decrypt(&envelope);
        assert!(matches!(result, Err(VaultError::Decryption { .. })));
    }

    #[test]
    fn test_decrypt_rejects_garbage() {
        let vault = setup_vault();

        assert!(matches!(
            vault.decrypt("not base64 at all!"),
            Err(VaultError::InvalidPayload { .. })
        ));
        assert!(matches!(vault.decrypt("QUJD"), Err(VaultError::InvalidPayload { .. })));
    }
}
