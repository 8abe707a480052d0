use crate::engine::{Vault, VaultInner};
use crate::error::VaultError;
use crate::keys::{KEY_LEN, MasterKey, SALT_LEN, derive_key};
use crate::types::{Aes, VaultCipher};
use aead::Key;
use private::Sealed;
use std::marker::PhantomData;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Debug, Default, ZeroizeOnDrop)]
pub struct NoKey;
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct WithKey {
    key: [u8; KEY_LEN],
}

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoKey {}
impl Sealed for WithKey {}

/// A builder for secure initialization of the [`Vault`].
///
/// Implements `ZeroizeOnDrop` to ensure that raw key material is cleared from
/// memory as soon as the builder is no longer needed.
#[allow(private_bounds)]
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct VaultBuilder<C: VaultCipher = Aes, K: Sealed + ZeroizeOnDrop = NoKey> {
    #[zeroize(skip)]
    _cipher: PhantomData<C>,
    key: K,
}

impl<C: VaultCipher> Default for VaultBuilder<C> {
    fn default() -> Self {
        Self { _cipher: PhantomData, key: NoKey }
    }
}

impl<C: VaultCipher> VaultBuilder<C> {
    /// Creates a new empty builder.
    ///
    /// # Results
    /// Returns a fresh [`VaultBuilder`] without key material.
    ///
    /// # Errors
    /// None.
    #[must_use = "Builder must be given a key via `master_key` or `passphrase` before use"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the process master key as the vault key.
    ///
    /// # Results
    /// Returns a [`VaultBuilder`] carrying a copy of the master key bytes.
    ///
    /// # Errors
    /// None.
    #[must_use]
    pub fn master_key(self, master: &MasterKey) -> VaultBuilder<C, WithKey> {
        VaultBuilder { _cipher: PhantomData, key: WithKey { key: *master.as_bytes() } }
    }

    /// Derives the vault key from a passphrase via PBKDF2-HMAC-SHA256.
    ///
    /// See [`derive_key`] for the salt and iteration contract. The salt used
    /// for derivation is returned so the caller can persist it; without it
    /// the same key cannot be derived again.
    ///
    /// # Results
    /// Returns a keyed [`VaultBuilder`] and the derivation salt.
    ///
    /// # Errors
    /// * [`VaultError::InvalidInput`] if the passphrase is empty.
    /// * [`VaultError::Internal`] if the system RNG fails.
    pub fn passphrase(
        self,
        passphrase: &str,
        salt: Option<[u8; SALT_LEN]>,
        iterations: u32,
    ) -> Result<(VaultBuilder<C, WithKey>, [u8; SALT_LEN]), VaultError> {
        let derived = derive_key(passphrase, salt, iterations)?;
        let (key, salt) = (derived.key, derived.salt);

        Ok((VaultBuilder { _cipher: PhantomData, key: WithKey { key } }, salt))
    }
}

impl<C: VaultCipher> VaultBuilder<C, WithKey> {
    /// Finalizes vault construction and `zeroes` the builder.
    ///
    /// # Results
    /// Returns a fully initialized [`Vault`].
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if the key length does
    /// not match the cipher.
    pub fn build(mut self) -> Result<Vault<C>, VaultError> {
        let vault = VaultInner { cipher: Self::init_cipher(&self.key.key)? };

        self.zeroize();

        Ok(Vault { inner: Arc::new(vault) })
    }

    fn init_cipher(key: &[u8; KEY_LEN]) -> Result<C, VaultError> {
        let key = Key::<C>::try_from(&key[..]).map_err(|_| VaultError::InvalidConfiguration {
            message: format!("Invalid key length {}, must be {KEY_LEN} bytes", key.len()).into(),
            context: None,
        })?;
        Ok(C::new(&key))
    }
}
