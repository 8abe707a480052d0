//! Facade crate for the `PassGuard` credential-protection engine.
//! Re-exports the vault and passwords engines behind a single dependency.
//! Keep this crate thin: it should compose other crates, not implement
//! engine logic.
//!
//! ## Usage
//! - Load [`vault::KeySettings`] and initialize the master key once at
//!   startup; surface [`vault::KeyProvenance::Generated`] in diagnostics.
//! - Build a [`vault::Vault`] and call `encrypt`/`decrypt` around
//!   persistence.
//! - Call the [`passwords`] functions statelessly from any handler.
//!
//! ## Example
//!
//! ```rust
//! use pguard::prelude::*;
//!
//! # fn main() -> Result<(), VaultError> {
//! let (master, _provenance) = MasterKey::initialize(&KeySettings::default())?;
//! let vault = Vault::<Aes>::builder().master_key(&master).build()?;
//!
//! let password = generate(&GeneratorOptions::default());
//! assert!(validate(&password).is_valid);
//!
//! let envelope = vault.encrypt(&password, None)?;
//! assert_eq!(vault.decrypt(&envelope)?, password);
//! # Ok(())
//! # }
//! ```

pub use pguard_passwords as passwords;
pub use pguard_vault as vault;

pub mod prelude {
    pub use pguard_passwords::prelude::*;
    pub use pguard_vault::prelude::*;
}
