use pguard_vault::prelude::*;
use serde::{Deserialize, Serialize};

/// A small tagged record for sealing tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureConfig {
    pub db_password: String,
    pub api_key: String,
}

impl Tagged for SecureConfig {
    const TAG: &'static str = "SecureConfig";
}

/// Initializes a vault with a fixed master secret for testing.
///
/// # Panics
/// * If vault setup fails, the function will panic.
#[must_use]
pub fn setup_vault() -> Vault {
    let master = MasterKey::from_secret("master-secret-123").expect("Master key expansion failed");
    Vault::builder().master_key(&master).build().expect("Vault setup failed")
}
