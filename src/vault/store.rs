//! Loading and saving the encrypted vault file.
//!
//! `VaultStore` ties the JSON document, the cipher and the file layout
//! together.  It holds no key: callers pass the session's derived key on
//! every call.

use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroize;

use crate::crypto::{decrypt, encrypt, DerivedKey};
use crate::errors::{LockboxError, Result};

use super::format;
use super::model::Vault;

/// Handle to the vault file on disk.
#[derive(Debug, Clone)]
pub struct VaultStore {
    path: PathBuf,
}

impl VaultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write a brand-new empty vault and return it.
    ///
    /// Refuses to overwrite an existing file.
    pub fn create(&self, key: &DerivedKey) -> Result<Vault> {
        if self.exists() {
            return Err(LockboxError::VaultAlreadyExists(self.path.clone()));
        }
        let vault = Vault::new();
        self.save(key, &vault)?;
        Ok(vault)
    }

    /// Read, authenticate, decrypt and parse the vault file.
    ///
    /// A bad key or a tampered file yields `AuthenticationFailed`; a
    /// payload that decrypts but is not a vault document yields
    /// `VaultCorrupt`.
    pub fn load(&self, key: &DerivedKey) -> Result<Vault> {
        let data = format::read_file(&self.path)?;
        let blob = format::decode(&data)?;

        let mut plaintext = decrypt(key, &blob)?;
        let parsed = serde_json::from_slice::<Vault>(&plaintext);
        plaintext.zeroize();

        let vault = parsed.map_err(|e| LockboxError::VaultCorrupt(e.to_string()))?;
        debug!(
            path = %self.path.display(),
            secrets = vault.secrets.len(),
            categories = vault.categories.len(),
            "vault loaded"
        );
        Ok(vault)
    }

    /// Serialize, encrypt with a fresh nonce and atomically replace the file.
    pub fn save(&self, key: &DerivedKey, vault: &Vault) -> Result<()> {
        let mut plaintext = serde_json::to_vec(vault)
            .map_err(|e| LockboxError::SerializationError(format!("vault: {e}")))?;
        let sealed = encrypt(key, &plaintext);
        plaintext.zeroize();

        format::write_file_atomic(&self.path, &format::encode(&sealed?))?;
        debug!(
            path = %self.path.display(),
            secrets = vault.secrets.len(),
            categories = vault.categories.len(),
            "vault saved"
        );
        Ok(())
    }
}
