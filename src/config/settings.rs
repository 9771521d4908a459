use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{LockboxError, Result};

/// Length of a generated salt, in characters.
const SALT_LEN: usize = 32;

/// Vault configuration, stored as `<vault_dir>/config.toml`.
///
/// The salt is required to re-derive the key: losing it makes the vault
/// unrecoverable, so `init` prints it for safekeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Per-vault salt mixed into key derivation.
    pub salt: String,

    /// Seconds of inactivity before an unlocked session locks itself.
    #[serde(default = "default_auto_lock_ttl")]
    pub auto_lock_ttl: u64,

    /// Seconds a copied password stays on the clipboard.
    #[serde(default = "default_clipboard_ttl")]
    pub clipboard_ttl: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_auto_lock_ttl() -> u64 {
    300 // 5 minutes
}

fn default_clipboard_ttl() -> u64 {
    15
}

// ── Implementation ───────────────────────────────────────────────────

impl Settings {
    /// Name of the config file inside the vault directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Name of the encrypted vault file inside the vault directory.
    const VAULT_FILE_NAME: &'static str = "secrets.vault";

    /// Fresh settings with the given salt and default timers.
    pub fn with_salt(salt: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            auto_lock_ttl: default_auto_lock_ttl(),
            clipboard_ttl: default_clipboard_ttl(),
        }
    }

    /// Load and validate `<vault_dir>/config.toml`.
    ///
    /// A missing file is an error: without the salt the vault cannot be
    /// opened.
    pub fn load(vault_dir: &Path) -> Result<Self> {
        let config_path = Self::config_path(vault_dir);

        if !config_path.exists() {
            return Err(LockboxError::ConfigError(format!(
                "{} not found — run `lockbox init` first",
                config_path.display()
            )));
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LockboxError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Write a new config file, generating a salt unless one is given.
    ///
    /// Refuses to overwrite an existing config.
    pub fn init(vault_dir: &Path, salt: Option<&str>) -> Result<Self> {
        let config_path = Self::config_path(vault_dir);
        if config_path.exists() {
            return Err(LockboxError::ConfigError(format!(
                "{} already exists",
                config_path.display()
            )));
        }

        let settings = Self::prepare(salt)?;
        settings.save(vault_dir)?;
        Ok(settings)
    }

    /// Validated settings for a new vault, not yet written to disk.
    ///
    /// A salt is generated unless one is given.
    pub fn prepare(salt: Option<&str>) -> Result<Self> {
        let settings = Self::with_salt(salt.map_or_else(generate_salt, str::to_string));
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to `<vault_dir>/config.toml`.
    pub fn save(&self, vault_dir: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| LockboxError::SerializationError(format!("config: {e}")))?;
        std::fs::create_dir_all(vault_dir)?;
        std::fs::write(Self::config_path(vault_dir), contents)?;
        Ok(())
    }

    /// Reject values that would make the vault unusable.
    pub fn validate(&self) -> Result<()> {
        if self.salt.is_empty() {
            return Err(LockboxError::ConfigError("salt cannot be empty".into()));
        }
        if self.auto_lock_ttl == 0 {
            return Err(LockboxError::ConfigError(
                "auto_lock_ttl must be at least 1 second".into(),
            ));
        }
        Ok(())
    }

    pub fn config_path(vault_dir: &Path) -> PathBuf {
        vault_dir.join(Self::FILE_NAME)
    }

    /// Build the full path to the vault file.
    ///
    /// Example: `~/.lockbox/secrets.vault`
    pub fn vault_path(vault_dir: &Path) -> PathBuf {
        vault_dir.join(Self::VAULT_FILE_NAME)
    }

    pub fn auto_lock_ttl(&self) -> Duration {
        Duration::from_secs(self.auto_lock_ttl)
    }

    pub fn clipboard_ttl(&self) -> Duration {
        Duration::from_secs(self.clipboard_ttl)
    }
}

/// Generate a random alphanumeric salt.
pub fn generate_salt() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────
