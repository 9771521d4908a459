use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Lockbox.
#[derive(Debug, Error)]
pub enum LockboxError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed — wrong master key or corrupted vault file")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Vault is corrupt: {0}")]
    VaultCorrupt(String),

    #[error("Secret #{0} does not exist")]
    SecretNotFound(usize),

    #[error("Category #{0} does not exist")]
    CategoryNotFound(usize),

    #[error("Category #{0} cannot be deleted because it is used by some secrets")]
    CategoryInUse(usize),

    // --- Session errors ---
    #[error("Vault is locked — unlock it with the master key first")]
    Locked,

    #[error("The vault has been locked due to inactivity")]
    SessionExpired,

    #[error("Vault cannot be opened after {0} failed attempts")]
    TooManyAttempts(u32),

    // --- Validation errors ---
    #[error("{0}")]
    Validation(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),
}

/// Convenience type alias for Lockbox results.
pub type Result<T> = std::result::Result<T, LockboxError>;
