//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - AES-EAX authenticated encryption and decryption (`encryption`)
//! - Iterated SHA-256 passphrase key derivation (`kdf`)
//! - The zeroizing `DerivedKey` wrapper (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt, EncryptedBlob, NONCE_LEN, TAG_LEN};
pub use kdf::derive_key;
pub use keys::{DerivedKey, KEY_LEN};
