//! Passphrase-based key derivation.
//!
//! The scheme is an iterated SHA-256: a single hash state absorbs
//! `"{i}{salt}{passphrase}"` for `i` in `1..=9999`, the lowercase hex
//! digest is truncated to 32 characters, and those characters are
//! base64-decoded into the key.
//!
//! This is **not** a standard KDF.  It is kept bit-for-bit so that vault
//! files written by earlier releases still open.  Replacing it with
//! Argon2id would need a versioned file format.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroize;

use super::keys::{DerivedKey, KEY_LEN};
use crate::errors::{LockboxError, Result};

/// Number of hash updates (the counter runs from 1 to 9999 inclusive).
pub const KDF_ROUNDS: u32 = 9_999;

/// Number of hex digest characters fed to the base64 decoder.
const HEX_PREFIX_LEN: usize = 32;

/// Derive the vault key from a passphrase and the per-vault salt.
///
/// The same passphrase + salt always produce the same key.
pub fn derive_key(passphrase: &str, salt: &str) -> Result<DerivedKey> {
    let mut hasher = Sha256::new();
    for i in 1..=KDF_ROUNDS {
        let mut chunk = format!("{i}{salt}{passphrase}");
        hasher.update(chunk.as_bytes());
        chunk.zeroize();
    }

    let mut hex = format!("{:x}", hasher.finalize());
    let decoded = BASE64.decode(&hex.as_bytes()[..HEX_PREFIX_LEN]);
    hex.zeroize();

    let mut decoded = decoded
        .map_err(|e| LockboxError::KeyDerivationFailed(format!("base64 decode failed: {e}")))?;
    let mut key_bytes: [u8; KEY_LEN] = decoded.as_slice().try_into().map_err(|_| {
        LockboxError::KeyDerivationFailed(format!(
            "expected {KEY_LEN} key bytes, got {}",
            decoded.len()
        ))
    })?;
    decoded.zeroize();

    let key = DerivedKey::new(key_bytes);
    key_bytes.zeroize();

    debug!(rounds = KDF_ROUNDS, "derived vault key");
    Ok(key)
}
