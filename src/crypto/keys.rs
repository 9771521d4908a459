//! The symmetric key that encrypts a vault file.

use zeroize::Zeroize;

/// Length of the derived key in bytes.
///
/// The derivation base64-decodes 32 hex characters, which always yields
/// 24 bytes, so vault files are sealed with AES-192.
pub const KEY_LEN: usize = 24;

/// A derived vault key that zeroes its memory when dropped.
///
/// Only a [`Session`](crate::session::Session) holds one for longer than a
/// single call; locking the session drops it.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new `DerivedKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for DerivedKey {}
