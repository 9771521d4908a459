//! AES-EAX authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 16-byte nonce.  The
//! nonce, the 16-byte authentication tag and the ciphertext are returned
//! separately so the file layer can lay them out on disk.
//!
//! `decrypt` verifies the tag before any plaintext is produced.

use aes::Aes192;
use eax::aead::generic_array::GenericArray;
use eax::aead::{AeadInPlace, KeyInit};
use eax::Eax;
use rand::RngCore;

use super::keys::DerivedKey;
use crate::errors::{LockboxError, Result};

/// Size of the EAX nonce in bytes.
pub const NONCE_LEN: usize = 16;

/// Size of the EAX authentication tag in bytes.
pub const TAG_LEN: usize = 16;

type VaultCipher = Eax<Aes192>;

/// The three parts of a sealed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    pub nonce: [u8; NONCE_LEN],
    pub tag: [u8; TAG_LEN],
    pub ciphertext: Vec<u8>,
}

/// Encrypt `plaintext` under `key` with a freshly generated nonce.
pub fn encrypt(key: &DerivedKey, plaintext: &[u8]) -> Result<EncryptedBlob> {
    let cipher = VaultCipher::new_from_slice(key.as_bytes())
        .map_err(|e| LockboxError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce);

    // Encrypt in place on a copy of the plaintext.
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&nonce), b"", &mut buffer)
        .map_err(|e| LockboxError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);

    Ok(EncryptedBlob {
        nonce,
        tag: tag_bytes,
        ciphertext: buffer,
    })
}

/// Decrypt a blob produced by `encrypt`.
///
/// Fails with `AuthenticationFailed` when the tag does not verify: wrong
/// key, corrupted file or tampered ciphertext.
pub fn decrypt(key: &DerivedKey, blob: &EncryptedBlob) -> Result<Vec<u8>> {
    let cipher =
        VaultCipher::new_from_slice(key.as_bytes()).map_err(|_| LockboxError::AuthenticationFailed)?;

    let mut buffer = blob.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(&blob.nonce),
            b"",
            &mut buffer,
            GenericArray::from_slice(&blob.tag),
        )
        .map_err(|_| LockboxError::AuthenticationFailed)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(fill: u8) -> DerivedKey {
        DerivedKey::new([fill; crate::crypto::keys::KEY_LEN])
    }

    #[test]
    fn nonce_and_tag_have_fixed_sizes() {
        let blob = encrypt(&key(1), b"payload").unwrap();
        assert_eq!(blob.nonce.len(), NONCE_LEN);
        assert_eq!(blob.tag.len(), TAG_LEN);
        // EAX is a stream mode: ciphertext length equals plaintext length.
        assert_eq!(blob.ciphertext.len(), b"payload".len());
    }

    #[test]
    fn tampered_tag_is_rejected() {
        let mut blob = encrypt(&key(2), b"payload").unwrap();
        blob.tag[0] ^= 0x01;
        assert!(matches!(
            decrypt(&key(2), &blob),
            Err(LockboxError::AuthenticationFailed)
        ));
    }

    #[test]
    fn tampered_nonce_is_rejected() {
        let mut blob = encrypt(&key(3), b"payload").unwrap();
        blob.nonce[15] ^= 0x80;
        assert!(decrypt(&key(3), &blob).is_err());
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let blob = encrypt(&key(4), b"").unwrap();
        assert!(blob.ciphertext.is_empty());
        assert_eq!(decrypt(&key(4), &blob).unwrap(), Vec::<u8>::new());
    }
}
