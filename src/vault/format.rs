//! Binary vault file format and atomic file replacement.
//!
//! A vault file has this layout:
//!
//! ```text
//! [nonce: 16 bytes][tag: 16 bytes][ciphertext: remaining bytes]
//! ```
//!
//! There is no magic number or version byte: files written by earlier
//! releases use exactly this layout and must keep opening.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::crypto::{EncryptedBlob, NONCE_LEN, TAG_LEN};
use crate::errors::{LockboxError, Result};

/// Fixed-size prefix: nonce + tag.
pub const PREFIX_LEN: usize = NONCE_LEN + TAG_LEN;

/// Lay out a blob as `nonce || tag || ciphertext`.
pub fn encode(blob: &EncryptedBlob) -> Vec<u8> {
    let mut buf = Vec::with_capacity(PREFIX_LEN + blob.ciphertext.len());
    buf.extend_from_slice(&blob.nonce); // 16 bytes
    buf.extend_from_slice(&blob.tag); // 16 bytes
    buf.extend_from_slice(&blob.ciphertext);
    buf
}

/// Split raw file bytes into nonce, tag and ciphertext.
///
/// A file too short to hold a nonce and a tag cannot be authenticated,
/// so it is reported as an authentication failure.
pub fn decode(data: &[u8]) -> Result<EncryptedBlob> {
    if data.len() < PREFIX_LEN {
        return Err(LockboxError::AuthenticationFailed);
    }

    let (nonce, rest) = data.split_at(NONCE_LEN);
    let (tag, ciphertext) = rest.split_at(TAG_LEN);

    let nonce: [u8; NONCE_LEN] = nonce
        .try_into()
        .map_err(|_| LockboxError::AuthenticationFailed)?;
    let tag: [u8; TAG_LEN] = tag
        .try_into()
        .map_err(|_| LockboxError::AuthenticationFailed)?;

    Ok(EncryptedBlob {
        nonce,
        tag,
        ciphertext: ciphertext.to_vec(),
    })
}

/// Read the raw bytes of a vault file.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(LockboxError::VaultNotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

/// Write a vault file to disk **atomically**.
///
/// The bytes go to a temp file in the same directory, are flushed to
/// disk, and the temp file is renamed over the target.  Readers see
/// either the old file or the new one, never a truncated mix.
pub fn write_file_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp_path = temp_path(path);

    let written = write_synced(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        // Best effort: the target is untouched, only the temp file may remain.
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Temp file next to `path`, so the rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
