//! Copy a password to the system clipboard and wipe it after a delay.

use std::thread;
use std::time::Duration;

use arboard::Clipboard;
use tracing::debug;

use crate::errors::{LockboxError, Result};

/// A password that is currently on the clipboard.
///
/// The handle is held until `clear_after` runs: on X11 the contents
/// vanish when the owning handle is dropped.
pub struct CopiedPassword {
    clipboard: Clipboard,
}

impl CopiedPassword {
    /// Put `text` on the clipboard.
    pub fn copy(text: &str) -> Result<Self> {
        let mut clipboard = Clipboard::new().map_err(clipboard_error)?;
        clipboard.set_text(text).map_err(clipboard_error)?;
        debug!("password copied to clipboard");
        Ok(Self { clipboard })
    }

    /// Wait `ttl`, then overwrite the clipboard with an empty string.
    ///
    /// `on_tick` runs once per elapsed second so the caller can show progress.
    pub fn clear_after(mut self, ttl: Duration, mut on_tick: impl FnMut()) -> Result<()> {
        for _ in 0..ttl.as_secs() {
            thread::sleep(Duration::from_secs(1));
            on_tick();
        }

        self.clipboard.set_text("").map_err(clipboard_error)?;
        debug!(ttl_secs = ttl.as_secs(), "clipboard cleared");
        Ok(())
    }
}

fn clipboard_error(e: arboard::Error) -> LockboxError {
    LockboxError::ClipboardError(e.to_string())
}
