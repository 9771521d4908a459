//! Unlock sessions.
//!
//! A `Session` is either locked or unlocked.  While unlocked it owns the
//! decrypted `Vault`, the `DerivedKey` and a `SessionGuard`.  Every read
//! or write goes through the guard first; an idle session locks itself
//! and the request fails with `SessionExpired`.
//!
//! Writes are persisted immediately: `write` runs the mutation, then
//! saves the whole vault.  If the save fails the in-memory vault is
//! rolled back so memory and disk stay in agreement.

pub mod guard;

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::Settings;
use crate::crypto::{derive_key, DerivedKey};
use crate::errors::{LockboxError, Result};
use crate::vault::{Vault, VaultStore};

pub use guard::SessionGuard;

/// Consecutive failed unlocks allowed before the session refuses more.
pub const MAX_UNLOCK_ATTEMPTS: u32 = 3;

/// Minimum master passphrase length, in characters.
pub const MIN_PASSPHRASE_LEN: usize = 8;

/// State held only while the vault is unlocked.
struct Unlocked {
    vault: Vault,
    key: DerivedKey,
    guard: SessionGuard,
}

pub struct Session {
    store: VaultStore,
    salt: String,
    auto_lock_ttl: Duration,
    /// `None` while locked.
    unlocked: Option<Unlocked>,
    failed_attempts: u32,
}

impl Session {
    /// Create a locked session for the vault at `store`.
    pub fn new(store: VaultStore, salt: impl Into<String>, auto_lock_ttl: Duration) -> Self {
        Self {
            store,
            salt: salt.into(),
            auto_lock_ttl,
            unlocked: None,
            failed_attempts: 0,
        }
    }

    /// Create a locked session from loaded settings.
    pub fn from_settings(vault_path: &Path, settings: &Settings) -> Self {
        Self::new(
            VaultStore::new(vault_path),
            settings.salt.clone(),
            settings.auto_lock_ttl(),
        )
    }

    // ------------------------------------------------------------------
    // State transitions
    // ------------------------------------------------------------------

    /// Create a new, empty vault protected by `passphrase`.
    ///
    /// On success the session is unlocked on the new vault.
    pub fn setup(&mut self, passphrase: &str, confirmation: &str) -> Result<()> {
        validate_new_passphrase(passphrase, confirmation)?;
        if self.store.exists() {
            return Err(LockboxError::VaultAlreadyExists(
                self.store.path().to_path_buf(),
            ));
        }

        let key = derive_key(passphrase, &self.salt)?;
        let vault = self.store.create(&key)?;
        debug!(path = %self.store.path().display(), "vault created");

        self.enter_unlocked(vault, key);
        Ok(())
    }

    /// Derive the key from `passphrase` and decrypt the vault.
    ///
    /// Each wrong passphrase counts as a failed attempt.  After
    /// `MAX_UNLOCK_ATTEMPTS` consecutive failures every further call fails
    /// with `TooManyAttempts` without touching the file.  A failed unlock
    /// always leaves the session locked.
    pub fn unlock(&mut self, passphrase: &str) -> Result<()> {
        self.lock();

        if self.is_locked_out() {
            return Err(LockboxError::TooManyAttempts(self.failed_attempts));
        }

        let key = derive_key(passphrase, &self.salt)?;
        match self.store.load(&key) {
            Ok(vault) => {
                self.failed_attempts = 0;
                self.enter_unlocked(vault, key);
                debug!("session unlocked");
                Ok(())
            }
            Err(LockboxError::AuthenticationFailed) => {
                self.failed_attempts += 1;
                warn!(
                    attempt = self.failed_attempts,
                    max = MAX_UNLOCK_ATTEMPTS,
                    "failed unlock attempt"
                );
                Err(LockboxError::AuthenticationFailed)
            }
            Err(e) => Err(e),
        }
    }

    /// Discard the decrypted vault and the key.
    pub fn lock(&mut self) {
        if self.unlocked.take().is_some() {
            debug!("session locked");
        }
    }

    /// Re-encrypt the vault under a new passphrase (same salt).
    ///
    /// The session stays unlocked with the new key.  If saving fails the
    /// old key stays in use, matching what is on disk.
    pub fn change_key(&mut self, new_passphrase: &str, confirmation: &str) -> Result<()> {
        self.check_idle(Instant::now())?;
        validate_new_passphrase(new_passphrase, confirmation)?;

        let new_key = derive_key(new_passphrase, &self.salt)?;
        let state = self.unlocked.as_mut().ok_or(LockboxError::Locked)?;
        self.store.save(&new_key, &state.vault)?;
        state.key = new_key;
        state.guard.touch(Instant::now());

        debug!("master key changed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Guarded access
    // ------------------------------------------------------------------

    /// Lock the session if it has been idle longer than the TTL.
    ///
    /// Returns `SessionExpired` when that happens, `Locked` when the
    /// session was already locked.
    pub fn check_idle(&mut self, now: Instant) -> Result<()> {
        let state = self.unlocked.as_ref().ok_or(LockboxError::Locked)?;
        if state.guard.is_expired(now) {
            warn!(
                idle_secs = state.guard.idle_for(now).as_secs(),
                "auto-locking idle session"
            );
            self.lock();
            return Err(LockboxError::SessionExpired);
        }
        Ok(())
    }

    /// Run a read-only operation against the unlocked vault.
    pub fn read<T>(&mut self, op: impl FnOnce(&Vault) -> Result<T>) -> Result<T> {
        let state = self.active(Instant::now())?;
        op(&state.vault)
    }

    /// Run a mutation against the unlocked vault and persist it.
    ///
    /// Nothing is saved when `op` fails.  When the save fails the vault is
    /// restored to its state before `op`.
    pub fn write<T>(&mut self, op: impl FnOnce(&mut Vault) -> Result<T>) -> Result<T> {
        let now = Instant::now();
        let store = self.store.clone();
        let state = self.active(now)?;

        let snapshot = state.vault.clone();
        let out = op(&mut state.vault)?;
        if let Err(e) = store.save(&state.key, &state.vault) {
            state.vault = snapshot;
            return Err(e);
        }
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn is_unlocked(&self) -> bool {
        self.unlocked.is_some()
    }

    /// Returns `true` once the unlock attempts are exhausted.
    pub fn is_locked_out(&self) -> bool {
        self.failed_attempts >= MAX_UNLOCK_ATTEMPTS
    }

    pub fn remaining_attempts(&self) -> u32 {
        MAX_UNLOCK_ATTEMPTS.saturating_sub(self.failed_attempts)
    }

    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    pub fn auto_lock_ttl(&self) -> Duration {
        self.auto_lock_ttl
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn enter_unlocked(&mut self, vault: Vault, key: DerivedKey) {
        self.unlocked = Some(Unlocked {
            vault,
            key,
            guard: SessionGuard::new(self.auto_lock_ttl, Instant::now()),
        });
    }

    /// Check the guard, refresh the activity timestamp, hand out the state.
    fn active(&mut self, now: Instant) -> Result<&mut Unlocked> {
        self.check_idle(now)?;
        let state = self.unlocked.as_mut().ok_or(LockboxError::Locked)?;
        state.guard.touch(now);
        Ok(state)
    }
}

/// Validate a new master passphrase and its confirmation.
pub fn validate_new_passphrase(passphrase: &str, confirmation: &str) -> Result<()> {
    if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
        return Err(LockboxError::Validation(format!(
            "The master key should be at least {MIN_PASSPHRASE_LEN} characters"
        )));
    }
    if passphrase != confirmation {
        return Err(LockboxError::Validation(
            "The master key does not match its confirmation".into(),
        ));
    }
    Ok(())
}
