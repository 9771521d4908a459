//! CLI module — Clap argument parser, prompts, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{LockboxError, Result};
use crate::session::{validate_new_passphrase, Session, MAX_UNLOCK_ATTEMPTS};

/// Environment variable consulted before prompting for the master key.
pub const PASSPHRASE_ENV: &str = "LOCKBOX_PASSPHRASE";

/// Lockbox CLI: local encrypted password vault.
#[derive(Parser)]
#[command(name = "lockbox", about = "Local encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: ~/.lockbox)
    #[arg(long, env = "LOCKBOX_DIR", global = true)]
    pub vault_dir: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault protected by a master key
    Init {
        /// Reuse an existing salt (e.g. to restore a lost config file)
        #[arg(long)]
        salt: Option<String>,
    },

    /// Add a secret (missing fields are prompted for)
    Add {
        /// Category number
        #[arg(short, long)]
        category: Option<usize>,
        /// Name or URL
        #[arg(short, long)]
        name: Option<String>,
        /// Login
        #[arg(short, long)]
        login: Option<String>,
        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show a secret; the password is copied to the clipboard
    Get {
        /// Item number
        index: usize,
        /// Print the password instead of copying it
        #[arg(long)]
        show: bool,
    },

    /// Search secrets by name, login or notes
    Search {
        /// Case-insensitive search text
        query: String,
    },

    /// List all secrets
    List,

    /// Delete a secret
    Delete {
        /// Item number
        index: usize,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Change the master key
    ChangeKey,

    /// Open the vault in an interactive session
    Shell,

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Category subcommands.
#[derive(clap::Subcommand)]
pub enum CategoryAction {
    /// List active categories
    List,

    /// Create a category
    Add {
        /// Category name
        name: String,
    },

    /// Rename a category
    Rename {
        /// Category number
        index: usize,
        /// New category name
        name: String,
    },

    /// Delete a category that no secret uses
    Delete {
        /// Category number
        index: usize,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault directory from `--vault-dir` / `LOCKBOX_DIR`, falling
/// back to `~/.lockbox`.
pub fn vault_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.vault_dir {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".lockbox"))
        .ok_or_else(|| {
            LockboxError::ConfigError(
                "cannot determine home directory — pass --vault-dir".into(),
            )
        })
}

/// Load settings and unlock the vault, prompting for the master key.
pub fn open_session(cli: &Cli) -> Result<(Session, Settings)> {
    let dir = vault_dir(cli)?;
    let settings = Settings::load(&dir)?;
    let vault_path = Settings::vault_path(&dir);
    if !vault_path.exists() {
        output::tip("Run `lockbox init` to create a vault.");
        return Err(LockboxError::VaultNotFound(vault_path));
    }

    let mut session = Session::from_settings(&vault_path, &settings);
    unlock_interactive(&mut session)?;
    Ok((session, settings))
}

/// Unlock `session`, allowing up to `MAX_UNLOCK_ATTEMPTS` tries.
///
/// When `LOCKBOX_PASSPHRASE` is set it is tried once, without prompting.
pub fn unlock_interactive(session: &mut Session) -> Result<()> {
    if let Some(pw) = passphrase_from_env() {
        return session.unlock(&pw);
    }

    loop {
        let pw = prompt_secret("Please enter your master key")?;
        match session.unlock(&pw) {
            Ok(()) => return Ok(()),
            Err(LockboxError::AuthenticationFailed) if session.is_locked_out() => {
                output::error(&LockboxError::AuthenticationFailed.to_string());
                return Err(LockboxError::TooManyAttempts(MAX_UNLOCK_ATTEMPTS));
            }
            Err(LockboxError::AuthenticationFailed) => {
                output::error("Master key is incorrect. Please try again!");
            }
            Err(e) => return Err(e),
        }
    }
}

/// Prompt for a new master key and its confirmation.
///
/// Invalid input is re-prompted up to `MAX_UNLOCK_ATTEMPTS` times; the
/// last validation error is returned after that.  `LOCKBOX_PASSPHRASE`
/// is validated and used without prompting.
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_new_passphrase(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env() {
        validate_new_passphrase(&pw, &pw)?;
        return Ok(pw);
    }

    let mut attempts = 0;
    loop {
        let pw = prompt_secret(prompt)?;
        let confirmation = prompt_secret("Please confirm your master key")?;
        match validate_new_passphrase(&pw, &confirmation) {
            Ok(()) => return Ok(pw),
            Err(e) => {
                attempts += 1;
                if attempts >= MAX_UNLOCK_ATTEMPTS {
                    return Err(e);
                }
                output::warning(&format!("{e}. Please try again!"));
            }
        }
    }
}

/// Read a hidden value from the terminal.
pub fn prompt_secret(prompt: &str) -> Result<Zeroizing<String>> {
    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(prompt_error)?;
    Ok(Zeroizing::new(value))
}

/// Read a visible line of text from the terminal.
pub fn prompt_text(prompt: &str) -> Result<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

/// Ask a yes/no question.
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(prompt_error)
}

/// Read notes line by line until an empty line.
pub fn prompt_notes() -> Result<String> {
    output::info("Notes: (press [ENTER] twice to complete)");
    let mut lines = Vec::new();
    loop {
        let line = prompt_text(">")?;
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn passphrase_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSPHRASE_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

fn prompt_error(e: dialoguer::Error) -> LockboxError {
    LockboxError::CommandFailed(format!("prompt: {e}"))
}
