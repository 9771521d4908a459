//! `lockbox init` — create the config file and an empty vault.

use std::fs;

use crate::cli::output;
use crate::cli::{prompt_new_passphrase, vault_dir, Cli};
use crate::config::Settings;
use crate::errors::{LockboxError, Result};
use crate::session::Session;

/// Execute the `init` command.
pub fn execute(cli: &Cli, salt: Option<&str>) -> Result<()> {
    let dir = vault_dir(cli)?;
    let vault_path = Settings::vault_path(&dir);
    let config_path = Settings::config_path(&dir);

    // 1. An existing vault only needs a config when the old one was lost.
    if vault_path.exists() {
        if !config_path.exists() && salt.is_some() {
            Settings::init(&dir, salt)?;
            output::success(&format!("Config restored at {}", config_path.display()));
            return Ok(());
        }
        output::tip("Use `lockbox shell` to open the existing vault.");
        return Err(LockboxError::VaultAlreadyExists(vault_path));
    }

    // 2. Reuse an existing config (keeps its salt); a new one is only
    //    written once the master key has been accepted.
    let existing = config_path.exists();
    let settings = if existing {
        let settings = Settings::load(&dir)?;
        if salt.is_some_and(|s| s != settings.salt) {
            return Err(LockboxError::ConfigError(format!(
                "{} already holds a different salt",
                config_path.display()
            )));
        }
        settings
    } else {
        Settings::prepare(salt)?
    };

    // 3. Choose the master key.
    output::info("Welcome to Lockbox. Please choose a secure master key.");
    let passphrase = prompt_new_passphrase("Please choose a master key")?;

    // 4. Write the config and the empty vault.
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        output::info(&format!("Created vault directory: {}", dir.display()));
    }
    if !existing {
        settings.save(&dir)?;
    }
    let mut session = Session::from_settings(&vault_path, &settings);
    session.setup(&passphrase, &passphrase)?;
    session.lock();

    output::success("Your vault has been created and encrypted with your master key.");
    output::info(&format!("Your unique salt is: {}", settings.salt));
    output::warning(
        "Write it down. If you lose your config file you will need it to unlock your vault.",
    );

    Ok(())
}
