//! `lockbox get` — show one secret, copying its password to the clipboard.

use std::io::Write;

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::clipboard::CopiedPassword;
use crate::config::Settings;
use crate::errors::Result;
use crate::session::Session;

/// Execute the `get` command.
pub fn execute(cli: &Cli, index: usize, show: bool) -> Result<()> {
    let (mut session, settings) = open_session(cli)?;
    run(&mut session, &settings, index, show)
}

/// Print the secret at `index`; copy the password unless `show` is set.
pub fn run(session: &mut Session, settings: &Settings, index: usize, show: bool) -> Result<()> {
    let (secret, category) = session.read(|vault| {
        let secret = vault.secrets.get(index)?.clone();
        let category = vault.categories.resolve_name(secret.category).to_string();
        Ok((secret, category))
    })?;

    output::print_secret(&secret, &category, show);
    if show {
        return Ok(());
    }

    let copied = CopiedPassword::copy(&secret.password)?;
    output::info("The password has been copied to the clipboard.");
    output::info(&format!(
        "Clipboard will be erased in {} seconds",
        settings.clipboard_ttl
    ));
    copied.clear_after(settings.clipboard_ttl(), || {
        print!(".");
        let _ = std::io::stdout().flush();
    })?;
    println!();
    Ok(())
}
