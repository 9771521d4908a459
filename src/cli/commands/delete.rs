//! `lockbox delete` — remove a secret from the vault.

use crate::cli::output;
use crate::cli::{confirm, open_session, Cli};
use crate::errors::Result;
use crate::session::Session;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, index: usize, force: bool) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;
    run(&mut session, index, force)
}

/// Delete the secret at `index` after confirmation.
///
/// Later secrets shift down by one, so their item numbers change.
pub fn run(session: &mut Session, index: usize, force: bool) -> Result<()> {
    let (name, login) = session.read(|vault| {
        let secret = vault.secrets.get(index)?;
        Ok((secret.name.clone(), secret.login.clone()))
    })?;

    println!("* Name / URL: {name}");
    println!("* Login: {login}");

    // Unless --force is set, ask for confirmation before deleting.
    if !force && !confirm("Confirm deletion?", false)? {
        output::info("Cancelled.");
        return Ok(());
    }

    session.write(|vault| vault.secrets.delete(index))?;
    output::success(&format!("Deleted item #{index}"));
    output::tip("Item numbers after it have shifted down by one.");

    Ok(())
}
