//! `lockbox change-key` — re-encrypt the vault under a new master key.

use crate::cli::output;
use crate::cli::{open_session, prompt_new_passphrase, Cli};
use crate::errors::Result;
use crate::session::Session;

/// Execute the `change-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;
    run(&mut session)
}

pub fn run(session: &mut Session) -> Result<()> {
    let new_passphrase = prompt_new_passphrase("Please choose a new master key")?;
    session.change_key(&new_passphrase, &new_passphrase)?;
    output::success("Your master key has been updated.");
    Ok(())
}
