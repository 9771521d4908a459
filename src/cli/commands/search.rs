//! `lockbox search` / `lockbox list` — display matching secrets in a table.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;
use crate::session::Session;

/// Execute the `search` command.
pub fn execute_search(cli: &Cli, query: &str) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;
    run_search(&mut session, query)
}

/// Execute the `list` command.
pub fn execute_list(cli: &Cli) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;
    run_list(&mut session)
}

pub fn run_search(session: &mut Session, query: &str) -> Result<()> {
    let (total, hits) = session.read(|vault| {
        Ok((
            vault.secrets.len(),
            vault.secrets.search(query, &vault.categories),
        ))
    })?;

    if total == 0 {
        output::info("There are no secrets saved yet.");
    } else if hits.is_empty() {
        output::info("No results!");
    } else {
        output::print_secrets_table(&hits);
    }
    Ok(())
}

pub fn run_list(session: &mut Session) -> Result<()> {
    let all = session.read(|vault| Ok(vault.secrets.list_all(&vault.categories)))?;

    if all.is_empty() {
        output::info("There are no secrets saved yet.");
        output::tip("Run `lockbox add` to add your first secret.");
    } else {
        output::info(&output::secret_count_message(all.len()));
        output::print_secrets_table(&all);
    }
    Ok(())
}
