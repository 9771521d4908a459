//! `lockbox add` — add a secret to the vault.

use crate::cli::output;
use crate::cli::{open_session, prompt_notes, prompt_secret, prompt_text, Cli};
use crate::errors::{LockboxError, Result};
use crate::session::Session;
use crate::vault::Secret;

/// Fields supplied on the command line; anything missing is prompted for.
#[derive(Debug, Default)]
pub struct AddArgs {
    pub category: Option<usize>,
    pub name: Option<String>,
    pub login: Option<String>,
    pub notes: Option<String>,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: AddArgs) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;
    run(&mut session, args)
}

/// Collect the fields and append the secret.
pub fn run(session: &mut Session, args: AddArgs) -> Result<()> {
    let category = match args.category {
        Some(index) => Some(index),
        None => choose_category(session)?,
    };
    let name = match args.name {
        Some(name) => name,
        None => prompt_text("Name / URL")?,
    };
    let login = match args.login {
        Some(login) => login,
        None => prompt_text("Login")?,
    };
    let password = prompt_secret("Password")?;
    let notes = match args.notes {
        Some(notes) => notes,
        None => prompt_notes()?,
    };

    let secret = Secret::new(category, name, login, password.as_str(), notes);
    let index = session.write(|vault| vault.secrets.add(secret, &vault.categories))?;

    output::success(&format!("The new item #{index} has been saved to your vault."));
    Ok(())
}

/// Show the active categories and read a selection (empty for none).
fn choose_category(session: &mut Session) -> Result<Option<usize>> {
    let categories = session.read(|vault| Ok(vault.categories.list_active()))?;
    if categories.is_empty() {
        return Ok(None);
    }

    output::info("Available categories:");
    output::print_categories_table(&categories);

    let raw = prompt_text("Choose a category number (or leave empty for none)")?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let index = raw
        .parse::<usize>()
        .map_err(|_| LockboxError::Validation(format!("'{raw}' is not a category number")))?;
    if !categories.iter().any(|c| c.index == index) {
        return Err(LockboxError::CategoryNotFound(index));
    }
    Ok(Some(index))
}
