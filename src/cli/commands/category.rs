//! `lockbox category` — list, add, rename and delete categories.

use crate::cli::output;
use crate::cli::{confirm, open_session, CategoryAction, Cli};
use crate::errors::{LockboxError, Result};
use crate::session::Session;

/// Execute a `category` subcommand.
pub fn execute(cli: &Cli, action: &CategoryAction) -> Result<()> {
    let (mut session, _settings) = open_session(cli)?;
    match action {
        CategoryAction::List => run_list(&mut session),
        CategoryAction::Add { name } => run_add(&mut session, name),
        CategoryAction::Rename { index, name } => run_rename(&mut session, *index, name),
        CategoryAction::Delete { index, force } => run_delete(&mut session, *index, *force),
    }
}

pub fn run_list(session: &mut Session) -> Result<()> {
    let categories = session.read(|vault| Ok(vault.categories.list_active()))?;
    output::print_categories_table(&categories);
    Ok(())
}

pub fn run_add(session: &mut Session, name: &str) -> Result<()> {
    let index = session.write(|vault| Ok(vault.categories.add(name)))?;
    output::success(&format!("The category #{index} has been created."));
    Ok(())
}

pub fn run_rename(session: &mut Session, index: usize, name: &str) -> Result<()> {
    session.write(|vault| vault.categories.rename(index, name))?;
    output::success("The category has been renamed.");
    Ok(())
}

/// Soft-delete a category.  Refused while any secret still uses it.
pub fn run_delete(session: &mut Session, index: usize, force: bool) -> Result<()> {
    let (name, used) = session.read(|vault| {
        let name = vault.categories.get(index)?.name.clone();
        Ok((name, vault.categories.is_used(index, &vault.secrets)))
    })?;
    println!("* Category: {name}");
    if used {
        return Err(LockboxError::CategoryInUse(index));
    }

    if !force && !confirm("Confirm deletion?", false)? {
        output::info("Cancelled.");
        return Ok(());
    }

    session.write(|vault| vault.categories.delete(index, &vault.secrets))?;
    output::success("The category has been deleted.");
    Ok(())
}
