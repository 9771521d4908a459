//! `lockbox shell` — interactive menu over an unlocked vault.
//!
//! Every command is checked against the session's idle timer before it
//! runs.  An expired session is locked and the master key is asked for
//! again; lock and quit skip the check.

use std::time::Instant;

use crate::cli::commands::{add, category, change_key, delete, get, search};
use crate::cli::output;
use crate::cli::{confirm, open_session, prompt_text, unlock_interactive, Cli};
use crate::config::Settings;
use crate::errors::{LockboxError, Result};
use crate::session::Session;

const MAIN_PROMPT: &str = "Choose a command [(g)et / (s)earch / show (all) / (a)dd / (d)elete / (cat)egories / (k)ey / (l)ock / (q)uit]";

const CATEGORY_PROMPT: &str =
    "Choose a command [(a)dd a category / (r)ename a category / (d)elete a category / (b)ack to vault]";

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Get,
    Search,
    All,
    Add,
    Delete,
    Categories,
    ChangeKey,
    Lock,
    Quit,
}

impl MenuCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "g" => Some(Self::Get),
            "s" => Some(Self::Search),
            "all" => Some(Self::All),
            "a" => Some(Self::Add),
            "d" => Some(Self::Delete),
            "cat" => Some(Self::Categories),
            "k" => Some(Self::ChangeKey),
            "l" => Some(Self::Lock),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Category sub-menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryCommand {
    Add,
    Rename,
    Delete,
    Back,
}

impl CategoryCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "a" => Some(Self::Add),
            "r" => Some(Self::Rename),
            "d" => Some(Self::Delete),
            "b" => Some(Self::Back),
            _ => None,
        }
    }
}

/// Execute the `shell` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (mut session, settings) = open_session(cli)?;

    let count = session.read(|vault| Ok(vault.secrets.len()))?;
    if count > 0 {
        output::info(&output::secret_count_message(count));
    }

    loop {
        let Some(command) = MenuCommand::parse(&prompt_text(MAIN_PROMPT)?) else {
            continue;
        };

        match command {
            MenuCommand::Lock => {
                session.lock();
                output::info("The vault is locked.");
                unlock_interactive(&mut session)?;
            }
            MenuCommand::Quit => {
                session.lock();
                return Ok(());
            }
            other => {
                let result = session
                    .check_idle(Instant::now())
                    .and_then(|()| dispatch(&mut session, &settings, other));
                recover(&mut session, result)?;
            }
        }
    }
}

/// Report a failed command; re-unlock if the session expired.
///
/// Only errors that end the shell are returned.
fn recover(session: &mut Session, result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(LockboxError::SessionExpired) => {
            output::warning(&LockboxError::SessionExpired.to_string());
            unlock_interactive(session)
        }
        Err(e @ LockboxError::TooManyAttempts(_)) => Err(e),
        Err(e) => {
            output::error(&e.to_string());
            Ok(())
        }
    }
}

fn dispatch(session: &mut Session, settings: &Settings, command: MenuCommand) -> Result<()> {
    match command {
        MenuCommand::Get => {
            let index = prompt_index("Enter item number")?;
            let copy = confirm("Copy password to clipboard instead of displaying it?", true)?;
            get::run(session, settings, index, !copy)
        }
        MenuCommand::Search => {
            let query = prompt_text("Enter search")?;
            search::run_search(session, &query)
        }
        MenuCommand::All => search::run_list(session),
        MenuCommand::Add => add::run(session, add::AddArgs::default()),
        MenuCommand::Delete => {
            let index = prompt_index("Enter item number")?;
            delete::run(session, index, false)
        }
        MenuCommand::Categories => categories_menu(session),
        MenuCommand::ChangeKey => change_key::run(session),
        MenuCommand::Lock | MenuCommand::Quit => Ok(()),
    }
}

fn categories_menu(session: &mut Session) -> Result<()> {
    loop {
        category::run_list(session)?;

        let Some(command) = CategoryCommand::parse(&prompt_text(CATEGORY_PROMPT)?) else {
            continue;
        };

        let result = match command {
            CategoryCommand::Back => return Ok(()),
            CategoryCommand::Add => {
                let name = prompt_text("Category name")?;
                category::run_add(session, &name)
            }
            CategoryCommand::Rename => {
                let index = prompt_index("Enter category number")?;
                let name = prompt_text("New category name")?;
                category::run_rename(session, index, &name)
            }
            CategoryCommand::Delete => {
                let index = prompt_index("Enter category number")?;
                category::run_delete(session, index, false)
            }
        };

        // Expiry and lockout go back to the main loop; the rest is reported here.
        match result {
            Err(e @ (LockboxError::SessionExpired | LockboxError::TooManyAttempts(_))) => {
                return Err(e)
            }
            Err(e) => output::error(&e.to_string()),
            Ok(()) => {}
        }
    }
}

fn prompt_index(prompt: &str) -> Result<usize> {
    let raw = prompt_text(prompt)?;
    parse_index(&raw)
}

/// Parse a user-typed item number.
fn parse_index(raw: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| LockboxError::Validation(format!("'{}' is not an item number", raw.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_commands() {
        assert_eq!(MenuCommand::parse("g"), Some(MenuCommand::Get));
        assert_eq!(MenuCommand::parse(" all "), Some(MenuCommand::All));
        assert_eq!(MenuCommand::parse("cat"), Some(MenuCommand::Categories));
        assert_eq!(MenuCommand::parse("q"), Some(MenuCommand::Quit));
        assert_eq!(MenuCommand::parse("x"), None);
        assert_eq!(MenuCommand::parse(""), None);
    }

    #[test]
    fn parses_category_commands() {
        assert_eq!(CategoryCommand::parse("r"), Some(CategoryCommand::Rename));
        assert_eq!(CategoryCommand::parse("b"), Some(CategoryCommand::Back));
        assert_eq!(CategoryCommand::parse("all"), None);
    }

    #[test]
    fn parse_index_accepts_padded_numbers_only() {
        assert_eq!(parse_index(" 3 ").unwrap(), 3);
        assert!(parse_index("-1").is_err());
        assert!(parse_index("three").is_err());
    }

    #[test]
    fn lockout_ends_the_shell() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut session = Session::new(
            crate::vault::VaultStore::new(tmp.path().join("vault")),
            "salt",
            std::time::Duration::from_secs(60),
        );
        assert!(recover(&mut session, Err(LockboxError::TooManyAttempts(3))).is_err());
        assert!(recover(&mut session, Err(LockboxError::SecretNotFound(9))).is_ok());
    }
}
