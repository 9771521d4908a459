//! One module per subcommand.
//!
//! Commands that work on an unlocked vault expose a `run` function taking
//! a `Session`, shared by the one-shot subcommand and the interactive shell.

pub mod add;
pub mod category;
pub mod change_key;
pub mod completions;
pub mod delete;
pub mod get;
pub mod init;
pub mod search;
pub mod shell;
