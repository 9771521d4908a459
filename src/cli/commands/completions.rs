//! `lockbox completions <shell>` — print a completion script to stdout.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let stdout = io::stdout();
    write_script(shell, &mut stdout.lock())?;
    Ok(())
}

/// Render the script for `shell` into `out`.
pub fn write_script(shell: Shell, out: &mut impl Write) -> io::Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin, out);
    out.flush()
}
