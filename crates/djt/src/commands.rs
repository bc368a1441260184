mod fmt;
mod hierarchy;
mod serve;

use std::io::Read as _;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8Path;
use clap::Subcommand;

use crate::args::Args;
use crate::exit::Exit;

pub trait Command {
    fn execute(&self, args: &Args) -> Result<Exit>;
}

#[derive(Debug, Subcommand)]
pub enum DjtCommand {
    /// Start the LSP server on stdio
    Serve(self::serve::Serve),
    /// Normalise whitespace inside template delimiters
    Fmt(self::fmt::Fmt),
    /// Print the template a template extends
    Hierarchy(self::hierarchy::Hierarchy),
}

impl Command for DjtCommand {
    fn execute(&self, args: &Args) -> Result<Exit> {
        match self {
            DjtCommand::Serve(command) => command.execute(args),
            DjtCommand::Fmt(command) => command.execute(args),
            DjtCommand::Hierarchy(command) => command.execute(args),
        }
    }
}

/// Path argument standing for stdin.
const STDIN: &str = "-";

fn read_source(path: &Utf8Path) -> Result<String> {
    if path.as_str() == STDIN {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
}
