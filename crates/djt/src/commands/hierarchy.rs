use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use djt_ide::parent_template;

use crate::args::Args;
use crate::commands::read_source;
use crate::commands::Command;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Hierarchy {
    /// Template to inspect, or `-` for stdin.
    path: Utf8PathBuf,
}

impl Command for Hierarchy {
    fn execute(&self, _args: &Args) -> Result<Exit> {
        let source = read_source(&self.path)?;

        match parent_template(&source) {
            Some(parent) => Ok(Exit::success().with_message(parent)),
            None => Ok(Exit::error().with_message(format!(
                "{} does not extend another template.",
                self.path
            ))),
        }
    }
}
