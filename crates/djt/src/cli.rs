use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::DjtCommand;

/// The main CLI structure that defines the command-line interface
#[derive(Parser)]
#[command(name = "djt")]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: DjtCommand,

    #[command(flatten)]
    pub args: Args,
}

/// Parse CLI arguments and execute the chosen command
pub fn run(args: Vec<String>) -> Result<ExitCode> {
    let cli = Cli::try_parse_from(args).unwrap_or_else(|e| {
        e.exit();
    });

    // The server installs its own subscriber that also reports to the client
    if !matches!(cli.command, DjtCommand::Serve(_)) {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(cli.args.global.log_level())
            .without_time()
            .init();
    }

    let exit = cli.command.execute(&cli.args)?;
    Ok(exit.report(cli.args.global.quiet))
}
