use std::borrow::Cow;
use std::io::Write as _;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use clap::Parser;
use djt_ide::format_delimiters;

use crate::args::Args;
use crate::commands::read_source;
use crate::commands::Command;
use crate::commands::STDIN;
use crate::exit::Exit;
use crate::walk::template_files;

#[derive(Debug, Parser)]
pub struct Fmt {
    /// Files or directories to format, or `-` for stdin.
    #[arg(required = true)]
    paths: Vec<Utf8PathBuf>,

    /// Report files that would change instead of writing them.
    #[arg(long)]
    check: bool,
}

impl Command for Fmt {
    fn execute(&self, _args: &Args) -> Result<Exit> {
        let files = template_files(&self.paths);
        let mut changed: usize = 0;

        for path in &files {
            let source = read_source(path)?;
            let Cow::Owned(formatted) = format_delimiters(&source) else {
                tracing::debug!("{path} is already formatted");
                if path.as_str() == STDIN && !self.check {
                    print!("{source}");
                }
                continue;
            };

            changed += 1;
            if self.check {
                println!("Would reformat: {path}");
            } else {
                write_formatted(path, &formatted)?;
                tracing::info!("Reformatted {path}");
            }
        }

        let unchanged = files.len() - changed;
        if self.check {
            if changed > 0 {
                return Ok(Exit::error().with_message(format!(
                    "{} would be reformatted, {} already formatted.",
                    files_word(changed),
                    files_word(unchanged)
                )));
            }
            return Ok(Exit::success()
                .with_message(format!("{} already formatted.", files_word(unchanged))));
        }

        // Formatted text went to stdout; a summary would corrupt it
        if files.iter().any(|path| path.as_str() == STDIN) {
            return Ok(Exit::success());
        }

        Ok(Exit::success().with_message(format!(
            "{} reformatted, {} left unchanged.",
            files_word(changed),
            files_word(unchanged)
        )))
    }
}

fn write_formatted(path: &Utf8Path, formatted: &str) -> Result<()> {
    if path.as_str() == STDIN {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(formatted.as_bytes())
            .context("Failed to write stdout")?;
        return Ok(());
    }

    std::fs::write(path, formatted).with_context(|| format!("Failed to write {path}"))
}

fn files_word(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{count} files")
    }
}
