//! express-gen CLI entry point

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use console::style;

use express_gen::{Cli, Generator, Outcome};

fn main() {
    let code = match run() {
        Ok(Outcome::Completed) => 0,
        Ok(Outcome::Aborted) => 1,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            1
        }
    };

    std::process::exit(code);
}

/// Parse, resolve and execute; the returned [`Outcome`] carries the abort
/// state explicitly instead of a shared flag.
fn run() -> Result<Outcome> {
    // Bare invocation prints usage rather than scaffolding into `.`;
    // `express-gen .` still does that explicitly.
    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        return Ok(Outcome::Completed);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            return Ok(match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Outcome::Completed,
                _ => Outcome::Aborted,
            });
        }
    };

    let config = cli.resolve()?;
    Generator::new(config).execute()
}
