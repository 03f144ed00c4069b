//! envseal - password-sealed .env files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envseal::cli::output;
use envseal::cli::{execute, Cli};
use envseal::core::constants::LOG_VAR;
use envseal::error::{Error, LoadError, UsageError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envseal=debug")
        } else {
            EnvFilter::new("envseal=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command, cli.dir) {
        let suggestion = match &e {
            Error::Load(LoadError::MissingFile { .. }) => Some("run: envseal encrypt"),
            Error::Usage(UsageError::OutputExists(_)) => Some("pass --force to replace it"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
