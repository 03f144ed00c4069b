//! Command-line interface.

pub mod check;
pub mod completions;
pub mod encrypt;
pub mod output;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::settings::Settings;
use crate::error::Result;

/// envseal - password-sealed .env files.
#[derive(Parser)]
#[command(
    name = "envseal",
    about = "Seal .env files with a password and load them at startup",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Component directory holding .env, .env.enc and envseal.toml
    #[arg(long, global = true, env = "ENVSEAL_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt a plaintext .env into an envelope file
    Encrypt {
        /// Plaintext env file, relative to the component directory
        #[arg(short, long)]
        input: Option<String>,
        /// Encrypted output file, relative to the component directory
        #[arg(short, long)]
        output: Option<String>,
        /// Overwrite the output file if it already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Check the password and list the key names in an envelope
    Check {
        /// Encrypted env file, relative to the component directory
        #[arg(long)]
        file: Option<String>,
        /// Output key names as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a command with the decrypted variables in its environment
    Run {
        /// Encrypted env file, relative to the component directory
        #[arg(long)]
        file: Option<String>,
        /// Command and arguments to run
        #[arg(trailing_var_arg = true)]
        command: Vec<String>,
    },

    /// Print a shell completion script to stdout
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Execute a command.
pub fn execute(command: Command, dir: PathBuf) -> Result<()> {
    use Command::*;

    match command {
        Encrypt {
            input,
            output,
            force,
        } => encrypt::execute(settings(dir, input, output)?, force),
        Check { file, json } => check::execute(settings(dir, None, file)?, json),
        Run { file, command } => run::execute(settings(dir, None, file)?, &command),
        Completions { shell } => completions::execute(shell),
    }
}

/// Settings for `dir` with command-line file name overrides applied.
fn settings(dir: PathBuf, plaintext: Option<String>, encrypted: Option<String>) -> Result<Settings> {
    let mut settings = Settings::load(dir)?;
    if let Some(name) = plaintext {
        settings = settings.with_plaintext_file(name);
    }
    if let Some(name) = encrypted {
        settings = settings.with_encrypted_file(name);
    }
    Ok(settings)
}
