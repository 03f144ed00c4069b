//! Run command.
//!
//! Loads the encrypted env into this process the same way a host service
//! would at startup, then runs a command that inherits the result.

use tracing::debug;

use crate::core::environment::ProcessEnv;
use crate::core::loader::{LoadOutcome, Loader};
use crate::core::settings::Settings;
use crate::error::{Result, UsageError};

/// Run a command with the decrypted variables in its environment.
pub fn execute(settings: Settings, command: &[String]) -> Result<()> {
    let exit_code = run_with_env(settings, command)?;
    std::process::exit(exit_code);
}

fn run_with_env(settings: Settings, command: &[String]) -> Result<i32> {
    let Some((program, args)) = command.split_first() else {
        return Err(UsageError::NoCommand.into());
    };

    let loader = Loader::standard(settings);
    match loader.load(&ProcessEnv)? {
        LoadOutcome::Decrypted(report) => debug!(
            applied = report.applied.len(),
            preserved = report.preserved.len(),
            "env merged"
        ),
        LoadOutcome::Skipped => debug!("env already decrypted"),
        LoadOutcome::AlreadyLoaded => {}
    }

    let status = std::process::Command::new(program).args(args).status()?;
    // Killed by a signal: no exit code, report failure
    Ok(status.code().unwrap_or(1))
}
