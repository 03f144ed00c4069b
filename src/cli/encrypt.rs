//! Encrypt command.
//!
//! Seals the plaintext env file into an envelope. The password comes from
//! the password variable when set, otherwise from a confirmed hidden prompt.

use crate::cli::output;
use crate::core::encoder::Encoder;
use crate::core::environment::ProcessEnv;
use crate::core::password::{PasswordChain, PasswordSource};
use crate::core::settings::Settings;
use crate::error::{Result, UsageError};

/// Encrypt `settings.plaintext_path()` into `settings.encrypted_path()`.
pub fn execute(settings: Settings, force: bool) -> Result<()> {
    let encoder = Encoder::new(settings.plaintext_path(), settings.encrypted_path(), force);

    // Fail on paths before bothering the operator for a password.
    encoder.check()?;

    let password = PasswordChain::for_encryption(&settings.password_var)
        .obtain(&ProcessEnv, encoder.output())?
        .ok_or(UsageError::EmptyPassword)?;

    encoder.seal(&password)?;

    output::success(&format!(
        "encrypted env saved to {}",
        output::path(encoder.output().display())
    ));
    output::dimmed(&format!(
        "Store or remove {} securely; it is not needed at runtime.",
        encoder.input().display()
    ));

    Ok(())
}
