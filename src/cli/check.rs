//! Check command.
//!
//! Decrypts the envelope in memory and lists the variable names it holds.
//! Values are never printed.

use tracing::info;

use crate::cli::output;
use crate::core::environment::ProcessEnv;
use crate::core::loader::decrypt_file;
use crate::core::password::{PasswordChain, PasswordSource};
use crate::core::settings::Settings;
use crate::error::{LoadError, Result};

/// Verify the password against the envelope and list its keys.
pub fn execute(settings: Settings, json: bool) -> Result<()> {
    let path = settings.encrypted_path();
    if !path.is_file() {
        return Err(LoadError::MissingFile { path }.into());
    }

    let password = PasswordChain::standard(&settings.password_var)
        .obtain(&ProcessEnv, &path)?
        .ok_or_else(|| LoadError::PromptUnavailable {
            var: settings.password_var.clone(),
        })?;
    if password.trim().is_empty() {
        return Err(LoadError::EmptyPassword.into());
    }

    let snapshot = decrypt_file(&path, &password)?;
    let keys: Vec<&str> = snapshot.keys().collect();
    info!(keys = keys.len(), "envelope verified");

    if json {
        println!("{}", serde_json::to_string_pretty(&keys)?);
        return Ok(());
    }

    output::section("Encrypted env");
    output::kv("file", output::path(path.display()));
    output::kv("keys", keys.len());
    println!();
    if keys.is_empty() {
        output::dimmed("no variables stored");
    }
    for key in keys {
        output::list_item(key);
    }

    Ok(())
}
