//! Password acquisition.
//!
//! The loader and the encoder ask a [`PasswordSource`] for the password
//! instead of reading the terminal themselves. Sources can be chained; the
//! standard chain tries an environment variable and then a hidden prompt.

use std::io::IsTerminal;
use std::path::Path;

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::environment::Environment;
use crate::error::{LoadError, Result, UsageError};

/// Somewhere a password can come from.
pub trait PasswordSource: Send + Sync {
    /// Produce a password for `target`, or `None` if this source has nothing.
    ///
    /// # Errors
    ///
    /// Sources that can fail outright (a prompt with no terminal, an aborted
    /// prompt, a mismatched confirmation) return an error rather than `None`.
    fn obtain(&self, env: &dyn Environment, target: &Path) -> Result<Option<Zeroizing<String>>>;
}

/// Reads the password from an environment variable.
///
/// An unset or empty variable yields `None`.
#[derive(Debug, Clone)]
pub struct EnvPassword {
    var: String,
}

impl EnvPassword {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl PasswordSource for EnvPassword {
    fn obtain(&self, env: &dyn Environment, _target: &Path) -> Result<Option<Zeroizing<String>>> {
        match env.get(&self.var) {
            Some(value) if !value.is_empty() => {
                debug!(var = %self.var, "using password from environment");
                Ok(Some(Zeroizing::new(value)))
            }
            _ => Ok(None),
        }
    }
}

/// Prompts on the terminal with echo disabled.
///
/// With `confirm`, the password is entered twice and must be non-empty and
/// identical both times; this is the mode used when creating an envelope.
#[derive(Debug, Clone)]
pub struct PromptPassword {
    var_hint: String,
    confirm: bool,
}

impl PromptPassword {
    /// Single-entry prompt. `var_hint` names the variable suggested when no
    /// terminal is attached.
    pub fn new(var_hint: impl Into<String>) -> Self {
        Self {
            var_hint: var_hint.into(),
            confirm: false,
        }
    }

    /// Two-entry prompt for choosing a new password.
    pub fn confirmed(var_hint: impl Into<String>) -> Self {
        Self {
            var_hint: var_hint.into(),
            confirm: true,
        }
    }

    fn read(&self, prompt: String) -> Result<Zeroizing<String>> {
        let entered = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| LoadError::PromptAborted(e.to_string()))?;
        let entered = Zeroizing::new(entered);
        Ok(Zeroizing::new(entered.trim().to_string()))
    }
}

impl PasswordSource for PromptPassword {
    fn obtain(&self, _env: &dyn Environment, target: &Path) -> Result<Option<Zeroizing<String>>> {
        // No terminal means end-of-input; fail now instead of blocking.
        if !std::io::stdin().is_terminal() {
            return Err(LoadError::PromptUnavailable {
                var: self.var_hint.clone(),
            }
            .into());
        }

        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| target.display().to_string());

        if !self.confirm {
            return self.read(format!("Password to decrypt {}", name)).map(Some);
        }

        let first = self.read(format!("Create password for {}", name))?;
        let second = self.read("Confirm password".to_string())?;
        check_confirmation(first, &second).map(Some)
    }
}

/// A fixed password, for tests and embedding.
#[derive(Clone)]
pub struct FixedPassword(Zeroizing<String>);

impl FixedPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(Zeroizing::new(password.into()))
    }
}

impl std::fmt::Debug for FixedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FixedPassword([REDACTED])")
    }
}

impl PasswordSource for FixedPassword {
    fn obtain(&self, _env: &dyn Environment, _target: &Path) -> Result<Option<Zeroizing<String>>> {
        Ok(Some(self.0.clone()))
    }
}

/// Tries each source in order; the first to produce a password wins.
#[derive(Default)]
pub struct PasswordChain {
    sources: Vec<Box<dyn PasswordSource>>,
}

impl PasswordChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source.
    pub fn then(mut self, source: impl PasswordSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Environment variable first, then a single hidden prompt.
    pub fn standard(var: &str) -> Self {
        Self::new()
            .then(EnvPassword::new(var))
            .then(PromptPassword::new(var))
    }

    /// Environment variable first, then a confirmed prompt.
    pub fn for_encryption(var: &str) -> Self {
        Self::new()
            .then(EnvPassword::new(var))
            .then(PromptPassword::confirmed(var))
    }
}

impl PasswordSource for PasswordChain {
    fn obtain(&self, env: &dyn Environment, target: &Path) -> Result<Option<Zeroizing<String>>> {
        for source in &self.sources {
            if let Some(password) = source.obtain(env, target)? {
                return Ok(Some(password));
            }
        }
        Ok(None)
    }
}

fn check_confirmation(first: Zeroizing<String>, second: &str) -> Result<Zeroizing<String>> {
    if first.is_empty() {
        return Err(UsageError::EmptyPassword.into());
    }
    if first.as_str() != second {
        return Err(UsageError::PasswordMismatch.into());
    }
    Ok(first)
}
