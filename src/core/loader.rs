//! Startup loader.
//!
//! Decrypts the component's `.env.enc` and merges it into an environment,
//! once. A [`Loader`] moves from `NotLoaded` to either `Loaded` or `Failed`
//! and never leaves those states; the state is held under a mutex for the
//! whole load so concurrent callers wait and then see `AlreadyLoaded`.
//!
//! Variables already present in the environment win over decrypted ones,
//! which lets an operator override a single secret without re-encrypting.

use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::{debug, info, warn};

use crate::core::dotenv::EnvSnapshot;
use crate::core::envelope;
use crate::core::environment::{Environment, ProcessEnv};
use crate::core::password::{PasswordChain, PasswordSource};
use crate::core::settings::Settings;
use crate::error::{CryptoError, Error, LoadError, Result};

/// Where a loader is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    Failed,
}

/// What a call to [`Loader::load`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was decrypted and merged.
    Decrypted(MergeReport),
    /// An earlier call already loaded; nothing was done.
    AlreadyLoaded,
    /// The marker variable said the environment is already populated.
    Skipped,
}

/// Key names touched by a merge. Never carries values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Keys written into the environment.
    pub applied: Vec<String>,
    /// Keys left alone because they were already set.
    pub preserved: Vec<String>,
}

/// One-shot decrypt-and-merge gate.
pub struct Loader {
    settings: Settings,
    password: Box<dyn PasswordSource>,
    state: Mutex<LoadState>,
}

impl Loader {
    pub fn new(settings: Settings, password: impl PasswordSource + 'static) -> Self {
        Self {
            settings,
            password: Box::new(password),
            state: Mutex::new(LoadState::NotLoaded),
        }
    }

    /// Loader using the environment variable then the interactive prompt.
    pub fn standard(settings: Settings) -> Self {
        let chain = PasswordChain::standard(&settings.password_var);
        Self::new(settings, chain)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> LoadState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decrypt and merge into `env`, unless that already happened.
    ///
    /// # Errors
    ///
    /// - `LoadError::MissingFile` if the encrypted file does not exist
    /// - `LoadError::EmptyPassword` / `PromptUnavailable` / `PromptAborted`
    ///   if no usable password was obtained
    /// - `LoadError::WrongPassword` for any decryption failure
    /// - `ConfigError::InvalidVarName` if a configured variable name is unusable
    /// - `LoadError::PreviouslyFailed` on every call after a failure
    pub fn load(&self, env: &dyn Environment) -> Result<LoadOutcome> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        match *state {
            LoadState::Loaded => return Ok(LoadOutcome::AlreadyLoaded),
            LoadState::Failed => return Err(LoadError::PreviouslyFailed.into()),
            LoadState::NotLoaded => {}
        }

        // Stays Failed on any early return and if anything below unwinds.
        *state = LoadState::Failed;

        // Settings can be built by hand, so check before touching `env`.
        self.settings.validate()?;

        if marker_set(env, &self.settings.marker_var) {
            info!(var = %self.settings.marker_var, "environment already decrypted, skipping");
            *state = LoadState::Loaded;
            return Ok(LoadOutcome::Skipped);
        }

        let report = self.decrypt_and_merge(env)?;
        *state = LoadState::Loaded;
        Ok(LoadOutcome::Decrypted(report))
    }

    fn decrypt_and_merge(&self, env: &dyn Environment) -> Result<MergeReport> {
        let path = self.settings.encrypted_path();
        if !path.is_file() {
            return Err(LoadError::MissingFile { path }.into());
        }

        let password = self
            .password
            .obtain(env, &path)?
            .ok_or_else(|| LoadError::PromptUnavailable {
                var: self.settings.password_var.clone(),
            })?;
        if password.trim().is_empty() {
            return Err(LoadError::EmptyPassword.into());
        }

        let snapshot = decrypt_file(&path, &password)?;
        let report = merge(&snapshot, env);

        if self.settings.set_marker {
            env.set(&self.settings.marker_var, crate::core::constants::MARKER_VALUE);
        }

        info!(
            path = %path.display(),
            applied = report.applied.len(),
            preserved = report.preserved.len(),
            "encrypted env loaded"
        );

        Ok(report)
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("settings", &self.settings)
            .field("state", &self.state())
            .finish()
    }
}

/// Read, trim and decrypt an encrypted env file, then parse it.
///
/// # Errors
///
/// `LoadError::ReadFile` if the file cannot be read; every other failure is
/// reported as `LoadError::WrongPassword`.
pub fn decrypt_file(path: &Path, password: &str) -> Result<EnvSnapshot> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    // Binary garbage is just another unreadable envelope.
    let text = String::from_utf8(bytes)
        .map_err(|_| collapse_decrypt_failure(CryptoError::InvalidPrefix.into()))?;

    let plaintext = envelope::open(text.trim(), password).map_err(collapse_decrypt_failure)?;
    let plaintext = std::str::from_utf8(&plaintext)
        .map_err(|_| collapse_decrypt_failure(CryptoError::InvalidPlaintext.into()))?;

    Ok(EnvSnapshot::parse(plaintext))
}

/// Map any decryption failure to the single operator-facing error.
///
/// A bad prefix, broken base64, a truncated payload and a failed tag check
/// all read as "wrong password". The real cause stays attached as the error
/// source and goes to the debug log.
pub fn collapse_decrypt_failure(err: Error) -> Error {
    match err {
        Error::Crypto(cause) => {
            debug!(reason = %cause, "decryption failed");
            LoadError::WrongPassword { cause }.into()
        }
        other => other,
    }
}

/// Set every snapshot key that `env` does not already have.
pub fn merge(snapshot: &EnvSnapshot, env: &dyn Environment) -> MergeReport {
    let mut report = MergeReport::default();

    for (key, value) in snapshot.iter() {
        if env.contains(key) {
            debug!(key, "keeping existing value");
            report.preserved.push(key.to_string());
        } else {
            env.set(key, value);
            report.applied.push(key.to_string());
        }
    }

    report
}

fn marker_set(env: &dyn Environment, var: &str) -> bool {
    env.get(var).is_some_and(|v| {
        let v = v.trim();
        v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
    })
}

static PROCESS_LOADER: OnceLock<Loader> = OnceLock::new();

/// Load into the process environment through a process-wide loader.
///
/// The first call fixes the settings; later calls reuse that loader and its
/// state, whatever settings they pass.
///
/// # Errors
///
/// See [`Loader::load`].
pub fn ensure_loaded(settings: Settings) -> Result<LoadOutcome> {
    let loader = PROCESS_LOADER.get_or_init(|| Loader::standard(settings));
    if loader.state() == LoadState::Failed {
        warn!("encrypted env load requested again after an earlier failure");
    }
    loader.load(&ProcessEnv)
}
