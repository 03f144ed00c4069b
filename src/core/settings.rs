//! Loader settings.
//!
//! Every file is resolved relative to one component directory. Names and
//! variable names can be changed through an optional `envseal.toml` there:
//!
//! ```toml
//! encrypted_file = "secrets.enc"
//! password_var = "BACKEND_ENV_PASSWORD"
//! marker_var = "BACKEND_ENV_DECRYPTED"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Where the encrypted env lives and which variables steer the loader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Component directory all file names are relative to.
    #[serde(skip)]
    pub dir: PathBuf,
    /// Encrypted env file name.
    pub encrypted_file: String,
    /// Plaintext env file name, read by the encoder.
    pub plaintext_file: String,
    /// Variable that supplies the password non-interactively.
    pub password_var: String,
    /// Variable that marks the environment as already populated.
    pub marker_var: String,
    /// Whether a successful load sets the marker variable.
    pub set_marker: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            encrypted_file: constants::ENCRYPTED_FILE.to_string(),
            plaintext_file: constants::PLAINTEXT_FILE.to_string(),
            password_var: constants::PASSWORD_VAR.to_string(),
            marker_var: constants::MARKER_VAR.to_string(),
            set_marker: true,
        }
    }
}

impl Settings {
    /// Defaults rooted at `dir`.
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Defaults rooted at the directory holding the running executable.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the executable path cannot be determined.
    pub fn beside_executable() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::for_dir(dir))
    }

    /// Load `envseal.toml` from `dir` if present, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let path = dir.join(constants::SETTINGS_FILE);

        if !path.exists() {
            debug!(dir = %dir.display(), "no settings file, using defaults");
            return Ok(Self::for_dir(dir));
        }

        debug!(path = %path.display(), "loading settings");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let mut settings: Self =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;
        settings.dir = dir;
        settings.validate()?;

        Ok(settings)
    }

    /// Check that the variable names can be used with the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVarName` for an empty name or one holding
    /// `=` or NUL.
    pub fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("password_var", &self.password_var),
            ("marker_var", &self.marker_var),
        ] {
            if name.is_empty() || name.contains(['=', '\0']) {
                return Err(ConfigError::InvalidVarName {
                    field,
                    name: name.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Override the encrypted file name.
    pub fn with_encrypted_file(mut self, name: impl Into<String>) -> Self {
        self.encrypted_file = name.into();
        self
    }

    /// Override the plaintext file name.
    pub fn with_plaintext_file(mut self, name: impl Into<String>) -> Self {
        self.plaintext_file = name.into();
        self
    }

    /// Full path of the encrypted env file.
    pub fn encrypted_path(&self) -> PathBuf {
        self.dir.join(&self.encrypted_file)
    }

    /// Full path of the plaintext env file.
    pub fn plaintext_path(&self) -> PathBuf {
        self.dir.join(&self.plaintext_file)
    }
}
