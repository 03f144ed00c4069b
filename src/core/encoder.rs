//! Companion encoder.
//!
//! Seals a plaintext `.env` into an envelope file. The output only ever
//! appears complete: it is written to a sibling temporary file first and
//! renamed into place.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::envelope;
use crate::error::{Result, UsageError};

/// A single encryption job.
#[derive(Debug, Clone)]
pub struct Encoder {
    input: PathBuf,
    output: PathBuf,
    force: bool,
}

impl Encoder {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, force: bool) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            force,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Validate paths. Call before asking for a password.
    ///
    /// # Errors
    ///
    /// `UsageError::MissingInput` if the plaintext file does not exist,
    /// `UsageError::OutputExists` if the output exists and `force` is off.
    pub fn check(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(UsageError::MissingInput(self.input.clone()).into());
        }
        if self.output.exists() && !self.force {
            return Err(UsageError::OutputExists(self.output.clone()).into());
        }
        Ok(())
    }

    /// Seal the input under `password` and write the envelope.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Path errors as in [`Encoder::check`], `UsageError::EmptyPassword`,
    /// or I/O errors. On error no output file is created or modified.
    pub fn seal(&self, password: &str) -> Result<usize> {
        self.check()?;
        // The loader refuses blank passwords, so never seal under one.
        if password.trim().is_empty() {
            return Err(UsageError::EmptyPassword.into());
        }

        let plaintext = zeroize::Zeroizing::new(std::fs::read_to_string(&self.input)?);
        if envelope::is_envelope(&plaintext) {
            warn!(input = %self.input.display(), "input is already an envelope, sealing it again");
        }
        debug!(input = %self.input.display(), "sealing env file");
        let sealed = envelope::seal(&plaintext, password)?;

        write_atomic(&self.output, sealed.as_bytes())?;
        info!(output = %self.output.display(), bytes = sealed.len(), "envelope written");

        Ok(sealed.len())
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "envelope".to_string());
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    let result = (|| -> std::io::Result<()> {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        std::fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    Ok(result?)
}
