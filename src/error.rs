//! Error types.
//!
//! Each concern has its own enum; [`Error`] wraps them so callers can use `?`
//! across module boundaries and still match on the precise cause.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Envelope and key derivation failures.
///
/// These stay distinct at the API level. The loader folds every one of them
/// into [`LoadError::WrongPassword`] before anything reaches an operator.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("unsupported envelope format: missing ENCV1: prefix")]
    InvalidPrefix,

    #[error("envelope payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("envelope payload too short: {len} bytes")]
    Truncated { len: usize },

    #[error("authentication failed: wrong password or tampered envelope")]
    Authentication,

    #[error("decrypted payload is not valid UTF-8")]
    InvalidPlaintext,

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Startup loader failures.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("encrypted env file {} not found; create it with `envseal encrypt` before starting", .path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("no password available: set {var} or run from a terminal")]
    PromptUnavailable { var: String },

    #[error("password prompt aborted: {0}")]
    PromptAborted(String),

    /// Every decryption failure, whatever its cause, surfaces as this.
    #[error("wrong password")]
    WrongPassword {
        #[source]
        cause: CryptoError,
    },

    #[error("encrypted env failed to load earlier in this process")]
    PreviouslyFailed,
}

/// Operator mistakes reported by the CLI and the encoder.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("passwords did not match")]
    PasswordMismatch,

    #[error("plaintext env file {} does not exist", .0.display())]
    MissingInput(PathBuf),

    #[error("{} already exists; use --force to overwrite it", .0.display())]
    OutputExists(PathBuf),

    #[error("no command specified")]
    NoCommand,
}

/// Settings file failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {field} {name:?}: variable names must be non-empty without '=' or NUL")]
    InvalidVarName { field: &'static str, name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
