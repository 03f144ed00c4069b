//! Constants used throughout envseal.
//!
//! Centralizes magic strings and format parameters.

/// Literal prefix identifying envelope format version 1.
pub const ENVELOPE_PREFIX: &str = "ENCV1:";

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Encrypted env file name (.env.enc).
pub const ENCRYPTED_FILE: &str = ".env.enc";

/// Plaintext env file name (.env), read by the encoder.
pub const PLAINTEXT_FILE: &str = ".env";

/// Optional settings file in the component directory.
pub const SETTINGS_FILE: &str = "envseal.toml";

/// Supplies the decryption password non-interactively.
pub const PASSWORD_VAR: &str = "ENVSEAL_PASSWORD";

/// Marks the environment as already populated.
pub const MARKER_VAR: &str = "ENVSEAL_DECRYPTED";

/// Value written to [`MARKER_VAR`] after a successful load.
pub const MARKER_VALUE: &str = "1";

/// Tracing filter for the CLI.
pub const LOG_VAR: &str = "ENVSEAL_LOG";
