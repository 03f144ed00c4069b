//! Password-based key derivation.
//!
//! scrypt turns a low-entropy password plus a per-envelope salt into a
//! 256-bit AES key. The cost parameters are part of the envelope format:
//! changing [`KdfParams::DEFAULT`] makes every existing `.env.enc` unreadable.

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{KEY_LEN, SALT_LEN};
use crate::error::{CryptoError, Result};

/// scrypt cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// log2 of the CPU/memory cost N.
    pub log_n: u8,
    /// Block size.
    pub r: u32,
    /// Parallelism.
    pub p: u32,
}

impl KdfParams {
    /// Parameters baked into `ENCV1` envelopes (N = 32768, r = 8, p = 1).
    pub const DEFAULT: Self = Self {
        log_n: 15,
        r: 8,
        p: 1,
    };
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A derived AES-256 key, wiped on drop.
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive a key from `password` and `salt`.
///
/// # Errors
///
/// Returns `CryptoError::EmptyPassword` for an empty password (before any
/// work is done) and `CryptoError::KeyDerivation` for a wrong-sized salt or
/// parameters scrypt rejects.
pub fn derive_key(password: &str, salt: &[u8], params: &KdfParams) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(CryptoError::EmptyPassword.into());
    }
    if salt.len() != SALT_LEN {
        return Err(CryptoError::KeyDerivation(format!(
            "salt must be {} bytes, got {}",
            SALT_LEN,
            salt.len()
        ))
        .into());
    }

    let scrypt_params = scrypt::Params::new(params.log_n, params.r, params.p, KEY_LEN)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    debug!(log_n = params.log_n, r = params.r, p = params.p, "deriving key");

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    scrypt::scrypt(password.as_bytes(), salt, &scrypt_params, key.as_mut())
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    Ok(DerivedKey(key))
}
