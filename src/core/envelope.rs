//! The `ENCV1` envelope codec.
//!
//! ```text
//! ENCV1:<base64url(salt[16] || nonce[12] || ciphertext || tag[16])>
//! ```
//!
//! An envelope carries its own salt and nonce, so the password is the only
//! thing needed to open it. AES-256-GCM is used with no associated data.
//! Both functions are pure: no I/O, no state.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use zeroize::Zeroizing;

use crate::core::constants::{ENVELOPE_PREFIX, NONCE_LEN, SALT_LEN};
use crate::core::kdf::{derive_key, DerivedKey, KdfParams};
use crate::error::{CryptoError, Result};

/// URL-safe alphabet; writes padding, accepts input with or without it.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Seal `plaintext` under `password` with the format's KDF parameters.
///
/// Every call draws a fresh salt and nonce, so sealing the same input twice
/// yields two different envelopes.
///
/// # Errors
///
/// Returns `CryptoError::EmptyPassword` for an empty password.
pub fn seal(plaintext: &str, password: &str) -> Result<String> {
    seal_with(plaintext, password, &KdfParams::DEFAULT)
}

/// Open an envelope produced by [`seal`].
///
/// The returned bytes are released only after the authentication tag has
/// verified; they are wiped when dropped.
///
/// # Errors
///
/// Checked in order: `EmptyPassword`, `InvalidPrefix`, `Base64`,
/// `Truncated`, then `Authentication` for a wrong password or any tampering.
pub fn open(envelope: &str, password: &str) -> Result<Zeroizing<Vec<u8>>> {
    open_with(envelope, password, &KdfParams::DEFAULT)
}

/// [`seal`] with explicit KDF parameters.
pub fn seal_with(plaintext: &str, password: &str, params: &KdfParams) -> Result<String> {
    if password.is_empty() {
        return Err(CryptoError::EmptyPassword.into());
    }

    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut nonce);

    let key = derive_key(password, &salt, params)?;
    let ciphertext = cipher(&key)?
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut payload = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ciphertext);

    Ok(format!("{}{}", ENVELOPE_PREFIX, PAYLOAD_ENGINE.encode(payload)))
}

/// [`open`] with explicit KDF parameters.
pub fn open_with(envelope: &str, password: &str, params: &KdfParams) -> Result<Zeroizing<Vec<u8>>> {
    if password.is_empty() {
        return Err(CryptoError::EmptyPassword.into());
    }

    let encoded = envelope
        .strip_prefix(ENVELOPE_PREFIX)
        .ok_or(CryptoError::InvalidPrefix)?
        .trim();
    let payload = PAYLOAD_ENGINE
        .decode(encoded)
        .map_err(CryptoError::Base64)?;
    if payload.len() <= SALT_LEN + NONCE_LEN {
        return Err(CryptoError::Truncated { len: payload.len() }.into());
    }

    let (salt, rest) = payload.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let key = derive_key(password, salt, params)?;
    let plaintext = cipher(&key)?
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::Authentication)?;

    Ok(Zeroizing::new(plaintext))
}

/// Whether `text` looks like an envelope (prefix check only).
pub fn is_envelope(text: &str) -> bool {
    text.trim_start().starts_with(ENVELOPE_PREFIX)
}

fn cipher(key: &DerivedKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()).into())
}
