//! Core library components.
//!
//! The envelope codec and key derivation are pure; the loader and encoder
//! are the only parts that touch files or the environment.

pub mod constants;
pub mod dotenv;
pub mod encoder;
pub mod envelope;
pub mod environment;
pub mod kdf;
pub mod loader;
pub mod password;
pub mod settings;
