//! envseal - password-sealed `.env` files for single-operator services.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── encrypt       # Seal a plaintext .env into .env.enc
//! │   ├── check         # Verify a password, list key names
//! │   ├── run           # Run a command with the decrypted env
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── envelope      # ENCV1 seal/open (AES-256-GCM)
//!     ├── kdf           # scrypt key derivation
//!     ├── dotenv        # KEY=VALUE parsing
//!     ├── loader        # One-shot decrypt-and-merge gate
//!     ├── password      # Password sources (env, prompt, fixed)
//!     ├── environment   # Process / in-memory environments
//!     ├── settings      # envseal.toml and file locations
//!     └── encoder       # Companion encoder
//! ```
//!
//! # Startup
//!
//! A host calls [`ensure_loaded`] (or builds its own [`Loader`]) before it
//! reads any configuration, and stops if that returns an error:
//!
//! ```no_run
//! let settings = envseal::Settings::load(".")?;
//! envseal::ensure_loaded(settings)?;
//! let api_key = std::env::var("OPENROUTER_API_KEY");
//! # Ok::<(), envseal::error::Error>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::loader::{ensure_loaded, LoadOutcome, LoadState, Loader};
pub use crate::core::settings::Settings;
