//! Test support utilities for envseal integration tests.
//!
//! Provides an isolated component directory and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Password used by helpers that seal files.
pub const PASSWORD: &str = "correct horse battery staple";

/// Test environment with an isolated component directory.
///
/// Child processes get the directory through `.current_dir()`, so no
/// process-global state is mutated and tests can run in parallel.
pub struct Test {
    /// Temporary component directory
    pub dir: TempDir,
}

impl Test {
    /// Create an empty component directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a component directory holding a plaintext `.env`.
    pub fn with_plaintext(contents: &str) -> Self {
        let t = Self::new();
        t.write(".env", contents);
        t
    }

    /// Create a component directory holding a sealed `.env.enc`.
    pub fn sealed(contents: &str) -> Self {
        let t = Self::with_plaintext(contents);
        let output = t.encrypt(PASSWORD);
        assert!(
            output.status.success(),
            "Failed to seal .env: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Absolute path of a file in the component directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file into the component directory.
    pub fn write(&self, name: &str, contents: &str) {
        fs::write(self.path(name), contents).expect("failed to write file");
    }

    /// Read a file from the component directory.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("failed to read file")
    }
}
