//! Error types for the test runtime
//!
//! These cover harness misuse and environment problems only. Assertion
//! failures inside test bodies are not errors: they are recorded on the
//! running test and reported through the console report.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the test runtime
#[derive(Error, Debug)]
pub enum Error {
    // === Registry Errors ===
    #[error("Registry is frozen: tests must be registered before the run starts")]
    RegistrationClosed,

    // === Run Errors ===
    #[error("A test run is already in progress on this registry")]
    RunInProgress,

    #[error("Tests in this registry have already been run")]
    AlreadyRun,

    // === Result Errors ===
    #[error("Results are not available until the test run has finished")]
    NotYetRun,

    // === Flag / Configuration Errors ===
    #[error("Invalid xtest flag: {0}")]
    InvalidFlag(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a file read error for the given path
    pub fn file_read(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
