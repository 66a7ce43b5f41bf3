//! Error types for labcheck operations.
//!
//! Defines the error types shared across subsystems:
//! - Manifest loading and validation
//! - Input and expectation file resolution
//! - Toolchain detection and compilation
//!
//! Runner errors live next to the runner in [`crate::runner`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Test manifest not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read manifest '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Manifest contains no tests")]
    NoTests,

    #[error("Invalid manifest value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised when a referenced input or expectation file cannot be used.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Expectation file not found: {0}")]
    ExpectationNotFound(PathBuf),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while resolving the command for the program under test.
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("Lab directory not found: {0}")]
    LabDirNotFound(PathBuf),

    #[error("Could not detect the language: add main.py, main.c, main.cpp, Main.java or main.go, or set RUN_CMD")]
    NothingToRun,

    #[error("RUN_CMD is empty")]
    EmptyRunCommand,

    #[error("{language} build failed with exit code {code}: {stderr}")]
    BuildFailed {
        language: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while resolving which lab to check.
#[derive(Debug, Error)]
pub enum LabError {
    #[error("Could not determine the lab number: set LAB (for example LAB=1) or use a lab-N branch")]
    Undetermined,

    #[error("Failed to write '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
