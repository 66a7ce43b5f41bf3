//! Run orchestration for one lab.
//!
//! # Architecture
//!
//! ```text
//! HarnessConfig → HarnessContext::prepare → Harness::run → ReportSink
//!                   (manifest + program)     (per test: input → run → verify)
//! ```
//!
//! Tests run strictly one after another in manifest order. A timeout fails
//! only its own test; configuration and missing-file errors abort the run.

pub mod context;
pub mod orchestrator;
pub mod report;
pub mod summary;

use thiserror::Error;

pub use context::HarnessContext;
pub use orchestrator::Harness;
pub use report::{ConsoleReport, JsonReport, ReportSink};
pub use summary::{SuiteSummary, TestReport, TestStatus};

use crate::config::ConfigError;
use crate::error::{ManifestError, ResourceError, ToolchainError};
use crate::runner::RunnerError;

/// Errors that abort a harness run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("Failed to write report: {0}")]
    Report(#[from] std::io::Error),
}
