//! labcheck: test harness for programming lab assignments.
//!
//! This library loads a lab's test manifest, builds the submitted program,
//! runs it once per test case and verifies the captured output against
//! substring, regex and numeric-solution expectations.

// Core modules
pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
pub mod manifest;
pub mod resolve;
pub mod runner;
pub mod toolchain;
pub mod verify;

// Re-export commonly used types
pub use config::{ConfigError, HarnessConfig};
pub use error::{LabError, ManifestError, ResourceError, ToolchainError};
pub use harness::{Harness, HarnessContext, HarnessError, SuiteSummary, TestReport, TestStatus};
pub use manifest::{Manifest, TestCase};
pub use verify::{VerificationEngine, VerificationOutcome};
