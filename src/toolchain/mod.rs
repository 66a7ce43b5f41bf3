//! Toolchain glue: from a lab directory to a runnable command.
//!
//! ```text
//! lab dir → SourceDetector → DetectedSource → ProgramBuilder → ProgramCommand
//! ```
//!
//! The verification engine and the orchestrator only ever see the resulting
//! [`ProgramCommand`]; compilers and interpreters stay behind the two
//! capability traits.

pub mod build;
pub mod language;

use std::path::Path;

use tracing::info;

pub use build::{LocalToolchain, ProgramBuilder, DEFAULT_PYTHON};
pub use language::{ConventionalLayout, DetectedSource, Language, SourceDetector};

use crate::error::ToolchainError;
use crate::runner::ProgramCommand;

/// Detector that trusts a configured language instead of probing.
#[derive(Debug, Clone, Copy)]
pub struct FixedLanguage(pub Language);

impl SourceDetector for FixedLanguage {
    fn detect(&self, dir: &Path) -> Option<DetectedSource> {
        let path = dir.join(self.0.source_file_name());
        path.is_file().then_some(DetectedSource {
            language: self.0,
            path,
        })
    }
}

/// Resolves the command for the submission in `lab_dir`.
///
/// When no source is detected, `run_cmd` (the `RUN_CMD` fallback) is split on
/// whitespace and used as-is.
pub async fn resolve_program(
    detector: &dyn SourceDetector,
    builder: &dyn ProgramBuilder,
    lab_dir: &Path,
    build_dir: &Path,
    run_cmd: Option<&str>,
) -> Result<ProgramCommand, ToolchainError> {
    if !lab_dir.is_dir() {
        return Err(ToolchainError::LabDirNotFound(lab_dir.to_path_buf()));
    }

    if let Some(source) = detector.detect(lab_dir) {
        info!("Detected {} submission: {}", source.language, source.path.display());
        return builder.build(&source, build_dir).await;
    }

    match run_cmd {
        Some(line) => {
            let command = ProgramCommand::from_command_line(line).ok_or(ToolchainError::EmptyRunCommand)?;
            info!("No known source file, using RUN_CMD: {}", command);
            Ok(command)
        }
        None => Err(ToolchainError::NothingToRun),
    }
}
