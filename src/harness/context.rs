//! Immutable per-run context shared by every test case.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use super::HarnessError;
use crate::config::HarnessConfig;
use crate::manifest::Manifest;
use crate::runner::ProgramCommand;
use crate::toolchain::{resolve_program, ConventionalLayout, FixedLanguage, LocalToolchain, SourceDetector};

/// Manifest, directories and program command for one run.
#[derive(Debug, Clone)]
pub struct HarnessContext {
    pub manifest: Manifest,
    pub command: ProgramCommand,
    pub input_dir: PathBuf,
    pub expected_dir: PathBuf,
    /// Show outputs and expected answers on failure.
    pub show_answers: bool,
}

impl HarnessContext {
    /// Creates a context from already prepared parts.
    pub fn new(manifest: Manifest, command: ProgramCommand, tests_dir: impl Into<PathBuf>) -> Self {
        let tests_dir = tests_dir.into();
        Self {
            show_answers: manifest.show_answers,
            manifest,
            command,
            input_dir: tests_dir.join("input"),
            expected_dir: tests_dir.join("expected"),
        }
    }

    /// Loads the manifest and prepares the program for a configured lab.
    ///
    /// Every configuration problem surfaces here, before any test runs.
    pub async fn prepare(config: &HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;

        let manifest_path = config.manifest_path();
        let manifest = Manifest::load(&manifest_path)?;
        info!(
            "Lab {}: {} tests from {}",
            config.lab,
            manifest.tests.len(),
            manifest_path.display()
        );

        let detector: Box<dyn SourceDetector> = match config.language {
            Some(language) => Box::new(FixedLanguage(language)),
            None => Box::new(ConventionalLayout),
        };
        let builder = LocalToolchain::new().with_python(&config.python);
        let command = resolve_program(
            detector.as_ref(),
            &builder,
            &config.lab_dir(),
            &config.build_dir(),
            config.run_cmd.as_deref(),
        )
        .await?;

        let mut context = Self::new(manifest, command, config.tests_dir());
        context.show_answers |= config.show_answers;
        Ok(context)
    }

    /// Per-run timeout from the manifest.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.manifest.timeout_sec)
    }
}
