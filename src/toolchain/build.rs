//! Building submissions into a runnable command.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::language::{DetectedSource, Language};
use crate::error::ToolchainError;
use crate::runner::ProgramCommand;

/// Default Python interpreter.
pub const DEFAULT_PYTHON: &str = "python3";

/// Name of the compiled binary inside the build directory.
const BINARY_NAME: &str = "main";

/// Capability: turn a detected source into the command that runs it.
#[async_trait]
pub trait ProgramBuilder: Send + Sync {
    /// Compiles `source` if needed, placing artifacts in `build_dir`.
    async fn build(&self, source: &DetectedSource, build_dir: &Path) -> Result<ProgramCommand, ToolchainError>;
}

/// Builder using compilers and interpreters found on `PATH`.
#[derive(Debug, Clone)]
pub struct LocalToolchain {
    python: String,
}

impl LocalToolchain {
    pub fn new() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
        }
    }

    /// Sets the Python interpreter.
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }
}

impl Default for LocalToolchain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgramBuilder for LocalToolchain {
    async fn build(&self, source: &DetectedSource, build_dir: &Path) -> Result<ProgramCommand, ToolchainError> {
        tokio::fs::create_dir_all(build_dir).await?;
        let src = source.path.to_string_lossy().into_owned();
        let binary = build_dir.join(BINARY_NAME).to_string_lossy().into_owned();

        info!("Preparing {} program {}", source.language, source.path.display());

        match source.language {
            Language::Python => Ok(ProgramCommand::new(&self.python).arg(src)),
            Language::C => {
                let compile = ProgramCommand::new("gcc").arg(&src).arg("-O2").arg("-o").arg(&binary);
                compile_step(source.language, &compile, None).await?;
                Ok(ProgramCommand::new(binary))
            }
            Language::Cpp => {
                let compile = ProgramCommand::new("g++").arg(&src).arg("-O2").arg("-o").arg(&binary);
                compile_step(source.language, &compile, None).await?;
                Ok(ProgramCommand::new(binary))
            }
            Language::Java => {
                // javac runs inside the source directory, so it gets the bare file name.
                let class_dir = source
                    .path
                    .parent()
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                let file_name = source
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or(src);
                let compile = ProgramCommand::new("javac").arg(file_name);
                compile_step(source.language, &compile, Some(class_dir)).await?;
                Ok(ProgramCommand::new("java")
                    .arg("-cp")
                    .arg(class_dir.to_string_lossy())
                    .arg("Main"))
            }
            Language::Go => {
                let compile = ProgramCommand::new("go").arg("build").arg("-o").arg(&binary).arg(&src);
                compile_step(source.language, &compile, None).await?;
                Ok(ProgramCommand::new(binary))
            }
        }
    }
}

/// Runs one compiler invocation; a non-zero exit is a build failure.
async fn compile_step(
    language: Language,
    compile: &ProgramCommand,
    working_dir: Option<&Path>,
) -> Result<(), ToolchainError> {
    debug!("Build command: {}", compile);

    let mut cmd = Command::new(compile.program());
    cmd.args(compile.args());
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    let output = cmd.output().await.map_err(|source| ToolchainError::Launch {
        program: compile.program().to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(ToolchainError::BuildFailed {
            language: language.display_name().to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
