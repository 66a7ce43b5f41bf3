//! Program runner: launches the program under test with a timeout.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::command::ProgramCommand;
use super::result::ExecutionResult;

/// Runs a fixed command once per test case.
#[derive(Debug, Clone)]
pub struct ProgramRunner {
    command: ProgramCommand,
    timeout: Duration,
}

impl ProgramRunner {
    /// Creates a runner for the given command and per-run timeout.
    pub fn new(command: ProgramCommand, timeout: Duration) -> Self {
        Self {
            command,
            timeout,
        }
    }

    pub fn command(&self) -> &ProgramCommand {
        &self.command
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs the program with `input` on stdin.
    ///
    /// A non-zero exit status is not an error. Exceeding the timeout kills the
    /// process and returns [`RunnerError::Timeout`].
    pub async fn run(&self, input: &[u8]) -> Result<ExecutionResult, RunnerError> {
        let start = Instant::now();

        let mut cmd = Command::new(self.command.program());
        cmd.args(self.command.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| RunnerError::Spawn {
            command: self.command.to_string(),
            source,
        })?;

        let stdin = child.stdin.take();
        let input = input.to_vec();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&input).await?;
                stdin.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };

        // Feed stdin while draining stdout/stderr so large inputs cannot deadlock.
        let run = async {
            let (fed, output) = tokio::join!(feed, child.wait_with_output());
            if let Err(e) = fed {
                // The program may exit without reading all of its input.
                debug!("Stopped writing stdin early: {}", e);
            }
            output
        };

        match tokio::time::timeout(self.timeout, run).await {
            Ok(Ok(output)) => {
                let result = ExecutionResult::from_raw(
                    output.status.code(),
                    &output.stdout,
                    &output.stderr,
                    start.elapsed(),
                );
                debug!(
                    "Program exited with code {} after {:?}",
                    result.exit_code, result.duration
                );
                Ok(result)
            }
            Ok(Err(e)) => Err(RunnerError::Io(e)),
            Err(_) => {
                // Dropping the future drops the child, which kills it.
                warn!("Program timed out after {:?}", self.timeout);
                Err(RunnerError::Timeout(self.timeout))
            }
        }
    }
}

/// Error types for the runner.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunnerError {
    /// Returns true for a timeout, which fails only the current test.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RunnerError::Timeout(_))
    }
}
