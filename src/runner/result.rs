//! Captured result of one program run.

use std::time::Duration;

/// Exit code recorded when the process was terminated by a signal.
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Output of a program run that finished within its timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// Exit code, or [`SIGNAL_EXIT_CODE`] if killed by a signal.
    pub exit_code: i32,
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
    /// Wall-clock time of the run.
    pub duration: Duration,
}

impl ExecutionResult {
    /// Builds a result from raw captured streams.
    pub fn from_raw(exit_code: Option<i32>, stdout: &[u8], stderr: &[u8], duration: Duration) -> Self {
        Self {
            exit_code: exit_code.unwrap_or(SIGNAL_EXIT_CODE),
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
            duration,
        }
    }

    /// Returns true if the program exited with code 0.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}
