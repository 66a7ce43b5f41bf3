//! Program runner for test cases.
//!
//! The runner launches the prepared command for the program under test,
//! writes the test input to its stdin and captures stdout/stderr.
//!
//! ```text
//! ProgramCommand + input bytes → ProgramRunner → ExecutionResult | Timeout
//! ```
//!
//! Exit codes are recorded but never interpreted: pass or fail is decided by
//! the verification engine from the output alone.

pub mod command;
pub mod executor;
pub mod result;

pub use command::ProgramCommand;
pub use executor::{ProgramRunner, RunnerError};
pub use result::{ExecutionResult, SIGNAL_EXIT_CODE};
