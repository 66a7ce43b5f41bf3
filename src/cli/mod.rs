//! Command-line interface for labcheck.
//!
//! Provides the `run` command that tests a lab submission and the
//! `detect-lab` helper for CI workflows.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli, Commands, RunArgs};
