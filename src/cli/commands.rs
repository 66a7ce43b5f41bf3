//! CLI command definitions for labcheck.
//!
//! `run` tests one lab's submission; `detect-lab` works out the lab number
//! for CI workflows.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use crate::config::{detect_lab_from_env, write_lab_output, HarnessConfig};
use crate::harness::{ConsoleReport, Harness, HarnessContext, JsonReport, ReportSink};
use crate::toolchain::{Language, DEFAULT_PYTHON};

/// Test harness for programming lab assignments.
#[derive(Parser)]
#[command(name = "labcheck")]
#[command(about = "Run a lab submission against its test manifest")]
#[command(version)]
#[command(
    long_about = "labcheck builds a lab submission, feeds it every test input from the lab's manifest and checks the output.\n\nExample usage:\n  labcheck run --lab 3 --show-answers\n  RUN_CMD=\"./solution\" labcheck run --lab 1"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Build the submission and run the lab's tests.
    Run(RunArgs),

    /// Print the lab number, or append `lab=<N>` to `$GITHUB_OUTPUT`.
    DetectLab,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Lab number. Detected from the branch name when omitted.
    #[arg(long, env = "LAB")]
    pub lab: Option<String>,

    /// Repository root containing `labs/` and `tests/`.
    #[arg(long, env = "LABCHECK_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Command used when no known source file is found.
    #[arg(long, env = "RUN_CMD")]
    pub run_cmd: Option<String>,

    /// Python interpreter for Python submissions.
    #[arg(long, env = "LABCHECK_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: String,

    /// Force the submission language instead of probing for a source file.
    #[arg(long)]
    pub language: Option<Language>,

    /// Show outputs and expected answers for failed tests.
    #[arg(long)]
    pub show_answers: bool,

    /// Print the whole result as JSON instead of text.
    #[arg(short, long)]
    pub json: bool,
}

impl RunArgs {
    /// Builds the harness configuration, falling back to branch detection
    /// for the lab number.
    pub fn to_config(&self) -> anyhow::Result<HarnessConfig> {
        let lab = match self.lab.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            Some(lab) => lab.to_string(),
            None => detect_lab_from_env()?,
        };

        let mut config = HarnessConfig::new(&self.root, lab)
            .with_python(&self.python)
            .with_show_answers(self.show_answers);
        if let Some(cmd) = self.run_cmd.as_deref().filter(|c| !c.trim().is_empty()) {
            config = config.with_run_cmd(cmd);
        }
        if let Some(language) = self.language {
            config = config.with_language(language);
        }
        Ok(config)
    }
}

/// Parse CLI arguments without running any command.
///
/// Use this with [`run_with_cli`] to initialize logging before running.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI with the parsed arguments.
///
/// Returns a failure exit code when any test fails; fatal errors are
/// returned as `Err`.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Run(args) => run_tests_command(args).await,
        Commands::DetectLab => run_detect_lab_command(),
    }
}

async fn run_tests_command(args: RunArgs) -> anyhow::Result<ExitCode> {
    let config = args.to_config()?;
    let context = HarnessContext::prepare(&config).await?;

    let stdout = io::stdout().lock();
    let mut sink: Box<dyn ReportSink> = if args.json {
        Box::new(JsonReport::new(stdout))
    } else {
        Box::new(
            ConsoleReport::new(stdout, context.manifest.timeout_sec)
                .with_answers(context.show_answers)
                .with_input_description(context.manifest.input_description.clone()),
        )
    };

    let summary = Harness::new(context).run(sink.as_mut()).await?;
    Ok(if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_detect_lab_command() -> anyhow::Result<ExitCode> {
    let lab = detect_lab_from_env()?;
    match std::env::var_os("GITHUB_OUTPUT").filter(|p| !p.is_empty()) {
        Some(path) => {
            write_lab_output(&PathBuf::from(path), &lab)?;
            info!("Detected lab {}", lab);
        }
        None => println!("{}", lab),
    }
    Ok(ExitCode::SUCCESS)
}
