//! Run orchestrator: drives every test case of a manifest in order.

use tracing::{debug, info};

use super::context::HarnessContext;
use super::report::ReportSink;
use super::summary::{SuiteSummary, TestReport, TestStatus};
use super::HarnessError;
use crate::manifest::TestCase;
use crate::resolve::resolve_input;
use crate::runner::ProgramRunner;
use crate::verify::{extract_solution, normalize_dashes, CaseChecks, ResolveEnv, VerificationEngine};

/// Runs a lab's test suite against the prepared program.
pub struct Harness {
    context: HarnessContext,
    runner: ProgramRunner,
    engine: VerificationEngine,
}

impl Harness {
    /// Creates a harness from a prepared context.
    pub fn new(context: HarnessContext) -> Self {
        let runner = ProgramRunner::new(context.command.clone(), context.timeout());
        let engine = VerificationEngine::new(context.manifest.select_variant_by_output);
        Self {
            context,
            runner,
            engine,
        }
    }

    /// Runs every test case in manifest order, reporting each as it finishes.
    ///
    /// Mismatches and timeouts are recorded as failed tests. Missing input or
    /// expectation files and launch failures abort the run.
    pub async fn run(&self, sink: &mut dyn ReportSink) -> Result<SuiteSummary, HarnessError> {
        let mut summary = SuiteSummary::default();

        info!(
            "Running {} tests with {}",
            self.context.manifest.tests.len(),
            self.runner.command()
        );

        for (idx, test) in self.context.manifest.tests.iter().enumerate() {
            let report = self.run_test(idx + 1, test).await?;
            debug!("Test {} {}", report.number, report.status);
            sink.test_finished(&report)?;
            summary.record(report);
        }

        sink.suite_finished(&summary)?;
        info!(
            "Finished: {}/{} passed, {} failed",
            summary.passed,
            summary.total,
            summary.failures()
        );
        Ok(summary)
    }

    /// Resolves, runs and verifies one test case.
    pub async fn run_test(&self, number: usize, test: &TestCase) -> Result<TestReport, HarnessError> {
        let input = resolve_input(&test.input, &self.context.input_dir)?;
        let input_text = String::from_utf8_lossy(&input);

        let env = ResolveEnv {
            expected_dir: &self.context.expected_dir,
            input_text: &input_text,
            default_tolerance: self.context.manifest.solution_tolerance,
        };
        let checks = CaseChecks::resolve(test, &env)?;

        let mut report = TestReport {
            number,
            label: test.label(),
            status: TestStatus::Failed,
            missing: Vec::new(),
            variant: None,
            expected: checks.direct.clone(),
            found_solution: None,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            duration: Default::default(),
        };

        let execution = match self.runner.run(&input).await {
            Ok(execution) => execution,
            Err(e) if e.is_timeout() => {
                report.status = TestStatus::TimedOut;
                report.duration = self.runner.timeout();
                return Ok(report);
            }
            Err(e) => return Err(e.into()),
        };

        if !execution.is_success() {
            debug!("Test {} exited with code {}", number, execution.exit_code);
        }
        let outcome = self.engine.verify(&execution.stdout, &checks);

        if let Some(index) = outcome.variant {
            let variant = &checks.variants[index];
            report.variant = Some(variant.name(index));
            report.expected = variant.checks.clone();
        }
        if report.expected.solution.is_some() {
            report.found_solution = Some(extract_solution(&normalize_dashes(&execution.stdout)));
        }

        report.status = if outcome.passed {
            TestStatus::Passed
        } else {
            TestStatus::Failed
        };
        report.missing = outcome.missing_list();
        report.exit_code = Some(execution.exit_code);
        report.duration = execution.duration;
        report.stdout = execution.stdout;
        report.stderr = execution.stderr;
        Ok(report)
    }
}
