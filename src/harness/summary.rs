//! Per-test reports and the suite summary.

use std::time::Duration;

use serde::Serialize;

use crate::verify::{CheckSet, Solution};

/// Final state of one test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
    TimedOut,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::TimedOut => write!(f, "timed_out"),
        }
    }
}

/// Everything known about one evaluated test case.
#[derive(Debug, Clone, Serialize)]
pub struct TestReport {
    /// 1-based position in the manifest.
    pub number: usize,
    pub label: String,
    pub status: TestStatus,
    /// Unmet expectations, rendered as text.
    pub missing: Vec<String>,
    /// Name of the variant the outcome belongs to.
    pub variant: Option<String>,
    /// Checks the outcome was judged against.
    pub expected: CheckSet,
    /// Solution found in the output, when a solution was expected.
    pub found_solution: Option<Solution>,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// Aggregate result of a suite run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub results: Vec<TestReport>,
}

impl SuiteSummary {
    /// Records one test report.
    pub fn record(&mut self, report: TestReport) {
        self.total += 1;
        match report.status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::Failed => self.failed += 1,
            TestStatus::TimedOut => self.timed_out += 1,
        }
        self.results.push(report);
    }

    /// Returns true if every recorded test passed and at least one ran.
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }

    /// Failed tests, timeouts included.
    pub fn failures(&self) -> usize {
        self.failed + self.timed_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(number: usize, status: TestStatus) -> TestReport {
        TestReport {
            number,
            label: format!("test {number}"),
            status,
            missing: Vec::new(),
            variant: None,
            expected: CheckSet::default(),
            found_solution: None,
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = SuiteSummary::default();
        assert!(!summary.all_passed());

        summary.record(report(1, TestStatus::Passed));
        assert!(summary.all_passed());

        summary.record(report(2, TestStatus::Failed));
        summary.record(report(3, TestStatus::TimedOut));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failures(), 2);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&TestStatus::TimedOut).unwrap();
        assert_eq!(json, "\"timed_out\"");
    }
}
