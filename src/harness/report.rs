//! Report sinks: console text and JSON.

use std::io::{self, Write};

use super::summary::{SuiteSummary, TestReport, TestStatus};

/// Receives test results as they are produced.
pub trait ReportSink {
    /// Called once per test case, in manifest order.
    fn test_finished(&mut self, report: &TestReport) -> io::Result<()>;

    /// Called once after the last test case.
    fn suite_finished(&mut self, summary: &SuiteSummary) -> io::Result<()>;
}

/// Line-oriented human-readable report.
pub struct ConsoleReport<W: Write> {
    out: W,
    show_answers: bool,
    input_description: Option<String>,
    timeout_sec: u64,
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W, timeout_sec: u64) -> Self {
        Self {
            out,
            show_answers: false,
            input_description: None,
            timeout_sec,
        }
    }

    /// Prints outputs and expected answers for failed tests.
    pub fn with_answers(mut self, show: bool) -> Self {
        self.show_answers = show;
        self
    }

    /// Sets the input format description shown with answers.
    pub fn with_input_description(mut self, description: Option<String>) -> Self {
        self.input_description = description;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_answers(&mut self, report: &TestReport) -> io::Result<()> {
        if let Some(description) = &self.input_description {
            writeln!(self.out, "  Input format: {}", description)?;
        }
        if let Some(variant) = &report.variant {
            writeln!(self.out, "  Variant: {}", variant)?;
        }
        if let Some(code) = report.exit_code {
            writeln!(self.out, "  Exit code: {}", code)?;
        }

        writeln!(self.out, "  Output:")?;
        write_block(&mut self.out, &report.stdout)?;
        if !report.stderr.trim().is_empty() {
            writeln!(self.out, "  Stderr:")?;
            write_block(&mut self.out, &report.stderr)?;
        }

        let expected = &report.expected;
        writeln!(self.out, "  Expected:")?;
        for item in &expected.contains {
            writeln!(self.out, "    contains: {}", item)?;
        }
        for pattern in &expected.regex {
            writeln!(self.out, "    regex: {}", pattern)?;
        }
        if let Some(solution) = &expected.solution {
            let values: Vec<String> = solution.expected.iter().map(|v| v.to_string()).collect();
            writeln!(
                self.out,
                "    solution: [{}] (tolerance {})",
                values.join(", "),
                solution.tolerance
            )?;
        }
        if let Some(found) = &report.found_solution {
            if found.is_empty() {
                writeln!(self.out, "  Found solution: none")?;
            } else {
                let values: Vec<String> = found.iter().map(|(k, v)| format!("x{} = {}", k, v)).collect();
                writeln!(self.out, "  Found solution: {}", values.join(", "))?;
            }
        }
        Ok(())
    }
}

fn write_block<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    if text.trim().is_empty() {
        return writeln!(out, "    (empty)");
    }
    for line in text.lines() {
        writeln!(out, "    | {}", line)?;
    }
    Ok(())
}

impl<W: Write> ReportSink for ConsoleReport<W> {
    fn test_finished(&mut self, report: &TestReport) -> io::Result<()> {
        let head = format!("Test {} ({})", report.number, report.label);
        match report.status {
            TestStatus::Passed => writeln!(self.out, "PASS {}", head)?,
            TestStatus::Failed => {
                writeln!(self.out, "FAIL {}: missing {:?}", head, report.missing)?;
                if self.show_answers {
                    self.write_answers(report)?;
                }
            }
            TestStatus::TimedOut => {
                writeln!(self.out, "FAIL {}: timed out after {}s", head, self.timeout_sec)?;
            }
        }
        Ok(())
    }

    fn suite_finished(&mut self, summary: &SuiteSummary) -> io::Result<()> {
        if summary.all_passed() {
            writeln!(self.out, "All {} tests passed", summary.total)?;
        } else {
            writeln!(
                self.out,
                "Passed {}/{} tests ({} failed, {} timed out)",
                summary.passed, summary.total, summary.failed, summary.timed_out
            )?;
        }
        self.out.flush()
    }
}

/// Prints the whole summary as pretty JSON at the end of the run.
pub struct JsonReport<W: Write> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn test_finished(&mut self, _report: &TestReport) -> io::Result<()> {
        Ok(())
    }

    fn suite_finished(&mut self, summary: &SuiteSummary) -> io::Result<()> {
        let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
        writeln!(self.out, "{}", json)?;
        self.out.flush()
    }
}
