//! The verification engine: decides pass/fail for captured output.

use regex::Regex;
use tracing::debug;

use super::checks::{CaseChecks, CheckSet, SolutionCheck, VariantChecks};
use super::normalize::{first_non_blank_line, normalize_dashes};
use super::outcome::{Missing, VerificationOutcome};
use super::solution::{extract_solution, is_zero_based};

/// Evaluates output against resolved checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerificationEngine {
    select_by_output: bool,
}

impl VerificationEngine {
    /// Creates an engine; `select_by_output` enables selector-based variant choice.
    pub fn new(select_by_output: bool) -> Self {
        Self { select_by_output }
    }

    /// Verifies output for a whole test case.
    ///
    /// Without variants the direct checks decide. With variants, either the
    /// variant named by the first output line is evaluated alone, or variants
    /// are tried in order until one passes; the last attempt is reported if
    /// none does.
    pub fn verify(&self, output: &str, case: &CaseChecks) -> VerificationOutcome {
        if case.variants.is_empty() {
            return self.evaluate(output, &case.direct);
        }

        if self.select_by_output {
            if let Some(index) = select_variant(output, &case.variants) {
                debug!("Selected variant {} by output", index + 1);
                return self
                    .evaluate(output, &case.variants[index].checks)
                    .with_variant(index);
            }
            debug!("No variant selector matched the first output line");
        }

        let mut last = VerificationOutcome::default();
        for (index, variant) in case.variants.iter().enumerate() {
            last = self.evaluate(output, &variant.checks).with_variant(index);
            if last.passed {
                break;
            }
        }
        last
    }

    /// Evaluates a single check set.
    pub fn evaluate(&self, output: &str, checks: &CheckSet) -> VerificationOutcome {
        let output = normalize_dashes(output);
        let mut missing = check_contains(&output, &checks.contains);
        missing.extend(check_regex(&output, &checks.regex));
        if let Some(solution) = &checks.solution {
            missing.extend(check_solution(&output, solution));
        }
        VerificationOutcome::from_missing(missing)
    }
}

/// Picks the first variant whose selector occurs in the first non-blank line.
pub fn select_variant(output: &str, variants: &[VariantChecks]) -> Option<usize> {
    let output = normalize_dashes(output);
    let line = first_non_blank_line(&output)?;
    variants.iter().position(|variant| {
        variant
            .selector
            .as_deref()
            .is_some_and(|selector| line.contains(&*normalize_dashes(selector)))
    })
}

/// Lists required substrings absent from `output`.
pub fn check_contains(output: &str, expected: &[String]) -> Vec<Missing> {
    expected
        .iter()
        .filter(|item| !output.contains(&*normalize_dashes(item)))
        .map(|item| Missing::Substring(item.clone()))
        .collect()
}

/// Lists patterns with no match anywhere in `output`.
///
/// A `$` anchor also matches before one final newline, so `Answer: \d+$`
/// accepts `"Answer: 42\n"`.
pub fn check_regex(output: &str, patterns: &[String]) -> Vec<Missing> {
    let without_final_newline = output.strip_suffix('\n');
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(&normalize_dashes(pattern)) {
            Ok(re) if re.is_match(output) => None,
            Ok(re) if without_final_newline.is_some_and(|text| re.is_match(text)) => None,
            Ok(_) => Some(Missing::Regex(pattern.clone())),
            Err(e) => {
                debug!("Invalid pattern {:?}: {}", pattern, e);
                Some(Missing::InvalidRegex(pattern.clone()))
            }
        })
        .collect()
}

/// Compares the solution printed in `output` with the expected one.
///
/// Position `i` maps to index `i` when the output is 0-based (has `x[0]` or
/// `x0`) and to `i + 1` otherwise.
pub fn check_solution(output: &str, check: &SolutionCheck) -> Vec<Missing> {
    let found = extract_solution(output);
    if found.is_empty() {
        return vec![Missing::SolutionNotFound];
    }

    let offset = if is_zero_based(&found) { 0 } else { 1 };
    check
        .expected
        .iter()
        .enumerate()
        .filter_map(|(position, &expected)| {
            let key = position + offset;
            match found.get(&key) {
                None => Some(Missing::IndexNotFound { key }),
                Some(&actual) if (actual - expected.value()).abs() > check.tolerance => {
                    Some(Missing::OutOfTolerance {
                        key,
                        expected,
                        actual,
                        tolerance: check.tolerance,
                    })
                }
                Some(_) => None,
            }
        })
        .collect()
}
