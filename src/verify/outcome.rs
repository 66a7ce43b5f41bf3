//! Verification outcome and missing-expectation descriptors.

use std::fmt;

use serde::Serialize;

use crate::manifest::Number;

/// One unmet expectation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Missing {
    /// A required substring is absent.
    Substring(String),
    /// A required pattern matched nowhere.
    Regex(String),
    /// A required pattern failed to compile.
    InvalidRegex(String),
    /// The output contains no indexed assignment at all.
    SolutionNotFound,
    /// The output has no value for this index.
    IndexNotFound { key: usize },
    /// The value for this index differs from the expected one by more than the tolerance.
    OutOfTolerance {
        key: usize,
        expected: Number,
        actual: f64,
        tolerance: f64,
    },
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Substring(s) => f.write_str(s),
            Missing::Regex(pattern) => write!(f, "regex:{}", pattern),
            Missing::InvalidRegex(pattern) => write!(f, "regex:{}:invalid", pattern),
            Missing::SolutionNotFound => f.write_str("solution:not_found"),
            Missing::IndexNotFound { key } => write!(f, "solution:x{}:not_found", key),
            Missing::OutOfTolerance { key, expected, .. } => {
                write!(f, "solution:x{}:expected≈{}", key, expected)
            }
        }
    }
}

/// Result of checking one output against one expectation set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerificationOutcome {
    /// True iff nothing is missing.
    pub passed: bool,
    /// Unmet expectations, in check order.
    pub missing: Vec<Missing>,
    /// Index of the variant that produced this outcome, if variants were used.
    pub variant: Option<usize>,
}

impl VerificationOutcome {
    /// Builds an outcome from a missing-list.
    pub fn from_missing(missing: Vec<Missing>) -> Self {
        Self {
            passed: missing.is_empty(),
            missing,
            variant: None,
        }
    }

    /// Records which variant produced this outcome.
    pub fn with_variant(mut self, index: usize) -> Self {
        self.variant = Some(index);
        self
    }

    /// Missing-list rendered as text.
    pub fn missing_list(&self) -> Vec<String> {
        self.missing.iter().map(ToString::to_string).collect()
    }
}
