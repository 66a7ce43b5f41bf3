//! Manifest data model: the assignment, its test cases and their variants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default wall-clock limit for one program run, in seconds.
pub const DEFAULT_TIMEOUT_SEC: u64 = 5;

/// Default tolerance used when comparing numeric solutions.
pub const DEFAULT_SOLUTION_TOLERANCE: f64 = 1e-3;

/// Suffix marking a value as a reference to a stored file.
pub const FILE_REFERENCE_SUFFIX: &str = ".txt";

fn default_timeout_sec() -> u64 {
    DEFAULT_TIMEOUT_SEC
}

fn default_solution_tolerance() -> f64 {
    DEFAULT_SOLUTION_TOLERANCE
}

/// A single manifest value that is coerced to text before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl ScalarValue {
    /// Returns the textual form of this value.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Returns true if this value names a stored file.
    pub fn is_file_reference(&self) -> bool {
        matches!(self, ScalarValue::Text(s) if s.ends_with(FILE_REFERENCE_SUFFIX))
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Text(s) => f.write_str(s),
            ScalarValue::Integer(n) => write!(f, "{}", n),
            ScalarValue::Float(x) => f.write_str(&format_float(*x)),
            ScalarValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
        }
    }
}

/// Formats a float the way the manifest's numbers read back as text.
///
/// Integral values keep a trailing `.0`. Exponents below -4 or from 16 up use
/// scientific notation with a signed, two-digit exponent (`1e-05`, `1e+20`).
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` gives the shortest round-trip digits, e.g. "1.5e-7".
    let scientific = format!("{:e}", x);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if x != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    let plain = x.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

/// A manifest number that remembers whether it was written as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn value(&self) -> f64 {
        match *self {
            Number::Integer(n) => n as f64,
            Number::Float(x) => x,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Integer(n)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Float(x)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Text(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Text(s)
    }
}

/// An expectation field: a single value or an ordered sequence of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectationValue {
    Many(Vec<ScalarValue>),
    One(ScalarValue),
}

impl ExpectationValue {
    /// Returns the declared values in order.
    pub fn items(&self) -> &[ScalarValue] {
        match self {
            ExpectationValue::Many(items) => items,
            ExpectationValue::One(item) => std::slice::from_ref(item),
        }
    }
}

/// Expectation fields shared by test cases and variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expectations {
    /// Substrings that must appear in the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_contains: Option<ExpectationValue>,
    /// Regex patterns that must match somewhere in the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_regex: Option<ExpectationValue>,
    /// Expected numeric solution, position 0 first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_solution: Option<Vec<Number>>,
    /// Fixed tolerance overriding the manifest default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_tolerance: Option<f64>,
    /// Derive the tolerance from the last number in the input.
    #[serde(default)]
    pub use_input_tolerance: bool,
    /// Extra factor applied to a derived tolerance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance_scale: Option<f64>,
}

impl Expectations {
    /// Returns true if nothing at all is expected.
    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<ExpectationValue>| v.as_ref().map_or(true, |v| v.items().is_empty());
        blank(&self.out_contains) && blank(&self.out_regex) && self.expected_solution.is_none()
    }
}

/// An alternative acceptable expectation set for a test case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(flatten)]
    pub expectations: Expectations,
    /// Text looked up in the first non-blank output line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Variant {
    /// Returns the selector if it is non-empty.
    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// One manifest-declared scenario: input plus expectations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Literal input text, or a file name ending in `.txt`.
    #[serde(rename = "in")]
    pub input: ScalarValue,
    #[serde(flatten)]
    pub expectations: Expectations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
}

impl TestCase {
    /// Creates a test case with the given input and no expectations.
    pub fn new(input: impl Into<ScalarValue>) -> Self {
        Self {
            input: input.into(),
            expectations: Expectations::default(),
            description: None,
            variants: Vec::new(),
        }
    }

    /// Short human-readable label used in reports.
    pub fn label(&self) -> String {
        if let Some(description) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            return description.trim().to_string();
        }
        let text = self.input.to_text();
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        match (lines.next(), lines.next()) {
            (Some(first), None) => truncate(first.trim(), 40),
            (Some(first), Some(_)) => format!("{} ...", truncate(first.trim(), 40)),
            (None, _) => "<empty input>".to_string(),
        }
    }
}

/// Top-level configuration for one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub tests: Vec<TestCase>,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
    #[serde(default = "default_solution_tolerance")]
    pub solution_tolerance: f64,
    /// Print the full output and expected answers for failed tests.
    #[serde(default)]
    pub show_answers: bool,
    /// Free-text description of the expected input format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_description: Option<String>,
    /// Pick one variant by its selector in the first output line.
    #[serde(default)]
    pub select_variant_by_output: bool,
}

impl Manifest {
    /// Creates a manifest with default settings around the given tests.
    pub fn new(tests: Vec<TestCase>) -> Self {
        Self {
            tests,
            timeout_sec: DEFAULT_TIMEOUT_SEC,
            solution_tolerance: DEFAULT_SOLUTION_TOLERANCE,
            show_answers: false,
            input_description: None,
            select_variant_by_output: false,
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
