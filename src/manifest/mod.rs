//! Per-assignment test manifest.
//!
//! A manifest lists the test cases of one lab together with run-wide settings
//! (timeout, default tolerance, reporting flags). It is loaded once per run and
//! never mutated afterwards.

pub mod loader;
pub mod types;

pub use loader::{find_manifest, MANIFEST_FILE_NAMES};
pub use types::{
    format_float, ExpectationValue, Expectations, Manifest, Number, ScalarValue, TestCase, Variant,
    DEFAULT_SOLUTION_TOLERANCE, DEFAULT_TIMEOUT_SEC, FILE_REFERENCE_SUFFIX,
};
