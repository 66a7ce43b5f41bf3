//! Output verification engine.
//!
//! Decides whether captured program output satisfies a test case:
//!
//! 1. required substrings must occur in the output,
//! 2. required regex patterns must match somewhere,
//! 3. an expected numeric solution must be printed within tolerance.
//!
//! Typographic dashes are folded to `-` on both sides before any comparison.
//! When a test case declares variants, the engine picks one by selector or
//! tries them in order (see [`VerificationEngine::verify`]).

pub mod checks;
pub mod engine;
pub mod normalize;
pub mod outcome;
pub mod solution;
pub mod tolerance;

pub use checks::{CaseChecks, CheckSet, ResolveEnv, SolutionCheck, VariantChecks};
pub use engine::{check_contains, check_regex, check_solution, select_variant, VerificationEngine};
pub use normalize::{first_non_blank_line, normalize_dashes};
pub use outcome::{Missing, VerificationOutcome};
pub use solution::{extract_solution, Solution};
pub use tolerance::{derive_tolerance, INPUT_TOLERANCE_FACTOR, MIN_TOLERANCE};
