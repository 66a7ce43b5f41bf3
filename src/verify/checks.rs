//! Fully resolved checks for a test case and its variants.

use std::path::Path;

use serde::Serialize;

use super::tolerance::derive_tolerance;
use crate::error::ResourceError;
use crate::manifest::{Expectations, Number, TestCase, Variant};
use crate::resolve::ResolvedExpectations;

/// Expected numeric solution with the tolerance it is compared under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionCheck {
    pub expected: Vec<Number>,
    pub tolerance: f64,
}

/// Concrete checks for one expectation set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckSet {
    pub contains: Vec<String>,
    pub regex: Vec<String>,
    pub solution: Option<SolutionCheck>,
}

impl CheckSet {
    /// Resolves an expectation set: expands file references and fixes the tolerance.
    pub fn resolve(expectations: &Expectations, env: &ResolveEnv<'_>) -> Result<Self, ResourceError> {
        let text = ResolvedExpectations::resolve(expectations, env.expected_dir)?;
        let solution = expectations.expected_solution.as_ref().map(|expected| SolutionCheck {
            expected: expected.clone(),
            tolerance: derive_tolerance(expectations, env.input_text, env.default_tolerance),
        });
        Ok(Self {
            contains: text.contains,
            regex: text.regex,
            solution,
        })
    }

    /// Returns true if this set checks nothing.
    pub fn is_empty(&self) -> bool {
        self.contains.is_empty() && self.regex.is_empty() && self.solution.is_none()
    }
}

/// What expectation resolution needs to know about the current test.
#[derive(Debug, Clone, Copy)]
pub struct ResolveEnv<'a> {
    /// Directory holding stored expectation files.
    pub expected_dir: &'a Path,
    /// The test's input, decoded; source of dynamic tolerances.
    pub input_text: &'a str,
    /// Manifest-wide tolerance.
    pub default_tolerance: f64,
}

/// A variant's checks plus how to recognize and describe it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariantChecks {
    pub checks: CheckSet,
    pub selector: Option<String>,
    pub description: Option<String>,
}

impl VariantChecks {
    pub fn resolve(variant: &Variant, env: &ResolveEnv<'_>) -> Result<Self, ResourceError> {
        Ok(Self {
            checks: CheckSet::resolve(&variant.expectations, env)?,
            selector: variant.selector().map(String::from),
            description: variant.description.clone(),
        })
    }

    /// Name used in reports: the description, else the selector.
    pub fn name(&self, index: usize) -> String {
        self.description
            .as_deref()
            .or(self.selector.as_deref())
            .map(String::from)
            .unwrap_or_else(|| format!("variant {}", index + 1))
    }
}

/// All checks of a test case.
///
/// Every variant is resolved up front, so a missing expectation file is
/// reported even if that variant would never be reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseChecks {
    pub direct: CheckSet,
    pub variants: Vec<VariantChecks>,
}

impl CaseChecks {
    pub fn resolve(test: &TestCase, env: &ResolveEnv<'_>) -> Result<Self, ResourceError> {
        Ok(Self {
            direct: CheckSet::resolve(&test.expectations, env)?,
            variants: test
                .variants
                .iter()
                .map(|variant| VariantChecks::resolve(variant, env))
                .collect::<Result<_, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ExpectationValue;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_case_with_variants() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("gauss.txt"), "Gauss\nx[0]\n").unwrap();

        let mut test = TestCase::new("2\n1 0 0.5");
        test.variants = vec![
            Variant {
                expectations: Expectations {
                    out_contains: Some(ExpectationValue::One("gauss.txt".into())),
                    ..Expectations::default()
                },
                selector: Some("Gauss".into()),
                description: None,
            },
            Variant {
                expectations: Expectations {
                    expected_solution: Some(vec![Number::Integer(1)]),
                    use_input_tolerance: true,
                    ..Expectations::default()
                },
                selector: None,
                description: Some("iterative".into()),
            },
        ];

        let env = ResolveEnv {
            expected_dir: temp.path(),
            input_text: "2\n1 0 0.5",
            default_tolerance: 1e-3,
        };
        let checks = CaseChecks::resolve(&test, &env).unwrap();

        assert!(checks.direct.is_empty());
        assert_eq!(checks.variants[0].checks.contains, vec!["Gauss", "x[0]"]);
        assert_eq!(checks.variants[0].name(0), "Gauss");
        let solution = checks.variants[1].checks.solution.as_ref().unwrap();
        assert!((solution.tolerance - 1.5).abs() < 1e-12);
        assert_eq!(checks.variants[1].name(1), "iterative");
    }

    #[test]
    fn test_missing_file_in_any_variant_fails() {
        let temp = TempDir::new().unwrap();
        let mut test = TestCase::new("1");
        test.variants = vec![
            Variant::default(),
            Variant {
                expectations: Expectations {
                    out_regex: Some(ExpectationValue::One("gone.txt".into())),
                    ..Expectations::default()
                },
                ..Variant::default()
            },
        ];
        let env = ResolveEnv {
            expected_dir: temp.path(),
            input_text: "1",
            default_tolerance: 1e-3,
        };
        assert!(CaseChecks::resolve(&test, &env).is_err());
    }
}
