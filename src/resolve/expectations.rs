//! Expectation resolution: flattens declared substrings and patterns.

use std::fs;
use std::path::Path;

use crate::error::ResourceError;
use crate::manifest::{ExpectationValue, Expectations};

/// Concrete substrings and patterns for one expectation set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedExpectations {
    pub contains: Vec<String>,
    pub regex: Vec<String>,
}

impl ResolvedExpectations {
    /// Resolves both text fields of an expectation set against `expected_dir`.
    pub fn resolve(expectations: &Expectations, expected_dir: &Path) -> Result<Self, ResourceError> {
        Ok(Self {
            contains: resolve_expected(expectations.out_contains.as_ref(), expected_dir)?,
            regex: resolve_expected(expectations.out_regex.as_ref(), expected_dir)?,
        })
    }
}

/// Flattens a declared expectation value into an ordered list of strings.
///
/// Elements ending in `.txt` expand into the non-blank, trimmed lines of that
/// file in `base_dir`. Absent values yield an empty list.
pub fn resolve_expected(
    value: Option<&ExpectationValue>,
    base_dir: &Path,
) -> Result<Vec<String>, ResourceError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    let mut resolved = Vec::new();
    for item in value.items() {
        if item.is_file_reference() {
            resolved.extend(load_lines(&base_dir.join(item.to_text()))?);
        } else {
            resolved.push(item.to_text());
        }
    }
    Ok(resolved)
}

/// Reads the non-blank lines of a file, trimmed.
fn load_lines(path: &Path) -> Result<Vec<String>, ResourceError> {
    if !path.is_file() {
        return Err(ResourceError::ExpectationNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ScalarValue;
    use tempfile::TempDir;

    #[test]
    fn test_absent_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(resolve_expected(None, temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_single_and_coerced_values() {
        let temp = TempDir::new().unwrap();
        let one = ExpectationValue::One("Result".into());
        assert_eq!(resolve_expected(Some(&one), temp.path()).unwrap(), vec!["Result"]);

        let many = ExpectationValue::Many(vec![ScalarValue::Integer(5), ScalarValue::Float(0.5)]);
        assert_eq!(resolve_expected(Some(&many), temp.path()).unwrap(), vec!["5", "0.5"]);
    }

    #[test]
    fn test_file_values_expand_in_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("lines.txt"), "  first \n\n   \nsecond\n").unwrap();

        let value = ExpectationValue::Many(vec![
            "before".into(),
            "lines.txt".into(),
            "after".into(),
        ]);
        let resolved = resolve_expected(Some(&value), temp.path()).unwrap();
        assert_eq!(resolved, vec!["before", "first", "second", "after"]);
    }

    #[test]
    fn test_missing_expectation_file() {
        let temp = TempDir::new().unwrap();
        let value = ExpectationValue::One("nope.txt".into());
        let err = resolve_expected(Some(&value), temp.path()).unwrap_err();
        assert!(matches!(err, ResourceError::ExpectationNotFound(_)));
    }

    #[test]
    fn test_resolve_expectation_set() {
        let temp = TempDir::new().unwrap();
        let expectations = Expectations {
            out_contains: Some(ExpectationValue::One("ok".into())),
            out_regex: Some(ExpectationValue::Many(vec!["^x".into(), "y$".into()])),
            ..Expectations::default()
        };
        let resolved = ResolvedExpectations::resolve(&expectations, temp.path()).unwrap();
        assert_eq!(resolved.contains, vec!["ok"]);
        assert_eq!(resolved.regex, vec!["^x", "y$"]);
    }
}
