//! Numeric solution extraction from free-form program output.
//!
//! Two shapes are recognized, case-insensitively:
//!
//! ```text
//! x[3] = 1.5      bracketed index
//! x3 = -2e-4      juxtaposed index
//! ```
//!
//! The bracketed pass runs first; the juxtaposed pass only fills indices the
//! bracketed pass did not produce. Output that uses both shapes for the same
//! index therefore always reports the bracketed value.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// Lexical shape of a numeric literal: optional sign, fraction and exponent.
pub const NUMBER_PATTERN: &str = r"[+-]?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?";

/// Index to value mapping extracted from output.
pub type Solution = BTreeMap<usize, f64>;

static BRACKETED: OnceLock<Regex> = OnceLock::new();
static JUXTAPOSED: OnceLock<Regex> = OnceLock::new();
static NUMBER: OnceLock<Regex> = OnceLock::new();

fn bracketed() -> &'static Regex {
    BRACKETED.get_or_init(|| {
        Regex::new(&format!(r"(?i)x\s*\[\s*([0-9]+)\s*\]\s*=\s*({})", NUMBER_PATTERN))
            .expect("bracketed solution pattern is valid")
    })
}

fn juxtaposed() -> &'static Regex {
    JUXTAPOSED.get_or_init(|| {
        Regex::new(&format!(r"(?i)x\s*([0-9]+)\s*=\s*({})", NUMBER_PATTERN))
            .expect("juxtaposed solution pattern is valid")
    })
}

fn number() -> &'static Regex {
    NUMBER.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("number pattern is valid"))
}

/// Extracts all indexed assignments from `text`.
///
/// An empty map means no solution was printed at all.
pub fn extract_solution(text: &str) -> Solution {
    let mut values = Solution::new();

    for caps in bracketed().captures_iter(text) {
        if let Some((index, value)) = parse_assignment(&caps[1], &caps[2]) {
            values.insert(index, value);
        }
    }

    for caps in juxtaposed().captures_iter(text) {
        if let Some((index, value)) = parse_assignment(&caps[1], &caps[2]) {
            values.entry(index).or_insert(value);
        }
    }

    values
}

/// Returns the last numeric literal in `text`, if any.
pub fn last_number(text: &str) -> Option<f64> {
    number()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .last()
}

fn parse_assignment(index: &str, value: &str) -> Option<(usize, f64)> {
    Some((index.parse().ok()?, value.parse().ok()?))
}

/// Returns true if the extracted indices start at zero.
pub fn is_zero_based(solution: &Solution) -> bool {
    solution.contains_key(&0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_based_bracketed() {
        let solution = extract_solution("x[0]=1.0 x[1]=2.0");
        assert_eq!(solution.len(), 2);
        assert_eq!(solution[&0], 1.0);
        assert_eq!(solution[&1], 2.0);
        assert!(is_zero_based(&solution));
    }

    #[test]
    fn test_one_based_juxtaposed() {
        let solution = extract_solution("x1=1.0 x2=2.0");
        assert_eq!(solution[&1], 1.0);
        assert_eq!(solution[&2], 2.0);
        assert!(!is_zero_based(&solution));
    }

    #[test]
    fn test_case_whitespace_sign_and_exponent() {
        let solution = extract_solution("X [ 2 ]  =  -1.5E-3\nx 3 = +4\nx4=2.5e2");
        assert_eq!(solution[&2], -1.5e-3);
        assert_eq!(solution[&3], 4.0);
        assert_eq!(solution[&4], 250.0);
    }

    #[test]
    fn test_bracketed_wins_over_juxtaposed() {
        let solution = extract_solution("x1 = 9.0\nx[1] = 2.0");
        assert_eq!(solution[&1], 2.0);

        let solution = extract_solution("x[1] = 2.0\nx1 = 9.0");
        assert_eq!(solution[&1], 2.0);
    }

    #[test]
    fn test_first_juxtaposed_wins() {
        let solution = extract_solution("x1 = 1.0\nx1 = 5.0");
        assert_eq!(solution[&1], 1.0);
    }

    #[test]
    fn test_later_bracketed_replaces_earlier() {
        let solution = extract_solution("x[0] = 1.0\nx[0] = 7.0");
        assert_eq!(solution[&0], 7.0);
    }

    #[test]
    fn test_no_solution() {
        assert!(extract_solution("no numbers here, only text = 5").is_empty());
        assert!(extract_solution("").is_empty());
    }

    #[test]
    fn test_last_number() {
        assert_eq!(last_number("2 2\n1 0\n0 1\n3 4"), Some(4.0));
        assert_eq!(last_number("eps = 0.01"), Some(0.01));
        assert_eq!(last_number("precision 1e-4\n"), Some(1e-4));
        assert_eq!(last_number("nothing"), None);
    }
}
