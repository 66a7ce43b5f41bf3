//! Tolerance derivation for numeric solution checks.

use tracing::warn;

use super::solution::last_number;
use crate::manifest::Expectations;

/// Factor applied to the last number of the input in dynamic mode.
pub const INPUT_TOLERANCE_FACTOR: f64 = 3.0;

/// Smallest tolerance ever used for a comparison.
pub const MIN_TOLERANCE: f64 = 1e-12;

/// Computes the tolerance for an expectation set.
///
/// In dynamic mode (`use_input_tolerance`) the last numeric literal of the
/// input is scaled by [`INPUT_TOLERANCE_FACTOR`] and `tolerance_scale`; an
/// input without numbers falls back to `default_tolerance`. Otherwise the
/// declared `solution_tolerance` or the default is used.
pub fn derive_tolerance(expectations: &Expectations, input_text: &str, default_tolerance: f64) -> f64 {
    let tolerance = if expectations.use_input_tolerance {
        let scale = expectations.tolerance_scale.unwrap_or(1.0);
        input_tolerance(input_text)
            .map(|tol| tol * scale)
            .unwrap_or(default_tolerance)
    } else {
        expectations.solution_tolerance.unwrap_or(default_tolerance)
    };
    apply_floor(tolerance)
}

/// Tolerance implied by the input text alone, before any extra scale.
pub fn input_tolerance(input_text: &str) -> Option<f64> {
    last_number(input_text).map(|value| value * INPUT_TOLERANCE_FACTOR)
}

/// Raises non-finite or too small tolerances to [`MIN_TOLERANCE`].
pub fn apply_floor(tolerance: f64) -> f64 {
    if tolerance.is_finite() && tolerance >= MIN_TOLERANCE {
        return tolerance;
    }
    warn!(
        "Tolerance {} is unusable, using minimum {}",
        tolerance, MIN_TOLERANCE
    );
    MIN_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_fixed_declared() {
        let expectations = Expectations {
            solution_tolerance: Some(0.05),
            ..Expectations::default()
        };
        assert_eq!(derive_tolerance(&expectations, "1 2 3", 1e-3), 0.05);
    }

    #[test]
    fn test_fixed_default() {
        assert_eq!(derive_tolerance(&Expectations::default(), "1 2 3", 1e-3), 1e-3);
    }

    #[test]
    fn test_dynamic_scaled() {
        let expectations = Expectations {
            use_input_tolerance: true,
            tolerance_scale: Some(2.0),
            ..Expectations::default()
        };
        let tol = derive_tolerance(&expectations, "3\n1 2 3\n0.01", 1e-3);
        assert!(close(tol, 0.06));
    }

    #[test]
    fn test_dynamic_ignores_fixed_value() {
        let expectations = Expectations {
            use_input_tolerance: true,
            solution_tolerance: Some(5.0),
            ..Expectations::default()
        };
        assert!(close(derive_tolerance(&expectations, "eps 0.001", 1e-3), 0.003));
    }

    #[test]
    fn test_dynamic_without_numbers_uses_default() {
        let expectations = Expectations {
            use_input_tolerance: true,
            tolerance_scale: Some(2.0),
            ..Expectations::default()
        };
        assert_eq!(derive_tolerance(&expectations, "no numbers", 1e-3), 1e-3);
    }

    #[test]
    fn test_floor() {
        let zero = Expectations {
            solution_tolerance: Some(0.0),
            ..Expectations::default()
        };
        assert_eq!(derive_tolerance(&zero, "", 1e-3), MIN_TOLERANCE);

        let negative = Expectations {
            use_input_tolerance: true,
            ..Expectations::default()
        };
        assert_eq!(derive_tolerance(&negative, "value -2", 1e-3), MIN_TOLERANCE);
        assert_eq!(apply_floor(f64::NAN), MIN_TOLERANCE);
    }
}
