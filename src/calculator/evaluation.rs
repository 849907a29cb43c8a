//! Expression evaluation and result formatting.
//!
//! Screens the buffer with the character-class filter, runs the
//! arithmetic parser and classifies the value as a number or an error.

use super::detection::{first_invalid_char, is_arithmetic};
use super::error::EvalError;
use super::parser::evaluate_arithmetic;

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum EvaluationResult {
    /// A finite numeric result.
    Number(f64),
    /// The expression was rejected or produced a non-finite value.
    Error(EvalError),
}

impl EvaluationResult {
    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Get the numeric value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Error(_) => None,
        }
    }

    /// Get the display string: the formatted number or the error marker.
    pub fn display(&self) -> String {
        match self {
            Self::Number(value) => format_number(*value),
            Self::Error(_) => ERROR_MARKER.to_string(),
        }
    }
}

/// Text shown in place of a result when evaluation fails.
pub const ERROR_MARKER: &str = "Error";

/// Evaluate a calculator expression.
///
/// Returns `None` for an empty buffer, in which case the display should be
/// left as it is.
pub fn evaluate_expression(input: &str) -> Option<EvaluationResult> {
    if input.is_empty() {
        return None;
    }

    // Screen before parsing so foreign input never reaches the evaluator.
    if !is_arithmetic(input) {
        let (offset, ch) = first_invalid_char(input).unwrap_or((0, ' '));
        return Some(EvaluationResult::Error(EvalError::InvalidCharacter {
            ch,
            offset,
        }));
    }

    let result = match evaluate_arithmetic(input) {
        Ok(value) if value.is_finite() => EvaluationResult::Number(value),
        Ok(value) => EvaluationResult::Error(EvalError::NonFinite(value)),
        Err(err) => EvaluationResult::Error(err),
    };
    Some(result)
}

/// Format a number the way a result is shown on the display.
///
/// Shortest round-trip decimal form; very large and very small magnitudes
/// switch to exponent notation with an explicit sign (`1e+21`, `1e-7`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Also folds -0 into 0.
        return "0".to_string();
    }

    let abs = value.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", value);
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_noop() {
        assert_eq!(evaluate_expression(""), None);
    }

    #[test]
    fn test_basic_evaluation() {
        let result = evaluate_expression("2+2").unwrap();
        assert!(result.is_success());
        assert_eq!(result, EvaluationResult::Number(4.0));
        assert_eq!(result.display(), "4");
    }

    #[test]
    fn test_precedence_and_decimals() {
        assert_eq!(evaluate_expression("1+2*3").unwrap().value(), Some(7.0));
        assert_eq!(evaluate_expression("0.1+0.2").unwrap().display(), "0.30000000000000004");
        assert_eq!(evaluate_expression("7/2").unwrap().display(), "3.5");
    }

    #[test]
    fn test_division_by_zero() {
        let result = evaluate_expression("5/0").unwrap();
        assert!(!result.is_success());
        assert!(matches!(result, EvaluationResult::Error(EvalError::NonFinite(v)) if v.is_infinite()));
        assert_eq!(result.display(), "Error");
    }

    #[test]
    fn test_zero_over_zero() {
        let result = evaluate_expression("0/0").unwrap();
        assert!(matches!(result, EvaluationResult::Error(EvalError::NonFinite(v)) if v.is_nan()));
    }

    #[test]
    fn test_invalid_expression() {
        let result = evaluate_expression("3+*4").unwrap();
        assert!(matches!(result, EvaluationResult::Error(EvalError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_invalid_character_screened_before_parsing() {
        assert_eq!(
            evaluate_expression("1a2"),
            Some(EvaluationResult::Error(EvalError::InvalidCharacter {
                ch: 'a',
                offset: 1
            }))
        );
        assert_eq!(
            evaluate_expression("2+2\n"),
            Some(EvaluationResult::Error(EvalError::InvalidCharacter {
                ch: '\n',
                offset: 3
            }))
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
    }
}
