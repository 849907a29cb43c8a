//! Character-class filter run before an expression is parsed.
//!
//! Only digits, the four operators, decimal points and spaces may reach
//! the evaluator.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches strings made only of arithmetic characters.
    static ref ARITHMETIC_CHARS: Regex = Regex::new(r"^[0-9+\-*/. ]+$").unwrap();
}

/// Check if input contains only characters the evaluator accepts.
///
/// Empty input does not match.
pub fn is_arithmetic(input: &str) -> bool {
    ARITHMETIC_CHARS.is_match(input)
}

/// Find the first character outside the arithmetic alphabet.
///
/// Returns the byte offset and the character.
pub fn first_invalid_char(input: &str) -> Option<(usize, char)> {
    input
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '.' | ' ')))
}
