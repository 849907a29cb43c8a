//! Calculator module for keypad-style arithmetic.
//!
//! This module provides functionality to:
//! - Accumulate keypad input with incremental validation
//! - Screen and evaluate flat arithmetic expressions
//! - Drive a display, including the timed clear after an error

mod detection;
mod error;
mod evaluation;
mod input;
mod parser;
mod session;

pub use evaluation::{ERROR_MARKER, EvaluationResult, evaluate_expression};
pub use input::{InputBuffer, is_keypad_char};
pub use session::{Calculator, UiAction, UiEvent};
