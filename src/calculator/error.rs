use thiserror::Error;

/// Why an expression could not be turned into a number.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("invalid character {ch:?} at offset {offset}")]
    InvalidCharacter { ch: char, offset: usize },

    #[error("unexpected {token:?} at offset {offset}")]
    UnexpectedToken { token: String, offset: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("malformed number at offset {offset}")]
    MalformedNumber { offset: usize },

    #[error("result is not a finite number ({0})")]
    NonFinite(f64),
}
