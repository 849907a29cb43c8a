//! Recursive-descent evaluator for flat arithmetic.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := ('+' | '-')* number
//! number := digits ['.' digits?] | '.' digits
//! ```
//!
//! Spaces separate tokens. `++`, `--`, `**` and `//` written without a
//! space between them are rejected rather than read as two operators.

use super::error::EvalError;

#[derive(Clone, Copy, Debug, PartialEq)]
enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
}

#[derive(Clone, Copy, Debug)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let kind = match b {
            b' ' => {
                i += 1;
                continue;
            }
            b'0'..=b'9' | b'.' => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i < bytes.len() && bytes[i] == b'.' {
                    i += 1;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                let literal = &input[start..i];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::MalformedNumber { offset: start })?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    offset: start,
                });
                continue;
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            _ => {
                let ch = input[i..].chars().next().unwrap_or('\u{fffd}');
                return Err(EvalError::InvalidCharacter { ch, offset: i });
            }
        };

        if matches!(b, b'+' | b'-' | b'*' | b'/') && bytes.get(i + 1) == Some(&b) {
            return Err(EvalError::UnexpectedToken {
                token: input[i..i + 2].to_string(),
                offset: i,
            });
        }

        tokens.push(Token { kind, offset: i });
        i += 1;
    }

    Ok(tokens)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, token: Token) -> EvalError {
        let text = match token.kind {
            TokenKind::Number(_) => self.input[token.offset..]
                .split(|c: char| !(c.is_ascii_digit() || c == '.'))
                .next()
                .unwrap_or_default()
                .to_string(),
            TokenKind::Plus => "+".to_string(),
            TokenKind::Minus => "-".to_string(),
            TokenKind::Star => "*".to_string(),
            TokenKind::Slash => "/".to_string(),
        };
        EvalError::UnexpectedToken {
            token: text,
            offset: token.offset,
        }
    }

    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                TokenKind::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Star => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                TokenKind::Slash => {
                    self.pos += 1;
                    value /= self.unary()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        let mut negate = false;
        loop {
            let token = self.advance().ok_or(EvalError::UnexpectedEnd)?;
            match token.kind {
                TokenKind::Plus => {}
                TokenKind::Minus => negate = !negate,
                TokenKind::Number(value) => return Ok(if negate { -value } else { value }),
                TokenKind::Star | TokenKind::Slash => return Err(self.unexpected(token)),
            }
        }
    }
}

/// Parse and evaluate an arithmetic expression.
///
/// The result may be infinite or NaN; classifying it is the caller's job.
pub fn evaluate_arithmetic(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::UnexpectedEnd);
    }

    let mut parser = Parser {
        input,
        tokens,
        pos: 0,
    };
    let value = parser.expression()?;

    match parser.peek() {
        Some(token) => Err(parser.unexpected(token)),
        None => Ok(value),
    }
}
