//! The expression buffer behind the calculator display.
//!
//! Input is validated as it is typed: two operators never end up next to
//! each other because the newer one replaces the older one.

/// Characters that collapse into each other when typed back to back.
pub const OPERATOR_CLASS: &[char] = &['+', '-', '*', '/', '.'];

/// Check if a character belongs to the operator/decimal-point class.
pub fn is_operator(c: char) -> bool {
    OPERATOR_CLASS.contains(&c)
}

/// Check if a character can be typed on the keypad.
pub fn is_keypad_char(c: char) -> bool {
    c.is_ascii_digit() || is_operator(c)
}

/// The in-progress expression the user has composed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a keypad token.
    ///
    /// An operator typed right after another operator replaces it. On an
    /// empty buffer a decimal point becomes `0.`, a minus sign is kept as
    /// a leading sign, and the other operators are ignored.
    pub fn append(&mut self, token: char) {
        let token_is_operator = is_operator(token);

        if token_is_operator && self.text.ends_with(is_operator) {
            self.text.pop();
            self.text.push(token);
            return;
        }

        if self.text.is_empty() && token_is_operator {
            match token {
                '.' => {
                    self.text.push_str("0.");
                    return;
                }
                '-' => {}
                _ => return,
            }
        }

        self.text.push(token);
    }

    /// Remove the last character, if any.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Replace the whole buffer, e.g. with a result or the error marker.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl std::fmt::Display for InputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
