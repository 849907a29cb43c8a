//! Terminal front end for the calculator.
//!
//! Each line typed is read as a row of key presses. The display is printed
//! after every line and again whenever it changes on its own, which is the
//! timed clear after an error.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::calculator::{Calculator, InputBuffer, UiAction, UiEvent, is_keypad_char};

/// What a single key on the terminal means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Event(UiEvent),
    Quit,
}

/// Map a terminal key to a calculator event.
///
/// Returns `None` for keys without a meaning, which are skipped.
pub fn parse_key(c: char) -> Option<Key> {
    let key = match c {
        '=' => Key::Event(UiEvent::Action(UiAction::Calculate)),
        'c' | 'C' => Key::Event(UiEvent::Action(UiAction::Clear)),
        '<' => Key::Event(UiEvent::Action(UiAction::Backspace)),
        'q' | 'Q' => Key::Quit,
        c if is_keypad_char(c) => Key::Event(UiEvent::Input(c)),
        _ => return None,
    };
    Some(key)
}

/// Feed one line of keys to the calculator.
///
/// An empty line calculates. Returns `false` once a quit key is seen.
pub fn apply_line(calculator: &mut Calculator, line: &str) -> bool {
    if line.trim().is_empty() {
        calculator.dispatch(UiEvent::Action(UiAction::Calculate));
        return true;
    }

    for c in line.chars() {
        match parse_key(c) {
            Some(Key::Event(event)) => calculator.dispatch(event),
            Some(Key::Quit) => return false,
            None if c.is_whitespace() => {}
            None => debug!("Skipping key {:?}", c),
        }
    }
    true
}

fn render(buffer: &InputBuffer) {
    if buffer.is_empty() {
        println!("  0");
    } else {
        println!("  {}", buffer);
    }
}

/// Run the interactive calculator on stdin/stdout until EOF or `q`.
pub async fn run(error_clear_delay: Duration) -> Result<()> {
    let mut calculator = Calculator::new(error_clear_delay);
    let mut display = calculator.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("digits and + - * / . to type, = or enter to calculate, < backspace, c clear, q quit");
    render(&display.borrow_and_update());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if !apply_line(&mut calculator, &line) {
                    break;
                }
                render(&display.borrow_and_update());
            }
            changed = display.changed() => {
                if changed.is_err() {
                    break;
                }
                render(&display.borrow_and_update());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key('7'), Some(Key::Event(UiEvent::Input('7'))));
        assert_eq!(parse_key('.'), Some(Key::Event(UiEvent::Input('.'))));
        assert_eq!(
            parse_key('='),
            Some(Key::Event(UiEvent::Action(UiAction::Calculate)))
        );
        assert_eq!(
            parse_key('c'),
            Some(Key::Event(UiEvent::Action(UiAction::Clear)))
        );
        assert_eq!(
            parse_key('<'),
            Some(Key::Event(UiEvent::Action(UiAction::Backspace)))
        );
        assert_eq!(parse_key('q'), Some(Key::Quit));
        assert_eq!(parse_key('x'), None);
        assert_eq!(parse_key(' '), None);
    }

    #[test]
    fn test_apply_line() {
        let mut calculator = Calculator::default();
        assert!(apply_line(&mut calculator, "1 + + 2"));
        assert_eq!(calculator.display_text(), "1+2");
        assert!(apply_line(&mut calculator, ""));
        assert_eq!(calculator.display_text(), "3");
        assert!(apply_line(&mut calculator, "*4="));
        assert_eq!(calculator.display_text(), "12");
    }

    #[test]
    fn test_apply_line_stops_at_quit() {
        let mut calculator = Calculator::default();
        assert!(!apply_line(&mut calculator, "12q34"));
        assert_eq!(calculator.display_text(), "12");
    }
}
