//! Calculator session: routes UI events onto the buffer.
//!
//! The buffer lives in a `watch` channel so any front end can subscribe to
//! display updates, including the deferred clear after an error.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

use super::evaluation::{ERROR_MARKER, EvaluationResult, evaluate_expression, format_number};
use super::input::{InputBuffer, is_keypad_char};

/// How long the error marker stays on the display by default.
pub const DEFAULT_ERROR_CLEAR_DELAY: Duration = Duration::from_millis(1500);

/// Special keys on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    Clear,
    Backspace,
    Calculate,
}

/// A single user interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// A digit, operator or decimal point.
    Input(char),
    Action(UiAction),
}

/// The calculator state behind one display.
pub struct Calculator {
    display: Arc<watch::Sender<InputBuffer>>,
    error_clear_delay: Duration,
    /// Cancels the scheduled error clear when dropped.
    pending_clear: Option<DropGuard>,
}

impl Calculator {
    pub fn new(error_clear_delay: Duration) -> Self {
        let (display, _) = watch::channel(InputBuffer::new());
        Self {
            display: Arc::new(display),
            error_clear_delay,
            pending_clear: None,
        }
    }

    /// Subscribe to display updates.
    pub fn subscribe(&self) -> watch::Receiver<InputBuffer> {
        self.display.subscribe()
    }

    /// Current display text.
    pub fn display_text(&self) -> String {
        self.display.borrow().as_str().to_string()
    }

    /// Check if the error marker is currently shown.
    pub fn is_showing_error(&self) -> bool {
        self.display.borrow().as_str() == ERROR_MARKER
    }

    /// Apply a user interaction.
    ///
    /// Any event arriving while the error marker is shown cancels the
    /// pending clear and starts over from an empty buffer.
    pub fn dispatch(&mut self, event: UiEvent) {
        if let UiEvent::Input(token) = event
            && !is_keypad_char(token)
        {
            debug!("Ignoring non-keypad input {:?}", token);
            return;
        }

        self.pending_clear = None;
        if self.is_showing_error() {
            self.display.send_modify(InputBuffer::clear);
        }

        match event {
            UiEvent::Input(token) => self.display.send_modify(|buffer| buffer.append(token)),
            UiEvent::Action(UiAction::Clear) => self.display.send_modify(InputBuffer::clear),
            UiEvent::Action(UiAction::Backspace) => {
                self.display.send_modify(InputBuffer::backspace)
            }
            UiEvent::Action(UiAction::Calculate) => self.calculate(),
        }
    }

    fn calculate(&mut self) {
        let expression = self.display_text();

        match evaluate_expression(&expression) {
            None => debug!("Nothing to calculate"),
            Some(EvaluationResult::Number(value)) => {
                let text = format_number(value);
                info!("{} = {}", expression, text);
                self.display.send_modify(|buffer| buffer.set(text));
            }
            Some(EvaluationResult::Error(err)) => {
                warn!("Failed to evaluate {:?}: {}", expression, err);
                self.show_error();
            }
        }
    }

    fn show_error(&mut self) {
        self.display.send_modify(|buffer| buffer.set(ERROR_MARKER));

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime, error marker will stay until the next input");
            return;
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let display = Arc::clone(&self.display);
        let delay = self.error_clear_delay;

        handle.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => debug!("Error clear cancelled"),
                _ = tokio::time::sleep(delay) => {
                    display.send_if_modified(|buffer| {
                        if buffer.as_str() == ERROR_MARKER {
                            buffer.clear();
                            true
                        } else {
                            false
                        }
                    });
                    debug!("Error cleared");
                }
            }
        });

        self.pending_clear = Some(token.drop_guard());
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_CLEAR_DELAY)
    }
}
