//! Keyboard input handling for the terminal
//!
//! Translates crossterm key events through the shared key map in
//! [`crate::input`], so the terminal accepts exactly the browser keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::InputEvent;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A calculator key
    Input(InputEvent),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        let mapped = match code {
            KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Char(c) => InputEvent::from_char(c),
            KeyCode::Enter => InputEvent::from_key("Enter"),
            KeyCode::Esc => InputEvent::from_key("Escape"),
            KeyCode::Backspace => InputEvent::from_key("Backspace"),
            _ => None,
        };
        mapped.map_or(KeyAction::None, KeyAction::Input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, Operator};
    use crossterm::event::KeyEventState;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn test_handle_digit_keys() {
        let handler = InputHandler::new();
        for c in '0'..='9' {
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(c))),
                KeyAction::Input(InputEvent::Digit(c))
            );
        }
    }

    #[test]
    fn test_handle_operator_keys() {
        let handler = InputHandler::new();
        for op in Operator::ALL {
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(op.symbol()))),
                KeyAction::Input(InputEvent::Operator(op))
            );
        }
    }

    #[test]
    fn test_handle_named_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            KeyAction::Input(InputEvent::Action(Action::Equals))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('='))),
            KeyAction::Input(InputEvent::Action(Action::Equals))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Esc)),
            KeyAction::Input(InputEvent::Action(Action::ClearAll))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Backspace)),
            KeyAction::Input(InputEvent::Action(Action::Clear))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('.'))),
            KeyAction::Input(InputEvent::Action(Action::Decimal))
        );
    }

    #[test]
    fn test_handle_quit() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('q'))),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('q'))),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_unmapped_keys() {
        let handler = InputHandler::new();
        for code in [
            KeyCode::Char('a'),
            KeyCode::Char('%'),
            KeyCode::Tab,
            KeyCode::Left,
            KeyCode::Delete,
            KeyCode::F(1),
        ] {
            assert_eq!(handler.handle_key(key_event(code)), KeyAction::None);
        }
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('l'))),
            KeyAction::None
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let handler = InputHandler::new();
        let event = KeyEvent {
            code: KeyCode::Char('5'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handler.handle_key(event), KeyAction::None);
    }

    #[test]
    fn test_shifted_symbols_still_map() {
        let handler = InputHandler::new();
        let event = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key(event),
            KeyAction::Input(InputEvent::Operator(Operator::Add))
        );
    }
}
