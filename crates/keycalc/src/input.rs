//! Normalized input events and the keyboard map shared by every frontend
//!
//! Key names follow the browser `KeyboardEvent.key` values so the same table
//! serves the DOM frontend, the terminal frontend and scripted input.

use serde::{Deserialize, Serialize};

use crate::core::{Action, Operator};

/// A single keypress the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum InputEvent {
    /// `'0'..='9'`
    Digit(char),
    /// One of the four operators
    Operator(Operator),
    /// AC, C, ±, `.` or `=`
    Action(Action),
}

impl InputEvent {
    /// Maps a browser key name to an event
    ///
    /// | key                | event          |
    /// |--------------------|----------------|
    /// | `0`-`9`            | digit          |
    /// | `+ - * /`          | operator       |
    /// | `Enter`, `=`       | equals         |
    /// | `Escape`           | clear-all      |
    /// | `Backspace`        | clear          |
    /// | `.`                | decimal        |
    ///
    /// Anything else is not a calculator key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(Self::Action(Action::Equals)),
            "Escape" => Some(Self::Action(Action::ClearAll)),
            "Backspace" => Some(Self::Action(Action::Clear)),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }

    /// Maps a single typed character to an event
    ///
    /// Control characters stand in for the named keys: newline for `Enter`,
    /// ESC for `Escape`, BS/DEL for `Backspace`.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c)),
            '+' | '-' | '*' | '/' => Operator::from_symbol(c).map(Self::Operator),
            '=' | '\n' | '\r' => Some(Self::Action(Action::Equals)),
            '.' => Some(Self::Action(Action::Decimal)),
            '\x1b' => Some(Self::Action(Action::ClearAll)),
            '\x08' | '\x7f' => Some(Self::Action(Action::Clear)),
            _ => None,
        }
    }

    /// Returns the keypad label for this event
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Operator(op) => op.glyph().to_string(),
            Self::Action(action) => action.label().to_string(),
        }
    }
}

impl From<Operator> for InputEvent {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl From<Action> for InputEvent {
    fn from(action: Action) -> Self {
        Self::Action(action)
    }
}
