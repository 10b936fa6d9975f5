//! Terminal frontend
//!
//! A thin adapter: crossterm keys and mouse clicks become
//! [`InputEvent`](crate::input::InputEvent)s, the engine's strings are drawn
//! with ratatui.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI};
