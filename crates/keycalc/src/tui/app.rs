//! TUI Application State
//!
//! Wraps the engine with the presentation-only state the terminal needs:
//! which keypad button was pressed last, the error cue countdown and the
//! quit flag.

use std::time::Duration;

use ratatui::layout::Rect;
use tracing::debug;

use super::input::KeyAction;
use super::keypad::Keypad;
use crate::config::FrontendConfig;
use crate::core::{Calculator, Transition};
use crate::input::InputEvent;

/// Calculator application state
#[derive(Debug, Default)]
pub struct CalculatorApp {
    calculator: Calculator,
    keypad: Keypad,
    config: FrontendConfig,
    /// Time left on the error cue, if showing
    error_flash: Option<Duration>,
    should_quit: bool,
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator app with a configuration
    #[must_use]
    pub fn with_config(config: FrontendConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the configuration
    #[must_use]
    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Returns true while the error cue is showing
    #[must_use]
    pub fn is_error_flashing(&self) -> bool {
        self.error_flash.is_some()
    }

    /// Feeds one event to the engine and updates the keypad and error cue
    pub fn handle_input(&mut self, event: InputEvent) -> Transition {
        self.keypad.highlight(event);
        let transition = self.calculator.on_input(event);
        if transition.is_failure() {
            self.error_flash = Some(self.config.error_flash());
        }
        transition
    }

    /// Applies a mapped key action
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Input(event) => {
                self.handle_input(event);
            }
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Presses the keypad button under a mouse click, if any
    pub fn handle_click(&mut self, keypad_area: Rect, x: u16, y: u16) -> Option<Transition> {
        let index = self.keypad.hit_test(keypad_area, x, y)?;
        let event = self.keypad.get_button(index)?.event;
        debug!(?event, x, y, "keypad click");
        Some(self.handle_input(event))
    }

    /// Advances the error cue countdown
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(remaining) = self.error_flash {
            let remaining = remaining.saturating_sub(elapsed);
            self.error_flash = (!remaining.is_zero()).then_some(remaining);
        }
    }
}
