//! Web driver
//!
//! Binds the engine to the mock DOM the way the browser page binds it to the
//! real one: button clicks and document keydowns feed the engine, and after
//! every event the display, history line and operator highlight are
//! re-rendered from engine state. All reads go through the DOM, so the
//! unified specification checks what a user would actually see.

use std::time::Duration;

use tracing::debug;

use super::dom::{DomEvent, MockDom, ACTIVE_CLASS, DISPLAY_ID, ERROR_CLASS, HISTORY_ID};
use crate::config::FrontendConfig;
use crate::core::{Calculator, Operator, Transition};
use crate::driver::CalculatorDriver;
use crate::input::InputEvent;

/// Driver wrapping the engine and a mock DOM
#[derive(Debug)]
pub struct WebDriver {
    calculator: Calculator,
    dom: MockDom,
    config: FrontendConfig,
    /// Time left before the `error` class comes off the display
    error_flash: Option<Duration>,
}

impl Default for WebDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WebDriver {
    /// Creates a driver over a fresh calculator page
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FrontendConfig::default())
    }

    /// Creates a driver with a configuration
    #[must_use]
    pub fn with_config(config: FrontendConfig) -> Self {
        let mut driver = Self {
            calculator: Calculator::new(),
            dom: MockDom::calculator(),
            config,
            error_flash: None,
        };
        driver.sync_dom();
        driver
    }

    /// Returns the engine
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Returns the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Clicks an element; clicks on anything but a keypad button are ignored
    pub fn click(&mut self, element_id: &str) -> Option<Transition> {
        self.dom.dispatch_event(DomEvent::click(element_id));
        let event = self.dom.get_element(element_id)?.key_event()?;
        Some(self.deliver(event))
    }

    /// Fires a document keydown; unmapped keys are ignored
    pub fn key_down(&mut self, key: &str) -> Option<Transition> {
        self.dom.dispatch_event(DomEvent::key_down(key));
        let event = InputEvent::from_key(key)?;
        Some(self.deliver(event))
    }

    fn deliver(&mut self, event: InputEvent) -> Transition {
        let transition = self.calculator.on_input(event);
        if transition.is_failure() {
            self.error_flash = Some(self.config.error_flash());
        }
        self.sync_dom();
        transition
    }

    /// Re-renders the display, history line and operator highlight
    pub fn sync_dom(&mut self) {
        let display = self.calculator.display_text().to_string();
        self.dom.set_element_text(DISPLAY_ID, &display);
        self.dom
            .set_element_text(HISTORY_ID, &self.calculator.history_text());

        let active = self
            .calculator
            .active_operator()
            .and_then(|op| self.dom.button_for(op.into()))
            .map(|button| button.id.clone());
        self.dom.set_exclusive_class(ACTIVE_CLASS, active.as_deref());

        if let Some(element) = self.dom.get_element_mut(DISPLAY_ID) {
            if self.error_flash.is_some() {
                element.add_class(ERROR_CLASS);
            } else {
                element.remove_class(ERROR_CLASS);
            }
        }
    }
}

impl CalculatorDriver for WebDriver {
    /// Clicks the button that sends `event`
    fn press(&mut self, event: InputEvent) -> Transition {
        let button = self.dom.button_for(event).map(|b| b.id.clone());
        match button.and_then(|id| self.click(&id)) {
            Some(transition) => transition,
            None => {
                debug!(?event, "no button for event, delivering directly");
                self.deliver(event)
            }
        }
    }

    fn press_key(&mut self, key: &str) -> Option<Transition> {
        self.key_down(key)
    }

    fn display_text(&self) -> String {
        self.dom
            .get_element_text(DISPLAY_ID)
            .unwrap_or_default()
            .to_string()
    }

    fn history_text(&self) -> String {
        self.dom
            .get_element_text(HISTORY_ID)
            .unwrap_or_default()
            .to_string()
    }

    fn active_operator(&self) -> Option<Operator> {
        self.dom
            .buttons()
            .find(|b| b.has_class(ACTIVE_CLASS))
            .and_then(|b| match b.key_event() {
                Some(InputEvent::Operator(op)) => Some(op),
                _ => None,
            })
    }

    fn error_indicator_visible(&self) -> bool {
        self.dom
            .get_element(DISPLAY_ID)
            .is_some_and(|e| e.has_class(ERROR_CLASS))
    }

    fn advance(&mut self, elapsed: Duration) {
        if let Some(remaining) = self.error_flash {
            let remaining = remaining.saturating_sub(elapsed);
            self.error_flash = (!remaining.is_zero()).then_some(remaining);
            self.sync_dom();
        }
    }
}
