//! Unified calculator driver
//!
//! Every frontend implements [`CalculatorDriver`], so one behavioural
//! specification (the `verify_*` functions below) runs against the terminal
//! frontend and the DOM frontend alike.

use std::time::Duration;

use crate::core::{Action, Operator, Transition};
use crate::input::InputEvent;

/// Abstract driver trait for calculator interactions
///
/// # Example
///
/// ```rust,ignore
/// fn verify_sum<D: CalculatorDriver>(driver: &mut D) {
///     driver.type_keys("5+3=");
///     assert_eq!(driver.display_text(), "8");
/// }
/// ```
pub trait CalculatorDriver {
    /// Delivers one normalized event to the calculator
    fn press(&mut self, event: InputEvent) -> Transition;

    /// Text currently on the main display
    fn display_text(&self) -> String;

    /// Text currently on the history line
    fn history_text(&self) -> String;

    /// Operator currently highlighted
    fn active_operator(&self) -> Option<Operator>;

    /// Whether the transient error cue is showing
    fn error_indicator_visible(&self) -> bool;

    /// Lets `elapsed` pass on the frontend's clock
    fn advance(&mut self, elapsed: Duration);

    /// Presses a key by browser key name; unknown keys are ignored
    fn press_key(&mut self, key: &str) -> Option<Transition> {
        InputEvent::from_key(key).map(|event| self.press(event))
    }

    /// Presses a digit key
    fn press_digit(&mut self, digit: char) -> Transition {
        self.press(InputEvent::Digit(digit))
    }

    /// Presses an operator key
    fn press_operator(&mut self, op: Operator) -> Transition {
        self.press(InputEvent::Operator(op))
    }

    /// Presses an action key
    fn press_action(&mut self, action: Action) -> Transition {
        self.press(InputEvent::Action(action))
    }

    /// Types a run of single-character keys (`"12+3="`)
    fn type_keys(&mut self, keys: &str) {
        for event in keys.chars().filter_map(InputEvent::from_char) {
            self.press(event);
        }
    }
}

/// TUI Driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use std::time::Duration;

    use super::CalculatorDriver;
    use crate::config::FrontendConfig;
    use crate::core::{Operator, Transition};
    use crate::input::InputEvent;
    use crate::tui::CalculatorApp;

    /// TUI-specific driver wrapping the calculator app
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with a configuration
        #[must_use]
        pub fn with_config(config: FrontendConfig) -> Self {
            Self {
                app: CalculatorApp::with_config(config),
            }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, event: InputEvent) -> Transition {
            self.app.handle_input(event)
        }

        fn display_text(&self) -> String {
            self.app.calculator().display_text().to_string()
        }

        fn history_text(&self) -> String {
            self.app.calculator().history_text()
        }

        fn active_operator(&self) -> Option<Operator> {
            self.app.calculator().active_operator()
        }

        fn error_indicator_visible(&self) -> bool {
            self.app.is_error_flashing()
        }

        fn advance(&mut self, elapsed: Duration) {
            self.app.tick(elapsed);
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified Test Specifications =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four operations end to end
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.press_key("Escape");

    driver.type_keys("5+3=");
    assert_eq!(driver.display_text(), "8");
    assert_eq!(driver.history_text(), "5 + 3 =");

    driver.type_keys("10-4=");
    assert_eq!(driver.display_text(), "6");
    assert_eq!(driver.history_text(), "10 − 4 =");

    driver.type_keys("6*7=");
    assert_eq!(driver.display_text(), "42");
    assert_eq!(driver.history_text(), "6 × 7 =");

    driver.type_keys("6/3=");
    assert_eq!(driver.display_text(), "2");
    assert_eq!(driver.history_text(), "6 ÷ 3 =");

    driver.type_keys("1/3=");
    assert_eq!(driver.display_text(), "0.333");
}

/// Verifies digit and decimal limits
pub fn verify_entry_limits<D: CalculatorDriver>(driver: &mut D) {
    driver.press_key("Escape");

    driver.type_keys("123456789");
    assert_eq!(driver.display_text(), "12345678");

    driver.press_key("Escape");
    driver.type_keys("0.12345");
    assert_eq!(driver.display_text(), "0.123");

    driver.type_keys("..");
    assert_eq!(driver.display_text(), "0.123");
}

/// Verifies operator chaining, swapping and highlighting
pub fn verify_operator_flow<D: CalculatorDriver>(driver: &mut D) {
    driver.press_key("Escape");

    driver.type_keys("1.5+");
    assert_eq!(driver.active_operator(), Some(Operator::Add));
    assert_eq!(driver.history_text(), "1.5 +");

    driver.type_keys("*");
    assert_eq!(driver.active_operator(), Some(Operator::Multiply));
    assert_eq!(driver.history_text(), "1.5 ×");

    driver.type_keys("4-");
    assert_eq!(driver.display_text(), "6");
    assert_eq!(driver.history_text(), "6 −");

    driver.type_keys("1=");
    assert_eq!(driver.display_text(), "5");
    assert_eq!(driver.active_operator(), None);
}

/// Verifies the clear and sign keys
pub fn verify_clear_and_sign<D: CalculatorDriver>(driver: &mut D) {
    driver.press_key("Escape");

    driver.press_action(Action::ToggleSign);
    assert_eq!(driver.display_text(), "0");

    driver.type_keys("5");
    driver.press_action(Action::ToggleSign);
    assert_eq!(driver.display_text(), "-5");
    driver.press_action(Action::ToggleSign);
    assert_eq!(driver.display_text(), "5");

    driver.type_keys("+");
    driver.press_key("Backspace");
    assert_eq!(driver.active_operator(), None);
    assert_eq!(driver.history_text(), "");
    assert_eq!(driver.display_text(), "5");

    driver.press_key("Backspace");
    assert_eq!(driver.display_text(), "0");
}

/// Verifies the latched error and its transient cue
pub fn verify_error_latch<D: CalculatorDriver>(driver: &mut D) {
    driver.press_key("Escape");

    driver.type_keys("5/0");
    let transition = driver.press_key("Enter");
    assert!(matches!(transition, Some(Transition::Failed(_))));
    assert_eq!(driver.display_text(), crate::core::ERROR_TOKEN);
    assert!(driver.error_indicator_visible());

    // the cue decays on its own, the error stays latched
    driver.advance(Duration::from_secs(5));
    assert!(!driver.error_indicator_visible());
    assert_eq!(driver.display_text(), crate::core::ERROR_TOKEN);

    // the next key only clears the error
    assert_eq!(driver.press_digit('7'), Transition::Recovered);
    assert_eq!(driver.display_text(), "0");
    assert_eq!(driver.history_text(), "");

    driver.type_keys("99999999+1=");
    assert_eq!(driver.display_text(), crate::core::ERROR_TOKEN);
    driver.press_key("Escape");
    assert_eq!(driver.display_text(), "0");
}

/// Verifies that unknown keys change nothing
pub fn verify_unknown_keys<D: CalculatorDriver>(driver: &mut D) {
    driver.press_key("Escape");
    driver.type_keys("12+");

    for key in ["a", "Tab", "%", "F5", "Shift"] {
        assert_eq!(driver.press_key(key), None);
    }
    assert_eq!(driver.display_text(), "12");
    assert_eq!(driver.active_operator(), Some(Operator::Add));
}

/// Complete verification suite - runs all specifications
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_entry_limits(driver);
    verify_operator_flow(driver);
    verify_clear_and_sign(driver);
    verify_error_latch(driver);
    verify_unknown_keys(driver);
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== TUI Driver Tests =====

    #[cfg(feature = "tui")]
    mod tui_tests {
        use super::*;

        #[test]
        fn test_tui_driver_new() {
            let driver = TuiDriver::new();
            assert_eq!(driver.display_text(), "0");
            assert!(!driver.error_indicator_visible());
        }

        #[test]
        fn test_tui_driver_app_access() {
            let mut driver = TuiDriver::new();
            driver.app_mut().handle_input(InputEvent::Digit('4'));
            assert_eq!(driver.app().calculator().display_text(), "4");
        }

        #[test]
        fn test_tui_driver_press_key() {
            let mut driver = TuiDriver::new();
            assert_eq!(driver.press_key("9"), Some(Transition::Applied));
            assert_eq!(driver.press_key("Home"), None);
            assert_eq!(driver.display_text(), "9");
        }

        #[test]
        fn test_tui_driver_short_flash() {
            let mut driver = TuiDriver::with_config(
                crate::config::FrontendConfig::new().with_error_flash_ms(100),
            );
            driver.type_keys("1/0=");
            assert!(driver.error_indicator_visible());
            driver.advance(Duration::from_millis(99));
            assert!(driver.error_indicator_visible());
            driver.advance(Duration::from_millis(1));
            assert!(!driver.error_indicator_visible());
        }

        // ===== Unified Specification Tests =====

        #[test]
        fn test_unified_basic_arithmetic() {
            verify_basic_arithmetic(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_error_latch() {
            verify_error_latch(&mut TuiDriver::new());
        }

        #[test]
        fn test_full_specification() {
            run_full_specification(&mut TuiDriver::new());
        }
    }
}
