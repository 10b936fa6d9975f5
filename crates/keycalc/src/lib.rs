//! keycalc - a keypad calculator engine
//!
//! The engine in [`core`] is a small state machine fed one key at a time:
//! digits, the decimal point, four operators, equals, clear, clear-all and
//! sign toggle. Entry is capped at 8 integer digits and 3 decimal places,
//! results are rounded to 3 places, and an arithmetic failure latches an
//! `ERR` display until the next key.
//!
//! Two frontends drive the same engine through [`driver::CalculatorDriver`]:
//! a ratatui terminal app ([`tui`], feature `tui`) and a mock-DOM rendition
//! of the browser page ([`web`]).
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! for event in "12+30=".chars().filter_map(InputEvent::from_char) {
//!     calc.on_input(event);
//! }
//! assert_eq!(calc.display_text(), "42");
//! assert_eq!(calc.history_text(), "12 + 30 =");
//!
//! // Division by zero latches the error display
//! calc.on_input(InputEvent::Operator(Operator::Divide));
//! calc.on_input(InputEvent::Digit('0'));
//! assert!(calc.on_input(InputEvent::Action(Action::Equals)).is_failure());
//! assert_eq!(calc.display_text(), "ERR");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod input;

#[cfg(feature = "tui")]
pub mod tui;

/// Browser frontend - always available
/// (the mock DOM needs no browser bindings)
pub mod web;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, FrontendConfig};
    pub use crate::core::{
        calculate, format_number, Action, CalcError, CalcResult, Calculator, HistoryLine,
        Operator, Phase, Transition, ERROR_TOKEN,
    };
    pub use crate::driver::CalculatorDriver;
    pub use crate::input::InputEvent;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::web::{DomElement, DomEvent, MockDom, WebDriver};
}
