//! Calculator core: the keypad state machine and its arithmetic
//!
//! Everything a frontend needs lives here. The engine never renders, never
//! sleeps and never panics; frontends feed it [`InputEvent`](crate::input::InputEvent)s
//! and pull the display strings back out.

pub mod engine;
pub mod history;
mod operations;

pub use engine::{Action, Calculator, CalculatorState, Phase, Transition};
pub use history::{HistoryLine, LastOperation};
pub use operations::{calculate, format_number, integer_digits, round_to_places, Operator};

use thiserror::Error;

/// Maximum digits allowed in the integer part of any value (sign excluded)
pub const MAX_INTEGER_DIGITS: usize = 8;

/// Maximum digits allowed after the decimal point
pub const MAX_DECIMAL_PLACES: usize = 3;

/// Text shown on the display while the engine is latched in error
pub const ERROR_TOKEN: &str = "ERR";

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types - exhaustive enum ensures all cases handled
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Divisor was exactly zero
    #[error("Division by zero")]
    DivisionByZero,
    /// Rounded result does not fit in the display
    #[error("Overflow: {value} exceeds {} integer digits", MAX_INTEGER_DIGITS)]
    Overflow {
        /// The offending (rounded) result
        value: f64,
    },
    /// The display text could not be read back as a number
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),
}

impl CalcError {
    /// Returns true for the two arithmetic failures a user can provoke
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        matches!(self, Self::DivisionByZero | Self::Overflow { .. })
    }
}
