//! Binary operators, rounding and display formatting
//!
//! Committed results are the only values that pass through `f64` arithmetic;
//! they are rounded to [`MAX_DECIMAL_PLACES`] on the way out so that binary
//! floating-point noise (`0.1 + 0.2`) never reaches the display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, MAX_DECIMAL_PLACES, MAX_INTEGER_DIGITS};

/// Type-safe operator enum - the four keys of the operator column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operator {
    /// All operators in keypad column order (top to bottom)
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the keyboard symbol (`+ - * /`)
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Returns the display glyph (`+ − × ÷`)
    #[must_use]
    pub const fn glyph(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '−',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Parses either the keyboard symbol or the display glyph
    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the operator to two operands without rounding or range checks
    fn apply(self, a: f64, b: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide if b == 0.0 => Err(CalcError::DivisionByZero),
            Self::Divide => Ok(a / b),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_symbol(c).ok_or_else(|| format!("unknown operator: {s}")),
            _ => Err(format!("unknown operator: {s}")),
        }
    }
}

/// Evaluates `a op b`, rounded to [`MAX_DECIMAL_PLACES`]
///
/// Fails with [`CalcError::DivisionByZero`] when dividing by exactly zero and
/// with [`CalcError::Overflow`] when the rounded result needs more than
/// [`MAX_INTEGER_DIGITS`] integer digits.
pub fn calculate(a: f64, b: f64, op: Operator) -> CalcResult<f64> {
    let rounded = round_to_places(op.apply(a, b)?, MAX_DECIMAL_PLACES);

    if !rounded.is_finite() || integer_digits(rounded) > MAX_INTEGER_DIGITS {
        return Err(CalcError::Overflow { value: rounded });
    }

    Ok(rounded)
}

/// Rounds half up on the scaled value: `floor(n * 10^places + 0.5) / 10^places`
#[must_use]
pub fn round_to_places(n: f64, places: usize) -> f64 {
    let multiplier = 10f64.powi(places as i32);
    // `+ 0.0` folds a negative zero into positive zero
    (n * multiplier + 0.5).floor() / multiplier + 0.0
}

/// Number of digits before the decimal point, sign excluded
#[must_use]
pub fn integer_digits(n: f64) -> usize {
    let text = n.abs().to_string();
    text.split('.').next().map_or(0, str::len)
}

/// Formats a committed value for display
///
/// Rounds to [`MAX_DECIMAL_PLACES`] and prints the shortest decimal form:
/// no exponent, no trailing fractional zeros, no bare trailing point.
#[must_use]
pub fn format_number(n: f64) -> String {
    let text = round_to_places(n, MAX_DECIMAL_PLACES).to_string();
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
