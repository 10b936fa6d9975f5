//! The secondary display line
//!
//! The calculator only remembers one operation: the pending one, or the one
//! that just completed. Operands are rendered through [`format_number`] so
//! the history line and the main display agree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{format_number, Operator};

/// The operands and operator of the last completed `=`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastOperation {
    /// Left operand
    pub previous: f64,
    /// Right operand
    pub current: f64,
    /// Operator that was applied
    pub operator: Operator,
}

impl LastOperation {
    /// Creates a new record
    #[must_use]
    pub const fn new(previous: f64, current: f64, operator: Operator) -> Self {
        Self {
            previous,
            current,
            operator,
        }
    }
}

impl fmt::Display for LastOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} =",
            format_number(self.previous),
            self.operator.glyph(),
            format_number(self.current)
        )
    }
}

/// What the history line currently shows
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryLine {
    /// Nothing
    #[default]
    Empty,
    /// `"<previous> <op>"` while an operator waits for its right operand
    Pending {
        /// Left operand
        previous: f64,
        /// Pending operator
        operator: Operator,
    },
    /// `"<previous> <op> <current> ="` after equals
    Completed(LastOperation),
}

impl HistoryLine {
    /// Returns true if nothing is shown
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for HistoryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Pending { previous, operator } => {
                write!(f, "{} {}", format_number(*previous), operator.glyph())
            }
            Self::Completed(op) => fmt::Display::fmt(op, f),
        }
    }
}
