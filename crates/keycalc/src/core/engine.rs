//! Keypad state machine
//!
//! The number being typed is accumulated as a string so digit limits are
//! exact and the in-progress display never shows float artifacts. Only
//! committed results go through [`calculate`] and [`format_number`].
//!
//! ```text
//!            digit/./±              op                  digit/./±
//!   Idle ─────────────▶ Idle ──────────▶ PendingOperator ─────────▶ EnteringSecondOperand
//!    ▲                                   │   ▲      op (swap)            │        │
//!    │             =                     │   └───────────────────────────┼── op ──┘ (chain)
//!    └───────────────────────────────────┴───────────────────────────────┘
//!   any failure ──▶ Error ── any event ──▶ Idle (event consumed)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::history::{HistoryLine, LastOperation};
use crate::core::{
    calculate, format_number, CalcError, CalcResult, Operator, ERROR_TOKEN, MAX_DECIMAL_PLACES,
    MAX_INTEGER_DIGITS,
};
use crate::input::InputEvent;

/// Keys that are neither digits nor operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Reset everything (AC)
    ClearAll,
    /// Clear the entry or the pending operator (C)
    Clear,
    /// Flip the sign of the current value (±)
    ToggleSign,
    /// Insert a decimal point
    Decimal,
    /// Evaluate the pending operation
    Equals,
}

impl Action {
    /// All actions
    pub const ALL: [Self; 5] = [
        Self::ClearAll,
        Self::Clear,
        Self::ToggleSign,
        Self::Decimal,
        Self::Equals,
    ];

    /// Returns the action name used by `data-action` attributes
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ClearAll => "clear-all",
            Self::Clear => "clear",
            Self::ToggleSign => "toggle-sign",
            Self::Decimal => "decimal",
            Self::Equals => "equals",
        }
    }

    /// Returns the keypad label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ClearAll => "AC",
            Self::Clear => "C",
            Self::ToggleSign => "±",
            Self::Decimal => ".",
            Self::Equals => "=",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No operator pending
    Idle,
    /// Operator chosen, right operand not started
    PendingOperator,
    /// Operator chosen, right operand being typed
    EnteringSecondOperand,
    /// Latched error, display shows [`ERROR_TOKEN`]
    Error,
}

/// What a handled event did to the calculator
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// State (or the display) was updated
    Applied,
    /// Rejected by a limit or a no-op in the current state
    Ignored,
    /// The latched error was cleared; the event itself had no other effect
    Recovered,
    /// The engine entered the error state
    Failed(CalcError),
}

impl Transition {
    /// Returns true if this event put the engine into the error state
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Complete calculator state
///
/// Only [`Calculator`] mutates it; callers get a shared reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorState {
    /// Value being entered or displayed (or [`ERROR_TOKEN`])
    pub current_value: String,
    /// Left operand of the pending operation
    pub previous_value: Option<f64>,
    /// Pending operator
    pub operator: Option<Operator>,
    /// Next digit starts a new number
    pub waiting_for_new_value: bool,
    /// Latched error state
    pub has_error: bool,
    /// Last completed operation
    pub last_operation: Option<LastOperation>,
    /// Current history line
    pub history: HistoryLine,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            current_value: "0".to_string(),
            previous_value: None,
            operator: None,
            waiting_for_new_value: false,
            has_error: false,
            last_operation: None,
            history: HistoryLine::Empty,
        }
    }
}

/// The calculator engine
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: CalculatorState,
}

impl Calculator {
    /// Creates a calculator showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the full state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Returns the current state machine phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.state.has_error {
            return Phase::Error;
        }
        match (self.state.operator, self.state.waiting_for_new_value) {
            (None, _) => Phase::Idle,
            (Some(_), true) => Phase::PendingOperator,
            (Some(_), false) => Phase::EnteringSecondOperand,
        }
    }

    /// Text for the main display
    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.state.current_value
    }

    /// Text for the history line
    #[must_use]
    pub fn history_text(&self) -> String {
        self.state.history.to_string()
    }

    /// Operator whose key should be highlighted
    #[must_use]
    pub fn active_operator(&self) -> Option<Operator> {
        self.state.operator
    }

    /// Returns true while latched in error
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.state.has_error
    }

    /// Dispatches a normalized input event
    pub fn on_input(&mut self, event: InputEvent) -> Transition {
        let transition = match event {
            InputEvent::Digit(d) => self.on_digit(d),
            InputEvent::Operator(op) => self.on_operator(op),
            InputEvent::Action(action) => self.on_action(action),
        };
        debug!(
            ?event,
            ?transition,
            phase = ?self.phase(),
            display = %self.state.current_value,
            "handled input"
        );
        transition
    }

    /// Handles a digit key (`'0'..='9'`; anything else is ignored)
    pub fn on_digit(&mut self, d: char) -> Transition {
        if !d.is_ascii_digit() {
            return Transition::Ignored;
        }
        if self.recover_from_error() {
            return Transition::Recovered;
        }

        let state = &mut self.state;
        if state.waiting_for_new_value {
            state.current_value = d.to_string();
            state.waiting_for_new_value = false;
        } else if !can_add_digit(&state.current_value) {
            return Transition::Ignored;
        } else if state.current_value == "0" {
            state.current_value = d.to_string();
        } else {
            state.current_value.push(d);
        }
        Transition::Applied
    }

    /// Handles an operator key, chaining a pending operation if needed
    pub fn on_operator(&mut self, op: Operator) -> Transition {
        if self.recover_from_error() {
            return Transition::Recovered;
        }

        let current = match self.current_number() {
            Ok(value) => value,
            Err(err) => return self.fail(err),
        };

        match (self.state.previous_value, self.state.operator) {
            (None, _) => self.state.previous_value = Some(current),
            (Some(previous), Some(pending)) if !self.state.waiting_for_new_value => {
                match calculate(previous, current, pending) {
                    Ok(result) => {
                        self.state.current_value = format_number(result);
                        self.state.previous_value = Some(result);
                    }
                    Err(err) => return self.fail(err),
                }
            }
            // operator pressed again before a right operand: swap it
            _ => {}
        }

        self.state.operator = Some(op);
        self.state.waiting_for_new_value = true;
        if let Some(previous) = self.state.previous_value {
            self.state.history = HistoryLine::Pending {
                previous,
                operator: op,
            };
        }
        Transition::Applied
    }

    /// Handles an action key
    pub fn on_action(&mut self, action: Action) -> Transition {
        match action {
            Action::ClearAll => self.clear_all(),
            Action::Clear => self.clear(),
            Action::ToggleSign => self.toggle_sign(),
            Action::Decimal => self.decimal(),
            Action::Equals => self.equals(),
        }
    }

    /// Evaluates the pending operation
    pub fn equals(&mut self) -> Transition {
        if self.recover_from_error() {
            return Transition::Recovered;
        }

        let (Some(previous), Some(operator)) = (self.state.previous_value, self.state.operator)
        else {
            return Transition::Ignored;
        };

        let current = match self.current_number() {
            Ok(value) => value,
            Err(err) => return self.fail(err),
        };

        match calculate(previous, current, operator) {
            Ok(result) => {
                let last = LastOperation::new(previous, current, operator);
                let state = &mut self.state;
                state.last_operation = Some(last);
                state.current_value = format_number(result);
                state.previous_value = None;
                state.operator = None;
                state.waiting_for_new_value = true;
                state.history = HistoryLine::Completed(last);
                Transition::Applied
            }
            Err(err) => self.fail(err),
        }
    }

    /// Resets to the startup state, whatever the current state
    pub fn clear_all(&mut self) -> Transition {
        let had_error = self.state.has_error;
        self.state = CalculatorState::default();
        if had_error {
            Transition::Recovered
        } else {
            Transition::Applied
        }
    }

    /// Clears the pending operator if one was just entered, else the entry
    pub fn clear(&mut self) -> Transition {
        if self.recover_from_error() {
            return Transition::Recovered;
        }

        let state = &mut self.state;
        if state.waiting_for_new_value && state.operator.is_some() {
            state.operator = None;
            state.waiting_for_new_value = false;
            state.history = HistoryLine::Empty;
        } else {
            state.current_value = "0".to_string();
        }
        Transition::Applied
    }

    /// Flips the sign of a non-zero value
    pub fn toggle_sign(&mut self) -> Transition {
        if self.recover_from_error() {
            return Transition::Recovered;
        }

        let value = &self.state.current_value;
        if value == "0" || value == "0." {
            return Transition::Ignored;
        }
        let toggled = match value.strip_prefix('-') {
            Some(unsigned) => unsigned.to_string(),
            None => format!("-{value}"),
        };
        self.state.current_value = toggled;
        Transition::Applied
    }

    /// Inserts a decimal point (at most one per number)
    pub fn decimal(&mut self) -> Transition {
        if self.recover_from_error() {
            return Transition::Recovered;
        }

        let state = &mut self.state;
        if state.waiting_for_new_value {
            state.current_value = "0.".to_string();
            state.waiting_for_new_value = false;
        } else if state.current_value.contains('.') {
            return Transition::Ignored;
        } else {
            state.current_value.push('.');
        }
        Transition::Applied
    }

    /// Resets if latched in error; the caller then drops its event
    fn recover_from_error(&mut self) -> bool {
        if !self.state.has_error {
            return false;
        }
        debug!("clearing latched error");
        self.state = CalculatorState::default();
        true
    }

    fn current_number(&self) -> CalcResult<f64> {
        let text = &self.state.current_value;
        text.parse::<f64>()
            .map_err(|_| CalcError::InvalidNumber(text.clone()))
    }

    fn fail(&mut self, err: CalcError) -> Transition {
        warn!(error = %err, "calculator entered error state");
        self.state.current_value = ERROR_TOKEN.to_string();
        self.state.has_error = true;
        Transition::Failed(err)
    }
}

/// Whether one more digit fits in `value`
fn can_add_digit(value: &str) -> bool {
    match value.split_once('.') {
        None => value.trim_start_matches('-').len() < MAX_INTEGER_DIGITS,
        Some((_, fraction)) => fraction.len() < MAX_DECIMAL_PLACES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(calc: &mut Calculator, keys: &str) {
        for c in keys.chars() {
            let event = InputEvent::from_char(c).unwrap();
            calc.on_input(event);
        }
    }

    fn typed(keys: &str) -> Calculator {
        let mut calc = Calculator::new();
        press(&mut calc, keys);
        calc
    }

    // ===== Startup =====

    #[test]
    fn test_new_shows_zero() {
        let calc = Calculator::new();
        assert_eq!(calc.display_text(), "0");
        assert_eq!(calc.history_text(), "");
        assert_eq!(calc.active_operator(), None);
        assert_eq!(calc.phase(), Phase::Idle);
        assert_eq!(calc.state(), &CalculatorState::default());
    }

    // ===== Digits =====

    #[test]
    fn test_digits_accumulate() {
        assert_eq!(typed("123").display_text(), "123");
    }

    #[test]
    fn test_leading_zero_replaced() {
        assert_eq!(typed("05").display_text(), "5");
        assert_eq!(typed("000").display_text(), "0");
    }

    #[test]
    fn test_non_digit_ignored() {
        let mut calc = Calculator::new();
        assert_eq!(calc.on_digit('a'), Transition::Ignored);
        assert_eq!(calc.display_text(), "0");
    }

    #[test]
    fn test_integer_limit() {
        let mut calc = typed("12345678");
        assert_eq!(calc.on_digit('9'), Transition::Ignored);
        assert_eq!(calc.display_text(), "12345678");
    }

    #[test]
    fn test_integer_limit_excludes_sign() {
        let mut calc = typed("1234567");
        calc.toggle_sign();
        assert_eq!(calc.on_digit('8'), Transition::Applied);
        assert_eq!(calc.display_text(), "-12345678");
        assert_eq!(calc.on_digit('9'), Transition::Ignored);
    }

    #[test]
    fn test_decimal_limit() {
        let mut calc = typed("1.234");
        assert_eq!(calc.on_digit('5'), Transition::Ignored);
        assert_eq!(calc.display_text(), "1.234");
    }

    #[test]
    fn test_fraction_allowed_after_full_integer_part() {
        assert_eq!(typed("12345678.125").display_text(), "12345678.125");
    }

    #[test]
    fn test_digit_after_operator_starts_new_value() {
        let calc = typed("12+3");
        assert_eq!(calc.display_text(), "3");
        assert_eq!(calc.phase(), Phase::EnteringSecondOperand);
    }

    // ===== Operators =====

    #[test]
    fn test_operator_sets_pending() {
        let calc = typed("5+");
        assert_eq!(calc.active_operator(), Some(Operator::Add));
        assert_eq!(calc.state().previous_value, Some(5.0));
        assert!(calc.state().waiting_for_new_value);
        assert_eq!(calc.history_text(), "5 +");
        assert_eq!(calc.phase(), Phase::PendingOperator);
    }

    #[test]
    fn test_operator_swap_before_second_operand() {
        let calc = typed("1.5+*");
        assert_eq!(calc.active_operator(), Some(Operator::Multiply));
        assert_eq!(calc.state().previous_value, Some(1.5));
        assert_eq!(calc.display_text(), "1.5");
        assert_eq!(calc.history_text(), "1.5 ×");
    }

    #[test]
    fn test_operator_chaining_evaluates() {
        let calc = typed("2+3*");
        assert_eq!(calc.display_text(), "5");
        assert_eq!(calc.state().previous_value, Some(5.0));
        assert_eq!(calc.active_operator(), Some(Operator::Multiply));
        assert_eq!(calc.history_text(), "5 ×");
    }

    #[test]
    fn test_chaining_is_left_to_right() {
        assert_eq!(typed("2+3*4=").display_text(), "20");
    }

    #[test]
    fn test_chaining_overflow_discards_operator() {
        let mut calc = typed("99999999+1");
        let transition = calc.on_operator(Operator::Subtract);
        assert!(matches!(
            transition,
            Transition::Failed(CalcError::Overflow { .. })
        ));
        assert_eq!(calc.display_text(), ERROR_TOKEN);
        assert_eq!(calc.active_operator(), Some(Operator::Add));
        assert_eq!(calc.phase(), Phase::Error);
    }

    #[test]
    fn test_chaining_division_by_zero_discards_operator() {
        let mut calc = typed("5/0");
        let transition = calc.on_operator(Operator::Add);
        assert_eq!(transition, Transition::Failed(CalcError::DivisionByZero));
        assert_eq!(calc.display_text(), ERROR_TOKEN);
        assert_eq!(calc.active_operator(), Some(Operator::Divide));
        assert_eq!(calc.phase(), Phase::Error);
        assert_eq!(calc.history_text(), "5 ÷");
    }

    #[test]
    fn test_operator_after_equals_uses_result() {
        let calc = typed("5+3=-");
        assert_eq!(calc.state().previous_value, Some(8.0));
        assert_eq!(calc.history_text(), "8 −");
    }

    // ===== Equals =====

    #[test]
    fn test_simple_addition() {
        let calc = typed("5+3=");
        assert_eq!(calc.display_text(), "8");
        assert_eq!(calc.history_text(), "5 + 3 =");
        assert_eq!(calc.active_operator(), None);
        assert_eq!(calc.state().previous_value, None);
        assert!(calc.state().waiting_for_new_value);
        assert_eq!(
            calc.state().last_operation,
            Some(LastOperation::new(5.0, 3.0, Operator::Add))
        );
    }

    #[test]
    fn test_equals_without_operator_is_noop() {
        let mut calc = typed("42");
        assert_eq!(calc.equals(), Transition::Ignored);
        assert_eq!(calc.display_text(), "42");
        assert_eq!(calc.history_text(), "");
    }

    #[test]
    fn test_equals_repeated_is_noop() {
        let mut calc = typed("6/3=");
        assert_eq!(calc.display_text(), "2");
        assert_eq!(calc.equals(), Transition::Ignored);
        assert_eq!(calc.display_text(), "2");
    }

    #[test]
    fn test_equals_right_after_operator_reuses_operand() {
        assert_eq!(typed("4*=").display_text(), "16");
    }

    #[test]
    fn test_equals_rounds_float_noise() {
        let calc = typed(".1+.2=");
        assert_eq!(calc.display_text(), "0.3");
        assert_eq!(calc.history_text(), "0.1 + 0.2 =");
    }

    #[test]
    fn test_division_by_zero_latches_error() {
        let mut calc = typed("5/0");
        assert_eq!(
            calc.equals(),
            Transition::Failed(CalcError::DivisionByZero)
        );
        assert_eq!(calc.display_text(), ERROR_TOKEN);
        assert!(calc.has_error());
        assert_eq!(calc.phase(), Phase::Error);
    }

    #[test]
    fn test_overflow_on_equals() {
        let mut calc = typed("99999999+1");
        assert!(calc.equals().is_failure());
        assert_eq!(calc.display_text(), ERROR_TOKEN);
    }

    #[test]
    fn test_history_kept_while_typing_after_equals() {
        let calc = typed("5+3=7");
        assert_eq!(calc.display_text(), "7");
        assert_eq!(calc.history_text(), "5 + 3 =");
    }

    // ===== Error recovery =====

    #[test]
    fn test_digit_in_error_resets_and_is_consumed() {
        let mut calc = typed("1/0=");
        assert_eq!(calc.on_digit('7'), Transition::Recovered);
        assert_eq!(calc.display_text(), "0");
        assert_eq!(calc.state(), &CalculatorState::default());
    }

    #[test]
    fn test_every_event_in_error_resets() {
        let events = [
            InputEvent::Digit('3'),
            InputEvent::Operator(Operator::Add),
            InputEvent::Action(Action::Equals),
            InputEvent::Action(Action::Decimal),
            InputEvent::Action(Action::ToggleSign),
            InputEvent::Action(Action::Clear),
            InputEvent::Action(Action::ClearAll),
        ];
        for event in events {
            let mut calc = typed("1/0=");
            assert_eq!(calc.on_input(event), Transition::Recovered, "{event:?}");
            assert_eq!(calc.state(), &CalculatorState::default(), "{event:?}");
        }
    }

    #[test]
    fn test_clear_all_after_error_restores_startup() {
        let mut calc = typed("2+3=9/0=");
        assert!(calc.has_error());
        calc.clear_all();
        assert_eq!(calc.display_text(), "0");
        assert!(!calc.has_error());
        assert_eq!(calc.history_text(), "");
        assert_eq!(calc.active_operator(), None);
    }

    // ===== Clear =====

    #[test]
    fn test_clear_all_without_error() {
        let mut calc = typed("5+3");
        assert_eq!(calc.clear_all(), Transition::Applied);
        assert_eq!(calc.state(), &CalculatorState::default());
    }

    #[test]
    fn test_clear_entry() {
        let mut calc = typed("5+3");
        calc.clear();
        assert_eq!(calc.display_text(), "0");
        assert_eq!(calc.active_operator(), Some(Operator::Add));
        press(&mut calc, "4=");
        assert_eq!(calc.display_text(), "9");
    }

    #[test]
    fn test_clear_pending_operator() {
        let mut calc = typed("5+");
        calc.clear();
        assert_eq!(calc.active_operator(), None);
        assert_eq!(calc.display_text(), "5");
        assert_eq!(calc.history_text(), "");
        assert!(!calc.state().waiting_for_new_value);
        // the left operand survives
        assert_eq!(calc.state().previous_value, Some(5.0));
    }

    // ===== Toggle sign =====

    #[test]
    fn test_toggle_sign_zero_is_noop() {
        let mut calc = Calculator::new();
        assert_eq!(calc.toggle_sign(), Transition::Ignored);
        assert_eq!(calc.display_text(), "0");
        let mut calc = typed(".");
        assert_eq!(calc.toggle_sign(), Transition::Ignored);
        assert_eq!(calc.display_text(), "0.");
    }

    #[test]
    fn test_toggle_sign_round_trip() {
        let mut calc = typed("5");
        calc.toggle_sign();
        assert_eq!(calc.display_text(), "-5");
        calc.toggle_sign();
        assert_eq!(calc.display_text(), "5");
    }

    #[test]
    fn test_negative_operand_in_history() {
        let mut calc = typed("5");
        calc.toggle_sign();
        press(&mut calc, "*2=");
        assert_eq!(calc.display_text(), "-10");
        assert_eq!(calc.history_text(), "-5 × 2 =");
    }

    // ===== Decimal =====

    #[test]
    fn test_decimal_once() {
        let mut calc = typed("1.5");
        assert_eq!(calc.decimal(), Transition::Ignored);
        assert_eq!(calc.display_text(), "1.5");
    }

    #[test]
    fn test_decimal_from_zero() {
        assert_eq!(typed(".5").display_text(), "0.5");
    }

    #[test]
    fn test_decimal_after_operator_starts_fresh() {
        let calc = typed("3+.");
        assert_eq!(calc.display_text(), "0.");
        assert!(!calc.state().waiting_for_new_value);
    }

    #[test]
    fn test_trailing_point_operand() {
        assert_eq!(typed("3.+1=").display_text(), "4");
    }

    // ===== Actions =====

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>(), Ok(action));
            assert_eq!(action.to_string(), action.name());
        }
        assert!("percent".parse::<Action>().is_err());
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::ClearAll.label(), "AC");
        assert_eq!(Action::ToggleSign.label(), "±");
    }

    #[test]
    fn test_on_action_dispatch() {
        let mut calc = typed("7");
        calc.on_action(Action::ToggleSign);
        assert_eq!(calc.display_text(), "-7");
        calc.on_action(Action::ClearAll);
        assert_eq!(calc.display_text(), "0");
    }

    // ===== Outputs =====

    #[test]
    fn test_outputs_idempotent() {
        let calc = typed("12+7=");
        assert_eq!(calc.display_text(), calc.display_text());
        assert_eq!(calc.history_text(), calc.history_text());
        assert_eq!(calc.active_operator(), calc.active_operator());
    }

    #[test]
    fn test_can_add_digit() {
        assert!(can_add_digit("0"));
        assert!(can_add_digit("-1234567"));
        assert!(!can_add_digit("12345678"));
        assert!(can_add_digit("1.12"));
        assert!(!can_add_digit("1.123"));
    }
}
