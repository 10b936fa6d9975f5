//! The `press` command: feed keys to a fresh calculator and print the result

use std::io::Write;

use keycalc::core::{Calculator, Operator};
use keycalc::input::InputEvent;
use serde::Serialize;
use tracing::{debug, warn};

use crate::commands::{OutputFormat, PressArgs};
use crate::error::CliResult;

/// What the calculator shows after a run of key presses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PressOutcome {
    /// Main display
    pub display: String,
    /// History line
    pub history: String,
    /// Highlighted operator, if any
    pub active_operator: Option<Operator>,
    /// Whether the calculator is latched in error
    pub error: bool,
}

/// Presses every key in `keys` on a fresh calculator
///
/// Each entry is a key name or a run of single-character keys. Unknown
/// keys are skipped.
#[must_use]
pub fn press_keys<S: AsRef<str>>(keys: &[S]) -> PressOutcome {
    let mut calc = Calculator::new();
    for key in keys {
        let key = key.as_ref();
        if let Some(event) = InputEvent::from_key(key) {
            calc.on_input(event);
            continue;
        }
        for c in key.chars() {
            match InputEvent::from_char(c) {
                Some(event) => {
                    calc.on_input(event);
                }
                None => warn!(key = %c, "ignoring unknown key"),
            }
        }
    }

    let outcome = PressOutcome {
        display: calc.display_text().to_string(),
        history: calc.history_text(),
        active_operator: calc.active_operator(),
        error: calc.has_error(),
    };
    debug!(?outcome, "press finished");
    outcome
}

/// Runs the `press` command, writing to `out`
pub fn run_press(args: &PressArgs, out: &mut impl Write) -> CliResult<()> {
    let outcome = press_keys(&args.keys);
    match args.format {
        OutputFormat::Text => {
            if !outcome.history.is_empty() {
                writeln!(out, "{}", outcome.history)?;
            }
            writeln!(out, "{}", outcome.display)?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
        }
    }
    Ok(())
}
