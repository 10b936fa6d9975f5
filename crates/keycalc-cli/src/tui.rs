//! The `tui` command: interactive terminal calculator

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use keycalc::config::FrontendConfig;
use keycalc::tui::{keypad_area, render, CalculatorApp, InputHandler};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::error::CliResult;

/// Redraw interval while idle, so the error cue can fade
const TICK: Duration = Duration::from_millis(50);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Runs the terminal calculator until the user quits
pub fn run_tui(config: &FrontendConfig) -> CliResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    info!("starting terminal calculator");
    let result = run_app(&mut terminal, CalculatorApp::with_config(config.clone()));

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Term, mut app: CalculatorApp) -> CliResult<()> {
    let input = InputHandler::new();
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        let screen = terminal.draw(|frame| render(&app, frame))?.area;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) => app.handle_key_action(input.handle_key(key)),
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    app.handle_click(keypad_area(&app, screen), column, row);
                }
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick(now.duration_since(last_tick));
        last_tick = now;
    }

    info!(display = app.calculator().display_text(), "quitting");
    Ok(())
}
