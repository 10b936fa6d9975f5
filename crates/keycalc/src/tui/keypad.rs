//! Keypad for the TUI calculator
//!
//! Layout:
//! ```text
//! [ AC ] [ C ] [ ± ] [ ÷ ]
//! [ 7  ] [ 8 ] [ 9 ] [ × ]
//! [ 4  ] [ 5 ] [ 6 ] [ − ]
//! [ 1  ] [ 2 ] [ 3 ] [ + ]
//! [    0     ] [ . ] [ = ]
//! ```
//! Buttons light up when pressed (keyboard or mouse); the pending operator
//! stays highlighted until it is applied or cleared.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::{Action, Operator};
use crate::input::InputEvent;

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Event sent when the button is pressed
    pub event: InputEvent,
    /// Grid row (0-indexed)
    pub row: usize,
    /// First grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
    /// Whether the button was the last one pressed
    pub pressed: bool,
}

impl KeypadButton {
    /// Creates a one-column button
    #[must_use]
    pub fn new(event: impl Into<InputEvent>, row: usize, col: usize) -> Self {
        Self {
            event: event.into(),
            row,
            col,
            span: 1,
            pressed: false,
        }
    }

    /// Creates a digit button
    #[must_use]
    pub fn digit(d: char, row: usize, col: usize) -> Self {
        Self::new(InputEvent::Digit(d), row, col)
    }

    /// Makes the button cover `span` columns
    #[must_use]
    pub fn spanning(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// Returns the label printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.event.label()
    }

    /// Returns true if the button covers the given cell
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.span).contains(&col)
    }

    fn style(&self, active: Option<Operator>) -> Style {
        if self.pressed {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        match self.event {
            InputEvent::Operator(op) if Some(op) == active => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            InputEvent::Digit(_) => Style::default().fg(Color::White),
            InputEvent::Operator(_) => Style::default().fg(Color::Yellow),
            InputEvent::Action(Action::Equals) => Style::default().fg(Color::Green),
            InputEvent::Action(Action::ClearAll | Action::Clear) => Style::default().fg(Color::Red),
            InputEvent::Action(_) => Style::default().fg(Color::Cyan),
        }
    }
}

/// The keypad layout - a 5x4 grid of buttons
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            // Row 0: AC C ± ÷
            KeypadButton::new(Action::ClearAll, 0, 0),
            KeypadButton::new(Action::Clear, 0, 1),
            KeypadButton::new(Action::ToggleSign, 0, 2),
            KeypadButton::new(Operator::Divide, 0, 3),
            // Row 1: 7 8 9 ×
            KeypadButton::digit('7', 1, 0),
            KeypadButton::digit('8', 1, 1),
            KeypadButton::digit('9', 1, 2),
            KeypadButton::new(Operator::Multiply, 1, 3),
            // Row 2: 4 5 6 −
            KeypadButton::digit('4', 2, 0),
            KeypadButton::digit('5', 2, 1),
            KeypadButton::digit('6', 2, 2),
            KeypadButton::new(Operator::Subtract, 2, 3),
            // Row 3: 1 2 3 +
            KeypadButton::digit('1', 3, 0),
            KeypadButton::digit('2', 3, 1),
            KeypadButton::digit('3', 3, 2),
            KeypadButton::new(Operator::Add, 3, 3),
            // Row 4: 0 (wide) . =
            KeypadButton::digit('0', 4, 0).spanning(2),
            KeypadButton::new(Action::Decimal, 4, 2),
            KeypadButton::new(Action::Equals, 4, 3),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Finds the button covering a grid cell
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<usize> {
        self.buttons.iter().position(|b| b.covers(row, col))
    }

    /// Finds the button that sends `event`
    #[must_use]
    pub fn find_button(&self, event: InputEvent) -> Option<usize> {
        self.buttons.iter().position(|b| b.event == event)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.pressed = false;
        }
    }

    /// Marks the button for `event` as the one last pressed
    pub fn highlight(&mut self, event: InputEvent) {
        self.release_all();
        if let Some(idx) = self.find_button(event) {
            self.buttons[idx].pressed = true;
        }
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Converts a click position to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        let inner = inner_area(area);
        if x < inner.x || y < inner.y || x >= inner.right() || y >= inner.bottom() {
            return None;
        }

        let (btn_width, btn_height) = self.cell_size(inner)?;
        let col = ((x - inner.x) / btn_width) as usize;
        let row = ((y - inner.y) / btn_height) as usize;
        self.button_at(row, col)
    }

    fn cell_size(&self, inner: Rect) -> Option<(u16, u16)> {
        let width = inner.width / self.cols as u16;
        let height = inner.height / self.rows as u16;
        (width > 0 && height > 0).then_some((width, height))
    }
}

fn inner_area(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    active: Option<Operator>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a keypad widget highlighting `active`
    #[must_use]
    pub fn new(keypad: &'a Keypad, active: Option<Operator>) -> Self {
        Self { keypad, active }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = inner_area(area);
        let Some((btn_width, btn_height)) = self.keypad.cell_size(inner) else {
            return; // Too small to render
        };

        for btn in self.keypad.buttons() {
            let cell = Rect {
                x: inner.x + btn.col as u16 * btn_width,
                y: inner.y + btn.row as u16 * btn_height,
                width: btn_width * btn.span as u16,
                height: btn_height,
            };
            let label_row = Rect {
                y: cell.y + btn_height / 2,
                height: 1,
                ..cell
            };
            Paragraph::new(format!("[{}]", btn.label()))
                .alignment(Alignment::Center)
                .style(btn.style(self.active))
                .render(label_row, buf);
        }
    }
}
