//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Where the keypad lands inside `area`, for mouse hit-testing
#[must_use]
pub fn keypad_area(app: &CalculatorApp, area: Rect) -> Rect {
    CalculatorUI::new(app).layout(area).keypad
}

struct Areas {
    display: Rect,
    keypad: Rect,
    help: Option<Rect>,
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn layout(&self, area: Rect) -> Areas {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([
                Constraint::Min(26),    // Display + keypad
                Constraint::Length(24), // Help sidebar
            ])
            .split(area);

        let main = if self.app.config().show_help {
            columns[0]
        } else {
            Rect {
                width: columns[0].width + columns[1].width,
                ..columns[0]
            }
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // History + display
                Constraint::Min(12),   // Keypad
            ])
            .split(main);

        Areas {
            display: rows[0],
            keypad: rows[1],
            help: self.app.config().show_help.then_some(columns[1]),
        }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let calculator = self.app.calculator();

        let value_style = if self.app.is_error_flashing() {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else if calculator.has_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(Span::styled(
                calculator.history_text(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(calculator.display_text(), value_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_help_sidebar(area: Rect, buf: &mut Buffer) {
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>9}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Keys ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let areas = self.layout(area);
        self.render_display(areas.display, buf);
        KeypadWidget::new(
            self.app.keypad(),
            self.app.calculator().active_operator(),
        )
        .render(areas.keypad, buf);
        if let Some(help) = areas.help {
            Self::render_help_sidebar(help, buf);
        }
    }
}

/// Window title
pub const TITLE: &str = " keycalc ";

/// Key help shown in the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9", "Digit"),
    ("+ - * /", "Operator"),
    (".", "Decimal"),
    ("Enter =", "Equals"),
    ("Backspace", "Clear"),
    ("Esc", "Clear all"),
    ("Click", "Press key"),
    ("q", "Quit"),
];
