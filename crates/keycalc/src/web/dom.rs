//! Mock DOM for the browser frontend
//!
//! Mirrors the markup the browser page ships: a `#display`, a `#history`
//! line and one `<button>` per key tagged with `data-number`,
//! `data-operator` or `data-action`. Tests can drive and inspect it without
//! a browser.

use std::collections::HashMap;

use crate::core::{Action, Operator};
use crate::input::InputEvent;

/// ID of the main display element
pub const DISPLAY_ID: &str = "display";
/// ID of the history line element
pub const HISTORY_ID: &str = "history";
/// Class on the highlighted operator button
pub const ACTIVE_CLASS: &str = "active";
/// Class on the display while the error cue shows
pub const ERROR_CLASS: &str = "error";
/// Most recent events kept by [`MockDom::event_history`]
pub const EVENT_HISTORY_LIMIT: usize = 256;

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Reads the calculator key a button stands for from its `data-*` attributes
    #[must_use]
    pub fn key_event(&self) -> Option<InputEvent> {
        if let Some(number) = self.get_attr("data-number") {
            let mut chars = number.chars();
            return match (chars.next(), chars.next()) {
                (Some(d), None) if d.is_ascii_digit() => Some(InputEvent::Digit(d)),
                _ => None,
            };
        }
        if let Some(op) = self.get_attr("data-operator") {
            return op.parse::<Operator>().ok().map(InputEvent::Operator);
        }
        self.get_attr("data-action")?
            .parse::<Action>()
            .ok()
            .map(InputEvent::Action)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Document-level keydown
    KeyDown {
        /// `KeyboardEvent.key`
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a keydown event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// Mock DOM holding the calculator page
#[derive(Debug, Default)]
pub struct MockDom {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Button IDs in document order
    buttons: Vec<String>,
    /// Most recent events, oldest first, for verification
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator page
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();

        dom.register_element(
            DomElement::new("div")
                .with_id(DISPLAY_ID)
                .with_class("display")
                .with_text("0"),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(HISTORY_ID)
                .with_class("history"),
        );

        let actions = |action: Action| {
            DomElement::new("button")
                .with_id(&format!("btn-{}", action.name()))
                .with_attr("data-action", action.name())
                .with_text(action.label())
        };
        let operator = |op: Operator| {
            DomElement::new("button")
                .with_id(&format!("btn-{}", operator_slug(op)))
                .with_attr("data-operator", &op.symbol().to_string())
                .with_text(&op.glyph().to_string())
        };
        let number = |d: char| {
            DomElement::new("button")
                .with_id(&format!("btn-{d}"))
                .with_attr("data-number", &d.to_string())
                .with_text(&d.to_string())
        };

        let keys = [
            actions(Action::ClearAll),
            actions(Action::Clear),
            actions(Action::ToggleSign),
            operator(Operator::Divide),
            number('7'),
            number('8'),
            number('9'),
            operator(Operator::Multiply),
            number('4'),
            number('5'),
            number('6'),
            operator(Operator::Subtract),
            number('1'),
            number('2'),
            number('3'),
            operator(Operator::Add),
            number('0'),
            actions(Action::Decimal),
            actions(Action::Equals),
        ];
        for button in keys {
            dom.buttons.push(button.id.clone());
            dom.register_element(button);
        }

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Records an event, dropping the oldest past [`EVENT_HISTORY_LIMIT`]
    pub fn dispatch_event(&mut self, event: DomEvent) {
        if self.event_history.len() >= EVENT_HISTORY_LIMIT {
            let excess = self.event_history.len() + 1 - EVENT_HISTORY_LIMIT;
            self.event_history.drain(..excess);
        }
        self.event_history.push(event);
    }

    /// Gets the recorded events, oldest first
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Iterates over the keypad buttons in document order
    pub fn buttons(&self) -> impl Iterator<Item = &DomElement> {
        self.buttons.iter().filter_map(|id| self.elements.get(id))
    }

    /// Finds the button that sends `event`
    #[must_use]
    pub fn button_for(&self, event: InputEvent) -> Option<&DomElement> {
        self.buttons().find(|b| b.key_event() == Some(event))
    }

    /// Toggles `class` on every button so that only `keep` (if any) has it
    pub fn set_exclusive_class(&mut self, class: &str, keep: Option<&str>) {
        for id in &self.buttons {
            if let Some(button) = self.elements.get_mut(id) {
                if Some(id.as_str()) == keep {
                    button.add_class(class);
                } else {
                    button.remove_class(class);
                }
            }
        }
    }
}

fn operator_slug(op: Operator) -> &'static str {
    match op {
        Operator::Add => "add",
        Operator::Subtract => "subtract",
        Operator::Multiply => "multiply",
        Operator::Divide => "divide",
    }
}
