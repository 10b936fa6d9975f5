//! Browser frontend
//!
//! The page markup and its event wiring, modelled on a mock DOM so the
//! frontend runs and is tested without a browser.

mod dom;
mod driver;

pub use dom::{
    DomElement, DomEvent, MockDom, ACTIVE_CLASS, DISPLAY_ID, ERROR_CLASS, EVENT_HISTORY_LIMIT,
    HISTORY_ID,
};
pub use driver::WebDriver;
