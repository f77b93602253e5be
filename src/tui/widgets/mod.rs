//! Reusable TUI widgets.

pub mod form;
pub mod status_bar;

pub use form::{Form, FormField, draw_form_rows};
pub use status_bar::{StatusBarContext, StatusMessage, draw_status_bar};
