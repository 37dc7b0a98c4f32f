//! Presentation: text boxes for terminals, JSON for tools.

pub mod json;
pub mod text;

pub use json::render_json_report;
pub use text::{format_value, render_pyramid};
