//! Rendering of analysis reports as JSON or terminal text.

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::format_report;
