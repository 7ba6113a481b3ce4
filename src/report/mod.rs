//! Report formatters
//!
//! Render a scored session for people (Markdown) or machines (JSON).
//! Values are rounded here and nowhere earlier.

pub mod markdown;
pub mod json;

pub use markdown::MarkdownFormatter;
pub use json::JsonFormatter;
