//! Format implementations
//!
//! HTML and JSON read editor documents into the tree; Markdown writes the
//! tree out. JSON also writes the tree back in its own wire form.

pub mod html;
pub mod json;
pub mod markdown;

pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use markdown::{Converter, MarkdownFormat, MarkdownOptions, RuleSet};
