//! Markdown format implementation
//!
//! Export only: document tree → Markdown. Reading Markdown back is not
//! supported.
//!
//! # Architecture
//!
//! Conversion is rule driven, see [`engine`]. A [`Converter`] is built once
//! from an explicit, ordered [`RuleSet`] and [`MarkdownOptions`], then used for
//! any number of conversions. Lists get their own serializer ([`list`]) which
//! re-enters the engine for every item; the dialect extensions live in
//! [`dialect`].
//!
//! # Element Mapping Table
//!
//! | Node            | Markdown                                     | Notes                                   |
//! |-----------------|----------------------------------------------|-----------------------------------------|
//! | Heading 1-6     | `# Title`                                    | Other levels pass through as text       |
//! | Paragraph       | text between blank lines                     |                                         |
//! | BulletList      | `- item`                                     | Two spaces per nesting level            |
//! | OrderedList     | `1. item`                                    | Numbered by position, `start` ignored   |
//! | TaskItem        | `- [x] item` / `- [ ] item`                  | Same marker inside ordered lists        |
//! | Image           | `![](src) { width="…" align="…" }`          | Block only when width or non-left align |
//! | Span            | `<span style="color: …; font-size: …">`      | Only with color and/or font size        |
//! | Underline       | `<u>text</u>`                                | Also spans with underline decoration    |
//! | CodeBlock       | fenced, language on the fence                |                                         |
//! | Bold / Italic   | `**b**` / `_i_`                              | Delimiters configurable                 |
//! | Code            | `` `code` ``                                 |                                         |
//! | Blockquote      | `> text`                                     |                                         |
//! | Link            | `[text](href "title")`                       |                                         |
//! | anything else   | children, unchanged                          | Text is emitted without escaping        |
//!
//! # Known Limitations
//!
//! - Markdown metacharacters in text are not escaped.
//! - A fallback on a malformed node is silent; the output does not say which
//!   nodes were passed through.
//! - Item content starting with digits, dots, dashes or spaces loses that
//!   prefix (it is taken for a leftover list marker).

pub mod dialect;
pub mod engine;
pub mod list;
pub mod options;
pub mod rules;

pub use engine::{Converter, Pass};
pub use options::MarkdownOptions;
pub use rules::{Rule, RuleSet};

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::DocNode;

/// Format implementation for Markdown
#[derive(Debug, Default)]
pub struct MarkdownFormat {
    converter: Converter,
}

impl MarkdownFormat {
    pub fn new(converter: Converter) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown with styled span, image layout, task and underline extensions"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &DocNode) -> Result<String, FormatError> {
        Ok(self.converter.convert(doc))
    }
}
