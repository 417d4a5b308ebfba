//! HTML format implementation
//!
//! Import only: reads the HTML the editor produces into a document tree.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` pair for HTML parsing:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! It handles fragments and malformed markup the same way a browser would,
//! which matters because the input is whatever the editor serialized.
//!
//! # Element Mapping Table
//!
//! | HTML                                        | Node                         |
//! |---------------------------------------------|------------------------------|
//! | `h1`..`h6`                                  | Heading                      |
//! | `p`                                         | Paragraph                    |
//! | `ul` (also `data-type="taskList"`)          | BulletList                   |
//! | `ol`                                        | OrderedList (`start` kept)   |
//! | `li data-type="taskItem" data-checked`      | TaskItem                     |
//! | `li`                                        | ListItem                     |
//! | `img` + `style` width/margins               | Image                        |
//! | `span` + `style` color/font-size/decoration | Span                         |
//! | `u`, `strong`/`b`, `em`/`i`, `code`         | Underline, Bold, Italic, Code|
//! | `pre` (`code.language-x`)                   | CodeBlock                    |
//! | `blockquote`, `hr`, `br`, `a`               | matching nodes               |
//! | checkbox `input`, `script`, `style`         | dropped                      |
//! | anything else                               | Element (passed through)     |

mod parser;

pub use parser::parse_from_html;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::DocNode;

/// Format implementation for HTML
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Editor HTML (import only)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DocNode, FormatError> {
        parse_from_html(source)
    }
}
