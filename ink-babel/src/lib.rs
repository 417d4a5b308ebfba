//! Rich-text editor documents to Markdown
//!
//!     This crate turns the document tree of a rich-text editor into a Markdown dialect. The
//!     dialect is CommonMark plus four extensions for what Markdown cannot say natively:
//!     styled spans, sized and aligned images, task items and underline.
//!
//!     TLDR: For rule authors:
//!         - The conversion is a pure function of the tree. Rules never keep state between calls.
//!         - Rules are registered in an explicit, ordered RuleSet. First match wins, there is no
//!           implicit priority.
//!         - A node no rule accepts is passed through (children joined, text emitted as is). Never
//!           make a rule fail on odd input, make it not match instead.
//!         - Lists are special: see formats/markdown/list.rs.
//!
//! Architecture
//!
//!     Input formats (HTML, JSON) build the document tree (./ir/nodes.rs), a closed sum type
//!     over node kinds. The Markdown side (./formats/markdown) is a rule engine over that tree:
//!     post-order walk, dispatch table keyed by node kind, one string out.
//!
//!     This is a pure lib, that is, it powers the ink cli but is shell agnostic. No code here
//!     should assume a shell environment, be it std print, env vars etc. Logging goes through
//!     the `log` facade and is silent unless the host installs a logger.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── export.rs               # Last good export, panic isolation, file output
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── html                # HTML → tree (html5ever)
//!     │   ├── json                # JSON ↔ tree (serde_json)
//!     │   └── markdown            # tree → Markdown
//!     │       ├── engine.rs       # Converter, Pass, output assembly
//!     │       ├── rules.rs        # Rule trait, RuleSet, CommonMark rules
//!     │       ├── list.rs         # List serializer
//!     │       ├── dialect.rs      # Span, image, underline, task item extensions
//!     │       └── options.rs
//!     ├── lib.rs
//!     └── ir                      # Document tree
//!
//! Testing
//!     tests
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.
//!
//! Known Limitations
//!
//!     No Markdown metacharacter escaping. Callers cannot tell a clean conversion from one that
//!     fell back on some node. Markdown is never parsed back into a tree.

pub mod error;
pub mod export;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;

pub use error::FormatError;
pub use export::Exporter;
pub use format::Format;
pub use formats::markdown::{Converter, MarkdownOptions, Rule, RuleSet};
pub use ir::nodes::{DocNode, NodeKind};
pub use registry::FormatRegistry;

/// Converts a document tree with the standard rules and default options.
///
/// Never fails: nodes no rule accepts are passed through.
pub fn to_markdown(doc: &DocNode) -> String {
    Converter::standard().convert(doc)
}

/// Parses editor HTML and converts it with the standard rules.
pub fn html_to_markdown(html: &str) -> Result<String, FormatError> {
    let doc = formats::html::parse_from_html(html)?;
    Ok(to_markdown(&doc))
}
