//! Rules for the dialect extensions.
//!
//! Markdown has no syntax for inline color or size, image layout, or
//! underline, so these rules emit raw inline HTML or a trailing attribute
//! block:
//!
//! | Node                         | Output                                            |
//! |------------------------------|---------------------------------------------------|
//! | span with color/font size    | `<span style="color: C; font-size: S">text</span>` |
//! | image                        | `![](src) { width="W" align="A" }`                |
//! | underline / underlined span  | `<u>text</u>`                                     |
//! | task item outside a list     | `- [x] text`                                      |

use super::engine::Pass;
use super::rules::Rule;
use crate::ir::nodes::{Align, DocNode, NodeKind};

/// Keeps inline color and font size as a styled HTML span.
pub struct StyledSpanRule;

impl Rule for StyledSpanRule {
    fn name(&self) -> &'static str {
        "styledSpan"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Span]
    }

    fn matches(&self, node: &DocNode) -> bool {
        matches!(node, DocNode::Span(span) if span.has_text_style())
    }

    fn replacement(&self, content: &str, node: &DocNode, _pass: &Pass<'_>) -> String {
        let DocNode::Span(span) = node else {
            return content.to_string();
        };
        let mut styles = Vec::with_capacity(2);
        if let Some(color) = &span.color {
            styles.push(format!("color: {color}"));
        }
        if let Some(font_size) = &span.font_size {
            styles.push(format!("font-size: {font_size}"));
        }
        format!("<span style=\"{}\">{content}</span>", styles.join("; "))
    }
}

/// Images with an optional `{ width="…" align="…" }` block.
pub struct ImageRule;

impl Rule for ImageRule {
    fn name(&self) -> &'static str {
        "image"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Image]
    }

    fn matches(&self, node: &DocNode) -> bool {
        matches!(node, DocNode::Image(image) if image.src.is_some())
    }

    fn uses_content(&self) -> bool {
        false
    }

    fn replacement(&self, _content: &str, node: &DocNode, _pass: &Pass<'_>) -> String {
        let DocNode::Image(image) = node else {
            return String::new();
        };
        let src = image.src.as_deref().unwrap_or_default();
        let mut markdown = format!("![]({src})");

        let align = image.align();
        let width = image.width.as_deref().filter(|width| !width.is_empty());
        if width.is_some() || align != Align::Left {
            markdown.push_str(" {");
            if let Some(width) = width {
                markdown.push_str(&format!(" width=\"{width}\""));
            }
            if align != Align::Left {
                markdown.push_str(&format!(" align=\"{}\"", align.as_str()));
            }
            markdown.push_str(" }");
        }
        markdown
    }
}

/// `<u>` elements and spans decorated with `text-decoration: underline`.
pub struct UnderlineRule;

impl Rule for UnderlineRule {
    fn name(&self) -> &'static str {
        "underline"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Underline, NodeKind::Span]
    }

    fn matches(&self, node: &DocNode) -> bool {
        match node {
            DocNode::Underline(_) => true,
            DocNode::Span(span) => span.is_underlined(),
            _ => false,
        }
    }

    fn replacement(&self, content: &str, _node: &DocNode, _pass: &Pass<'_>) -> String {
        format!("<u>{content}</u>")
    }
}

/// Task items met outside a list. Inside lists the list rule renders them.
pub struct TaskItemRule;

impl Rule for TaskItemRule {
    fn name(&self) -> &'static str {
        "taskItem"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::TaskItem]
    }

    fn replacement(&self, content: &str, node: &DocNode, _pass: &Pass<'_>) -> String {
        let checked = matches!(node, DocNode::TaskItem(task) if task.checked);
        format!("{} {}\n", task_marker(checked), content.trim())
    }
}

pub(crate) fn task_marker(checked: bool) -> &'static str {
    if checked {
        "- [x]"
    } else {
        "- [ ]"
    }
}
