//! List serialization.
//!
//! Each item is converted on its own, as a fresh pass over its children,
//! then laid out under its marker:
//!
//! ```text
//! {indent}{marker} first line
//! {indent}  continuation line
//! ```
//!
//! Nested lists inside an item come back from that pass already rendered,
//! so they end up two spaces further in through the continuation prefix.
//! `indent` only grows for lists placed directly inside another list without
//! an item in between.
//!
//! Numbering is always the item's 1-based position among the items of its
//! list; other children do not count and `start` attributes are ignored. Task items use `- [x]`/`- [ ]` in both list kinds.

use super::dialect::task_marker;
use super::engine::Pass;
use super::rules::Rule;
use crate::ir::nodes::{DocNode, NodeKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker-like prefix removed from converted item content. This also eats
/// literal text such as `1. ` or `2024 ` at the start of an item.
static LEADING_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-\d.\s]+").expect("valid marker pattern"));

pub struct ListRule;

impl Rule for ListRule {
    fn name(&self) -> &'static str {
        "list"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::BulletList, NodeKind::OrderedList]
    }

    fn uses_content(&self) -> bool {
        false
    }

    fn replacement(&self, _content: &str, node: &DocNode, pass: &Pass<'_>) -> String {
        let ordered = matches!(node, DocNode::OrderedList(_));
        let indent = "  ".repeat(pass.list_depth());
        let mut lines = Vec::new();
        let mut position = 0;

        for child in node.children() {
            if child.is_list_item() {
                position += 1;
            }
            match child {
                DocNode::ListItem(item) => {
                    let marker = if ordered {
                        format!("{position}.")
                    } else {
                        pass.options().bullet_marker.to_string()
                    };
                    let content = item_content(pass, &item.children);
                    push_item(&mut lines, &indent, &marker, &content);
                }
                DocNode::TaskItem(task) => {
                    let content = item_content(pass, &task.children);
                    push_item(&mut lines, &indent, task_marker(task.checked), &content);
                }
                other => {
                    let rendered = pass.descend_list().render(other);
                    lines.extend(
                        rendered
                            .lines()
                            .filter(|line| !line.trim().is_empty())
                            .map(str::to_string),
                    );
                }
            }
        }

        format!("\n{}\n", lines.join("\n").trim_matches('\n'))
    }
}

fn item_content(pass: &Pass<'_>, children: &[DocNode]) -> String {
    let converted = pass.convert_item(children);
    strip_leading_marker(&converted).trim().to_string()
}

pub(crate) fn strip_leading_marker(content: &str) -> std::borrow::Cow<'_, str> {
    LEADING_MARKER.replace(content, "")
}

fn push_item(lines: &mut Vec<String>, indent: &str, marker: &str, content: &str) {
    let mut content_lines = content.lines().filter(|line| !line.trim().is_empty());
    match content_lines.next() {
        Some(first) => {
            lines.push(format!("{indent}{marker} {first}"));
            lines.extend(content_lines.map(|line| format!("{indent}  {line}")));
        }
        None => lines.push(format!("{indent}{marker} ")),
    }
}
