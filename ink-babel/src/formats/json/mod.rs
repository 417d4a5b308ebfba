//! JSON format implementation
//!
//! The editor's document state as plain JSON. Every node has the same shape:
//!
//! ```json
//! { "tag": "image", "attributes": { "src": "a.png", "width": "200px" }, "children": [], "value": null }
//! ```
//!
//! Text leaves use `"tag": "text"` and carry their content in `value`. Attribute values may
//! be strings, numbers or booleans; they are read leniently (`"level": 2` and `"level": "2"`
//! are the same heading).
//!
//! # Tag Mapping
//!
//! | Tag              | Attributes                                                     |
//! |------------------|----------------------------------------------------------------|
//! | `doc`            |                                                                |
//! | `heading`        | `level`                                                        |
//! | `paragraph`      |                                                                |
//! | `bulletList`     | `start`                                                        |
//! | `orderedList`    | `start`                                                        |
//! | `listItem`       |                                                                |
//! | `taskListItem`   | `checked`                                                      |
//! | `image`          | `src`, `alt`, `title`, `width`, `marginLeft`, `marginRight`, `align` |
//! | `span`           | `color`, `fontSize`, `textDecoration`                          |
//! | `underline`, `bold`, `italic`, `code`, `blockquote` |                             |
//! | `codeBlock`      | `language`; code in `value` or text children                   |
//! | `horizontalRule`, `hardBreak` |                                                   |
//! | `link`           | `href`, `title`                                                |
//! | `text`           | content in `value`                                             |
//!
//! Unknown tags are kept as [`Element`] with their attributes stringified. Missing or
//! unusable attributes are not errors: the node is still built and the Markdown rules decide
//! whether it renders or falls through. Only input that is not JSON, or not shaped as nodes,
//! fails with [`FormatError::ParseError`].

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{
    Align, CodeBlock, Container, DocNode, Element, Heading, Image, Link, List, Span, TaskItem,
};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Format implementation for the JSON document form
#[derive(Debug, Clone)]
pub struct JsonFormat {
    pretty: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonFormat {
    /// Single-line output instead of indented.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Editor document tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DocNode, FormatError> {
        let raw: RawNode =
            serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))?;
        let doc = lift(raw);
        debug!("json: imported {} nodes", doc.node_count());
        Ok(doc)
    }

    fn serialize(&self, doc: &DocNode) -> Result<String, FormatError> {
        let raw = lower(doc);
        let result = if self.pretty {
            serde_json::to_string_pretty(&raw)
        } else {
            serde_json::to_string(&raw)
        };
        result.map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

/// Wire shape of a node.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawNode {
    #[serde(default)]
    tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<RawNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl RawNode {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    fn with_children(mut self, children: &[DocNode]) -> Self {
        self.children = children.iter().map(lower).collect();
        self
    }

    fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    fn set_opt(&mut self, name: &str, value: &Option<String>) {
        if let Some(value) = value {
            self.set(name, value.as_str());
        }
    }
}

/// String form of a scalar attribute. Objects, arrays and null are ignored.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn parse_align(value: &str) -> Option<Align> {
    match value.trim().to_ascii_lowercase().as_str() {
        "left" => Some(Align::Left),
        "center" => Some(Align::Center),
        "right" => Some(Align::Right),
        _ => None,
    }
}

fn collect_text(nodes: &[RawNode], out: &mut String) {
    for node in nodes {
        if let Some(value) = &node.value {
            out.push_str(value);
        }
        collect_text(&node.children, out);
    }
}

fn lift(raw: RawNode) -> DocNode {
    let RawNode {
        tag,
        attributes,
        children,
        value,
    } = raw;
    let attr = |name: &str| attributes.get(name).and_then(scalar);

    match tag.as_str() {
        "text" => DocNode::Text(value.unwrap_or_default()),
        "codeBlock" => {
            let code = value.unwrap_or_else(|| {
                let mut code = String::new();
                collect_text(&children, &mut code);
                code
            });
            DocNode::CodeBlock(CodeBlock {
                language: attr("language").filter(|l| !l.is_empty()),
                code,
            })
        }
        "horizontalRule" => DocNode::HorizontalRule,
        "hardBreak" => DocNode::HardBreak,
        "image" => {
            let mut image = Image {
                src: attr("src"),
                alt: attr("alt"),
                title: attr("title"),
                width: attr("width"),
                margin_left: attr("marginLeft"),
                margin_right: attr("marginRight"),
            };
            if let Some(align) = attr("align").as_deref().and_then(parse_align) {
                image = image.with_align(align);
            }
            DocNode::Image(image)
        }
        _ => {
            let children: Vec<DocNode> = children.into_iter().map(lift).collect();
            match tag.as_str() {
                "doc" => DocNode::Document(Container { children }),
                "paragraph" => DocNode::Paragraph(Container { children }),
                "heading" => DocNode::Heading(Heading {
                    // 0 keeps a heading without a usable level out of the heading rule
                    level: attr("level")
                        .and_then(|l| l.trim().parse::<u8>().ok())
                        .unwrap_or(0),
                    children,
                }),
                "blockquote" => DocNode::Blockquote(Container { children }),
                "bulletList" | "orderedList" => {
                    let list = List {
                        start: attr("start").and_then(|s| s.trim().parse().ok()),
                        children,
                    };
                    if tag == "bulletList" {
                        DocNode::BulletList(list)
                    } else {
                        DocNode::OrderedList(list)
                    }
                }
                "listItem" => DocNode::ListItem(Container { children }),
                "taskListItem" => DocNode::TaskItem(TaskItem {
                    checked: attributes.get("checked").is_some_and(truthy),
                    children,
                }),
                "span" => DocNode::Span(Span {
                    color: attr("color"),
                    font_size: attr("fontSize"),
                    text_decoration: attr("textDecoration"),
                    children,
                }),
                "underline" => DocNode::Underline(Container { children }),
                "bold" => DocNode::Bold(Container { children }),
                "italic" => DocNode::Italic(Container { children }),
                "code" => DocNode::Code(Container { children }),
                "link" => DocNode::Link(Link {
                    href: attr("href"),
                    title: attr("title"),
                    children,
                }),
                _ => DocNode::Element(Element {
                    attributes: attributes
                        .iter()
                        .filter_map(|(name, value)| Some((name.clone(), scalar(value)?)))
                        .collect(),
                    tag,
                    children,
                }),
            }
        }
    }
}

fn lower(node: &DocNode) -> RawNode {
    match node {
        DocNode::Document(c) => RawNode::new("doc").with_children(&c.children),
        DocNode::Paragraph(c) => RawNode::new("paragraph").with_children(&c.children),
        DocNode::Heading(h) => {
            let mut raw = RawNode::new("heading").with_children(&h.children);
            raw.set("level", h.level);
            raw
        }
        DocNode::Blockquote(c) => RawNode::new("blockquote").with_children(&c.children),
        DocNode::CodeBlock(block) => {
            let mut raw = RawNode::new("codeBlock");
            raw.set_opt("language", &block.language);
            raw.value = Some(block.code.clone());
            raw
        }
        DocNode::HorizontalRule => RawNode::new("horizontalRule"),
        DocNode::HardBreak => RawNode::new("hardBreak"),
        DocNode::BulletList(list) | DocNode::OrderedList(list) => {
            let tag = if matches!(node, DocNode::BulletList(_)) {
                "bulletList"
            } else {
                "orderedList"
            };
            let mut raw = RawNode::new(tag).with_children(&list.children);
            if let Some(start) = list.start {
                raw.set("start", start);
            }
            raw
        }
        DocNode::ListItem(c) => RawNode::new("listItem").with_children(&c.children),
        DocNode::TaskItem(item) => {
            let mut raw = RawNode::new("taskListItem").with_children(&item.children);
            raw.set("checked", item.checked);
            raw
        }
        DocNode::Image(image) => {
            let mut raw = RawNode::new("image");
            raw.set_opt("src", &image.src);
            raw.set_opt("alt", &image.alt);
            raw.set_opt("title", &image.title);
            raw.set_opt("width", &image.width);
            raw.set_opt("marginLeft", &image.margin_left);
            raw.set_opt("marginRight", &image.margin_right);
            raw
        }
        DocNode::Span(span) => {
            let mut raw = RawNode::new("span").with_children(&span.children);
            raw.set_opt("color", &span.color);
            raw.set_opt("fontSize", &span.font_size);
            raw.set_opt("textDecoration", &span.text_decoration);
            raw
        }
        DocNode::Underline(c) => RawNode::new("underline").with_children(&c.children),
        DocNode::Bold(c) => RawNode::new("bold").with_children(&c.children),
        DocNode::Italic(c) => RawNode::new("italic").with_children(&c.children),
        DocNode::Code(c) => RawNode::new("code").with_children(&c.children),
        DocNode::Link(link) => {
            let mut raw = RawNode::new("link").with_children(&link.children);
            raw.set_opt("href", &link.href);
            raw.set_opt("title", &link.title);
            raw
        }
        DocNode::Text(value) => {
            let mut raw = RawNode::new("text");
            raw.value = Some(value.clone());
            raw
        }
        DocNode::Element(element) => {
            let mut raw = RawNode::new(&element.tag).with_children(&element.children);
            for (name, value) in &element.attributes {
                raw.set(name, value.as_str());
            }
            raw
        }
    }
}
