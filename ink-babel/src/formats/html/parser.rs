//! HTML import (editor HTML → document tree)
//!
//! The editor hands out its content as an HTML string. We parse it with
//! html5ever into an RcDom and read the parts the converters care about:
//! element kinds, the `data-*` attributes of task lists, and the inline
//! `style` declarations for colors, sizes, widths and margins.
//!
//! Whitespace follows the browser closely enough for Markdown output: runs
//! collapse to one space outside `<pre>`, and whitespace-only text between
//! block elements is dropped.

use crate::error::FormatError;
use crate::ir::nodes::{
    CodeBlock, Container, DocNode, Element, Heading, Image, Link, List, Span, TaskItem,
};
use crate::ir::style::InlineStyle;
use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::Attribute;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\n\r\x0C]+").expect("valid whitespace pattern"));

/// Elements whose direct whitespace-only text carries no meaning.
const BLOCK_CONTAINERS: &[&str] = &[
    "html",
    "body",
    "div",
    "section",
    "article",
    "main",
    "header",
    "footer",
    "ul",
    "ol",
    "li",
    "blockquote",
    "table",
    "thead",
    "tbody",
    "tr",
];

/// Elements nested deeper than this are imported as their text only.
pub const MAX_NESTING: usize = 128;

/// Elements dropped with their whole subtree.
const SKIPPED: &[&str] = &["head", "script", "style", "template", "input"];

/// Parse an HTML document or fragment into a document tree.
pub fn parse_from_html(source: &str) -> Result<DocNode, FormatError> {
    let parse_options = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), parse_options)
        .from_utf8()
        .read_from(&mut source.as_bytes())
        .map_err(|e| FormatError::ParseError(format!("HTML parsing failed: {e}")))?;

    let children = match find_element(&dom.document, "body") {
        Some(body) => convert_children(&body, Context::block()),
        None => convert_children(&dom.document, Context::block()),
    };
    let doc = DocNode::document(children);
    debug!("imported html document with {} nodes", doc.node_count());
    Ok(doc)
}

#[derive(Debug, Clone, Copy)]
struct Context {
    /// Inside `<pre>`: keep whitespace verbatim.
    preformatted: bool,
    /// Direct parent is a block container.
    in_block: bool,
    /// Elements between this point and the document root.
    depth: usize,
}

impl Context {
    fn block() -> Self {
        Self {
            preformatted: false,
            in_block: true,
            depth: 0,
        }
    }

    fn for_element(self, tag: &str) -> Self {
        Self {
            preformatted: self.preformatted || tag == "pre",
            in_block: BLOCK_CONTAINERS.contains(&tag),
            depth: self.depth + 1,
        }
    }
}

/// First element named `tag` in document order, the handle itself included.
fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        if let NodeData::Element { ref name, .. } = node.data {
            if &*name.local == tag {
                return Some(node.clone());
            }
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    None
}

fn convert_children(handle: &Handle, cx: Context) -> Vec<DocNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(|child| convert_node(child, cx))
        .collect()
}

fn convert_node(handle: &Handle, cx: Context) -> Option<DocNode> {
    match handle.data {
        NodeData::Text { ref contents } => {
            let text = contents.borrow().to_string();
            if cx.preformatted {
                return Some(DocNode::Text(text));
            }
            if cx.in_block && text.trim().is_empty() {
                return None;
            }
            Some(DocNode::Text(WHITESPACE_RUN.replace_all(&text, " ").into_owned()))
        }
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let tag = name.local.to_string().to_ascii_lowercase();
            if SKIPPED.contains(&tag.as_str()) {
                return None;
            }
            if cx.depth >= MAX_NESTING {
                debug!("<{tag}> nested {MAX_NESTING} levels deep, keeping its text only");
                let text = text_content(handle);
                if cx.preformatted {
                    return Some(DocNode::Text(text));
                }
                return Some(DocNode::Text(
                    WHITESPACE_RUN.replace_all(&text, " ").into_owned(),
                ));
            }
            let attrs = attrs.borrow();
            Some(convert_element(handle, &tag, &attrs, cx.for_element(&tag)))
        }
        NodeData::Document => Some(DocNode::document(convert_children(handle, cx))),
        NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}

fn convert_element(handle: &Handle, tag: &str, attrs: &[Attribute], cx: Context) -> DocNode {
    let children = || convert_children(handle, cx);
    let container = || Container {
        children: children(),
    };

    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => DocNode::Heading(Heading {
            level: tag[1..].parse().unwrap_or(1),
            children: children(),
        }),
        "p" => DocNode::Paragraph(container()),
        "ul" => DocNode::BulletList(List {
            start: None,
            children: children(),
        }),
        "ol" => DocNode::OrderedList(List {
            start: attr(attrs, "start").and_then(|start| start.trim().parse().ok()),
            children: children(),
        }),
        "li" if attr(attrs, "data-type").as_deref() == Some("taskItem") => {
            DocNode::TaskItem(TaskItem {
                checked: attr(attrs, "data-checked").as_deref() == Some("true"),
                children: children(),
            })
        }
        "li" => DocNode::ListItem(container()),
        "img" => DocNode::Image(convert_image(attrs)),
        "span" => {
            let style = style_of(attrs);
            DocNode::Span(Span {
                color: style.get_owned("color"),
                font_size: style.get_owned("font-size"),
                text_decoration: style
                    .get_owned("text-decoration")
                    .or_else(|| style.get_owned("text-decoration-line")),
                children: children(),
            })
        }
        "u" => DocNode::Underline(container()),
        "strong" | "b" => DocNode::Bold(container()),
        "em" | "i" => DocNode::Italic(container()),
        "code" if !cx.preformatted => DocNode::Code(container()),
        "pre" => DocNode::CodeBlock(CodeBlock {
            language: code_language(handle),
            code: text_content(handle),
        }),
        "blockquote" => DocNode::Blockquote(container()),
        "hr" => DocNode::HorizontalRule,
        "br" => DocNode::HardBreak,
        "a" => DocNode::Link(Link {
            href: attr(attrs, "href"),
            title: attr(attrs, "title"),
            children: children(),
        }),
        other => DocNode::Element(Element {
            tag: other.to_string(),
            attributes: attrs
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect::<BTreeMap<_, _>>(),
            children: children(),
        }),
    }
}

fn convert_image(attrs: &[Attribute]) -> Image {
    let style = style_of(attrs);
    Image {
        src: attr(attrs, "src"),
        alt: attr(attrs, "alt"),
        title: attr(attrs, "title"),
        width: style.get_owned("width").or_else(|| attr(attrs, "width")),
        margin_left: style.get_owned("margin-left"),
        margin_right: style.get_owned("margin-right"),
    }
}

fn attr(attrs: &[Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| a.value.to_string())
}

fn style_of(attrs: &[Attribute]) -> InlineStyle {
    attr(attrs, "style")
        .map(|style| InlineStyle::parse(&style))
        .unwrap_or_default()
}

/// `language-x` class on the `<code>` inside a `<pre>`, or on the `<pre>`.
fn code_language(pre: &Handle) -> Option<String> {
    let from_class = |handle: &Handle| -> Option<String> {
        let NodeData::Element { ref attrs, .. } = handle.data else {
            return None;
        };
        let class = attr(&attrs.borrow(), "class")?;
        class
            .split_whitespace()
            .find_map(|name| name.strip_prefix("language-"))
            .filter(|language| !language.is_empty())
            .map(str::to_string)
    };
    find_element(pre, "code")
        .and_then(|code| from_class(&code))
        .or_else(|| from_class(pre))
}

/// Text of a subtree with `<br>` as line breaks. Iterative, as it also
/// serves subtrees too deep to convert.
fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        match node.data {
            NodeData::Text { ref contents } => text.push_str(&contents.borrow()),
            NodeData::Element { ref name, .. } if &*name.local == "br" => text.push('\n'),
            _ => stack.extend(node.children.borrow().iter().rev().cloned()),
        }
    }
    text
}
