//! Core data structures for the document tree consumed by the converters.

use std::collections::BTreeMap;

/// A node of the editor document.
///
/// The set of kinds is closed. Anything the importers do not recognize is
/// kept as an [`Element`], which every converter passes through.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    Document(Container),
    Paragraph(Container),
    Heading(Heading),
    Blockquote(Container),
    CodeBlock(CodeBlock),
    HorizontalRule,
    HardBreak,
    BulletList(List),
    OrderedList(List),
    ListItem(Container),
    TaskItem(TaskItem),
    Image(Image),
    Span(Span),
    Underline(Container),
    Bold(Container),
    Italic(Container),
    Code(Container),
    Link(Link),
    Text(String),
    Element(Element),
}

/// Fieldless discriminant of [`DocNode`], used to key rule dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading,
    Blockquote,
    CodeBlock,
    HorizontalRule,
    HardBreak,
    BulletList,
    OrderedList,
    ListItem,
    TaskItem,
    Image,
    Span,
    Underline,
    Bold,
    Italic,
    Code,
    Link,
    Text,
    Element,
}

/// Generic node holding only children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub children: Vec<DocNode>,
}

/// A heading. Levels outside `1..=6` are kept so the tree stays faithful to
/// its source; the Markdown heading rule does not match them.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub children: Vec<DocNode>,
}

/// Fenced code block with its literal content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub code: String,
}

/// A bullet or ordered list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    /// Start number carried by the source markup. Never used for numbering.
    pub start: Option<u32>,
    pub children: Vec<DocNode>,
}

/// A checkbox list item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskItem {
    pub checked: bool,
    pub children: Vec<DocNode>,
}

/// Horizontal placement of an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }

    /// Margin values that place an image with this alignment.
    pub fn margins(&self) -> (Option<String>, Option<String>) {
        let auto = || Some("auto".to_string());
        match self {
            Align::Left => (None, None),
            Align::Center => (auto(), auto()),
            Align::Right => (auto(), None),
        }
    }
}

/// An image with the layout attributes the editor lets users change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub title: Option<String>,
    /// CSS width including its unit, e.g. `200px` or `50%`.
    pub width: Option<String>,
    pub margin_left: Option<String>,
    pub margin_right: Option<String>,
}

impl Image {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        let (left, right) = align.margins();
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Alignment derived from the margins: both `auto` centers, a lone left
    /// `auto` pushes the image right, anything else is left.
    pub fn align(&self) -> Align {
        let is_auto = |margin: &Option<String>| {
            margin
                .as_deref()
                .is_some_and(|value| value.trim().eq_ignore_ascii_case("auto"))
        };
        match (is_auto(&self.margin_left), is_auto(&self.margin_right)) {
            (true, true) => Align::Center,
            (true, false) => Align::Right,
            _ => Align::Left,
        }
    }
}

/// Inline span carrying style properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Span {
    pub color: Option<String>,
    pub font_size: Option<String>,
    pub text_decoration: Option<String>,
    pub children: Vec<DocNode>,
}

impl Span {
    pub fn has_text_style(&self) -> bool {
        self.color.is_some() || self.font_size.is_some()
    }

    pub fn is_underlined(&self) -> bool {
        self.text_decoration
            .as_deref()
            .is_some_and(|decoration| decoration.trim() == "underline")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub href: Option<String>,
    pub title: Option<String>,
    pub children: Vec<DocNode>,
}

/// A node whose tag has no dedicated variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<DocNode>,
}

impl DocNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            DocNode::Document(_) => NodeKind::Document,
            DocNode::Paragraph(_) => NodeKind::Paragraph,
            DocNode::Heading(_) => NodeKind::Heading,
            DocNode::Blockquote(_) => NodeKind::Blockquote,
            DocNode::CodeBlock(_) => NodeKind::CodeBlock,
            DocNode::HorizontalRule => NodeKind::HorizontalRule,
            DocNode::HardBreak => NodeKind::HardBreak,
            DocNode::BulletList(_) => NodeKind::BulletList,
            DocNode::OrderedList(_) => NodeKind::OrderedList,
            DocNode::ListItem(_) => NodeKind::ListItem,
            DocNode::TaskItem(_) => NodeKind::TaskItem,
            DocNode::Image(_) => NodeKind::Image,
            DocNode::Span(_) => NodeKind::Span,
            DocNode::Underline(_) => NodeKind::Underline,
            DocNode::Bold(_) => NodeKind::Bold,
            DocNode::Italic(_) => NodeKind::Italic,
            DocNode::Code(_) => NodeKind::Code,
            DocNode::Link(_) => NodeKind::Link,
            DocNode::Text(_) => NodeKind::Text,
            DocNode::Element(_) => NodeKind::Element,
        }
    }

    /// Child nodes in document order. Leaves return an empty slice.
    pub fn children(&self) -> &[DocNode] {
        match self {
            DocNode::Document(c)
            | DocNode::Paragraph(c)
            | DocNode::Blockquote(c)
            | DocNode::ListItem(c)
            | DocNode::Underline(c)
            | DocNode::Bold(c)
            | DocNode::Italic(c)
            | DocNode::Code(c) => &c.children,
            DocNode::Heading(h) => &h.children,
            DocNode::BulletList(l) | DocNode::OrderedList(l) => &l.children,
            DocNode::TaskItem(t) => &t.children,
            DocNode::Span(s) => &s.children,
            DocNode::Link(l) => &l.children,
            DocNode::Element(e) => &e.children,
            DocNode::CodeBlock(_)
            | DocNode::HorizontalRule
            | DocNode::HardBreak
            | DocNode::Image(_)
            | DocNode::Text(_) => &[],
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, DocNode::ListItem(_) | DocNode::TaskItem(_))
    }

    pub fn text(value: impl Into<String>) -> Self {
        DocNode::Text(value.into())
    }

    pub fn document(children: Vec<DocNode>) -> Self {
        DocNode::Document(Container { children })
    }

    pub fn paragraph(children: Vec<DocNode>) -> Self {
        DocNode::Paragraph(Container { children })
    }

    pub fn heading(level: u8, children: Vec<DocNode>) -> Self {
        DocNode::Heading(Heading { level, children })
    }

    pub fn bullet_list(children: Vec<DocNode>) -> Self {
        DocNode::BulletList(List {
            start: None,
            children,
        })
    }

    pub fn ordered_list(children: Vec<DocNode>) -> Self {
        DocNode::OrderedList(List {
            start: None,
            children,
        })
    }

    pub fn list_item(children: Vec<DocNode>) -> Self {
        DocNode::ListItem(Container { children })
    }

    pub fn task_item(checked: bool, children: Vec<DocNode>) -> Self {
        DocNode::TaskItem(TaskItem { checked, children })
    }

    pub fn underline(children: Vec<DocNode>) -> Self {
        DocNode::Underline(Container { children })
    }

    pub fn bold(children: Vec<DocNode>) -> Self {
        DocNode::Bold(Container { children })
    }

    pub fn italic(children: Vec<DocNode>) -> Self {
        DocNode::Italic(Container { children })
    }

    /// Total number of nodes in the tree rooted here.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }

    /// Literal text of the subtree in document order, without any markup.
    /// Walks with an explicit stack, so arbitrarily deep trees are fine.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                DocNode::Text(value) => text.push_str(value),
                DocNode::CodeBlock(block) => text.push_str(&block.code),
                DocNode::HardBreak => text.push('\n'),
                other => stack.extend(other.children().iter().rev()),
            }
        }
        text
    }
}
