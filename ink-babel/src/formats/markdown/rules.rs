//! Rule definitions and the standard rule set.
//!
//! A rule names the node kinds it applies to, optionally narrows them with a
//! predicate, and turns the rendered content of a node into its Markdown.
//! Order matters: the first registered rule that accepts a node wins.

use super::dialect::{ImageRule, StyledSpanRule, TaskItemRule, UnderlineRule};
use super::engine::Pass;
use super::list::ListRule;
use crate::ir::nodes::{DocNode, NodeKind};
use std::fmt;

/// A (predicate, serializer) pair for one family of nodes.
pub trait Rule: Send + Sync {
    /// Stable identifier, used to list and disable rules.
    fn name(&self) -> &'static str;

    /// Node kinds this rule is considered for.
    fn kinds(&self) -> &'static [NodeKind];

    /// Further narrows the nodes this rule accepts.
    fn matches(&self, _node: &DocNode) -> bool {
        true
    }

    /// Whether the engine should render the node's children before calling
    /// [`Rule::replacement`]. Rules that walk children themselves return
    /// `false` and receive an empty `content`.
    fn uses_content(&self) -> bool {
        true
    }

    fn replacement(&self, content: &str, node: &DocNode, pass: &Pass<'_>) -> String;
}

/// Ordered collection of rules.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// An empty set. Every node converts through the passthrough fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// The dialect rules followed by the CommonMark defaults.
    pub fn standard() -> Self {
        Self::new()
            .with(HeadingRule)
            .with(ListRule)
            .with(TaskItemRule)
            .with(ImageRule)
            .with(UnderlineRule)
            .with(StyledSpanRule)
            .with(ParagraphRule)
            .with(HardBreakRule)
            .with(BlockquoteRule)
            .with(HorizontalRuleRule)
            .with(CodeBlockRule)
            .with(BoldRule)
            .with(ItalicRule)
            .with(InlineCodeRule)
            .with(LinkRule)
    }

    /// Appends a rule with the lowest priority so far.
    pub fn push<R: Rule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    pub fn with<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.push(rule);
        self
    }

    /// Inserts a rule ahead of every registered rule.
    pub fn prepend<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.insert(0, Box::new(rule));
        self
    }

    /// Drops every rule called `name`.
    pub fn without(mut self, name: &str) -> Self {
        self.rules.retain(|rule| rule.name() != name);
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Rule> {
        self.rules.get(index).map(|rule| rule.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref() as &dyn Rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// ATX headings for levels 1 to 6.
pub struct HeadingRule;

impl Rule for HeadingRule {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Heading]
    }

    fn matches(&self, node: &DocNode) -> bool {
        matches!(node, DocNode::Heading(heading) if (1..=6).contains(&heading.level))
    }

    fn replacement(&self, content: &str, node: &DocNode, _pass: &Pass<'_>) -> String {
        let DocNode::Heading(heading) = node else {
            return content.to_string();
        };
        format!("\n{} {content}\n", "#".repeat(heading.level as usize))
    }
}

pub struct ParagraphRule;

impl Rule for ParagraphRule {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Paragraph]
    }

    fn replacement(&self, content: &str, _node: &DocNode, _pass: &Pass<'_>) -> String {
        format!("\n\n{content}\n\n")
    }
}

pub struct HardBreakRule;

impl Rule for HardBreakRule {
    fn name(&self) -> &'static str {
        "hardBreak"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::HardBreak]
    }

    fn replacement(&self, _content: &str, _node: &DocNode, pass: &Pass<'_>) -> String {
        format!("{}\n", pass.options().line_break)
    }
}

pub struct BlockquoteRule;

impl Rule for BlockquoteRule {
    fn name(&self) -> &'static str {
        "blockquote"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Blockquote]
    }

    fn replacement(&self, content: &str, _node: &DocNode, _pass: &Pass<'_>) -> String {
        let quoted: Vec<String> = content
            .trim_matches('\n')
            .split('\n')
            .map(|line| format!("> {line}"))
            .collect();
        format!("\n\n{}\n\n", quoted.join("\n"))
    }
}

pub struct HorizontalRuleRule;

impl Rule for HorizontalRuleRule {
    fn name(&self) -> &'static str {
        "horizontalRule"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::HorizontalRule]
    }

    fn replacement(&self, _content: &str, _node: &DocNode, pass: &Pass<'_>) -> String {
        format!("\n\n{}\n\n", pass.options().hr)
    }
}

/// Fenced code blocks. The fence grows past any fence-like run inside the
/// code so the block cannot be closed early.
pub struct CodeBlockRule;

impl Rule for CodeBlockRule {
    fn name(&self) -> &'static str {
        "codeBlock"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::CodeBlock]
    }

    fn uses_content(&self) -> bool {
        false
    }

    fn replacement(&self, _content: &str, node: &DocNode, pass: &Pass<'_>) -> String {
        let DocNode::CodeBlock(block) = node else {
            return String::new();
        };
        let options = pass.options();
        let fence_char = options.fence_char();
        let mut fence_size = options.fence_size();
        for line in block.code.lines() {
            let run = line.chars().take_while(|c| *c == fence_char).count();
            if run >= 3 && run >= fence_size {
                fence_size = run + 1;
            }
        }
        let fence = fence_char.to_string().repeat(fence_size);
        let language = block.language.as_deref().unwrap_or_default();
        let code = block.code.strip_suffix('\n').unwrap_or(&block.code);
        format!("\n\n{fence}{language}\n{code}\n{fence}\n\n")
    }
}

pub struct BoldRule;

impl Rule for BoldRule {
    fn name(&self) -> &'static str {
        "bold"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Bold]
    }

    fn replacement(&self, content: &str, _node: &DocNode, pass: &Pass<'_>) -> String {
        if content.trim().is_empty() {
            return String::new();
        }
        let delimiter = &pass.options().strong_delimiter;
        format!("{delimiter}{content}{delimiter}")
    }
}

pub struct ItalicRule;

impl Rule for ItalicRule {
    fn name(&self) -> &'static str {
        "italic"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Italic]
    }

    fn replacement(&self, content: &str, _node: &DocNode, pass: &Pass<'_>) -> String {
        if content.trim().is_empty() {
            return String::new();
        }
        let delimiter = &pass.options().em_delimiter;
        format!("{delimiter}{content}{delimiter}")
    }
}

/// Inline code spans, delimited by a backtick run longer than any run in
/// the content.
pub struct InlineCodeRule;

impl Rule for InlineCodeRule {
    fn name(&self) -> &'static str {
        "code"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Code]
    }

    fn replacement(&self, content: &str, _node: &DocNode, _pass: &Pass<'_>) -> String {
        if content.is_empty() {
            return String::new();
        }
        let code = content.replace(['\r', '\n'], " ");
        let longest_run = code
            .split(|c| c != '`')
            .map(str::len)
            .max()
            .unwrap_or(0);
        let delimiter = "`".repeat(longest_run + 1);
        let padding = if code.starts_with('`') || code.ends_with('`') {
            " "
        } else {
            ""
        };
        format!("{delimiter}{padding}{code}{padding}{delimiter}")
    }
}

/// Inline links; a link without `href` falls through to its text.
pub struct LinkRule;

impl Rule for LinkRule {
    fn name(&self) -> &'static str {
        "link"
    }

    fn kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Link]
    }

    fn matches(&self, node: &DocNode) -> bool {
        matches!(node, DocNode::Link(link) if link.href.is_some())
    }

    fn replacement(&self, content: &str, node: &DocNode, _pass: &Pass<'_>) -> String {
        let DocNode::Link(link) = node else {
            return content.to_string();
        };
        let href = link.href.as_deref().unwrap_or_default();
        match link.title.as_deref() {
            Some(title) => format!("[{content}]({href} \"{}\")", title.replace('"', "\\\"")),
            None => format!("[{content}]({href})"),
        }
    }
}
