//! The rule engine.
//!
//! A [`Converter`] owns an ordered [`RuleSet`] and a dispatch table built from
//! it once, keyed by [`NodeKind`]. A conversion is a post-order walk: the
//! children of a node are rendered and joined first, then the first rule
//! registered for the node's kind whose predicate accepts the node turns that
//! content into the node's output. Nodes no rule accepts fall back to their
//! joined children (or their literal value, for text).
//!
//! Nothing here is mutated after construction, so one converter can serve any
//! number of concurrent conversions.
//!
//! The walk is recursive. Below [`MAX_RENDER_DEPTH`] levels a subtree is no
//! longer converted and contributes its plain text instead, so any tree
//! yields a string without exhausting the stack.

use super::options::MarkdownOptions;
use super::rules::{Rule, RuleSet};
use crate::ir::nodes::{DocNode, NodeKind};
use log::{debug, trace};
use std::collections::HashMap;

/// Nesting depth past which subtrees are flattened to their text.
pub const MAX_RENDER_DEPTH: usize = 128;

/// Converts document trees to Markdown text.
pub struct Converter {
    rules: RuleSet,
    options: MarkdownOptions,
    dispatch: HashMap<NodeKind, Vec<usize>>,
}

impl Converter {
    pub fn new(rules: RuleSet, options: MarkdownOptions) -> Self {
        let mut dispatch: HashMap<NodeKind, Vec<usize>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            for kind in rule.kinds() {
                dispatch.entry(*kind).or_default().push(index);
            }
        }
        debug!("markdown converter rules: {:?}", rules.names());
        Self {
            rules,
            options,
            dispatch,
        }
    }

    /// Standard rules with default options.
    pub fn standard() -> Self {
        Self::new(RuleSet::standard(), MarkdownOptions::default())
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Runs one conversion pass over `root` and returns the final Markdown.
    pub fn convert(&self, root: &DocNode) -> String {
        finalize(&Pass::new(self).render(root))
    }

    fn select(&self, node: &DocNode) -> Option<&dyn Rule> {
        let candidates = self.dispatch.get(&node.kind())?;
        let selected = candidates
            .iter()
            .filter_map(|&index| self.rules.get(index))
            .find(|rule| rule.matches(node));
        if selected.is_none() {
            trace!("no rule accepted {:?} node, passing through", node.kind());
        }
        selected
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("rules", &self.rules)
            .field("options", &self.options)
            .finish()
    }
}

/// Traversal state handed to rules.
///
/// `list_depth` counts the list nodes directly enclosing the node being
/// rendered within the current pass. Item contents start a fresh pass, so a
/// list inside an item starts again at zero.
///
/// `depth` counts every level below the root, item passes included.
#[derive(Clone, Copy)]
pub struct Pass<'a> {
    converter: &'a Converter,
    list_depth: usize,
    depth: usize,
}

impl<'a> Pass<'a> {
    fn new(converter: &'a Converter) -> Self {
        Self {
            converter,
            list_depth: 0,
            depth: 0,
        }
    }

    pub fn converter(&self) -> &'a Converter {
        self.converter
    }

    pub fn options(&self) -> &'a MarkdownOptions {
        &self.converter.options
    }

    pub fn list_depth(&self) -> usize {
        self.list_depth
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The same pass one list level deeper.
    pub fn descend_list(&self) -> Self {
        Self {
            converter: self.converter,
            list_depth: self.list_depth + 1,
            depth: self.depth + 1,
        }
    }

    /// Converts the children of a list item as a finished fragment of their
    /// own, with list indentation starting again at zero.
    pub fn convert_item(&self, children: &[DocNode]) -> String {
        let pass = Self {
            converter: self.converter,
            list_depth: 0,
            depth: self.depth + 1,
        };
        finalize(&pass.render_children(children))
    }

    fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    pub fn render(&self, node: &DocNode) -> String {
        if self.depth >= MAX_RENDER_DEPTH {
            trace!("{:?} node below depth {MAX_RENDER_DEPTH}, flattening", node.kind());
            return node.plain_text();
        }
        let inner = self.nested();
        match self.converter.select(node) {
            Some(rule) => {
                let content = if rule.uses_content() {
                    inner.render_children(node.children())
                } else {
                    String::new()
                };
                rule.replacement(&content, node, self)
            }
            None => match node {
                DocNode::Text(value) => value.clone(),
                other => inner.render_children(other.children()),
            },
        }
    }

    pub fn render_children(&self, nodes: &[DocNode]) -> String {
        nodes.iter().fold(String::new(), |mut output, node| {
            join(&mut output, &self.render(node));
            output
        })
    }
}

/// Appends `piece` to `output`, merging the newlines on both sides of the
/// boundary into one separator of at most two newlines.
pub(crate) fn join(output: &mut String, piece: &str) {
    let kept = output.trim_end_matches('\n').len();
    let trailing = output.len() - kept;
    let body = piece.trim_start_matches('\n');
    let leading = piece.len() - body.len();
    output.truncate(kept);
    for _ in 0..trailing.max(leading).min(2) {
        output.push('\n');
    }
    output.push_str(body);
}

/// Strips leading line breaks and all trailing whitespace of a finished pass.
fn finalize(output: &str) -> String {
    output
        .trim_start_matches(['\t', '\r', '\n'])
        .trim_end()
        .to_string()
}
