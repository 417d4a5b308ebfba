//! Export tests for Markdown format (HTML → tree → Markdown)
//!
//! These tests check the exact output for a document using every supported
//! element, and that the standard parts of it read back as the expected
//! structure when parsed by Comrak.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use ink_babel::format::Format;
use ink_babel::formats::markdown::MarkdownFormat;
use ink_babel::{html_to_markdown, FormatRegistry};
use insta::assert_snapshot;
use std::collections::HashMap;

const KITCHENSINK: &str = r#"
<h1>Groceries</h1>
<p>Plain <strong>bold</strong> and <em>italic</em> with <code>code</code>.</p>
<ul>
  <li><p>Buy milk</p></li>
  <li><p>Walk dog</p><ul><li><p>Leash</p></li></ul></li>
</ul>
<h2>Steps</h2>
<ol>
  <li><p>First</p></li>
  <li><p>Second</p></li>
</ol>
<h2>Tasks</h2>
<ul data-type="taskList">
  <li data-type="taskItem" data-checked="true"><label><input type="checkbox" checked="checked"><span></span></label><div><p>Done</p></div></li>
  <li data-type="taskItem" data-checked="false"><label><input type="checkbox"><span></span></label><div><p>Todo</p></div></li>
</ul>
<p><span style="color: #ff6b6b; font-size: 18px">Warm</span> and <u>under</u></p>
<p><img src="a.png" style="width: 200px; margin-left: auto; margin-right: auto"></p>
<blockquote><p>Quote</p></blockquote>
<pre><code class="language-rust">fn main() {}</code></pre>
<hr>
<p><a href="https://example.com">link</a></p>
"#;

fn kitchensink_markdown() -> String {
    html_to_markdown(KITCHENSINK).expect("kitchensink converts")
}

/// Counts node types across a Comrak AST
fn count_node_types<'a>(node: &'a AstNode<'a>, counts: &mut HashMap<&'static str, usize>) {
    let type_name = match &node.data.borrow().value {
        NodeValue::Heading(_) => "Heading",
        NodeValue::List(_) => "List",
        NodeValue::Item(_) => "Item",
        NodeValue::CodeBlock(_) => "CodeBlock",
        NodeValue::BlockQuote => "BlockQuote",
        NodeValue::ThematicBreak => "ThematicBreak",
        NodeValue::Strong => "Strong",
        NodeValue::Emph => "Emph",
        NodeValue::Code(_) => "Code",
        NodeValue::Link(_) => "Link",
        NodeValue::Image(_) => "Image",
        _ => "Other",
    };
    *counts.entry(type_name).or_default() += 1;

    for child in node.children() {
        count_node_types(child, counts);
    }
}

#[test]
fn test_kitchensink_output() {
    assert_snapshot!(kitchensink_markdown(), @r#"
# Groceries

Plain **bold** and _italic_ with `code`.

- Buy milk
- Walk dog
  - Leash
## Steps
1. First
2. Second
## Tasks
- [x] Done
- [ ] Todo

<span style="color: #ff6b6b; font-size: 18px">Warm</span> and <u>under</u>

![](a.png) { width="200px" align="center" }

> Quote

```rust
fn main() {}
```

* * *

[link](https://example.com)
"#);
}

#[test]
fn test_kitchensink_reads_back_as_commonmark() {
    let md = kitchensink_markdown();
    let arena = Arena::new();
    let root = parse_document(&arena, &md, &ComrakOptions::default());

    let mut counts = HashMap::new();
    count_node_types(root, &mut counts);

    assert_eq!(counts.get("Heading"), Some(&3));
    // outer bullets, nested bullets, ordered, tasks
    assert_eq!(counts.get("List"), Some(&4));
    assert_eq!(counts.get("Item"), Some(&7));
    assert_eq!(counts.get("CodeBlock"), Some(&1));
    assert_eq!(counts.get("BlockQuote"), Some(&1));
    assert_eq!(counts.get("ThematicBreak"), Some(&1));
    assert_eq!(counts.get("Strong"), Some(&1));
    assert_eq!(counts.get("Emph"), Some(&1));
    assert_eq!(counts.get("Code"), Some(&1));
    assert_eq!(counts.get("Link"), Some(&1));
    assert_eq!(counts.get("Image"), Some(&1));
}

#[test]
fn test_code_block_language_survives() {
    let md = kitchensink_markdown();
    let arena = Arena::new();
    let root = parse_document(&arena, &md, &ComrakOptions::default());

    let info: Vec<String> = root
        .descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::CodeBlock(block) => Some(block.info.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(info, vec!["rust".to_string()]);
}

#[test]
fn test_format_and_registry_agree() {
    let registry = FormatRegistry::default();
    let doc = registry.parse(KITCHENSINK, "html").unwrap();
    assert_eq!(
        registry.serialize(&doc, "markdown").unwrap(),
        MarkdownFormat::default().serialize(&doc).unwrap()
    );
}

#[test]
fn test_conversion_is_repeatable() {
    assert_eq!(kitchensink_markdown(), kitchensink_markdown());
}
