//! List serialization (tree → Markdown)

use ink_babel::ir::nodes::{DocNode, List};
use ink_babel::{to_markdown, Converter, FormatRegistry, MarkdownOptions, RuleSet};

fn item(text: &str) -> DocNode {
    DocNode::list_item(vec![DocNode::paragraph(vec![DocNode::text(text)])])
}

fn doc(children: Vec<DocNode>) -> DocNode {
    DocNode::document(children)
}

#[test]
fn test_flat_bullet_list() {
    let tree = doc(vec![DocNode::bullet_list(vec![
        DocNode::list_item(vec![DocNode::text("Buy milk")]),
        DocNode::list_item(vec![DocNode::text("Walk dog")]),
    ])]);
    assert_eq!(to_markdown(&tree), "- Buy milk\n- Walk dog");
}

#[test]
fn test_ordered_item_with_nested_bullet_list() {
    let tree = doc(vec![DocNode::ordered_list(vec![DocNode::list_item(vec![
        DocNode::text("Outer"),
        DocNode::bullet_list(vec![DocNode::list_item(vec![DocNode::text("Inner")])]),
    ])])]);
    assert_eq!(to_markdown(&tree), "1. Outer\n  - Inner");
}

#[test]
fn test_numbering_ignores_start() {
    let tree = doc(vec![DocNode::OrderedList(List {
        start: Some(7),
        children: vec![item("A"), item("B"), item("C")],
    })]);
    assert_eq!(to_markdown(&tree), "1. A\n2. B\n3. C");
}

#[test]
fn test_numbering_restarts_per_list() {
    let tree = doc(vec![DocNode::ordered_list(vec![
        DocNode::list_item(vec![
            DocNode::paragraph(vec![DocNode::text("one")]),
            DocNode::ordered_list(vec![item("a"), item("b")]),
        ]),
        item("two"),
    ])]);
    assert_eq!(to_markdown(&tree), "1. one\n  1. a\n  2. b\n2. two");
}

#[test]
fn test_each_level_adds_two_spaces() {
    let tree = doc(vec![DocNode::bullet_list(vec![DocNode::list_item(vec![
        DocNode::paragraph(vec![DocNode::text("a")]),
        DocNode::bullet_list(vec![DocNode::list_item(vec![
            DocNode::paragraph(vec![DocNode::text("b")]),
            DocNode::bullet_list(vec![item("c")]),
        ])]),
    ])])]);
    assert_eq!(to_markdown(&tree), "- a\n  - b\n    - c");
}

#[test]
fn test_ordered_list_inside_bullet_item() {
    let tree = doc(vec![DocNode::bullet_list(vec![DocNode::list_item(vec![
        DocNode::paragraph(vec![DocNode::text("a")]),
        DocNode::ordered_list(vec![item("one"), item("two")]),
    ])])]);
    assert_eq!(to_markdown(&tree), "- a\n  1. one\n  2. two");
}

#[test]
fn test_list_directly_inside_list_is_indented() {
    let tree = doc(vec![DocNode::bullet_list(vec![
        item("x"),
        DocNode::bullet_list(vec![item("y")]),
    ])]);
    assert_eq!(to_markdown(&tree), "- x\n  - y");
}

#[test]
fn test_multi_paragraph_item_continues_under_marker() {
    let tree = doc(vec![DocNode::ordered_list(vec![DocNode::list_item(vec![
        DocNode::paragraph(vec![DocNode::text("first")]),
        DocNode::paragraph(vec![DocNode::text("second")]),
    ])])]);
    assert_eq!(to_markdown(&tree), "1. first\n  second");
}

#[test]
fn test_task_items_in_bullet_list() {
    let tree = doc(vec![DocNode::bullet_list(vec![
        DocNode::task_item(true, vec![DocNode::paragraph(vec![DocNode::text("Done")])]),
        DocNode::task_item(false, vec![DocNode::paragraph(vec![DocNode::text("Todo")])]),
    ])]);
    assert_eq!(to_markdown(&tree), "- [x] Done\n- [ ] Todo");
}

#[test]
fn test_task_items_are_not_numbered() {
    let tree = doc(vec![DocNode::ordered_list(vec![
        item("A"),
        DocNode::task_item(true, vec![DocNode::text("B")]),
        DocNode::task_item(false, vec![DocNode::text("C")]),
        item("D"),
    ])]);
    assert_eq!(to_markdown(&tree), "1. A\n- [x] B\n- [ ] C\n4. D");
}

#[test]
fn test_nested_task_list() {
    let tree = doc(vec![DocNode::bullet_list(vec![DocNode::task_item(
        false,
        vec![
            DocNode::paragraph(vec![DocNode::text("parent")]),
            DocNode::bullet_list(vec![DocNode::task_item(
                true,
                vec![DocNode::paragraph(vec![DocNode::text("child")])],
            )]),
        ],
    )])]);
    assert_eq!(to_markdown(&tree), "- [ ] parent\n  - [x] child");
}

#[test]
fn test_task_item_outside_list() {
    let tree = doc(vec![DocNode::task_item(
        true,
        vec![DocNode::paragraph(vec![DocNode::text("loose")])],
    )]);
    assert_eq!(to_markdown(&tree), "- [x] loose");
}

#[test]
fn test_empty_item_keeps_marker() {
    let tree = doc(vec![DocNode::bullet_list(vec![
        DocNode::list_item(vec![]),
        item("x"),
    ])]);
    assert_eq!(to_markdown(&tree), "- \n- x");
}

#[test]
fn test_empty_list_renders_nothing() {
    assert_eq!(to_markdown(&doc(vec![DocNode::bullet_list(vec![])])), "");
}

#[test]
fn test_list_between_paragraphs() {
    let tree = doc(vec![
        DocNode::paragraph(vec![DocNode::text("Intro")]),
        DocNode::bullet_list(vec![item("a")]),
        DocNode::paragraph(vec![DocNode::text("Outro")]),
    ]);
    assert_eq!(to_markdown(&tree), "Intro\n\n- a\n\nOutro");
}

// Item content that looks like a list marker is stripped. These pin the
// current behavior for literal text.

#[test]
fn test_literal_number_prefix_is_stripped() {
    let tree = doc(vec![DocNode::bullet_list(vec![item("1. Buy milk")])]);
    assert_eq!(to_markdown(&tree), "- Buy milk");
}

#[test]
fn test_literal_dash_prefix_is_stripped() {
    let tree = doc(vec![DocNode::bullet_list(vec![item("- dash")])]);
    assert_eq!(to_markdown(&tree), "- dash");
}

#[test]
fn test_leading_year_is_stripped() {
    let tree = doc(vec![DocNode::ordered_list(vec![item("2024 goals")])]);
    assert_eq!(to_markdown(&tree), "1. goals");
}

#[test]
fn test_marker_like_text_later_in_item_is_kept() {
    let tree = doc(vec![DocNode::bullet_list(vec![item("Chapter 1. Intro")])]);
    assert_eq!(to_markdown(&tree), "- Chapter 1. Intro");
}

#[test]
fn test_custom_bullet_marker() {
    let options = MarkdownOptions {
        bullet_marker: '*',
        ..Default::default()
    };
    let converter = Converter::new(RuleSet::standard(), options);
    let tree = doc(vec![DocNode::bullet_list(vec![item("a"), item("b")])]);
    assert_eq!(converter.convert(&tree), "* a\n* b");
}

#[test]
fn test_without_list_rule_items_pass_through() {
    let converter = Converter::new(RuleSet::standard().without("list"), Default::default());
    let tree = doc(vec![DocNode::bullet_list(vec![
        DocNode::list_item(vec![DocNode::text("a")]),
        DocNode::list_item(vec![DocNode::text("b")]),
    ])]);
    assert_eq!(converter.convert(&tree), "ab");
}

#[test]
fn test_numbering_skips_non_item_children() {
    let tree = DocNode::ordered_list(vec![
        DocNode::text(" "),
        item("A"),
        DocNode::text("\n"),
        item("B"),
        DocNode::Element(Default::default()),
        item("C"),
    ]);
    assert_eq!(to_markdown(&tree), "1. A\n2. B\n3. C");
}

#[test]
fn test_numbering_skips_whitespace_from_json() {
    let json = r#"{"tag": "orderedList", "children": [
        {"tag": "text", "value": " "},
        {"tag": "listItem", "children": [{"tag": "text", "value": "A"}]},
        {"tag": "text", "value": "\n"},
        {"tag": "listItem", "children": [{"tag": "text", "value": "B"}]}
    ]}"#;
    let registry = FormatRegistry::default();
    let tree = registry.parse(json, "json").unwrap();
    assert_eq!(registry.serialize(&tree, "markdown").unwrap(), "1. A\n2. B");
}

#[test]
fn test_very_deep_nesting_still_converts() {
    let mut list = DocNode::bullet_list(vec![item("level 299")]);
    for level in (0..299).rev() {
        list = DocNode::bullet_list(vec![DocNode::list_item(vec![
            DocNode::text(format!("level {level}")),
            list,
        ])]);
    }
    let output = to_markdown(&doc(vec![list]));
    assert!(output.starts_with("- level 0\n  - level 1\n    - level 2"));
    assert!(output.contains("level 299"));
}
