//! Import tests for HTML format (editor HTML → Markdown)

use ink_babel::formats::html::parse_from_html;
use ink_babel::ir::nodes::DocNode;
use ink_babel::{html_to_markdown, FormatError, FormatRegistry};

fn md(html: &str) -> String {
    html_to_markdown(html).expect("html converts")
}

#[test]
fn test_flat_list() {
    assert_eq!(
        md("<ul><li><p>Buy milk</p></li><li><p>Walk dog</p></li></ul>"),
        "- Buy milk\n- Walk dog"
    );
}

#[test]
fn test_nested_mixed_lists() {
    assert_eq!(
        md("<ol><li><p>Outer</p><ul><li><p>Inner</p></li></ul></li></ol>"),
        "1. Outer\n  - Inner"
    );
}

#[test]
fn test_ordered_start_attribute_is_ignored() {
    assert_eq!(
        md(r#"<ol start="5"><li>A</li><li>B</li><li>C</li></ol>"#),
        "1. A\n2. B\n3. C"
    );
}

#[test]
fn test_task_list_from_editor_markup() {
    let html = r#"<ul data-type="taskList">
        <li data-type="taskItem" data-checked="true"><label><input type="checkbox" checked="checked"><span></span></label><div><p>Done</p></div></li>
        <li data-type="taskItem" data-checked="false"><label><input type="checkbox"><span></span></label><div><p>Todo</p></div></li>
        <li data-type="taskItem"><label><input type="checkbox"><span></span></label><div><p>Unset</p></div></li>
    </ul>"#;
    assert_eq!(md(html), "- [x] Done\n- [ ] Todo\n- [ ] Unset");
}

#[test]
fn test_centered_image() {
    assert_eq!(
        md(r#"<img src="a.png" style="width: 200px; margin: 0 auto">"#),
        r#"![](a.png) { width="200px" align="center" }"#
    );
}

#[test]
fn test_right_aligned_image_from_longhand_margins() {
    assert_eq!(
        md(r#"<p><img src="a.png" style="margin-left: auto; margin-right: 0"></p>"#),
        r#"![](a.png) { align="right" }"#
    );
}

#[test]
fn test_image_width_attribute_fallback() {
    assert_eq!(
        md(r#"<p><img src="a.png" width="120"></p>"#),
        r#"![](a.png) { width="120" }"#
    );
}

#[test]
fn test_headings_and_paragraphs() {
    assert_eq!(
        md("<h1>Title</h1><p>First</p><p>Second</p><h3>Sub</h3>"),
        "# Title\n\nFirst\n\nSecond\n\n### Sub"
    );
}

#[test]
fn test_hard_break_inside_paragraph() {
    assert_eq!(md("<p>one<br>two</p>"), "one  \ntwo");
}

#[test]
fn test_code_block_keeps_indentation() {
    assert_eq!(
        md("<pre><code>if x {\n    y();\n}\n</code></pre>"),
        "```\nif x {\n    y();\n}\n```"
    );
}

#[test]
fn test_code_block_fence_grows_past_content() {
    assert_eq!(
        md("<pre><code>```\ninner\n```</code></pre>"),
        "````\n```\ninner\n```\n````"
    );
}

#[test]
fn test_links_and_inline_code() {
    assert_eq!(
        md(r#"<p>See <a href="https://example.com" title="Ex">docs</a> and <code>a`b</code></p>"#),
        r#"See [docs](https://example.com "Ex") and ``a`b``"#
    );
}

#[test]
fn test_link_without_href_is_text() {
    assert_eq!(md("<p><a>anchor</a></p>"), "anchor");
}

#[test]
fn test_unknown_elements_pass_through() {
    assert_eq!(
        md(r#"<div class="wrapper"><p><mark>hi</mark> there</p></div>"#),
        "hi there"
    );
}

#[test]
fn test_scripts_and_styles_are_dropped() {
    assert_eq!(
        md("<style>p { color: red }</style><p>kept</p><script>alert(1)</script>"),
        "kept"
    );
}

#[test]
fn test_markdown_metacharacters_are_not_escaped() {
    assert_eq!(md("<p>2 * 3 = _six_</p>"), "2 * 3 = _six_");
}

#[test]
fn test_empty_input_is_an_empty_document() {
    assert_eq!(parse_from_html("").unwrap(), DocNode::document(vec![]));
    assert_eq!(md(""), "");
}

#[test]
fn test_full_document_uses_body() {
    let html = "<!DOCTYPE html><html><head><title>t</title></head><body><p>body</p></body></html>";
    assert_eq!(md(html), "body");
}

#[test]
fn test_registry_detects_html_by_extension() {
    let registry = FormatRegistry::default();
    let format = registry
        .detect_format_from_filename("export.HTML")
        .expect("detected");
    let doc = registry.parse("<p>x</p>", &format).unwrap();
    assert_eq!(registry.serialize(&doc, "markdown").unwrap(), "x");
}

#[test]
fn test_html_cannot_be_written() {
    let registry = FormatRegistry::default();
    let doc = DocNode::document(vec![]);
    assert!(matches!(
        registry.serialize(&doc, "html"),
        Err(FormatError::NotSupported(_))
    ));
}

#[test]
fn test_deeply_nested_markup_converts_to_its_text() {
    let depth = 1000;
    let html = format!(
        "<p>{}deep <b>text</b>{}</p>",
        "<span>".repeat(depth),
        "</span>".repeat(depth)
    );
    assert_eq!(md(&html), "deep text");

    let html = format!("<p>{}bold{}</p>", "<b>".repeat(depth), "</b>".repeat(depth));
    let output = md(&html);
    assert!(output.starts_with("****"));
    assert!(output.contains("bold"));
}
