//! Dialect extensions: styled spans, image layout, underline

use ink_babel::ir::nodes::{Align, DocNode, Image, Span};
use ink_babel::{html_to_markdown, to_markdown};

fn span(color: Option<&str>, font_size: Option<&str>, text: &str) -> DocNode {
    DocNode::Span(Span {
        color: color.map(str::to_string),
        font_size: font_size.map(str::to_string),
        text_decoration: None,
        children: vec![DocNode::text(text)],
    })
}

#[test]
fn test_centered_image_with_width() {
    let image = Image::new("a.png")
        .with_width("200px")
        .with_align(Align::Center);
    assert_eq!(
        to_markdown(&DocNode::Image(image)),
        r#"![](a.png) { width="200px" align="center" }"#
    );
}

#[test]
fn test_right_aligned_image_without_width() {
    let image = Image::new("a.png").with_align(Align::Right);
    assert_eq!(
        to_markdown(&DocNode::Image(image)),
        r#"![](a.png) { align="right" }"#
    );
}

#[test]
fn test_width_only_image() {
    let image = Image::new("a.png").with_width("50%");
    assert_eq!(
        to_markdown(&DocNode::Image(image)),
        r#"![](a.png) { width="50%" }"#
    );
}

#[test]
fn test_plain_image_has_no_attribute_block() {
    for image in [
        Image::new("https://example.com/a.png"),
        Image::new("https://example.com/a.png").with_align(Align::Left),
    ] {
        assert_eq!(
            to_markdown(&DocNode::Image(image)),
            "![](https://example.com/a.png)"
        );
    }
}

#[test]
fn test_image_alt_text_is_not_emitted() {
    let image = Image {
        alt: Some("a cat".to_string()),
        ..Image::new("cat.png")
    };
    assert_eq!(to_markdown(&DocNode::Image(image)), "![](cat.png)");
}

#[test]
fn test_data_uri_image_is_kept_verbatim() {
    let src = "data:image/png;base64,iVBORw0KGgo=";
    assert_eq!(
        to_markdown(&DocNode::Image(Image::new(src))),
        format!("![]({src})")
    );
}

#[test]
fn test_image_without_src_falls_through() {
    let image = Image {
        width: Some("200px".to_string()),
        ..Default::default()
    };
    assert_eq!(to_markdown(&DocNode::Image(image)), "");
}

#[test]
fn test_inline_image_inside_paragraph() {
    let tree = DocNode::paragraph(vec![
        DocNode::text("See "),
        DocNode::Image(Image::new("a.png").with_width("10px")),
    ]);
    assert_eq!(to_markdown(&tree), r#"See ![](a.png) { width="10px" }"#);
}

#[test]
fn test_span_style_order_is_fixed() {
    assert_eq!(
        to_markdown(&span(Some("#ff6b6b"), Some("18px"), "Warm")),
        r#"<span style="color: #ff6b6b; font-size: 18px">Warm</span>"#
    );
}

#[test]
fn test_span_style_order_does_not_follow_markup() {
    let md = html_to_markdown(r#"<p><span style="font-size: 18px; color: #0066cc">x</span></p>"#)
        .unwrap();
    assert_eq!(md, r#"<span style="color: #0066cc; font-size: 18px">x</span>"#);
}

#[test]
fn test_span_with_single_property() {
    assert_eq!(
        to_markdown(&span(None, Some("12px"), "small")),
        r#"<span style="font-size: 12px">small</span>"#
    );
}

#[test]
fn test_unstyled_span_is_transparent() {
    let tree = DocNode::paragraph(vec![
        DocNode::text("a "),
        span(None, None, "b"),
        DocNode::text(" c"),
    ]);
    assert_eq!(to_markdown(&tree), "a b c");
}

#[test]
fn test_underline_element_and_decorated_span() {
    assert_eq!(
        to_markdown(&DocNode::underline(vec![DocNode::text("u")])),
        "<u>u</u>"
    );
    let md = html_to_markdown(r#"<p><span style="text-decoration: underline">u</span></p>"#)
        .unwrap();
    assert_eq!(md, "<u>u</u>");
}

#[test]
fn test_underline_wins_over_span_styles() {
    let md = html_to_markdown(
        r#"<p><span style="color: red; text-decoration: underline">u</span></p>"#,
    )
    .unwrap();
    assert_eq!(md, "<u>u</u>");
}

#[test]
fn test_underline_nested_in_bold() {
    let tree = DocNode::paragraph(vec![DocNode::bold(vec![DocNode::underline(vec![
        DocNode::text("a"),
    ])])]);
    assert_eq!(to_markdown(&tree), "**<u>a</u>**");
}

#[test]
fn test_styled_span_inside_list_item() {
    let tree = DocNode::bullet_list(vec![DocNode::list_item(vec![DocNode::paragraph(vec![
        span(Some("red"), None, "hot"),
    ])])]);
    assert_eq!(
        to_markdown(&tree),
        r#"- <span style="color: red">hot</span>"#
    );
}

#[test]
fn test_heading_levels_out_of_range_pass_through() {
    for level in [0, 7] {
        let tree = DocNode::heading(level, vec![DocNode::text("x")]);
        assert_eq!(to_markdown(&tree), "x");
    }
    assert_eq!(
        to_markdown(&DocNode::heading(3, vec![DocNode::text("x")])),
        "### x"
    );
}
