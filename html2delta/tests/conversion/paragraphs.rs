use html2delta::{convert, Attributes, ConvertError, Embed, Op};
use insta::assert_snapshot;

fn attrs(pairs: &[(&str, &str)]) -> Attributes {
    pairs.iter().map(|(key, value)| (*key, *value)).collect()
}

#[test]
fn test_paragraph_with_break() {
    let delta = convert("<p>Hello <strong>Word</strong>!<br></p>").unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::text("Hello "),
            Op::new("Word", Attributes::new().with("bold", true)),
            Op::text("!"),
            Op::newline(),
            Op::newline(),
        ]
    );
}

#[test]
fn test_paragraph_wire_format() {
    let delta = convert("<p>Hello <strong>Word</strong>!<br></p>").unwrap();

    assert_snapshot!(
        delta.to_json(false).unwrap(),
        @r#"{"ops":[{"insert":"Hello "},{"insert":"Word","attributes":{"bold":true}},{"insert":"!"},{"insert":"\n"},{"insert":"\n"}]}"#
    );
}

#[test]
fn test_paragraph_block_attributes_land_on_newline() {
    let delta = convert(r#"<p style="text-align: center; padding-left: 48px">Centered</p>"#).unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::text("Centered"),
            Op::new("\n", Attributes::new().with("align", "center").with("indent", 3u8)),
            Op::newline(),
        ]
    );
}

#[test]
fn test_span_style_merges_into_paragraph() {
    let delta =
        convert(r#"<p>a <span style="color: rgb(255, 0, 0); font-family: Mono">red</span></p>"#)
            .unwrap();

    assert_eq!(
        delta.ops()[1],
        Op::new("red", attrs(&[("color", "#ff0000ff"), ("font", "Mono")]))
    );
}

#[test]
fn test_nested_inline_formatting() {
    let delta = convert("<p><em>a<u>b<sub>c</sub></u></em><s>d</s><sup>e</sup></p>").unwrap();
    let ops = delta.ops();

    assert_eq!(ops[0], Op::new("a", Attributes::new().with("italic", true)));
    assert_eq!(
        ops[1],
        Op::new("b", Attributes::new().with("italic", true).with("underline", true))
    );
    assert_eq!(
        ops[2],
        Op::new(
            "c",
            Attributes::new()
                .with("italic", true)
                .with("underline", true)
                .with("script", "sub")
        )
    );
    assert_eq!(ops[3], Op::new("d", Attributes::new().with("strike", true)));
    assert_eq!(ops[4], Op::new("e", Attributes::new().with("script", "super")));
}

#[test]
fn test_link_inside_paragraph() {
    let delta = convert(r#"<p>see <a href="https://example.com">here</a></p>"#).unwrap();

    assert_eq!(
        delta.ops()[1],
        Op::new("here", Attributes::new().with("link", "https://example.com"))
    );
}

#[test]
fn test_inline_image_keeps_layout_style() {
    let delta = convert(r#"<p><img src="a.png" style="width: 20px; border: 1px solid"></p>"#)
        .unwrap();

    assert_eq!(
        delta.ops()[0],
        Op::new(Embed::image("a.png"), Attributes::new().with("style", "width:20px"))
    );
}

#[test]
fn test_header_level_and_span_size() {
    let delta = convert(
        r#"<h3 style="font-size: 2.5em">Big <span style="font-size: 0.75em">small</span></h3>"#,
    )
    .unwrap();
    let ops = delta.ops();

    assert_eq!(ops[0], Op::new("Big ", Attributes::new().with("size", "huge")));
    assert_eq!(ops[1], Op::new("small", Attributes::new().with("size", "small")));
    assert_eq!(ops[2], Op::new("\n", Attributes::new().with("header", 3u8)));
}

#[test]
fn test_header_size_reaches_spans_without_their_own() {
    let delta = convert(
        r#"<h1 style="font-size: 2.5em">A <span style="color: #ffffff">B</span> <span>C</span></h1>"#,
    )
    .unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::new("A ", attrs(&[("size", "huge")])),
            Op::new("B", attrs(&[("size", "huge"), ("color", "#ffffff")])),
            Op::new(" ", attrs(&[("size", "huge")])),
            Op::new("C", attrs(&[("size", "huge")])),
            Op::new("\n", Attributes::new().with("header", 1u8)),
        ]
    );
}

#[test]
fn test_empty_href_is_plain_text() {
    let delta = convert(r#"<p><a href="">x</a></p>"#).unwrap();
    assert_eq!(delta.ops(), &[Op::text("x"), Op::newline()]);
}

#[test]
fn test_unsupported_color_aborts() {
    let err = convert(r#"<p style="color: blue">x</p>"#).unwrap_err();
    assert_eq!(err, ConvertError::UnsupportedColorFormat("blue".to_string()));
}

#[test]
fn test_unsupported_font_size_is_skipped() {
    let delta = convert(r#"<p style="font-size: 4vh; color: #abcdef">x</p>"#).unwrap();
    assert_eq!(delta.ops()[0], Op::new("x", attrs(&[("color", "#abcdef")])));
}
