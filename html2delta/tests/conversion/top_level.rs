use html2delta::dom::DEFAULT_MAX_DEPTH;
use html2delta::{convert, Attributes, ConvertError, ConvertOptions, HtmlToDelta, Op};

fn with_black_list(tags: &[&str]) -> HtmlToDelta {
    HtmlToDelta::new().with_options(ConvertOptions {
        black_list: tags.iter().map(|tag| tag.to_string()).collect(),
        ..Default::default()
    })
}

#[test]
fn test_full_document_uses_body() {
    let html = r#"<!DOCTYPE html>
        <html>
            <head><title>ignored</title></head>
            <body>
                <p>content</p>
            </body>
        </html>"#;
    let delta = convert(html).unwrap();

    assert_eq!(delta.ops(), &[Op::text("content"), Op::newline()]);
}

#[test]
fn test_text_before_block_gets_newline() {
    let delta = convert("plain<p>para</p>").unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::text("plain"),
            Op::newline(),
            Op::text("para"),
            Op::newline(),
        ]
    );
}

#[test]
fn test_inline_before_block_gets_newline() {
    let delta = convert("<b>bold</b><h1>head</h1>").unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::new("bold", Attributes::new().with("bold", true)),
            Op::newline(),
            Op::text("head"),
            Op::new("\n", Attributes::new().with("header", 1u8)),
            Op::newline(),
        ]
    );
}

#[test]
fn test_adjacent_paragraphs_do_not_double_up() {
    let delta = convert("<p>a</p><p>b</p>").unwrap();
    assert_eq!(delta.to_plain_text(), "a\nb\n");
}

#[test]
fn test_black_listed_tag_is_flattened() {
    let delta = with_black_list(&["table"])
        .convert("<p>a</p><table><tr><td><b>x</b></td><td>y</td></tr></table><p>b</p>")
        .unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::text("a"),
            Op::newline(),
            Op::text("xy"),
            Op::newline(),
            Op::text("b"),
            Op::newline(),
        ]
    );
}

#[test]
fn test_black_list_only_applies_at_top_level() {
    let delta = with_black_list(&["b"]).convert("<p><b>still bold</b></p>").unwrap();
    assert_eq!(
        delta.ops()[0],
        Op::new("still bold", Attributes::new().with("bold", true))
    );
}

#[test]
fn test_depth_limit() {
    let html = format!("{}x{}", "<div>".repeat(600), "</div>".repeat(600));
    let err = convert(&html).unwrap_err();
    assert_eq!(
        err,
        ConvertError::DepthLimitExceeded {
            limit: DEFAULT_MAX_DEPTH
        }
    );
}

#[test]
fn test_nesting_just_under_the_default_limit_converts() {
    // html and body take the first two levels.
    let levels = DEFAULT_MAX_DEPTH - 2;
    let html = format!("{}x{}", "<div>".repeat(levels), "</div>".repeat(levels));
    let delta = convert(&html).unwrap();
    assert_eq!(delta.to_plain_text(), "x\n");
}

#[test]
fn test_custom_depth_limit() {
    let converter = HtmlToDelta::new().with_options(ConvertOptions {
        max_depth: 8,
        ..Default::default()
    });

    let shallow = format!("{}x{}", "<span>".repeat(3), "</span>".repeat(3));
    assert!(converter.convert(&shallow).is_ok());

    let deep = format!("{}x{}", "<span>".repeat(10), "</span>".repeat(10));
    assert_eq!(
        converter.convert(&deep).unwrap_err(),
        ConvertError::DepthLimitExceeded { limit: 8 }
    );
}

#[test]
fn test_compact_merges_runs() {
    let delta = convert("<p>a<span>b</span>c</p>").unwrap();
    assert_eq!(delta.len(), 4);

    let compacted = delta.compact();
    assert_eq!(compacted.ops(), &[Op::text("abc\n")]);
}
