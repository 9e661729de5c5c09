use html2delta::{convert, Attributes, Embed, Op};

#[test]
fn test_header() {
    let delta = convert("<h1>Title</h1>").unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::text("Title"),
            Op::new("\n", Attributes::new().with("header", 1u8)),
            Op::newline(),
        ]
    );
}

#[test]
fn test_header_alignment() {
    let delta = convert(r#"<h2 align="right" dir="rtl">Title</h2>"#).unwrap();

    assert_eq!(
        delta.ops()[1],
        Op::new(
            "\n",
            Attributes::new()
                .with("align", "right")
                .with("direction", "rtl")
                .with("header", 2u8)
        )
    );
}

#[test]
fn test_blockquote() {
    let delta = convert("<blockquote>quoted <b>text</b></blockquote>").unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::text("quoted "),
            Op::new("text", Attributes::new().with("bold", true)),
            Op::new("\n", Attributes::new().with("blockquote", true)),
            Op::newline(),
        ]
    );
}

#[test]
fn test_code_block() {
    let delta = convert("<pre><code>let x = 1;</code></pre>").unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::text("let x = 1;"),
            Op::new("\n", Attributes::new().with("code-block", true)),
            Op::newline(),
        ]
    );
}

#[test]
fn test_top_level_image_is_bare() {
    let delta = convert(r#"<img src="https://example.com/a.png" style="width: 10px">"#).unwrap();

    assert_eq!(
        delta.ops(),
        &[Op::embed("image", "https://example.com/a.png"), Op::newline()]
    );
}

#[test]
fn test_image_without_src_is_dropped() {
    let delta = convert("<img alt=\"nothing\">").unwrap();
    assert_eq!(delta.ops(), &[Op::newline()]);
}

#[test]
fn test_video_source_child() {
    let delta = convert(r#"<video controls><source src="clip.mp4"></video>"#).unwrap();
    assert_eq!(delta.ops()[0], Op::new(Embed::video("clip.mp4"), None));
}

#[test]
fn test_video_source_must_be_first_child() {
    let delta =
        convert(r#"<video><track kind="captions"><source src="clip.mp4"></video>"#).unwrap();
    assert_eq!(delta.ops(), &[Op::newline()]);
}

#[test]
fn test_div_container() {
    let delta = convert(r##"<div style="color: #ff0000"><p>x</p>tail</div>"##).unwrap();

    assert_eq!(
        delta.ops(),
        &[
            Op::text("x"),
            Op::newline(),
            Op::newline(),
            Op::new("tail", Attributes::new().with("color", "#ff0000")),
            Op::newline(),
        ]
    );
}

#[test]
fn test_unknown_element_keeps_text() {
    let delta = convert("<section><b>kept</b> text</section>").unwrap();
    assert_eq!(delta.ops(), &[Op::text("kept text"), Op::newline()]);
}
