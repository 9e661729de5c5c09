use html2delta::delta::BLOCK_KEYS;
use html2delta::{convert, ConvertOptions, HtmlToDelta, Op};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "text",
    " more ",
    "<p>",
    "</p>",
    "<b>",
    "</b>",
    "<em>",
    "</em>",
    "<span style=\"font-size: 18px\">",
    "</span>",
    "<a href=\"/x\">",
    "</a>",
    "<br>",
    "<h2>",
    "</h2>",
    "<ul><li>",
    "<ol><li>",
    "</li>",
    "</ul>",
    "</ol>",
    "<li data-checked=\"true\">",
    "<blockquote>",
    "</blockquote>",
    "<pre>",
    "</pre>",
    "<div style=\"padding-left: 32px\">",
    "</div>",
    "<img src=\"i.png\">",
    "<video src=\"v.mp4\"></video>",
    "<table><tr><td>cell</td></tr></table>",
    "\n    ",
];

fn html_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40).prop_map(|parts| parts.concat())
}

fn ends_with_bare_newline(ops: &[Op]) -> bool {
    ops.last()
        .is_some_and(|op| op.ends_with_newline() && op.attributes.is_none())
}

proptest! {
    #[test]
    fn delta_always_ends_with_bare_newline(html in html_soup()) {
        let delta = convert(&html).unwrap();
        prop_assert!(ends_with_bare_newline(delta.ops()), "{html:?} gave {:?}", delta.ops());
    }

    #[test]
    fn arbitrary_input_ends_with_bare_newline(html in "\\PC{0,200}") {
        if let Ok(delta) = convert(&html) {
            prop_assert!(ends_with_bare_newline(delta.ops()));
        }
    }

    #[test]
    fn block_keys_only_sit_on_newlines(html in html_soup()) {
        let delta = convert(&html).unwrap();
        for op in delta.ops() {
            let Some(attrs) = op.attributes() else { continue };
            if BLOCK_KEYS.iter().any(|key| attrs.contains_key(*key)) {
                prop_assert_eq!(op.as_text(), Some("\n"));
            }
        }
    }

    #[test]
    fn indent_attributes_stay_in_range(html in html_soup()) {
        let delta = convert(&html).unwrap();
        for op in delta.ops() {
            if let Some(level) = op.attr("indent") {
                let level = level.as_int().unwrap_or(-1);
                prop_assert!((1..=5).contains(&level), "indent {level}");
            }
        }
    }

    #[test]
    fn black_listed_tags_yield_their_text(words in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let html = format!(
            "<article><h1>{}</h1><p><b>{}</b></p></article>",
            words[0],
            words[1..].join(" ")
        );
        let delta = HtmlToDelta::new()
            .with_options(ConvertOptions {
                black_list: vec!["article".to_string()],
                ..Default::default()
            })
            .convert(&html)
            .unwrap();

        let expected = format!("{}{}", words[0], words[1..].join(" "));
        prop_assert_eq!(delta.ops()[0].as_text(), Some(expected.as_str()));
        prop_assert_eq!(delta.len(), 2);
    }
}
