//! Tag predicates used by the dispatch.

use crate::dom::Element;

pub fn is_strong(element: &Element) -> bool {
    matches!(element.tag(), "strong" | "b")
}

pub fn is_italic(element: &Element) -> bool {
    matches!(element.tag(), "em" | "i")
}

pub fn is_underline(element: &Element) -> bool {
    matches!(element.tag(), "ins" | "u")
}

pub fn is_strike(element: &Element) -> bool {
    matches!(element.tag(), "s" | "del")
}

pub fn is_subscript(element: &Element) -> bool {
    element.tag() == "sub"
}

pub fn is_superscript(element: &Element) -> bool {
    element.tag() == "sup"
}

/// Character-level formatting tags.
pub fn is_inline(element: &Element) -> bool {
    is_strong(element)
        || is_italic(element)
        || is_underline(element)
        || is_strike(element)
        || is_subscript(element)
        || is_superscript(element)
}

pub fn is_break_line(element: &Element) -> bool {
    element.tag() == "br"
}

pub fn is_paragraph(element: &Element) -> bool {
    element.tag() == "p"
}

pub fn is_span(element: &Element) -> bool {
    element.tag() == "span"
}

/// `h1` through `h6`.
pub fn is_header(element: &Element) -> bool {
    header_level(element).is_some()
}

pub fn header_level(element: &Element) -> Option<u8> {
    match element.tag().as_bytes() {
        [b'h', level @ b'1'..=b'6'] => Some(level - b'0'),
        _ => None,
    }
}

pub fn is_list(element: &Element) -> bool {
    matches!(element.tag(), "ul" | "ol" | "li")
}

/// `ul` or `ol`, i.e. a list that opens a new nesting level.
pub fn is_list_container(element: &Element) -> bool {
    matches!(element.tag(), "ul" | "ol")
}

pub fn is_img(element: &Element) -> bool {
    element.tag() == "img"
}

pub fn is_video(element: &Element) -> bool {
    element.tag() == "video"
}

pub fn is_link(element: &Element) -> bool {
    element.tag() == "a"
}

pub fn is_blockquote(element: &Element) -> bool {
    element.tag() == "blockquote"
}

pub fn is_code_block(element: &Element) -> bool {
    matches!(element.tag(), "pre" | "code")
}

pub fn is_div(element: &Element) -> bool {
    element.tag() == "div"
}

pub fn is_checkbox(element: &Element) -> bool {
    element.tag() == "input"
        && element
            .attr("type")
            .is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox"))
}

/// Tags the top-level driver treats as starting a new block.
pub fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "li"
            | "img"
            | "video"
            | "blockquote"
            | "pre"
            | "div"
    )
}
