//! Recursive node walker
//!
//! Walks a subtree depth-first, appending inserts to a [`Delta`]. Each frame receives the
//! inherited attribute context by reference and builds its own copy before adding the
//! formatting its tag implies, so siblings never observe each other's attributes.
//!
//! The walk is configured once per call site:
//! - `merge_span_attrs`: whether a `<span style>` merges into the context. Paragraphs and
//!   headers turn this on; containers that resolve spans on their own leave it off.
//! - span exclusions: inherited keys that a span must not carry over (headers exclude `size`).
//! - custom blocks: consulted for every element of the walk.

use super::custom::{find_custom_block, CustomBlock};
use super::tags;
use crate::css::style::{image_style, parse_style_attribute};
use crate::delta::{Attributes, Delta, Embed, BLOCK_KEYS};
use crate::dom::{Element, Node, DEFAULT_MAX_DEPTH};
use crate::error::{ConvertError, Result};
use log::trace;

#[derive(Clone, Copy)]
pub struct NodeProcessor<'a> {
    custom_blocks: &'a [Box<dyn CustomBlock>],
    merge_span_attrs: bool,
    span_exclusions: &'a [&'a str],
    depth: usize,
    max_depth: usize,
}

impl<'a> NodeProcessor<'a> {
    pub fn new(custom_blocks: &'a [Box<dyn CustomBlock>]) -> Self {
        Self {
            custom_blocks,
            merge_span_attrs: false,
            span_exclusions: &[],
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn merge_span_attrs(mut self, merge: bool) -> Self {
        self.merge_span_attrs = merge;
        self
    }

    pub fn excluding_from_spans(mut self, keys: &'a [&'a str]) -> Self {
        self.span_exclusions = keys;
        self
    }

    /// Continue depth accounting from an enclosing walk.
    pub fn at_depth(mut self, depth: usize, max_depth: usize) -> Self {
        self.depth = depth;
        self.max_depth = max_depth;
        self
    }

    /// Appends the inserts for `node` (and its subtree) to `delta`.
    pub fn process(&self, node: &Node, attributes: &Attributes, delta: &mut Delta) -> Result<()> {
        self.walk(node, attributes, delta, self.depth)
    }

    /// Processes every child of `element` under the same context.
    pub fn process_children(
        &self,
        element: &Element,
        attributes: &Attributes,
        delta: &mut Delta,
    ) -> Result<()> {
        for child in element.children() {
            self.walk(child, attributes, delta, self.depth)?;
        }
        Ok(())
    }

    fn walk(&self, node: &Node, attributes: &Attributes, delta: &mut Delta, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(ConvertError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        let element = match node {
            Node::Text(text) => {
                delta.insert(text.as_str(), attributes.without(&BLOCK_KEYS));
                return Ok(());
            }
            Node::Element(element) => element,
        };

        let mut attrs = attributes.clone();
        apply_inline_flags(element, &mut attrs);

        if let Some(block) = find_custom_block(self.custom_blocks, element) {
            trace!("custom block took over <{}>", element.tag());
            delta.extend(block.convert(element, &attrs));
            return Ok(());
        }

        if tags::is_span(element) && self.merge_span_attrs {
            let span_attrs = parse_style_attribute(element.attr("style").unwrap_or_default())?;
            // An excluded key is only dropped when the span sets its own value for it.
            attrs.retain(|key, _| {
                !BLOCK_KEYS.iter().any(|block| *block == key)
                    && !(self.span_exclusions.iter().any(|excluded| *excluded == key)
                        && span_attrs.contains_key(key))
            });
            attrs.extend(span_attrs);
        }

        if tags::is_img(element) {
            if let Some(src) = element.attr("src").filter(|src| !src.is_empty()) {
                let style = element
                    .attr("style")
                    .filter(|style| !style.trim().is_empty())
                    .map(image_style)
                    .filter(|style| !style.is_empty());
                let embed_attrs = style.map(|style| Attributes::new().with("style", style));
                delta.insert(Embed::image(src), embed_attrs);
            } else {
                trace!("skipping <img> without src");
            }
        }

        if tags::is_video(element) {
            if let Some(src) = video_source(element) {
                delta.insert(Embed::video(src), None);
            } else {
                trace!("skipping <video> without a source");
            }
        }

        if tags::is_link(element) {
            if let Some(href) = element.attr("href").filter(|href| !href.is_empty()) {
                attrs.remove("indent");
                attrs.insert("link", href);
            }
        }

        if tags::is_break_line(element) {
            for key in BLOCK_KEYS {
                attrs.remove(key);
            }
            delta.insert("\n", None);
        }

        for child in element.children() {
            self.walk(child, &attrs, delta, depth + 1)?;
        }
        Ok(())
    }
}

/// Sets the formatting a tag implies by itself (`<b>` → bold, `<sub>` → script, ...).
pub fn apply_inline_flags(element: &Element, attrs: &mut Attributes) {
    if tags::is_strong(element) {
        attrs.insert("bold", true);
    }
    if tags::is_italic(element) {
        attrs.insert("italic", true);
    }
    if tags::is_underline(element) {
        attrs.insert("underline", true);
    }
    if tags::is_strike(element) {
        attrs.insert("strike", true);
    }
    if tags::is_subscript(element) {
        attrs.insert("script", "sub");
    }
    if tags::is_superscript(element) {
        attrs.insert("script", "super");
    }
}

/// The element's own `src`, else the `src` of its first child element (usually `<source>`).
pub fn video_source(element: &Element) -> Option<&str> {
    element
        .attr("src")
        .or_else(|| element.element_children().next()?.attr("src"))
        .filter(|src| !src.is_empty())
}
