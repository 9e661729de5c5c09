//! Built-in per-tag conversion rules

use super::node_processor::video_source;
use super::resolver::{HtmlOperations, Resolver};
use super::tags;
use crate::css::style::parse_style_attribute;
use crate::css::units::MAX_INDENT;
use crate::delta::{Attributes, Delta, Embed, Op, BLOCK_KEYS};
use crate::dom::{Element, Node};
use crate::error::Result;
use log::debug;

/// Inherited keys a span inside a header may not carry over.
const HEADER_SPAN_EXCLUSIONS: [&str; 1] = ["size"];

/// The rules used when no custom strategy is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHtmlOperations;

/// Splits an element's `style`, `align` and `dir` attributes into (block, inline) attributes.
///
/// The `align` and `dir` HTML attributes win over the same keys in `style`.
fn block_and_inline_attributes(element: &Element) -> Result<(Attributes, Attributes)> {
    let mut attrs = parse_style_attribute(element.attr("style").unwrap_or_default())?;
    attrs.extend(parse_style_attribute(element.attr("align").unwrap_or_default())?);
    attrs.extend(parse_style_attribute(element.attr("dir").unwrap_or_default())?);
    let block = attrs.take(&BLOCK_KEYS);
    Ok((block, attrs))
}

/// Walks the children of a block that is always followed by a single terminating newline.
fn terminated_block(cx: &Resolver<'_>, element: &Element, block: Attributes) -> Result<Vec<Op>> {
    let mut delta = Delta::new();
    cx.processor()
        .process_children(element, &Attributes::new(), &mut delta)?;
    delta.insert("\n", block);
    Ok(delta.into_ops())
}

impl HtmlOperations for DefaultHtmlOperations {
    fn paragraph_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        let (block, inline) = block_and_inline_attributes(element)?;
        let mut delta = Delta::new();
        cx.processor()
            .merge_span_attrs(true)
            .process_children(element, &inline, &mut delta)?;
        delta.insert("\n", block);
        Ok(delta.into_ops())
    }

    fn header_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        let (mut block, inline) = block_and_inline_attributes(element)?;
        if let Some(level) = tags::header_level(element) {
            block.insert("header", level);
        }
        let mut delta = Delta::new();
        cx.processor()
            .merge_span_attrs(true)
            .excluding_from_spans(&HEADER_SPAN_EXCLUSIONS)
            .process_children(element, &inline, &mut delta)?;
        delta.insert("\n", block);
        Ok(delta.into_ops())
    }

    fn span_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        let mut inline = parse_style_attribute(element.attr("style").unwrap_or_default())?;
        inline.remove("align");
        let mut delta = Delta::new();
        cx.processor()
            .merge_span_attrs(false)
            .process_children(element, &inline, &mut delta)?;
        Ok(delta.into_ops())
    }

    fn list_to_ops(&self, cx: &Resolver<'_>, element: &Element, indent: u8) -> Result<Vec<Op>> {
        let base_kind = if element.tag() == "ol" { "ordered" } else { "bullet" };
        let items: Vec<&Element> = if tags::is_list_container(element) {
            element
                .element_children()
                .filter(|child| child.tag() == "li")
                .collect()
        } else {
            vec![element]
        };

        let checkbox = element.find_descendant(&tags::is_checkbox);
        let base_kind = match checkbox {
            Some(input) if input.has_attr("checked") => "checked",
            Some(_) => "unchecked",
            None => base_kind,
        };

        let indent = indent.min(MAX_INDENT);
        let mut delta = Delta::new();

        for item in items {
            let mut attributes = Attributes::new().with("list", base_kind);
            if checkbox.is_none() {
                if let Some(data_checked) = item.attr("data-checked") {
                    if let Some(kind) = parse_style_attribute(data_checked)?.remove("list") {
                        attributes.insert("list", kind);
                    }
                }
            }
            if indent > 0 {
                attributes.insert("indent", indent);
            }

            let mut needs_terminator = true;
            for child in item.children() {
                match child {
                    Node::Text(text) => {
                        delta.insert(text.as_str(), None);
                        if !text.trim().is_empty() {
                            needs_terminator = true;
                        }
                    }
                    Node::Element(nested) if tags::is_list_container(nested) => {
                        if needs_terminator {
                            delta.insert("\n", attributes.clone());
                            needs_terminator = false;
                        }
                        let ops = cx.descend()?.resolve(child, indent.saturating_add(1), false)?;
                        delta.extend(ops);
                    }
                    Node::Element(_) => {
                        let ops = cx.descend()?.resolve(child, indent, false)?;
                        if !ops.is_empty() {
                            needs_terminator = true;
                        }
                        delta.extend(ops);
                    }
                }
            }

            if needs_terminator {
                delta.insert("\n", attributes);
            }
        }

        Ok(delta.into_ops())
    }

    fn img_to_ops(&self, _cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        match element.attr("src").filter(|src| !src.is_empty()) {
            Some(src) => Ok(vec![Op::new(Embed::image(src), None)]),
            None => {
                debug!("<img> without src produces nothing");
                Ok(Vec::new())
            }
        }
    }

    fn link_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        let mut attributes = Attributes::new();
        if let Some(href) = element.attr("href").filter(|href| !href.is_empty()) {
            attributes.insert("link", href);
        }
        let mut delta = Delta::new();
        cx.processor()
            .process_children(element, &attributes, &mut delta)?;
        Ok(delta.into_ops())
    }

    fn video_to_ops(&self, _cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        match video_source(element) {
            Some(src) => Ok(vec![Op::new(Embed::video(src), None)]),
            None => {
                debug!("<video> without a source produces nothing");
                Ok(Vec::new())
            }
        }
    }

    fn blockquote_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        terminated_block(cx, element, Attributes::new().with("blockquote", true))
    }

    fn code_block_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        terminated_block(cx, element, Attributes::new().with("code-block", true))
    }

    fn div_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        let inline = parse_style_attribute(element.attr("style").unwrap_or_default())?
            .without(&BLOCK_KEYS);
        let mut delta = Delta::new();
        for child in element.children() {
            match child {
                Node::Text(text) => {
                    delta.insert(text.as_str(), inline.clone());
                }
                Node::Element(nested) => {
                    delta.extend(cx.descend()?.resolve(child, 0, false)?);
                    if tags::is_paragraph(nested) {
                        delta.insert("\n", None);
                    }
                }
            }
        }
        Ok(delta.into_ops())
    }

    fn br_to_ops(&self, _cx: &Resolver<'_>, _element: &Element) -> Result<Vec<Op>> {
        Ok(vec![Op::newline()])
    }
}
