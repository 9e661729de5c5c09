//! Block-level dispatch
//!
//! [`Resolver::resolve`] classifies an element by tag and hands it to the matching
//! [`HtmlOperations`] method. Classification is additive: an element that satisfies several
//! predicates runs every matching strategy, in a fixed order, and the outputs are
//! concatenated.
//!
//! Strategies receive the resolver itself, so an implementation can recurse into children
//! (`cx.descend()?.resolve(..)`) or start an inline walk (`cx.processor()`) without knowing
//! how custom blocks or the depth ceiling are wired.

use super::custom::{find_custom_block, CustomBlock};
use super::node_processor::{apply_inline_flags, NodeProcessor};
use super::tags;
use crate::delta::{Attributes, Delta, Op};
use crate::dom::{Element, Node};
use crate::error::{ConvertError, Result};
use log::trace;

/// Per-tag conversion strategy.
///
/// Every method returns the operations for one element. The default implementation is
/// [`DefaultHtmlOperations`](super::DefaultHtmlOperations).
pub trait HtmlOperations: Send + Sync {
    fn paragraph_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>>;
    fn header_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>>;
    fn span_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>>;
    fn list_to_ops(&self, cx: &Resolver<'_>, element: &Element, indent: u8) -> Result<Vec<Op>>;
    fn img_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>>;
    fn link_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>>;
    fn video_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>>;
    fn blockquote_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>>;
    fn code_block_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>>;
    fn div_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>>;
    fn br_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>>;

    /// Character-level tags (`<b>`, `<em>`, ...) reached at block level. The tag's own
    /// formatting applies to its whole subtree.
    fn inline_to_ops(&self, cx: &Resolver<'_>, element: &Element) -> Result<Vec<Op>> {
        let mut attrs = Attributes::new();
        apply_inline_flags(element, &mut attrs);
        let mut delta = Delta::new();
        cx.processor()
            .merge_span_attrs(false)
            .process_children(element, &attrs, &mut delta)?;
        Ok(delta.into_ops())
    }
}

/// Dispatch handle passed to every [`HtmlOperations`] method.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    operations: &'a dyn HtmlOperations,
    custom_blocks: &'a [Box<dyn CustomBlock>],
    depth: usize,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(
        operations: &'a dyn HtmlOperations,
        custom_blocks: &'a [Box<dyn CustomBlock>],
        max_depth: usize,
    ) -> Self {
        Self {
            operations,
            custom_blocks,
            depth: 0,
            max_depth,
        }
    }

    pub fn custom_blocks(&self) -> &'a [Box<dyn CustomBlock>] {
        self.custom_blocks
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// A node walker that shares this resolver's custom blocks and depth budget.
    pub fn processor(&self) -> NodeProcessor<'a> {
        NodeProcessor::new(self.custom_blocks).at_depth(self.depth + 1, self.max_depth)
    }

    /// The resolver for one nesting level down.
    pub fn descend(&self) -> Result<Resolver<'a>> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(ConvertError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(Resolver { depth, ..*self })
    }

    /// Converts one node into operations.
    ///
    /// `indent_level` is the list nesting level, and `next_is_block` requests a trailing
    /// newline unless the output already ends in one.
    pub fn resolve(&self, node: &Node, indent_level: u8, next_is_block: bool) -> Result<Vec<Op>> {
        let mut delta = match node {
            Node::Text(text) => Delta::from_iter([Op::text(text.as_str())]),
            Node::Element(element) => self.resolve_element(element, indent_level)?,
        };

        if next_is_block && !delta.last().is_some_and(|op| op.as_text() == Some("\n")) {
            delta.push(Op::newline());
        }
        Ok(delta.into_ops())
    }

    fn resolve_element(&self, element: &Element, indent_level: u8) -> Result<Delta> {
        if let Some(block) = find_custom_block(self.custom_blocks, element) {
            trace!("custom block took over <{}>", element.tag());
            return Ok(block.convert(element, &Attributes::new()).into_iter().collect());
        }

        let ops = self.operations;
        let mut delta = Delta::new();
        let mut matched = false;

        if element.tag().is_empty() {
            delta.push(Op::text(element.text_content()));
            return Ok(delta);
        }

        if tags::is_inline(element) {
            matched = true;
            delta.extend(ops.inline_to_ops(self, element)?);
        }
        if tags::is_break_line(element) {
            matched = true;
            delta.extend(ops.br_to_ops(self, element)?);
        }
        if tags::is_paragraph(element) {
            matched = true;
            delta.extend(ops.paragraph_to_ops(self, element)?);
        }
        if tags::is_header(element) {
            matched = true;
            delta.extend(ops.header_to_ops(self, element)?);
        }
        if tags::is_list(element) {
            matched = true;
            delta.extend(ops.list_to_ops(self, element, indent_level)?);
        }
        if tags::is_span(element) {
            matched = true;
            delta.extend(ops.span_to_ops(self, element)?);
        }
        if tags::is_link(element) {
            matched = true;
            delta.extend(ops.link_to_ops(self, element)?);
        }
        if tags::is_img(element) {
            matched = true;
            delta.extend(ops.img_to_ops(self, element)?);
        }
        if tags::is_video(element) {
            matched = true;
            delta.extend(ops.video_to_ops(self, element)?);
        }
        if tags::is_blockquote(element) {
            matched = true;
            delta.extend(ops.blockquote_to_ops(self, element)?);
        }
        if tags::is_code_block(element) {
            matched = true;
            delta.extend(ops.code_block_to_ops(self, element)?);
        }
        if tags::is_div(element) {
            matched = true;
            delta.extend(ops.div_to_ops(self, element)?);
        }

        if !matched {
            trace!("no strategy for <{}>, keeping its text", element.tag());
            delta.push(Op::text(element.text_content()));
        }
        Ok(delta)
    }
}
