//! HTML to Delta conversion
//!
//!     The conversion runs in two layers:
//!
//!     1. [`Resolver`] handles block-level elements. It classifies each element by tag and
//!        dispatches to an [`HtmlOperations`] strategy (paragraph, header, list, ...).
//!     2. [`NodeProcessor`] handles everything inside a block. It walks the subtree depth-first,
//!        carrying the inherited inline attributes down and emitting text and embed inserts.
//!
//!     [`HtmlToDelta`] drives both over the children of `<body>`, applies custom blocks and the
//!     black-list at the top level, and guarantees the result ends in a bare newline.

pub mod custom;
pub mod default_ops;
pub mod node_processor;
pub mod resolver;
pub mod tags;

pub use custom::CustomBlock;
pub use default_ops::DefaultHtmlOperations;
pub use node_processor::NodeProcessor;
pub use resolver::{HtmlOperations, Resolver};

use crate::delta::{Delta, Op};
use crate::dom::{self, Node, DEFAULT_MAX_DEPTH};
use crate::error::Result;
use custom::find_custom_block;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Knobs for a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Top-level tags whose content is emitted as plain text, markup ignored.
    pub black_list: Vec<String>,
    /// Deepest element nesting accepted before the conversion fails.
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            black_list: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A configured converter.
///
/// ```ignore
/// let delta = HtmlToDelta::new()
///     .with_options(ConvertOptions { black_list: vec!["table".into()], ..Default::default() })
///     .convert("<p>Hello <b>world</b></p>")?;
/// ```
pub struct HtmlToDelta {
    operations: Box<dyn HtmlOperations>,
    custom_blocks: Vec<Box<dyn CustomBlock>>,
    options: ConvertOptions,
}

impl Default for HtmlToDelta {
    fn default() -> Self {
        Self {
            operations: Box::new(DefaultHtmlOperations),
            custom_blocks: Vec::new(),
            options: ConvertOptions::default(),
        }
    }
}

impl fmt::Debug for HtmlToDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlToDelta")
            .field("custom_blocks", &self.custom_blocks.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl HtmlToDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends custom blocks; earlier registrations take precedence.
    pub fn with_custom_blocks(
        mut self,
        blocks: impl IntoIterator<Item = Box<dyn CustomBlock>>,
    ) -> Self {
        self.custom_blocks.extend(blocks);
        self
    }

    pub fn with_custom_block(mut self, block: impl CustomBlock + 'static) -> Self {
        self.custom_blocks.push(Box::new(block));
        self
    }

    /// Replaces the per-tag strategy.
    pub fn with_operations(mut self, operations: impl HtmlOperations + 'static) -> Self {
        self.operations = Box::new(operations);
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts an HTML document or fragment.
    pub fn convert(&self, html: &str) -> Result<Delta> {
        // Indentation between tags would otherwise surface as stray text inserts.
        let html: String = html.lines().map(str::trim_start).collect();
        let document = dom::parse_with_limit(&html, self.options.max_depth)?;

        let roots = document
            .find_element("body")
            .or_else(|| document.find_element("html"))
            .map(|root| root.children())
            .unwrap_or_else(|| document.children());

        let resolver = Resolver::new(
            self.operations.as_ref(),
            &self.custom_blocks,
            self.options.max_depth,
        );
        let mut delta = Delta::new();

        for (index, node) in roots.iter().enumerate() {
            let next_is_block = roots
                .get(index + 1)
                .and_then(Node::as_element)
                .is_some_and(|next| tags::is_block(next.tag()));

            if let Node::Element(element) = node {
                if let Some(block) = find_custom_block(&self.custom_blocks, element) {
                    trace!("custom block took over top-level <{}>", element.tag());
                    delta.extend(block.convert(element, &Default::default()));
                    continue;
                }

                if self.is_black_listed(element.tag()) {
                    debug!("flattening black-listed <{}> to text", element.tag());
                    delta.insert(element.text_content(), None);
                    if next_is_block {
                        delta.insert("\n", None);
                    }
                    continue;
                }
            }

            delta.extend(resolver.resolve(node, 0, next_is_block)?);
        }

        if needs_final_newline(delta.last()) {
            delta.insert("\n", None);
        }
        Ok(delta)
    }

    fn is_black_listed(&self, tag: &str) -> bool {
        self.options
            .black_list
            .iter()
            .any(|listed| listed.eq_ignore_ascii_case(tag))
    }
}

/// Whether a delta ending in `last` still lacks a bare terminating newline.
fn needs_final_newline(last: Option<&Op>) -> bool {
    match last {
        None => true,
        Some(op) => !op.ends_with_newline() || op.attributes.is_some(),
    }
}
