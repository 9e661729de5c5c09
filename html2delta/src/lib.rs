//! HTML to Delta conversion
//!
//!     This crate converts an HTML document or fragment into a Delta: the flat list of insert
//!     operations that rich-text editors use as their document model. Text runs carry inline
//!     attributes (bold, color, link, ...), and every line ends in a "\n" insert that carries the
//!     block attributes of that line (header, list, align, indent, ...).
//!
//!     This is a pure lib: it powers html2delta-cli but is shell agnostic, that is no code here
//!     should read env vars, print, or touch the filesystem.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ConvertError
//!     ├── delta.rs                # Op, Attributes, Delta and their wire format
//!     ├── dom.rs                  # html5ever adapter into an owned Node tree
//!     ├── css                     # style="" grammar, colors and lengths
//!     └── convert
//!         ├── mod.rs              # HtmlToDelta, the top-level driver
//!         ├── resolver.rs         # Block-level dispatch and the HtmlOperations trait
//!         ├── default_ops.rs      # Built-in per-tag rules
//!         ├── node_processor.rs   # Inline walker
//!         ├── custom.rs           # CustomBlock overrides
//!         └── tags.rs             # Tag predicates
//!
//! Core Algorithm
//!
//!     The hard part is flattening a tree into lines. Inline formatting is inherited downwards:
//!     each recursion frame copies its parent's attributes and adds its own, so a text node sees
//!     everything that applies to it and siblings never see each other's formatting. Block
//!     formatting goes the other way: it is pulled out of the element's style and written once,
//!     on the newline that closes the block. Lists add nesting on top of that, where a nested list
//!     must close its parent item's line before its own items start.
//!
//! Extension
//!
//!     Two hooks change the output without forking the walker:
//!     - [`CustomBlock`]: take over specific elements (and their whole subtree).
//!     - [`HtmlOperations`]: replace the per-tag rules, keeping dispatch and recursion.
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.

pub mod convert;
pub mod css;
pub mod delta;
pub mod dom;
pub mod error;

pub use convert::{
    ConvertOptions, CustomBlock, DefaultHtmlOperations, HtmlOperations, HtmlToDelta, Resolver,
};
pub use delta::{AttrValue, Attributes, Delta, Embed, Insert, Op};
pub use dom::{Document, Element, Node};
pub use error::{ConvertError, Result};

/// Converts HTML with the default rules and options.
pub fn convert(html: &str) -> Result<Delta> {
    HtmlToDelta::new().convert(html)
}
