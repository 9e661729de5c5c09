//! Custom block handlers
//!
//! A custom block intercepts elements before any built-in handling. Handlers are consulted
//! in registration order and the first match wins: its output replaces the default
//! conversion of the element *and* of everything below it.
//!
//! ```ignore
//! let converter = HtmlToDelta::new().with_custom_block((
//!     |el: &Element| el.tag() == "my-widget",
//!     |el: &Element, _: &Attributes| vec![Op::embed("widget", el.text_content())],
//! ));
//! ```

use crate::delta::{Attributes, Op};
use crate::dom::Element;

/// Caller-supplied override for specific elements.
pub trait CustomBlock: Send + Sync {
    /// Whether this handler takes over `element`.
    fn matches(&self, element: &Element) -> bool;

    /// Converts a matched element. `attributes` is the inherited inline context at the
    /// point of the match (empty at the document top level).
    fn convert(&self, element: &Element, attributes: &Attributes) -> Vec<Op>;
}

impl<M, C> CustomBlock for (M, C)
where
    M: Fn(&Element) -> bool + Send + Sync,
    C: Fn(&Element, &Attributes) -> Vec<Op> + Send + Sync,
{
    fn matches(&self, element: &Element) -> bool {
        (self.0)(element)
    }

    fn convert(&self, element: &Element, attributes: &Attributes) -> Vec<Op> {
        (self.1)(element, attributes)
    }
}

/// First handler that matches `element`.
pub fn find_custom_block<'a>(
    blocks: &'a [Box<dyn CustomBlock>],
    element: &Element,
) -> Option<&'a dyn CustomBlock> {
    blocks
        .iter()
        .find(|block| block.matches(element))
        .map(|block| block.as_ref())
}
