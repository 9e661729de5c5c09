//! Inline CSS handling
//!
//! Everything the converter needs from a `style="..."` attribute: color normalization,
//! length conversion, and the declaration grammar that maps CSS onto Delta attributes.

pub mod color;
pub mod style;
pub mod units;

pub use color::{color_to_hex, hsl_to_rgb, to_hex, validate_and_get_color, Rgba};
pub use style::{image_style, parse_image_style_attribute, parse_style_attribute};
pub use units::{indent, px, px_with_font_size, MAX_INDENT};
