//! CSS length conversion
//!
//! Two conversions are needed: lengths to pixels (for `font-size`) and lengths to an indent
//! level (for `padding-left`/`padding-right`). The first is strict and reports unknown units,
//! the second is lenient and maps anything it does not understand to no indent at all.

use crate::error::{ConvertError, Result};

pub const CM_SIZE_MULTIPLIER: f64 = 37.7952755906;
pub const MM_SIZE_MULTIPLIER: f64 = 3.7795275591;
pub const INCH_SIZE_MULTIPLIER: f64 = 96.0;
pub const POINT_SIZE_MULTIPLIER: f64 = 1.3333333333;
pub const PICAS_SIZE_MULTIPLIER: f64 = 16.0;

/// Font size assumed for `em` and `rem` when the caller has none.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Deepest indent level an editor block can carry.
pub const MAX_INDENT: u8 = 5;

/// Converts a CSS length to pixels using the default font sizes.
pub fn px(value: &str) -> Result<f64> {
    px_with_font_size(value, DEFAULT_FONT_SIZE, DEFAULT_FONT_SIZE)
}

/// Converts a CSS length to pixels.
///
/// `em` is resolved against `font_size`, `rem` against `root_font_size`.
pub fn px_with_font_size(value: &str, font_size: f64, root_font_size: f64) -> Result<f64> {
    let (number, unit) = split_length(value);
    match unit.as_str() {
        "px" => Ok(number),
        "cm" => Ok(number * CM_SIZE_MULTIPLIER),
        "mm" => Ok(number * MM_SIZE_MULTIPLIER),
        "in" => Ok(number * INCH_SIZE_MULTIPLIER),
        "pt" => Ok(number * POINT_SIZE_MULTIPLIER),
        "pc" => Ok(number * PICAS_SIZE_MULTIPLIER),
        "em" => Ok(number * font_size),
        "rem" => Ok(number * root_font_size),
        _ => Err(ConvertError::UnsupportedUnit(unit)),
    }
}

/// Converts a padding length to an indent level in `0..=MAX_INDENT`.
///
/// 16px, 12pt, 1pc, 1em, 1rem and 100% each count as one level. Unknown units give 0.
pub fn indent(value: &str) -> u8 {
    let (number, unit) = split_length(value);
    let levels = match unit.as_str() {
        "px" => number / 16.0,
        "pt" => number / 12.0,
        "pc" | "em" | "rem" => number,
        "%" => number / 100.0,
        _ => 0.0,
    };
    clamp_indent(levels.round())
}

/// Clamps a (possibly fractional or negative) level to `0..=MAX_INDENT`.
pub(crate) fn clamp_indent(levels: f64) -> u8 {
    if levels.is_nan() || levels < 1.0 {
        0
    } else if levels > f64::from(MAX_INDENT) {
        MAX_INDENT
    } else {
        levels as u8
    }
}

/// Splits `"12.5pt"` into `(12.5, "pt")`. A missing number reads as 0.
fn split_length(value: &str) -> (f64, String) {
    let value = value.trim();
    let split = value
        .char_indices()
        .find(|(index, c)| !(c.is_ascii_digit() || *c == '.' || (*index == 0 && matches!(c, '-' | '+'))))
        .map_or(value.len(), |(index, _)| index);
    let (number, unit) = value.split_at(split);
    (
        number.parse().unwrap_or(0.0),
        unit.trim().to_ascii_lowercase(),
    )
}
