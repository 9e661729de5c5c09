//! Style attribute grammar
//!
//! Maps the declarations of an inline `style` string onto Delta attributes:
//!
//! | Declaration                        | Attribute    | Notes                                         |
//! |------------------------------------|--------------|-----------------------------------------------|
//! | `text-align`                       | `align`      | verbatim                                      |
//! | `color`                            | `color`      | normalized to `#rrggbbaa`                     |
//! | `background-color`                 | `background` | normalized to `#rrggbbaa`                     |
//! | `padding-left` / `padding-right`   | `indent`     | omitted when the level is 0                   |
//! | `font-size`                        | `size`       | `small`/`large`/`huge` or whole pixels        |
//! | `font-family`                      | `font`       | verbatim                                      |
//!
//! Bare tokens (no colon) are also understood, because the same grammar is used to read the
//! `align`, `dir` and `data-checked` HTML attributes: `left|center|right|justify` set `align`,
//! `rtl` sets `direction`, and `true`/`false` set `list` to `checked`/`unchecked`.

use super::color::validate_and_get_color;
use super::units::{indent, px};
use crate::delta::Attributes;
use crate::error::Result;
use log::debug;

/// Parses a style declaration string into Delta attributes.
///
/// Only an unsupported color aborts parsing; an unconvertible font size is skipped.
pub fn parse_style_attribute(style: &str) -> Result<Attributes> {
    let mut attributes = Attributes::new();

    for declaration in style.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }

        let Some((key, value)) = declaration.split_once(':') else {
            match declaration {
                "justify" | "center" | "left" | "right" => {
                    attributes.insert("align", declaration);
                }
                "rtl" => {
                    attributes.insert("direction", "rtl");
                }
                "true" => {
                    attributes.insert("list", "checked");
                }
                "false" => {
                    attributes.insert("list", "unchecked");
                }
                _ => {}
            }
            continue;
        };

        let key = key.trim();
        let value = value.trim();
        match key {
            "text-align" => {
                attributes.insert("align", value);
            }
            "color" => {
                attributes.insert("color", validate_and_get_color(value)?);
            }
            "background-color" => {
                attributes.insert("background", validate_and_get_color(value)?);
            }
            "padding-left" | "padding-right" => {
                let level = indent(value);
                if level != 0 {
                    attributes.insert("indent", level);
                }
            }
            "font-size" => {
                if let Some(size) = font_size(value) {
                    attributes.insert("size", size);
                }
            }
            "font-family" => {
                attributes.insert("font", value);
            }
            _ => {}
        }
    }

    Ok(attributes)
}

fn font_size(value: &str) -> Option<String> {
    match value {
        "0.75em" => Some("small".to_string()),
        "1.5em" => Some("large".to_string()),
        "2.5em" => Some("huge".to_string()),
        _ => match px(value) {
            Ok(size) if size <= 10.0 => Some("small".to_string()),
            Ok(size) => Some(format!("{}", size.floor() as i64)),
            Err(err) => {
                debug!("skipping font-size `{value}`: {err}");
                None
            }
        },
    }
}

/// Keeps the layout declarations of an image style (`width`, `height`, `margin`).
///
/// Declarations stay in first-appearance order; a repeated key overwrites in place.
pub fn parse_image_style_attribute(style: &str) -> Vec<(String, String)> {
    let mut kept: Vec<(String, String)> = Vec::new();
    for declaration in style.split(';') {
        let Some((key, value)) = declaration.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if !matches!(key, "width" | "height" | "margin") {
            continue;
        }
        let value = value.trim().to_string();
        match kept.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = value,
            None => kept.push((key.to_string(), value)),
        }
    }
    kept
}

/// Re-serializes the layout declarations of an image style as `key:value;key:value`.
pub fn image_style(style: &str) -> String {
    parse_image_style_attribute(style)
        .iter()
        .map(|(key, value)| format!("{key}:{value}"))
        .collect::<Vec<_>>()
        .join(";")
}
