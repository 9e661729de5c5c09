//! Color normalization
//!
//! Every color that reaches a Delta attribute is written as `#rrggbbaa`. Hex input is trusted
//! and passed through untouched; `rgb()`, `rgba()`, `hsl()` and `hsla()` are parsed
//! positionally. Anything else (named colors included) is rejected.

use crate::error::{ConvertError, Result};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_hex(self) -> String {
        to_hex(self.r, self.g, self.b, self.a)
    }

    /// Parses `#rrggbbaa` or `#rrggbb` (alpha defaults to 255).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |index: usize| u8::from_str_radix(digits.get(index..index + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, u8::MAX)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

/// Returns hex colors unchanged and converts function syntax to `#rrggbbaa`.
pub fn validate_and_get_color(color: &str) -> Result<String> {
    let color = color.trim();
    if color.starts_with('#') {
        return Ok(color.to_string());
    }
    color_to_hex(color)
}

/// Converts `rgb()`, `rgba()`, `hsl()` or `hsla()` syntax to `#rrggbbaa`.
pub fn color_to_hex(color: &str) -> Result<String> {
    let normalized = color.trim().to_ascii_lowercase();
    let unsupported = || ConvertError::UnsupportedColorFormat(color.to_string());

    let rgba = if let Some(args) = function_args(&normalized, "rgb") {
        match args.as_slice() {
            [r, g, b] => rgb_from(r, g, b, None),
            _ => None,
        }
    } else if let Some(args) = function_args(&normalized, "rgba") {
        match args.as_slice() {
            [r, g, b, a] => rgb_from(r, g, b, Some(a)),
            _ => None,
        }
    } else if let Some(args) = function_args(&normalized, "hsl") {
        match args.as_slice() {
            [h, s, l] => hsl_from(h, s, l, None),
            _ => None,
        }
    } else if let Some(args) = function_args(&normalized, "hsla") {
        match args.as_slice() {
            [h, s, l, a] => hsl_from(h, s, l, Some(a)),
            _ => None,
        }
    } else {
        None
    };

    rgba.map(Rgba::to_hex).ok_or_else(unsupported)
}

/// HSL to RGB. `h` is in degrees, `s` and `l` are fractions in `[0, 1]`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [to_byte(r + m), to_byte(g + m), to_byte(b + m)]
}

pub fn to_hex(r: u8, g: u8, b: u8, a: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

fn function_args<'a>(color: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let inner = color
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

fn rgb_from(r: &str, g: &str, b: &str, a: Option<&&str>) -> Option<Rgba> {
    let alpha = match a {
        Some(a) => alpha(a)?,
        None => u8::MAX,
    };
    Some(Rgba::new(channel(r)?, channel(g)?, channel(b)?, alpha))
}

fn hsl_from(h: &str, s: &str, l: &str, a: Option<&&str>) -> Option<Rgba> {
    let alpha = match a {
        Some(a) => alpha(a)?,
        None => u8::MAX,
    };
    let h: f64 = h.trim_end_matches("deg").parse().ok()?;
    let [r, g, b] = hsl_to_rgb(h, percent(s)?, percent(l)?);
    Some(Rgba::new(r, g, b, alpha))
}

fn channel(value: &str) -> Option<u8> {
    let value: f64 = value.parse().ok()?;
    Some(value.round().clamp(0.0, 255.0) as u8)
}

fn alpha(value: &str) -> Option<u8> {
    let value: f64 = value.parse().ok()?;
    Some(to_byte(value))
}

fn percent(value: &str) -> Option<f64> {
    let value: f64 = value.trim_end_matches('%').trim().parse().ok()?;
    Some(value / 100.0)
}

fn to_byte(fraction: f64) -> u8 {
    (fraction * 255.0).round().clamp(0.0, 255.0) as u8
}
