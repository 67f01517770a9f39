use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const DIM_GREY: Color = Color::rgb(105, 105, 105);
    pub const FOREST_GREEN: Color = Color::rgb(34, 139, 34);
    pub const ORANGE_RED: Color = Color::rgb(255, 69, 0);

    /// Parse `#rgb`, `#rrggbb`, `rgb(r,g,b)`, `rgba(r,g,b,a)` or a CSS name.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex)
                .ok_or_else(|| ColorParseError::Hex(input.to_string()));
        }
        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body).ok_or_else(|| {
                ColorParseError::Functional(input.to_string())
            });
        }
        NAMED_COLORS
            .get(lower.as_str())
            .copied()
            .ok_or_else(|| ColorParseError::UnknownName(input.to_string()))
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// CSS notation: hex when opaque, `rgba()` otherwise.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = (self.alpha() * 1000.0).round() / 1000.0;
            format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::rgb(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
        )),
        6 => Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?)),
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<u8>().ok();
    match parts.as_slice() {
        [r, g, b] => Some(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let a: f64 = a.parse().ok()?;
            if !(0.0..=1.0).contains(&a) {
                return None;
            }
            Some(Color::rgba(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                (a * 255.0).round() as u8,
            ))
        }
        _ => None,
    }
}

static NAMED_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("black", Color::BLACK),
        ("white", Color::WHITE),
        ("grey", Color::GREY),
        ("gray", Color::GREY),
        ("dimgrey", Color::DIM_GREY),
        ("dimgray", Color::DIM_GREY),
        ("forestgreen", Color::FOREST_GREEN),
        ("orangered", Color::ORANGE_RED),
        ("steelblue", Color::rgb(70, 130, 180)),
        ("darkred", Color::rgb(139, 0, 0)),
        ("green", Color::rgb(0, 128, 0)),
        ("red", Color::rgb(255, 0, 0)),
        ("blue", Color::rgb(0, 0, 255)),
    ])
});

/// Fallback color for the `index`-th code without an assigned color.
pub fn category10(index: usize) -> Color {
    let palette = colorous::CATEGORY10;
    let c = palette[index % palette.len()];
    Color::rgb(c.r, c.g, c.b)
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ColorParseError {
    #[error("invalid hex color `{0}`")]
    Hex(String),
    #[error("invalid rgb()/rgba() color `{0}`")]
    Functional(String),
    #[error("unknown color name `{0}`")]
    UnknownName(String),
}
