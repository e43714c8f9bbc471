//! Core color types.
//!
//! This module defines the color values that flow through the pipeline:
//! - `Rgb` - 8-bit sRGB color
//! - `Hsl` - HSL triplet in the `"<h> <s>% <l>%"` design-token format
//! - `Oklch` - perceptual lightness, chroma and hue
//! - `ColorToken` - a color as it is stored in a theme

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::convert::{self, ColorError};

/// RGB color representation.
///
/// Each component is a value from 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new color from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string (e.g., "#ffffff" or "ffffff").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Convert to hex string (e.g., "#ffffff").
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_oklch(&self) -> Oklch {
        convert::srgb_to_oklch(*self)
    }

    pub fn to_hsl(&self) -> Hsl {
        convert::rgb_to_hsl(self.r, self.g, self.b)
    }

    /// Calculate relative luminance (0.0 = black, 1.0 = white).
    pub fn luminance(&self) -> f64 {
        0.2126 * convert::srgb_channel_to_linear(self.r)
            + 0.7152 * convert::srgb_channel_to_linear(self.g)
            + 0.0722 * convert::srgb_channel_to_linear(self.b)
    }

    /// Calculate WCAG contrast ratio between two colors (1:1 to 21:1).
    pub fn contrast_ratio(&self, other: &Rgb) -> f64 {
        let l1 = self.luminance();
        let l2 = other.luminance();
        let lighter = l1.max(l2);
        let darker = l1.min(l2);
        (lighter + 0.05) / (darker + 0.05)
    }
}

/// HSL triplet: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(&self) -> Rgb {
        convert::hsl_to_rgb(self.h, self.s, self.l)
    }

    pub fn to_oklch(&self) -> Oklch {
        self.to_rgb().to_oklch()
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.h, self.s, self.l)
    }
}

impl FromStr for Hsl {
    type Err = ColorError;

    /// Lenient parse: three whitespace-separated numbers, `%` optional.
    /// Use [`crate::utils::is_valid_hsl`] for the strict format check.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidHsl(s.to_string());
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [h, sat, l] = tokens.as_slice() else {
            return Err(invalid());
        };
        let number = |token: &str| token.trim_end_matches('%').parse::<f64>();
        Ok(Self {
            h: number(h).map_err(|_| invalid())?,
            s: number(sat).map_err(|_| invalid())?,
            l: number(l).map_err(|_| invalid())?,
        })
    }
}

/// OKLCH color: `l` in [0, 1], `c` >= 0, `h` in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    pub fn to_rgb(&self) -> Rgb {
        convert::oklch_to_srgb(*self)
    }
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hue = fixed3(self.h);
        if hue >= 360.0 {
            hue = 0.0;
        }
        write!(
            f,
            "oklch({:.3} {:.3} {:.3})",
            fixed3(self.l),
            fixed3(self.c),
            hue
        )
    }
}

impl FromStr for Oklch {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        convert::parse_oklch(s)
    }
}

/// Round to 3 decimals, folding negative zero.
fn fixed3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A color as stored in a theme.
///
/// The variant is decided once, when the token is parsed, so later stages
/// never sniff strings. Anything that is not a `#RRGGBB` hex, an HSL triplet
/// or an `oklch(L C H)` value is kept verbatim as `Raw`. OKLCH tokens keep
/// the text they were written with next to the parsed value, so they reach
/// CSS without losing precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorToken {
    Hex(Rgb),
    Hsl(Hsl),
    Oklch(Oklch, String),
    Raw(String),
}

impl ColorToken {

    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with('#') && trimmed.len() == 7 {
            if let Some(rgb) = Rgb::from_hex(trimmed) {
                return Self::Hex(rgb);
            }
        }
        if trimmed.starts_with("oklch(") {
            if let Ok(oklch) = trimmed.parse::<Oklch>() {
                return Self::Oklch(oklch, trimmed.to_string());
            }
        }
        if crate::utils::is_valid_hsl(trimmed) {
            if let Ok(hsl) = trimmed.parse::<Hsl>() {
                return Self::Hsl(hsl);
            }
        }
        Self::Raw(value.to_string())
    }

    /// Value written into a CSS custom property.
    pub fn to_css_value(&self) -> String {
        match self {
            Self::Hex(rgb) => rgb.to_oklch().to_string(),
            Self::Hsl(hsl) => hsl.to_oklch().to_string(),
            Self::Oklch(_, text) => text.clone(),
            Self::Raw(raw) => raw.clone(),
        }
    }

    /// Resolve to sRGB, if the token is a known color format.
    pub fn to_rgb(&self) -> Option<Rgb> {
        match self {
            Self::Hex(rgb) => Some(*rgb),
            Self::Hsl(hsl) => Some(hsl.to_rgb()),
            Self::Oklch(oklch, _) => Some(oklch.to_rgb()),
            Self::Raw(_) => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    pub fn format_label(&self) -> &'static str {
        match self {
            Self::Hex(_) => "hex",
            Self::Hsl(_) => "hsl",
            Self::Oklch(..) => "oklch",
            Self::Raw(_) => "raw",
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(rgb) => f.write_str(&rgb.to_hex()),
            Self::Hsl(hsl) => write!(f, "{}", hsl),
            Self::Oklch(_, text) => f.write_str(text),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for ColorToken {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for ColorToken {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<ColorToken> for String {
    fn from(token: ColorToken) -> Self {
        token.to_string()
    }
}
