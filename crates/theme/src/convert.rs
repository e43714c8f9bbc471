//! Conversions between HEX, RGB, HSL and OKLCH.
//!
//! OKLCH goes through sRGB → linear RGB → CIE XYZ (D65) → LMS → OKLab → OKLCH
//! and back through the exact inverse matrices. Values are only rounded at
//! the RGB byte boundary and when an OKLCH value is formatted.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{Hsl, Oklch, Rgb};

/// Returned by [`oklch_to_hex`] when the input cannot be parsed.
pub const FALLBACK_HEX: &str = "#000000";

/// Returned by [`hsl_string_to_oklch`] when the input cannot be parsed.
pub const FALLBACK_OKLCH: &str = "oklch(0 0 0)";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid hex color: \"{0}\" (expected #RRGGBB)")]
    InvalidHex(String),

    #[error("Invalid OKLCH color: \"{0}\" (expected oklch(L C H))")]
    InvalidOklch(String),

    #[error("Invalid HSL color: \"{0}\" (expected \"<h> <s>% <l>%\")")]
    InvalidHsl(String),
}

type Matrix = [[f64; 3]; 3];

const LINEAR_SRGB_TO_XYZ: Matrix = [
    [0.41239079926595934, 0.357584339383878, 0.1804807884018343],
    [0.21263900587151027, 0.715168678767756, 0.07219231536073371],
    [0.01933081871559182, 0.11919477979462598, 0.9505321522496607],
];

const XYZ_TO_LINEAR_SRGB: Matrix = [
    [3.2409699419045226, -1.537383177570094, -0.4986107602930034],
    [-0.9692436362808796, 1.8759675015077202, 0.04155505740717559],
    [0.05563007969699366, -0.20397695888897652, 1.0569715142428786],
];

const XYZ_TO_LMS: Matrix = [
    [0.8190224379967030, 0.3619062600528904, -0.1288737815209879],
    [0.0329836539323885, 0.9292868615863434, 0.0361446663506424],
    [0.0481771893596242, 0.2642395317527308, 0.6335478284694309],
];

const LMS_TO_XYZ: Matrix = [
    [1.2268798758459243, -0.5578149944602171, 0.2813910456659647],
    [-0.0405757452148008, 1.1122868032803170, -0.0717110580655164],
    [-0.0763729366746601, -0.4214933324022432, 1.5869240198367816],
];

const LMS_TO_OKLAB: Matrix = [
    [0.2104542683093140, 0.7936177747023054, -0.0040720430116193],
    [1.9779985324311684, -2.4285922420485799, 0.4505937096174110],
    [0.0259040424655478, 0.7827717124575296, -0.8086757549230774],
];

const OKLAB_TO_LMS: Matrix = [
    [1.0000000000000000, 0.3963377773761749, 0.2158037573099136],
    [1.0000000000000000, -0.1055613458156586, -0.0638541728258133],
    [1.0000000000000000, -0.0894841775298119, -1.2914855480194092],
];

fn multiply(m: &Matrix, v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// sRGB transfer function, decode direction (IEC 61966-2-1).
pub fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function, encode direction (IEC 61966-2-1).
pub fn linear_to_srgb(v: f64) -> f64 {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

pub(crate) fn srgb_channel_to_linear(channel: u8) -> f64 {
    srgb_to_linear(channel as f64 / 255.0)
}

/// Round and clamp a 0-255 channel value.
fn to_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

pub(crate) fn srgb_to_oklch(rgb: Rgb) -> Oklch {
    let linear = [
        srgb_channel_to_linear(rgb.r),
        srgb_channel_to_linear(rgb.g),
        srgb_channel_to_linear(rgb.b),
    ];
    let xyz = multiply(&LINEAR_SRGB_TO_XYZ, linear);
    let lms = multiply(&XYZ_TO_LMS, xyz);
    let lms_cbrt = [lms[0].cbrt(), lms[1].cbrt(), lms[2].cbrt()];
    let [l, a, b] = multiply(&LMS_TO_OKLAB, lms_cbrt);

    let c = (a * a + b * b).sqrt();
    let h = b.atan2(a).to_degrees().rem_euclid(360.0);
    Oklch::new(l, c, h)
}

pub(crate) fn oklch_to_srgb(oklch: Oklch) -> Rgb {
    let hue = oklch.h.to_radians();
    let lab = [oklch.l, oklch.c * hue.cos(), oklch.c * hue.sin()];
    let lms_cbrt = multiply(&OKLAB_TO_LMS, lab);
    let lms = [
        lms_cbrt[0].powi(3),
        lms_cbrt[1].powi(3),
        lms_cbrt[2].powi(3),
    ];
    let xyz = multiply(&LMS_TO_XYZ, lms);
    let [r, g, b] = multiply(&XYZ_TO_LINEAR_SRGB, xyz);

    Rgb::new(
        to_byte(linear_to_srgb(r) * 255.0),
        to_byte(linear_to_srgb(g) * 255.0),
        to_byte(linear_to_srgb(b) * 255.0),
    )
}

fn oklch_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^oklch\(\s*(-?[0-9]*\.?[0-9]+)\s+(-?[0-9]*\.?[0-9]+)\s+(-?[0-9]*\.?[0-9]+)\s*\)$")
            .expect("oklch pattern compiles")
    })
}

pub(crate) fn parse_oklch(value: &str) -> Result<Oklch, ColorError> {
    let invalid = || ColorError::InvalidOklch(value.to_string());
    let captures = oklch_pattern().captures(value.trim()).ok_or_else(invalid)?;
    let number = |index: usize| -> Result<f64, ColorError> {
        captures[index].parse::<f64>().map_err(|_| invalid())
    };
    Ok(Oklch::new(number(1)?, number(2)?, number(3)?))
}

pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    Rgb::from_hex(hex).ok_or_else(|| ColorError::InvalidHex(hex.to_string()))
}

/// Format channels as `#rrggbb`, rounding and clamping each to [0, 255].
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Rgb::new(to_byte(r), to_byte(g), to_byte(b)).to_hex()
}

/// Format an sRGB color as `oklch(L C H)` with 3 decimals.
pub fn rgb_to_oklch(r: u8, g: u8, b: u8) -> String {
    srgb_to_oklch(Rgb::new(r, g, b)).to_string()
}

pub fn hex_to_oklch(hex: &str) -> Result<String, ColorError> {
    let rgb = hex_to_rgb(hex)?;
    Ok(rgb_to_oklch(rgb.r, rgb.g, rgb.b))
}

pub fn oklch_to_rgb(oklch: &str) -> Result<Rgb, ColorError> {
    parse_oklch(oklch).map(oklch_to_srgb)
}

/// Convert an `oklch(L C H)` string to hex, yielding [`FALLBACK_HEX`] when it
/// does not parse.
pub fn oklch_to_hex(oklch: &str) -> String {
    match oklch_to_rgb(oklch) {
        Ok(rgb) => rgb.to_hex(),
        Err(e) => {
            tracing::debug!(error = %e, "Falling back to black");
            FALLBACK_HEX.to_string()
        }
    }
}

/// HSL (degrees, percent, percent) to sRGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0);
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(
        to_byte((r + m) * 255.0),
        to_byte((g + m) * 255.0),
        to_byte((b + m) * 255.0),
    )
}

/// sRGB to HSL (degrees, percent, percent), unrounded.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h * 60.0, s * 100.0, l * 100.0)
}

/// Convert a `"<h> <s>% <l>%"` string to `oklch(L C H)`, yielding
/// [`FALLBACK_OKLCH`] when it does not hold three numbers.
pub fn hsl_string_to_oklch(hsl: &str) -> String {
    match hsl.parse::<Hsl>() {
        Ok(hsl) => {
            let rgb = hsl.to_rgb();
            rgb_to_oklch(rgb.r, rgb.g, rgb.b)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Falling back to oklch(0 0 0)");
            FALLBACK_OKLCH.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightness(oklch: &str) -> f64 {
        parse_oklch(oklch).unwrap().l
    }

    #[test]
    fn test_hex_rgb_roundtrip_is_exact() {
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(17) {
                for b in (0..=255u16).step_by(51) {
                    let hex = rgb_to_hex(r as f64, g as f64, b as f64);
                    assert_eq!(
                        hex_to_rgb(&hex).unwrap(),
                        Rgb::new(r as u8, g as u8, b as u8)
                    );
                }
            }
        }
    }

    #[test]
    fn test_rgb_to_hex_rounds_and_clamps() {
        assert_eq!(rgb_to_hex(254.6, -3.0, 300.0), "#ff00ff");
        assert_eq!(rgb_to_hex(127.4, 127.5, 0.49), "#7f8000");
    }

    /// The 3-decimal text form costs precision: about 651k of the 16.7M byte
    /// triples come back more than 1 off (worst case 8, e.g. 0 0 234). This
    /// grid samples the typical case only. The exact pipeline is covered by
    /// `test_unrounded_roundtrip_is_exact`.
    #[test]
    fn test_oklch_roundtrip_within_one() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(17) {
                for b in (0..=255u16).step_by(17) {
                    let (r, g, b) = (r as u8, g as u8, b as u8);
                    let back = oklch_to_rgb(&rgb_to_oklch(r, g, b)).unwrap();
                    assert!(
                        back.r.abs_diff(r) <= 1 && back.g.abs_diff(g) <= 1 && back.b.abs_diff(b) <= 1,
                        "({r}, {g}, {b}) came back as {back:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_unrounded_roundtrip_is_exact() {
        for r in (0..=255u16).step_by(5) {
            for g in (0..=255u16).step_by(5) {
                for b in (0..=255u16).step_by(5) {
                    let rgb = Rgb::new(r as u8, g as u8, b as u8);
                    assert_eq!(oklch_to_srgb(srgb_to_oklch(rgb)), rgb);
                }
            }
        }
    }

    #[test]
    fn test_known_oklch_values() {
        assert_eq!(rgb_to_oklch(0, 0, 0), "oklch(0.000 0.000 0.000)");
        assert!((lightness(&rgb_to_oklch(255, 255, 255)) - 1.0).abs() < 0.001);

        let red = parse_oklch(&rgb_to_oklch(255, 0, 0)).unwrap();
        assert!((red.l - 0.628).abs() < 0.002);
        assert!((red.c - 0.258).abs() < 0.002);
        assert!((red.h - 29.23).abs() < 0.1);
    }

    #[test]
    fn test_oklch_parse_rejects_bad_pattern() {
        assert!(oklch_to_rgb("oklch(0.5 0.1)").is_err());
        assert!(oklch_to_rgb("lch(50 10 200)").is_err());
        assert!(oklch_to_rgb("oklch(a b c)").is_err());
        assert!(oklch_to_rgb("oklch( 0.5  0.1  200 )").is_ok());
    }

    #[test]
    fn test_oklch_to_hex_falls_back_to_black() {
        assert_eq!(oklch_to_hex("not a color"), FALLBACK_HEX);
        assert_eq!(oklch_to_hex("oklch(1.000 0.000 0.000)"), "#ffffff");
    }

    #[test]
    fn test_hsl_sector_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 100.0, 50.0), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(60.0, 100.0, 50.0), Rgb::new(255, 255, 0));
        assert_eq!(hsl_to_rgb(120.0, 100.0, 50.0), Rgb::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(180.0, 100.0, 50.0), Rgb::new(0, 255, 255));
        assert_eq!(hsl_to_rgb(240.0, 100.0, 50.0), Rgb::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(300.0, 100.0, 50.0), Rgb::new(255, 0, 255));
        assert_eq!(hsl_to_rgb(360.0, 100.0, 50.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_rgb_to_hsl() {
        let hsl = rgb_to_hsl(255, 0, 0);
        assert_eq!(hsl, Hsl::new(0.0, 100.0, 50.0));

        let gray = rgb_to_hsl(128, 128, 128);
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);

        let blue = rgb_to_hsl(0, 0, 255);
        assert!((blue.h - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_hsl_string_to_oklch() {
        assert_eq!(hsl_string_to_oklch("0 0% 0%"), "oklch(0.000 0.000 0.000)");
        assert!((lightness(&hsl_string_to_oklch("0 0% 100%")) - 1.0).abs() < 0.001);
        assert_eq!(hsl_string_to_oklch("0 0%"), FALLBACK_OKLCH);
        assert_eq!(hsl_string_to_oklch("1 2 3 4"), FALLBACK_OKLCH);
    }
}
