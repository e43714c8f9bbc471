//! Derived-color helpers in the HSL-triplet domain.
//!
//! These back the editor-facing features: picking a readable foreground for
//! a background, checking contrast and building shade ramps. Hex ↔ HSL here
//! is implemented directly against the triplet format rather than through
//! the OKLCH pipeline in [`crate::convert`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::convert::ColorError;
use crate::types::Hsl;

/// Foreground chosen for light backgrounds.
pub const DARK_FOREGROUND: Hsl = Hsl::new(222.2, 84.0, 4.9);

/// Foreground chosen for dark backgrounds.
pub const LIGHT_FOREGROUND: Hsl = Hsl::new(210.0, 40.0, 98.0);

const LUMINANCE_THRESHOLD: f64 = 0.5;

/// Shade ramp keys paired with their fixed lightness.
pub const SHADE_STOPS: [(u16, f64); 11] = [
    (50, 95.0),
    (100, 90.0),
    (200, 80.0),
    (300, 70.0),
    (400, 60.0),
    (500, 50.0),
    (600, 40.0),
    (700, 30.0),
    (800, 20.0),
    (900, 10.0),
    (950, 5.0),
];

const SATURATION_STEP: f64 = 4.0;
const BASE_STOP_INDEX: usize = 5;

/// WCAG relative luminance of an HSL color.
pub fn get_luminance(hsl: &Hsl) -> f64 {
    hsl.to_rgb().luminance()
}

/// WCAG contrast ratio, `(lighter + 0.05) / (darker + 0.05)`.
pub fn get_contrast_ratio(a: &Hsl, b: &Hsl) -> f64 {
    let l1 = get_luminance(a);
    let l2 = get_luminance(b);
    (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05)
}

/// Pick a fixed dark or light foreground depending on background luminance.
pub fn get_contrast_color(background: &Hsl) -> Hsl {
    if get_luminance(background) > LUMINANCE_THRESHOLD {
        DARK_FOREGROUND
    } else {
        LIGHT_FOREGROUND
    }
}

pub fn adjust_lightness(hsl: &Hsl, lightness: f64) -> Hsl {
    Hsl::new(hsl.h, hsl.s, lightness)
}

/// Build the 50..950 tint/shade ramp for `base`. Key 500 is `base` itself.
pub fn generate_shades(base: &Hsl) -> BTreeMap<u16, Hsl> {
    let mut shades: BTreeMap<u16, Hsl> = SHADE_STOPS
        .iter()
        .enumerate()
        .map(|(index, &(key, lightness))| {
            let offset = index as f64 - BASE_STOP_INDEX as f64;
            let saturation = round1((base.s + offset * SATURATION_STEP).clamp(0.0, 100.0));
            (key, Hsl::new(base.h, saturation, lightness))
        })
        .collect();
    shades.insert(500, *base);
    shades
}

fn hsl_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{1,3}(\.\d+)? \d{1,3}(\.\d+)?% \d{1,3}(\.\d+)?%$")
            .expect("hsl pattern compiles")
    })
}

/// Strict check for the `"<h> <s>% <l>%"` token format.
pub fn is_valid_hsl(value: &str) -> bool {
    hsl_pattern().is_match(value)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Hex to an HSL triplet rounded to one decimal.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| -> Result<f64, ColorError> {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| v as f64 / 255.0)
            .map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };
    let (r, g, b) = (channel(0..2)?, channel(2..4)?, channel(4..6)?);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    let (h, s) = if delta == 0.0 {
        (0.0, 0.0)
    } else {
        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let sector = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        (sector * 60.0, s)
    };

    Ok(Hsl::new(round1(h), round1(s * 100.0), round1(l * 100.0)))
}

/// HSL triplet to lowercase `#rrggbb`.
pub fn hsl_to_hex(hsl: &Hsl) -> String {
    let h = hsl.h.rem_euclid(360.0);
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);
    let a = s * l.min(1.0 - l);

    let channel = |n: f64| -> u8 {
        let k = (n + h / 30.0) % 12.0;
        let value = l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    };

    format!("#{:02x}{:02x}{:02x}", channel(0.0), channel(8.0), channel(4.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsl(s: &str) -> Hsl {
        s.parse().unwrap()
    }

    #[test]
    fn test_luminance_of_white_and_black() {
        assert!((get_luminance(&hsl("0 0% 100%")) - 1.0).abs() < 1e-9);
        assert_eq!(get_luminance(&hsl("0 0% 0%")), 0.0);
    }

    #[test]
    fn test_contrast_ratio_is_symmetric() {
        let samples = [
            "0 0% 100%",
            "222.2 84% 4.9%",
            "210 40% 96.1%",
            "0 84.2% 60.2%",
            "215.4 16.3% 46.9%",
        ];
        for a in samples {
            for b in samples {
                let ab = get_contrast_ratio(&hsl(a), &hsl(b));
                let ba = get_contrast_ratio(&hsl(b), &hsl(a));
                assert_eq!(ab, ba, "{a} vs {b}");
            }
            assert_eq!(get_contrast_ratio(&hsl(a), &hsl(a)), 1.0);
        }
    }

    #[test]
    fn test_contrast_ratio_black_on_white() {
        let ratio = get_contrast_ratio(&hsl("0 0% 0%"), &hsl("0 0% 100%"));
        assert!((ratio - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_contrast_color_is_binary() {
        assert_eq!(get_contrast_color(&hsl("0 0% 100%")), DARK_FOREGROUND);
        assert_eq!(get_contrast_color(&hsl("60 100% 50%")), DARK_FOREGROUND);
        assert_eq!(get_contrast_color(&hsl("0 0% 0%")), LIGHT_FOREGROUND);
        assert_eq!(get_contrast_color(&hsl("0 0% 50%")), LIGHT_FOREGROUND);
        assert_eq!(DARK_FOREGROUND.to_string(), "222.2 84% 4.9%");
        assert_eq!(LIGHT_FOREGROUND.to_string(), "210 40% 98%");
    }

    #[test]
    fn test_adjust_lightness_keeps_hue_and_saturation() {
        let adjusted = adjust_lightness(&hsl("210 40% 98%"), 20.0);
        assert_eq!(adjusted, Hsl::new(210.0, 40.0, 20.0));
    }

    #[test]
    fn test_generate_shades() {
        let base = hsl("221.2 83.2% 53.3%");
        let shades = generate_shades(&base);

        assert_eq!(shades.len(), 11);
        assert_eq!(shades[&500], base);
        assert_eq!(shades[&50].l, 95.0);
        assert_eq!(shades[&950].l, 5.0);
        assert!(shades.values().all(|s| s.h == base.h));
        assert!(shades[&50].s < shades[&900].s);
        assert!(shades.values().all(|s| (0.0..=100.0).contains(&s.s)));
        assert_eq!(
            shades.keys().copied().collect::<Vec<_>>(),
            vec![50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950]
        );
    }

    #[test]
    fn test_shade_saturation_stays_on_one_decimal() {
        let shades = generate_shades(&hsl("215.4 16.3% 46.9%"));

        assert_eq!(shades[&100].to_string(), "215.4 0.3% 90%");
        assert_eq!(shades[&50].s, 0.0);
        assert!(shades
            .values()
            .all(|s| is_valid_hsl(&s.to_string())));
    }

    #[test]
    fn test_is_valid_hsl() {
        assert!(is_valid_hsl("222.2 84% 4.9%"));
        assert!(is_valid_hsl("0 0% 100%"));
        assert!(!is_valid_hsl("hsl(222, 84%, 4.9%)"));
        assert!(!is_valid_hsl("222.2 84 4.9"));
        assert!(!is_valid_hsl("222.2, 84%, 4.9%"));
        assert!(!is_valid_hsl("#ffffff"));
    }

    #[test]
    fn test_hex_to_hsl() {
        assert_eq!(hex_to_hsl("#ffffff").unwrap(), Hsl::new(0.0, 0.0, 100.0));
        assert_eq!(hex_to_hsl("#ff0000").unwrap(), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(hex_to_hsl("#0000ff").unwrap(), Hsl::new(240.0, 100.0, 50.0));
        assert_eq!(hex_to_hsl("#ff00ff").unwrap(), Hsl::new(300.0, 100.0, 50.0));
        assert!(hex_to_hsl("#zzzzzz").is_err());
    }

    #[test]
    fn test_hsl_to_hex() {
        assert_eq!(hsl_to_hex(&hsl("0 100% 50%")), "#ff0000");
        assert_eq!(hsl_to_hex(&hsl("120 100% 50%")), "#00ff00");
        assert_eq!(hsl_to_hex(&hsl("240 100% 50%")), "#0000ff");
        assert_eq!(hsl_to_hex(&hsl("0 0% 100%")), "#ffffff");
        assert_eq!(hsl_to_hex(&hsl("0 0% 0%")), "#000000");
    }

    #[test]
    fn test_hex_hsl_families_agree() {
        for hex in ["#1e66f5", "#d20f39", "#40a02b", "#4c4f69"] {
            let via_hsl = hsl_to_hex(&hex_to_hsl(hex).unwrap());
            let expected = crate::convert::hex_to_rgb(hex).unwrap();
            let actual = crate::convert::hex_to_rgb(&via_hsl).unwrap();
            assert!(expected.r.abs_diff(actual.r) <= 1, "{hex} -> {via_hsl}");
            assert!(expected.g.abs_diff(actual.g) <= 1, "{hex} -> {via_hsl}");
            assert!(expected.b.abs_diff(actual.b) <= 1, "{hex} -> {via_hsl}");
        }
    }
}
