use color_eyre::eyre::{eyre, Result};
use swatch_theme::contrast::{wcag_grade, AA_NORMAL};
use swatch_theme::utils::{
    generate_shades, get_contrast_color, get_contrast_ratio, hex_to_hsl, hsl_to_hex, is_valid_hsl,
};
use swatch_theme::{ColorToken, Hsl};

fn parse_color(value: &str) -> Result<ColorToken> {
    let token = ColorToken::parse(value);
    if token.is_raw() {
        return Err(eyre!(
            "Unrecognized color '{}' (expected #RRGGBB, \"<h> <s>% <l>%\" or oklch(L C H))",
            value
        ));
    }
    Ok(token)
}

/// Any supported color as an HSL triplet.
fn parse_hsl(value: &str) -> Result<Hsl> {
    if is_valid_hsl(value.trim()) {
        return value.trim().parse::<Hsl>().map_err(|e| eyre!(e));
    }
    if value.trim().starts_with('#') {
        return hex_to_hsl(value).map_err(|e| eyre!(e));
    }
    parse_color(value)?
        .to_rgb()
        .map(|rgb| rgb.to_hsl())
        .ok_or_else(|| eyre!("Unrecognized color '{}'", value))
}

pub fn describe(value: &str) -> Result<Vec<(&'static str, String)>> {
    let token = parse_color(value)?;
    let rgb = token
        .to_rgb()
        .ok_or_else(|| eyre!("Unrecognized color '{}'", value))?;

    Ok(vec![
        ("format", token.format_label().to_string()),
        ("hex", rgb.to_hex()),
        ("hsl", rgb.to_hsl().to_string()),
        ("oklch", token.to_css_value()),
    ])
}

pub fn run_convert(value: &str) -> Result<()> {
    for (label, value) in describe(value)? {
        println!("{:<6} {}", label, value);
    }
    Ok(())
}

pub fn run_contrast(background: &str, foreground: Option<&str>) -> Result<()> {
    let bg = parse_hsl(background)?;
    let fg = match foreground {
        Some(value) => parse_hsl(value)?,
        None => {
            let suggested = get_contrast_color(&bg);
            println!("suggested text: {}", suggested);
            suggested
        }
    };

    let ratio = get_contrast_ratio(&bg, &fg);
    let grade = wcag_grade(ratio);
    println!("{:.2}:1 {}", ratio, grade.label());

    if ratio < AA_NORMAL {
        std::process::exit(1);
    }
    Ok(())
}

pub fn shade_scale(base: &str) -> Result<Vec<(u16, Hsl, String)>> {
    let base = parse_hsl(base)?;
    Ok(generate_shades(&base)
        .into_iter()
        .map(|(key, hsl)| (key, hsl, hsl_to_hex(&hsl)))
        .collect())
}

pub fn run_shades(base: &str) -> Result<()> {
    for (key, hsl, hex) in shade_scale(base)? {
        println!("{:>4}  {:<22} {}", key, hsl.to_string(), hex);
    }
    Ok(())
}
