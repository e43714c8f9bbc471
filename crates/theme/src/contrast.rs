use std::collections::BTreeMap;

use crate::{ColorMode, ThemeConfig};

pub const AA_NORMAL: f64 = 4.5;
pub const AA_LARGE: f64 = 3.0;
pub const AAA_NORMAL: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WcagGrade {
    Aaa,
    Aa,
    AaLarge,
    Fail,
}

impl WcagGrade {
    pub fn label(&self) -> &'static str {
        match self {
            WcagGrade::Aaa => "AAA",
            WcagGrade::Aa => "AA",
            WcagGrade::AaLarge => "AA-large",
            WcagGrade::Fail => "FAIL",
        }
    }
}

pub fn wcag_grade(ratio: f64) -> WcagGrade {
    if ratio >= AAA_NORMAL {
        WcagGrade::Aaa
    } else if ratio >= AA_NORMAL {
        WcagGrade::Aa
    } else if ratio >= AA_LARGE {
        WcagGrade::AaLarge
    } else {
        WcagGrade::Fail
    }
}

#[derive(Debug, Clone)]
pub struct ContrastResult {
    pub theme_id: String,
    pub theme_name: String,
    pub mode: ColorMode,
    pub pair: String,
    pub surface: String,
    pub text: String,
    pub ratio: f64,
    pub grade: WcagGrade,
    pub pass: bool,
}

fn check_scheme(theme: &ThemeConfig, mode: ColorMode) -> Vec<ContrastResult> {
    theme
        .scheme(mode)
        .foreground_pairs()
        .into_iter()
        .filter_map(|(surface_slot, surface, text_slot, text)| {
            let ratio = surface.to_rgb()?.contrast_ratio(&text.to_rgb()?);
            let grade = wcag_grade(ratio);

            Some(ContrastResult {
                theme_id: theme.id.clone(),
                theme_name: theme.name.clone(),
                mode,
                pair: format!("{} ↔ {}", surface_slot, text_slot),
                surface: surface.to_string(),
                text: text.to_string(),
                ratio,
                grade,
                pass: ratio >= AA_NORMAL,
            })
        })
        .collect()
}

/// Contrast of every surface/foreground pair in both schemes.
///
/// Pairs involving a raw token are skipped.
pub fn check_theme(theme: &ThemeConfig) -> Vec<ContrastResult> {
    [ColorMode::Light, ColorMode::Dark]
        .into_iter()
        .flat_map(|mode| check_scheme(theme, mode))
        .collect()
}

pub fn check_all_themes<'a>(themes: impl IntoIterator<Item = &'a ThemeConfig>) -> Vec<ContrastResult> {
    themes.into_iter().flat_map(check_theme).collect()
}

pub fn print_results(results: &[ContrastResult], verbose: bool) {
    let failures: Vec<_> = results.iter().filter(|r| !r.pass).collect();
    let passes: Vec<_> = results.iter().filter(|r| r.pass).collect();

    println!("{}", "=".repeat(80));
    println!("WCAG CONTRAST CHECK RESULTS");
    println!("Target: {}:1 (WCAG AA Normal Text)", AA_NORMAL);
    println!("{}", "=".repeat(80));

    if failures.is_empty() {
        println!(
            "\n✅ All {} color pairs pass WCAG AA requirements!",
            results.len()
        );
    } else {
        println!("\n❌ FAILURES ({} issues)\n", failures.len());
        println!(
            "{:<20} {:<6} {:<36} {:>8} {:<10}",
            "Theme", "Mode", "Pair", "Ratio", "Grade"
        );
        println!("{}", "-".repeat(80));

        let mut current_theme = String::new();
        for r in &failures {
            let theme_label = if r.theme_name != current_theme {
                current_theme = r.theme_name.clone();
                &r.theme_name
            } else {
                ""
            };
            println!(
                "{:<20} {:<6} {:<36} {:>7.2}:1 {:<10}",
                theme_label,
                r.mode.label(),
                r.pair,
                r.ratio,
                r.grade.label()
            );
            println!("{:20} {:6} surface: {}  text: {}", "", "", r.surface, r.text);
        }
    }

    if verbose && !passes.is_empty() {
        println!("\n✅ PASSING ({} checks)\n", passes.len());
        for r in &passes {
            println!(
                "{:<20} {:<6} {:<36} {:>7.2}:1 {}",
                r.theme_name,
                r.mode.label(),
                r.pair,
                r.ratio,
                r.grade.label()
            );
        }
    }

    println!("\n{}", "=".repeat(80));
    println!("SUMMARY BY THEME");
    println!("{}", "=".repeat(80));

    let mut theme_stats: BTreeMap<(&str, &str), (usize, usize)> = BTreeMap::new();
    for r in results {
        let entry = theme_stats
            .entry((r.theme_name.as_str(), r.mode.label()))
            .or_insert((0, 0));
        if r.pass {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    println!(
        "\n{:<20} {:<6} {:>6} {:>6} {:<10}",
        "Theme", "Mode", "Pass", "Fail", "Status"
    );
    println!("{}", "-".repeat(55));

    for ((theme, mode), (pass, fail)) in theme_stats {
        let status = if fail == 0 {
            "✅ OK".to_string()
        } else {
            format!("❌ {} issues", fail)
        };
        println!("{:<20} {:<6} {:>6} {:>6} {}", theme, mode, pass, fail, status);
    }
}
