use crate::{ColorScheme, ColorToken, ThemeColors, ThemeConfig, ThemeScope};

fn t(value: &str) -> ColorToken {
    ColorToken::parse(value)
}

pub fn builtin_themes() -> Vec<ThemeConfig> {
    vec![
        ThemeConfig {
            id: "default".into(),
            name: "Default".into(),
            description: Some("Neutral slate palette".into()),
            author: None,
            version: "1.0.0".into(),
            scope: ThemeScope::Both,
            colors: ThemeColors {
                light: ColorScheme {
                    background: t("0 0% 100%"),
                    foreground: t("222.2 84% 4.9%"),
                    card: Some(t("0 0% 100%")),
                    card_foreground: Some(t("222.2 84% 4.9%")),
                    popover: Some(t("0 0% 100%")),
                    popover_foreground: Some(t("222.2 84% 4.9%")),
                    primary: t("222.2 47.4% 11.2%"),
                    primary_foreground: t("210 40% 98%"),
                    secondary: t("210 40% 96.1%"),
                    secondary_foreground: t("222.2 47.4% 11.2%"),
                    muted: t("210 40% 96.1%"),
                    muted_foreground: t("215.4 16.3% 46.9%"),
                    accent: t("210 40% 96.1%"),
                    accent_foreground: t("222.2 47.4% 11.2%"),
                    destructive: t("0 84.2% 60.2%"),
                    destructive_foreground: t("210 40% 98%"),
                    border: t("214.3 31.8% 91.4%"),
                    input: t("214.3 31.8% 91.4%"),
                    ring: t("222.2 84% 4.9%"),
                },
                dark: ColorScheme {
                    background: t("222.2 84% 4.9%"),
                    foreground: t("210 40% 98%"),
                    card: Some(t("222.2 84% 4.9%")),
                    card_foreground: Some(t("210 40% 98%")),
                    popover: Some(t("222.2 84% 4.9%")),
                    popover_foreground: Some(t("210 40% 98%")),
                    primary: t("210 40% 98%"),
                    primary_foreground: t("222.2 47.4% 11.2%"),
                    secondary: t("217.2 32.6% 17.5%"),
                    secondary_foreground: t("210 40% 98%"),
                    muted: t("217.2 32.6% 17.5%"),
                    muted_foreground: t("215 20.2% 65.1%"),
                    accent: t("217.2 32.6% 17.5%"),
                    accent_foreground: t("210 40% 98%"),
                    destructive: t("0 62.8% 30.6%"),
                    destructive_foreground: t("210 40% 98%"),
                    border: t("217.2 32.6% 17.5%"),
                    input: t("217.2 32.6% 17.5%"),
                    ring: t("212.7 26.8% 83.9%"),
                },
            },
            styles: None,
        },
        ThemeConfig {
            id: "harbor".into(),
            name: "Harbor".into(),
            description: Some("Deep blue storefront palette".into()),
            author: None,
            version: "1.0.0".into(),
            scope: ThemeScope::Frontend,
            colors: ThemeColors {
                light: ColorScheme {
                    background: t("#f8fafc"),
                    foreground: t("#0f172a"),
                    card: Some(t("#ffffff")),
                    card_foreground: Some(t("#0f172a")),
                    popover: Some(t("#ffffff")),
                    popover_foreground: Some(t("#0f172a")),
                    primary: t("#1d4ed8"),
                    primary_foreground: t("#eff6ff"),
                    secondary: t("#e0f2fe"),
                    secondary_foreground: t("#0c4a6e"),
                    muted: t("#f1f5f9"),
                    muted_foreground: t("#475569"),
                    accent: t("#cffafe"),
                    accent_foreground: t("#164e63"),
                    destructive: t("#b91c1c"),
                    destructive_foreground: t("#fef2f2"),
                    border: t("#cbd5e1"),
                    input: t("#cbd5e1"),
                    ring: t("#1d4ed8"),
                },
                dark: ColorScheme {
                    background: t("#020617"),
                    foreground: t("#e2e8f0"),
                    card: Some(t("#0f172a")),
                    card_foreground: Some(t("#e2e8f0")),
                    popover: Some(t("#0f172a")),
                    popover_foreground: Some(t("#e2e8f0")),
                    primary: t("#60a5fa"),
                    primary_foreground: t("#0b1120"),
                    secondary: t("#1e293b"),
                    secondary_foreground: t("#e0f2fe"),
                    muted: t("#1e293b"),
                    muted_foreground: t("#94a3b8"),
                    accent: t("#164e63"),
                    accent_foreground: t("#cffafe"),
                    destructive: t("#f87171"),
                    destructive_foreground: t("#1f0a0a"),
                    border: t("#334155"),
                    input: t("#334155"),
                    ring: t("#60a5fa"),
                },
            },
            styles: None,
        },
        ThemeConfig {
            id: "ledger".into(),
            name: "Ledger".into(),
            description: Some("Low-chroma admin palette".into()),
            author: None,
            version: "1.0.0".into(),
            scope: ThemeScope::Backoffice,
            colors: ThemeColors {
                light: ColorScheme {
                    background: t("oklch(0.985 0.002 247.839)"),
                    foreground: t("oklch(0.210 0.034 264.665)"),
                    card: None,
                    card_foreground: None,
                    popover: None,
                    popover_foreground: None,
                    primary: t("oklch(0.373 0.034 259.733)"),
                    primary_foreground: t("oklch(0.985 0.002 247.839)"),
                    secondary: t("oklch(0.928 0.006 264.531)"),
                    secondary_foreground: t("oklch(0.278 0.033 256.848)"),
                    muted: t("oklch(0.967 0.003 264.542)"),
                    muted_foreground: t("oklch(0.446 0.030 256.802)"),
                    accent: t("oklch(0.930 0.032 255.585)"),
                    accent_foreground: t("oklch(0.282 0.091 267.935)"),
                    destructive: t("oklch(0.505 0.213 27.518)"),
                    destructive_foreground: t("oklch(0.971 0.013 17.380)"),
                    border: t("oklch(0.872 0.010 258.338)"),
                    input: t("oklch(0.872 0.010 258.338)"),
                    ring: t("oklch(0.551 0.027 264.364)"),
                },
                dark: ColorScheme {
                    background: t("oklch(0.130 0.028 261.692)"),
                    foreground: t("oklch(0.967 0.003 264.542)"),
                    card: None,
                    card_foreground: None,
                    popover: None,
                    popover_foreground: None,
                    primary: t("oklch(0.872 0.010 258.338)"),
                    primary_foreground: t("oklch(0.210 0.034 264.665)"),
                    secondary: t("oklch(0.278 0.033 256.848)"),
                    secondary_foreground: t("oklch(0.967 0.003 264.542)"),
                    muted: t("oklch(0.278 0.033 256.848)"),
                    muted_foreground: t("oklch(0.707 0.022 261.325)"),
                    accent: t("oklch(0.379 0.146 265.522)"),
                    accent_foreground: t("oklch(0.930 0.032 255.585)"),
                    destructive: t("oklch(0.704 0.191 22.216)"),
                    destructive_foreground: t("oklch(0.258 0.092 26.042)"),
                    border: t("oklch(0.373 0.034 259.733)"),
                    input: t("oklch(0.373 0.034 259.733)"),
                    ring: t("oklch(0.551 0.027 264.364)"),
                },
            },
            styles: None,
        },
    ]
}

pub fn builtin_theme(id: &str) -> Option<ThemeConfig> {
    builtin_themes().into_iter().find(|t| t.id == id)
}
