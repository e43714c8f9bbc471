//! Theme model.
//!
//! - `ColorScheme` - semantic slot name → color token, one per mode
//! - `ThemeColors` - the light and dark schemes of a theme
//! - `ThemeConfig` - a complete theme with identity and scope
//!
//! The serialized shape matches what editor surfaces exchange:
//! kebab-case slot keys (`primary-foreground`) that double as CSS custom
//! property names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::ColorToken;

/// Slots every scheme must define.
pub const REQUIRED_SLOTS: &[&str] = &[
    "background",
    "foreground",
    "primary",
    "primary-foreground",
    "secondary",
    "secondary-foreground",
    "destructive",
    "destructive-foreground",
    "muted",
    "muted-foreground",
    "accent",
    "accent-foreground",
    "border",
    "input",
    "ring",
];

pub const OPTIONAL_SLOTS: &[&str] = &["card", "card-foreground", "popover", "popover-foreground"];

/// Surface slots and the slot drawn on top of them.
pub const FOREGROUND_PAIRS: &[(&str, &str)] = &[
    ("background", "foreground"),
    ("card", "card-foreground"),
    ("popover", "popover-foreground"),
    ("primary", "primary-foreground"),
    ("secondary", "secondary-foreground"),
    ("muted", "muted-foreground"),
    ("accent", "accent-foreground"),
    ("destructive", "destructive-foreground"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn label(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(format!("unknown color mode '{}'", other)),
        }
    }
}

/// Application area a theme can be offered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppArea {
    #[default]
    Frontend,
    Backoffice,
}

impl AppArea {
    pub fn label(&self) -> &'static str {
        match self {
            AppArea::Frontend => "frontend",
            AppArea::Backoffice => "backoffice",
        }
    }
}

impl std::str::FromStr for AppArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "frontend" => Ok(AppArea::Frontend),
            "backoffice" => Ok(AppArea::Backoffice),
            other => Err(format!("unknown app area '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeScope {
    Frontend,
    Backoffice,
    #[default]
    Both,
}

impl ThemeScope {
    pub fn offers(&self, area: AppArea) -> bool {
        matches!(
            (self, area),
            (ThemeScope::Both, _)
                | (ThemeScope::Frontend, AppArea::Frontend)
                | (ThemeScope::Backoffice, AppArea::Backoffice)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeScope::Frontend => "frontend",
            ThemeScope::Backoffice => "backoffice",
            ThemeScope::Both => "both",
        }
    }
}

/// Semantic colors for one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ColorScheme {
    pub background: ColorToken,
    pub foreground: ColorToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<ColorToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_foreground: Option<ColorToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popover: Option<ColorToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popover_foreground: Option<ColorToken>,
    pub primary: ColorToken,
    pub primary_foreground: ColorToken,
    pub secondary: ColorToken,
    pub secondary_foreground: ColorToken,
    pub muted: ColorToken,
    pub muted_foreground: ColorToken,
    pub accent: ColorToken,
    pub accent_foreground: ColorToken,
    pub destructive: ColorToken,
    pub destructive_foreground: ColorToken,
    pub border: ColorToken,
    pub input: ColorToken,
    pub ring: ColorToken,
}

impl ColorScheme {
    /// Defined slots in stylesheet order.
    pub fn slots(&self) -> Vec<(&'static str, &ColorToken)> {
        let mut slots = vec![
            ("background", &self.background),
            ("foreground", &self.foreground),
        ];
        let optional = [
            ("card", &self.card),
            ("card-foreground", &self.card_foreground),
            ("popover", &self.popover),
            ("popover-foreground", &self.popover_foreground),
        ];
        slots.extend(
            optional
                .into_iter()
                .filter_map(|(name, token)| token.as_ref().map(|t| (name, t))),
        );
        slots.extend([
            ("primary", &self.primary),
            ("primary-foreground", &self.primary_foreground),
            ("secondary", &self.secondary),
            ("secondary-foreground", &self.secondary_foreground),
            ("muted", &self.muted),
            ("muted-foreground", &self.muted_foreground),
            ("accent", &self.accent),
            ("accent-foreground", &self.accent_foreground),
            ("destructive", &self.destructive),
            ("destructive-foreground", &self.destructive_foreground),
            ("border", &self.border),
            ("input", &self.input),
            ("ring", &self.ring),
        ]);
        slots
    }

    pub fn get(&self, slot: &str) -> Option<&ColorToken> {
        match slot {
            "background" => Some(&self.background),
            "foreground" => Some(&self.foreground),
            "card" => self.card.as_ref(),
            "card-foreground" => self.card_foreground.as_ref(),
            "popover" => self.popover.as_ref(),
            "popover-foreground" => self.popover_foreground.as_ref(),
            "primary" => Some(&self.primary),
            "primary-foreground" => Some(&self.primary_foreground),
            "secondary" => Some(&self.secondary),
            "secondary-foreground" => Some(&self.secondary_foreground),
            "muted" => Some(&self.muted),
            "muted-foreground" => Some(&self.muted_foreground),
            "accent" => Some(&self.accent),
            "accent-foreground" => Some(&self.accent_foreground),
            "destructive" => Some(&self.destructive),
            "destructive-foreground" => Some(&self.destructive_foreground),
            "border" => Some(&self.border),
            "input" => Some(&self.input),
            "ring" => Some(&self.ring),
            _ => None,
        }
    }

    /// Set a slot by name. Returns false for unknown slot names.
    pub fn set(&mut self, slot: &str, token: ColorToken) -> bool {
        let target = match slot {
            "background" => &mut self.background,
            "foreground" => &mut self.foreground,
            "primary" => &mut self.primary,
            "primary-foreground" => &mut self.primary_foreground,
            "secondary" => &mut self.secondary,
            "secondary-foreground" => &mut self.secondary_foreground,
            "muted" => &mut self.muted,
            "muted-foreground" => &mut self.muted_foreground,
            "accent" => &mut self.accent,
            "accent-foreground" => &mut self.accent_foreground,
            "destructive" => &mut self.destructive,
            "destructive-foreground" => &mut self.destructive_foreground,
            "border" => &mut self.border,
            "input" => &mut self.input,
            "ring" => &mut self.ring,
            "card" => return Self::set_optional(&mut self.card, token),
            "card-foreground" => return Self::set_optional(&mut self.card_foreground, token),
            "popover" => return Self::set_optional(&mut self.popover, token),
            "popover-foreground" => {
                return Self::set_optional(&mut self.popover_foreground, token)
            }
            _ => return false,
        };
        *target = token;
        true
    }

    fn set_optional(slot: &mut Option<ColorToken>, token: ColorToken) -> bool {
        *slot = Some(token);
        true
    }

    /// Surface/foreground pairs where both slots are defined.
    pub fn foreground_pairs(&self) -> Vec<(&'static str, &ColorToken, &'static str, &ColorToken)> {
        FOREGROUND_PAIRS
            .iter()
            .filter_map(|&(surface, text)| {
                Some((surface, self.get(surface)?, text, self.get(text)?))
            })
            .collect()
    }
}

/// Light and dark schemes of a theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl ThemeColors {
    pub fn for_mode(&self, mode: ColorMode) -> &ColorScheme {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }
}

/// Non-color design tokens. Carried with the theme, not used by conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub font_size: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub spacing: BTreeMap<String, String>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// A complete theme with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Unique identifier within a registry
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub scope: ThemeScope,
    pub colors: ThemeColors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleTokens>,
}

impl ThemeConfig {
    pub fn scheme(&self, mode: ColorMode) -> &ColorScheme {
        self.colors.for_mode(mode)
    }

    pub fn offered_in(&self, area: AppArea) -> bool {
        self.scope.offers(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::builtin_themes;
    use pretty_assertions::assert_eq;

    fn default_theme() -> ThemeConfig {
        builtin_themes()
            .into_iter()
            .find(|t| t.id == "default")
            .unwrap()
    }

    #[test]
    fn test_scope_offers() {
        assert!(ThemeScope::Both.offers(AppArea::Frontend));
        assert!(ThemeScope::Both.offers(AppArea::Backoffice));
        assert!(ThemeScope::Frontend.offers(AppArea::Frontend));
        assert!(!ThemeScope::Frontend.offers(AppArea::Backoffice));
        assert!(!ThemeScope::Backoffice.offers(AppArea::Frontend));
    }

    #[test]
    fn test_slots_cover_required_and_defined_optional() {
        let theme = default_theme();
        let names: Vec<_> = theme.colors.light.slots().iter().map(|(n, _)| *n).collect();
        for required in REQUIRED_SLOTS {
            assert!(names.contains(required), "missing {required}");
        }
        assert_eq!(names.len(), REQUIRED_SLOTS.len() + OPTIONAL_SLOTS.len());
        assert_eq!(names[0], "background");
    }

    #[test]
    fn test_get_and_set_slots() {
        let mut scheme = default_theme().colors.light;
        assert!(scheme.set("primary-foreground", ColorToken::parse("#ffffff")));
        assert_eq!(
            scheme.get("primary-foreground"),
            Some(&ColorToken::parse("#ffffff"))
        );
        assert!(!scheme.set("sidebar", ColorToken::parse("#ffffff")));
        assert_eq!(scheme.get("sidebar"), None);

        scheme.card = None;
        assert_eq!(scheme.get("card"), None);
        assert!(scheme.set("card", ColorToken::parse("0 0% 100%")));
        assert!(scheme.get("card").is_some());
    }

    #[test]
    fn test_foreground_pairs_skip_undefined_optional_slots() {
        let mut scheme = default_theme().colors.dark;
        assert_eq!(scheme.foreground_pairs().len(), FOREGROUND_PAIRS.len());
        scheme.popover = None;
        let pairs = scheme.foreground_pairs();
        assert_eq!(pairs.len(), FOREGROUND_PAIRS.len() - 1);
        assert!(pairs.iter().all(|(surface, _, _, _)| *surface != "popover"));
    }

    #[test]
    fn test_theme_json_shape() {
        let theme = default_theme();
        let value = serde_json::to_value(&theme).unwrap();
        assert_eq!(value["scope"], "both");
        assert_eq!(value["colors"]["light"]["primary-foreground"], "210 40% 98%");
        assert_eq!(value["colors"]["dark"]["background"], "222.2 84% 4.9%");

        let back: ThemeConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, theme);
    }

    #[test]
    fn test_missing_required_slot_fails_to_deserialize() {
        let mut value = serde_json::to_value(default_theme()).unwrap();
        value["colors"]["light"]
            .as_object_mut()
            .unwrap()
            .remove("ring");
        assert!(serde_json::from_value::<ThemeConfig>(value).is_err());
    }

    #[test]
    fn test_minimal_theme_gets_defaults() {
        let mut value = serde_json::to_value(default_theme()).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("version");
        object.remove("scope");
        let theme: ThemeConfig = serde_json::from_value(value).unwrap();
        assert_eq!(theme.version, "1.0.0");
        assert_eq!(theme.scope, ThemeScope::Both);
        assert_eq!(theme.styles, None);
    }

    #[test]
    fn test_color_mode_parse_and_toggle() {
        assert_eq!("Dark".parse::<ColorMode>(), Ok(ColorMode::Dark));
        assert!("dim".parse::<ColorMode>().is_err());
        assert_eq!(ColorMode::Light.toggle(), ColorMode::Dark);
    }
}
