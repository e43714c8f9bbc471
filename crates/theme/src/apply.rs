//! Injecting a theme into a document as CSS custom properties.

use std::fmt::Write as _;

use tracing::debug;

use crate::document::StyleHost;
use crate::{ColorScheme, ThemeConfig};

/// Identity of the injected style element.
pub const STYLE_ELEMENT_ID: &str = "swatch-theme-styles";

pub const LIGHT_SELECTOR: &str = ":root";
pub const DARK_SELECTOR: &str = ".dark";

fn rule_block(selector: &str, scheme: &ColorScheme) -> String {
    let mut block = format!("{} {{\n", selector);
    for (slot, token) in scheme.slots() {
        let _ = writeln!(block, "  --{}: {};", slot, token.to_css_value());
    }
    block.push('}');
    block
}

/// Light rules on `:root`, dark rules on `.dark`.
pub fn build_stylesheet(theme: &ThemeConfig) -> String {
    format!(
        "{}\n\n{}\n",
        rule_block(LIGHT_SELECTOR, &theme.colors.light),
        rule_block(DARK_SELECTOR, &theme.colors.dark)
    )
}

/// Replace the injected stylesheet with one built from `theme`.
pub fn apply_theme<D: StyleHost + ?Sized>(document: &mut D, theme: &ThemeConfig) {
    let replaced = document.remove_style(STYLE_ELEMENT_ID);
    document.insert_style(STYLE_ELEMENT_ID, build_stylesheet(theme));
    debug!(theme_id = %theme.id, replaced, "Applied theme stylesheet");
}

/// Remove the injected stylesheet. Returns whether one was present.
pub fn reset_theme<D: StyleHost + ?Sized>(document: &mut D) -> bool {
    let removed = document.remove_style(STYLE_ELEMENT_ID);
    debug!(removed, "Reset theme stylesheet");
    removed
}

/// Value of `--<slot>` inside the rule block for `selector`.
pub fn custom_property<'a>(css: &'a str, selector: &str, slot: &str) -> Option<&'a str> {
    let start = css.find(&format!("{} {{", selector))?;
    let block = &css[start..];
    let block = &block[..block.find('}')?];
    let prefix = format!("--{}:", slot);
    block
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(|value| value.trim().trim_end_matches(';'))
}
