use crate::ThemeConfig;

pub fn to_json(theme: &ThemeConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(theme)
}

/// `ocean-breeze` becomes `oceanBreezeTheme`.
pub fn const_name(id: &str) -> String {
    let mut name = String::with_capacity(id.len() + 5);
    let mut upper_next = false;

    for ch in id.chars() {
        if !ch.is_ascii_alphanumeric() {
            upper_next = !name.is_empty();
            continue;
        }
        if name.is_empty() && ch.is_ascii_digit() {
            name.push('_');
        }
        if upper_next {
            name.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else if name.is_empty() {
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }

    name.push_str(if name.is_empty() { "theme" } else { "Theme" });
    name
}

/// The theme as a typed constant ready to paste into a theme module.
pub fn to_const_declaration(theme: &ThemeConfig) -> Result<String, serde_json::Error> {
    Ok(format!(
        "export const {}: ThemeConfig = {};\n",
        const_name(&theme.id),
        to_json(theme)?
    ))
}

pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// New theme named `name` with a copy of `base`'s colors and styles.
pub fn theme_from_template(name: &str, base: &ThemeConfig) -> ThemeConfig {
    ThemeConfig {
        id: slugify(name),
        name: name.trim().to_string(),
        description: Some(format!("Based on {}", base.name)),
        author: None,
        version: "1.0.0".to_string(),
        scope: base.scope,
        colors: base.colors.clone(),
        styles: base.styles.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::builtin_theme;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_const_name() {
        assert_eq!(const_name("default"), "defaultTheme");
        assert_eq!(const_name("ocean-breeze"), "oceanBreezeTheme");
        assert_eq!(const_name("Night_owl 2"), "nightOwl2Theme");
        assert_eq!(const_name("3d"), "_3dTheme");
        assert_eq!(const_name("--"), "theme");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Ocean Breeze"), "ocean-breeze");
        assert_eq!(slugify("  Café -- Noir!  "), "caf-noir");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_const_declaration_wraps_json() {
        let theme = builtin_theme("harbor").unwrap();
        let decl = to_const_declaration(&theme).unwrap();

        assert!(decl.starts_with("export const harborTheme: ThemeConfig = {\n"));
        assert!(decl.ends_with("};\n"));

        let body = decl
            .trim_start_matches("export const harborTheme: ThemeConfig = ")
            .trim_end()
            .trim_end_matches(';');
        let back: ThemeConfig = serde_json::from_str(body).unwrap();
        assert_eq!(back, theme);
    }

    #[test]
    fn test_theme_from_template() {
        let base = builtin_theme("ledger").unwrap();
        let theme = theme_from_template(" Night Desk ", &base);

        assert_eq!(theme.id, "night-desk");
        assert_eq!(theme.name, "Night Desk");
        assert_eq!(theme.scope, base.scope);
        assert_eq!(theme.colors, base.colors);
        assert_eq!(theme.description.as_deref(), Some("Based on Ledger"));
    }
}
