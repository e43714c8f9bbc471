use crate::ThemeConfig;
use std::fs;
use std::path::Path;

pub fn parse_theme_json(content: &str) -> Option<ThemeConfig> {
    let theme: ThemeConfig = serde_json::from_str(content).ok()?;
    if theme.id.trim().is_empty() {
        return None;
    }
    Some(theme)
}

pub fn load_theme_file(path: &Path) -> Option<ThemeConfig> {
    let content = fs::read_to_string(path).ok()?;
    parse_theme_json(&content)
}

pub fn load_themes_from_dir(dir: &Path) -> Vec<ThemeConfig> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut themes = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                match load_theme_file(&path) {
                    Some(theme) => themes.push(theme),
                    None => tracing::warn!(path = %path.display(), "Skipping invalid theme file"),
                }
            }
        }
    }

    themes.sort_by(|a, b| a.id.cmp(&b.id));
    themes
}
