use std::path::Path;

use color_eyre::eyre::Result;
use swatch_theme::{get_all_themes, ColorMode, FileStore, ThemeRegistry};

use crate::config::{store_path, themes_dir, UserConfig};
use crate::stylesheet::StylesheetDir;

pub type Registry = ThemeRegistry<FileStore, StylesheetDir>;

/// Registry over the user's store, stylesheet directory and theme files.
pub fn open_registry(config: &UserConfig) -> Result<Registry> {
    open_registry_at(
        &store_path(),
        &config.stylesheet_dir(),
        &themes_dir(),
        config.appearance,
    )
}

pub fn open_registry_at(
    store: &Path,
    stylesheets: &Path,
    themes: &Path,
    mode: ColorMode,
) -> Result<Registry> {
    let store = FileStore::open(store)?;
    let document = StylesheetDir::open(stylesheets)?;
    let all = get_all_themes(&store, Some(themes));

    let mut registry = ThemeRegistry::with_themes(store, document, all);
    if registry.mode() != mode {
        registry.on_mode_changed(mode);
    }
    Ok(registry)
}
