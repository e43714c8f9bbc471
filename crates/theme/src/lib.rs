pub mod apply;
pub mod contrast;
pub mod convert;
pub mod document;
pub mod export;
mod loader;
mod model;
pub mod presets;
mod registry;
pub mod storage;
mod types;
pub mod utils;
pub mod validation;

pub use convert::ColorError;
pub use document::{MemoryDocument, StyleHost};
pub use loader::{load_theme_file, load_themes_from_dir, parse_theme_json};
pub use model::{
    AppArea, ColorMode, ColorScheme, StyleTokens, ThemeColors, ThemeConfig, ThemeScope,
    FOREGROUND_PAIRS, OPTIONAL_SLOTS, REQUIRED_SLOTS,
};
pub use presets::{builtin_theme, builtin_themes};
pub use registry::ThemeRegistry;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use types::{ColorToken, Hsl, Oklch, Rgb};

use std::path::Path;

/// Presets, then user themes from the store, then theme files in `themes_dir`.
///
/// Later sources replace earlier ones with the same id.
pub fn get_all_themes(store: &impl KeyValueStore, themes_dir: Option<&Path>) -> Vec<ThemeConfig> {
    let mut themes = builtin_themes();
    let extra = storage::load_user_themes(store)
        .into_iter()
        .chain(themes_dir.map(load_themes_from_dir).unwrap_or_default());

    for theme in extra {
        match themes.iter_mut().find(|t| t.id == theme.id) {
            Some(existing) => *existing = theme,
            None => themes.push(theme),
        }
    }
    themes
}

pub fn get_theme_by_id(
    id: &str,
    store: &impl KeyValueStore,
    themes_dir: Option<&Path>,
) -> Option<ThemeConfig> {
    get_all_themes(store, themes_dir)
        .into_iter()
        .find(|t| t.id == id)
}
