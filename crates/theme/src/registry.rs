//! Registry of known themes and the active selection.
//!
//! One registry exists per running host. It owns its store and document, so
//! callers pass the registry around instead of reaching for global state.
//!
//! Two ways to make a theme visible:
//! - [`ThemeRegistry::activate_theme`] applies it and persists the selection.
//! - [`ThemeRegistry::preview_theme`] applies it and only marks it current in
//!   memory; [`ThemeRegistry::reset_theme`] undoes a preview without touching
//!   the persisted selection.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::apply;
use crate::document::StyleHost;
use crate::storage::{KeyValueStore, CURRENT_THEME_KEY};
use crate::{AppArea, ColorMode, ThemeConfig};

#[derive(Debug)]
pub struct ThemeRegistry<S, D> {
    themes: HashMap<String, ThemeConfig>,
    current_theme_id: Option<String>,
    mode: ColorMode,
    store: S,
    document: D,
}

impl<S: KeyValueStore, D: StyleHost> ThemeRegistry<S, D> {
    /// Create a registry and restore the persisted selection if it is known.
    pub fn new(store: S, document: D) -> Self {
        let mut registry = Self {
            themes: HashMap::new(),
            current_theme_id: None,
            mode: ColorMode::default(),
            store,
            document,
        };
        registry.restore_persisted();
        registry
    }

    /// Create a registry seeded with `themes`, then restore the persisted
    /// selection.
    pub fn with_themes(store: S, document: D, themes: impl IntoIterator<Item = ThemeConfig>) -> Self {
        let mut registry = Self::new(store, document);
        for theme in themes {
            registry.register_theme(theme);
        }
        registry.restore_persisted();
        registry
    }

    /// Apply the persisted theme if it is registered. Returns whether it was.
    pub fn restore_persisted(&mut self) -> bool {
        let Some(id) = self.persisted_theme_id() else {
            return false;
        };
        let Some(theme) = self.themes.get(&id) else {
            debug!(theme_id = %id, "Persisted theme is not registered yet");
            return false;
        };
        apply::apply_theme(&mut self.document, theme);
        self.current_theme_id = Some(id);
        true
    }

    /// Insert or replace a theme by id.
    ///
    /// The first theme registered while nothing is persisted becomes active.
    pub fn register_theme(&mut self, theme: ThemeConfig) {
        let id = theme.id.clone();
        let replaced = self.themes.insert(id.clone(), theme).is_some();
        debug!(theme_id = %id, replaced, "Registered theme");

        if self.themes.len() == 1 && self.persisted_theme_id().is_none() {
            self.activate_theme(&id);
        }
    }

    /// Remove a theme. Clears the selection if it was current.
    pub fn unregister_theme(&mut self, id: &str) -> bool {
        if self.themes.remove(id).is_none() {
            return false;
        }
        if self.get_current_theme_id().as_deref() == Some(id) {
            self.current_theme_id = None;
            self.forget_persisted();
        }
        debug!(theme_id = %id, "Unregistered theme");
        true
    }

    /// Apply and persist a registered theme. Unknown ids change nothing.
    pub fn activate_theme(&mut self, id: &str) -> bool {
        let Some(theme) = self.themes.get(id) else {
            debug!(theme_id = %id, "Cannot activate unknown theme");
            return false;
        };
        apply::apply_theme(&mut self.document, theme);
        self.current_theme_id = Some(id.to_string());
        if let Err(e) = self.store.set(CURRENT_THEME_KEY, id) {
            warn!(theme_id = %id, error = %e, "Failed to persist active theme");
        }
        info!(theme_id = %id, "Activated theme");
        true
    }

    /// Register, apply and mark `theme` current without persisting it.
    pub fn preview_theme(&mut self, theme: ThemeConfig) {
        let id = theme.id.clone();
        apply::apply_theme(&mut self.document, &theme);
        self.themes.insert(id.clone(), theme);
        self.current_theme_id = Some(id);
    }

    /// Remove the injected stylesheet and the in-memory selection.
    ///
    /// The persisted selection is left alone, so [`Self::get_current_theme_id`]
    /// falls back to it afterwards.
    pub fn reset_theme(&mut self) {
        apply::reset_theme(&mut self.document);
        self.current_theme_id = None;
    }

    /// Host notification that the light/dark mode flipped.
    pub fn on_mode_changed(&mut self, mode: ColorMode) {
        self.mode = mode;
        let Some(id) = self.get_current_theme_id() else {
            return;
        };
        if let Some(theme) = self.themes.get(&id) {
            apply::apply_theme(&mut self.document, theme);
            debug!(theme_id = %id, mode = mode.label(), "Re-applied theme after mode change");
        }
    }

    /// All themes, ordered by id.
    pub fn get_all_themes(&self) -> Vec<&ThemeConfig> {
        let mut themes: Vec<_> = self.themes.values().collect();
        themes.sort_by(|a, b| a.id.cmp(&b.id));
        themes
    }

    /// Themes offered in `area`, ordered by id.
    pub fn themes_for(&self, area: AppArea) -> Vec<&ThemeConfig> {
        self.get_all_themes()
            .into_iter()
            .filter(|theme| theme.offered_in(area))
            .collect()
    }

    pub fn get_theme(&self, id: &str) -> Option<&ThemeConfig> {
        self.themes.get(id)
    }

    pub fn has_theme(&self, id: &str) -> bool {
        self.themes.contains_key(id)
    }

    /// In-memory selection, falling back to the persisted one.
    pub fn get_current_theme_id(&self) -> Option<String> {
        self.current_theme_id
            .clone()
            .or_else(|| self.persisted_theme_id())
    }

    pub fn get_current_theme(&self) -> Option<&ThemeConfig> {
        self.get_current_theme_id()
            .and_then(|id| self.themes.get(&id))
    }

    /// Drop every theme and both selections.
    pub fn clear_registry(&mut self) {
        self.themes.clear();
        self.current_theme_id = None;
        self.forget_persisted();
        debug!("Cleared theme registry");
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    fn persisted_theme_id(&self) -> Option<String> {
        self.store.get(CURRENT_THEME_KEY).filter(|id| !id.is_empty())
    }

    fn forget_persisted(&mut self) {
        if let Err(e) = self.store.remove(CURRENT_THEME_KEY) {
            warn!(error = %e, "Failed to clear persisted theme");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::{custom_property, DARK_SELECTOR, LIGHT_SELECTOR, STYLE_ELEMENT_ID};
    use crate::document::MemoryDocument;
    use crate::presets::builtin_theme;
    use crate::storage::MemoryStore;
    use crate::{ColorToken, Oklch, ThemeScope};

    type TestRegistry = ThemeRegistry<MemoryStore, MemoryDocument>;

    fn theme(id: &str) -> ThemeConfig {
        let mut theme = builtin_theme("default").unwrap();
        theme.id = id.into();
        theme.name = id.to_uppercase();
        theme
    }

    fn registry() -> TestRegistry {
        ThemeRegistry::new(MemoryStore::new(), MemoryDocument::new())
    }

    fn injected_css(registry: &TestRegistry) -> &str {
        registry.document().style(STYLE_ELEMENT_ID).unwrap()
    }

    #[test]
    fn test_only_first_registration_auto_activates() {
        let mut registry = registry();
        registry.register_theme(theme("t1"));
        registry.register_theme(theme("t2"));

        assert_eq!(registry.get_current_theme_id().as_deref(), Some("t1"));
        assert_eq!(
            registry.store().get(CURRENT_THEME_KEY).as_deref(),
            Some("t1")
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registration_does_not_auto_activate_with_persisted_selection() {
        let mut store = MemoryStore::new();
        store.set(CURRENT_THEME_KEY, "t2").unwrap();
        let mut registry = ThemeRegistry::new(store, MemoryDocument::new());

        registry.register_theme(theme("t1"));
        assert_eq!(registry.document().style(STYLE_ELEMENT_ID), None);
        assert_eq!(registry.get_current_theme_id().as_deref(), Some("t2"));
        assert!(registry.get_current_theme().is_none());
    }

    #[test]
    fn test_activate_unknown_id_changes_nothing() {
        let mut registry = registry();
        registry.register_theme(theme("t1"));
        let before = injected_css(&registry).to_string();

        assert!(!registry.activate_theme("nonexistent-id"));
        assert_eq!(registry.get_current_theme_id().as_deref(), Some("t1"));
        assert_eq!(injected_css(&registry), before);
    }

    #[test]
    fn test_activate_persists_and_applies() {
        let mut registry = registry();
        registry.register_theme(theme("t1"));
        registry.register_theme(builtin_theme("harbor").unwrap());

        assert!(registry.activate_theme("harbor"));
        assert_eq!(registry.get_current_theme().map(|t| t.name.as_str()), Some("Harbor"));
        assert_eq!(
            registry.store().get(CURRENT_THEME_KEY).as_deref(),
            Some("harbor")
        );
        assert_eq!(registry.document().style_count(STYLE_ELEMENT_ID), 1);
    }

    #[test]
    fn test_unregister_current_clears_selection() {
        let mut registry = registry();
        registry.register_theme(theme("t1"));
        registry.register_theme(theme("t2"));

        assert!(!registry.unregister_theme("missing"));
        assert!(registry.unregister_theme("t2"));
        assert_eq!(registry.get_current_theme_id().as_deref(), Some("t1"));

        assert!(registry.unregister_theme("t1"));
        assert_eq!(registry.get_current_theme_id(), None);
        assert_eq!(registry.store().get(CURRENT_THEME_KEY), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_preview_does_not_persist() {
        let mut registry = registry();
        registry.register_theme(theme("t1"));

        registry.preview_theme(theme("draft"));
        assert_eq!(registry.get_current_theme_id().as_deref(), Some("draft"));
        assert!(registry.has_theme("draft"));
        assert_eq!(
            registry.store().get(CURRENT_THEME_KEY).as_deref(),
            Some("t1")
        );

        registry.reset_theme();
        assert_eq!(registry.document().style(STYLE_ELEMENT_ID), None);
        assert_eq!(registry.get_current_theme_id().as_deref(), Some("t1"));
    }

    #[test]
    fn test_preview_twice_is_idempotent() {
        let mut registry = registry();
        registry.preview_theme(theme("draft"));
        let first = injected_css(&registry).to_string();
        registry.preview_theme(theme("draft"));

        assert_eq!(registry.document().style_count(STYLE_ELEMENT_ID), 1);
        assert_eq!(injected_css(&registry), first);
    }

    #[test]
    fn test_clear_registry() {
        let mut registry = registry();
        registry.register_theme(theme("t1"));
        registry.clear_registry();

        assert!(registry.get_all_themes().is_empty());
        assert_eq!(registry.get_current_theme_id(), None);
        assert!(!registry.has_theme("t1"));
    }

    #[test]
    fn test_new_restores_persisted_selection() {
        let mut store = MemoryStore::new();
        store.set(CURRENT_THEME_KEY, "harbor").unwrap();
        let registry = ThemeRegistry::with_themes(
            store,
            MemoryDocument::new(),
            [theme("t1"), builtin_theme("harbor").unwrap()],
        );

        assert_eq!(registry.get_current_theme_id().as_deref(), Some("harbor"));
        let css = injected_css(&registry);
        let expected = crate::convert::hex_to_oklch("#f8fafc").unwrap();
        assert_eq!(custom_property(css, LIGHT_SELECTOR, "background"), Some(expected.as_str()));
    }

    #[test]
    fn test_mode_change_reapplies_current_theme() {
        let mut registry = registry();
        registry.on_mode_changed(ColorMode::Dark);
        assert_eq!(registry.document().style(STYLE_ELEMENT_ID), None);

        registry.register_theme(theme("t1"));
        registry.reset_theme();
        registry.on_mode_changed(ColorMode::Light);

        assert_eq!(registry.mode(), ColorMode::Light);
        assert_eq!(registry.document().style_count(STYLE_ELEMENT_ID), 1);
    }

    #[test]
    fn test_themes_for_area() {
        let mut registry = registry();
        for preset in crate::presets::builtin_themes() {
            registry.register_theme(preset);
        }
        let frontend: Vec<_> = registry
            .themes_for(AppArea::Frontend)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        let backoffice: Vec<_> = registry
            .themes_for(AppArea::Backoffice)
            .iter()
            .map(|t| t.id.as_str())
            .collect();

        assert_eq!(frontend, vec!["default", "harbor"]);
        assert_eq!(backoffice, vec!["default", "ledger"]);
        assert_eq!(registry.get_theme("ledger").map(|t| t.scope), Some(ThemeScope::Backoffice));
    }

    #[test]
    fn test_end_to_end_light_and_dark_background() {
        let mut t1 = theme("t1");
        t1.colors.light.background = ColorToken::parse("#FFFFFF");
        t1.colors.dark.background = ColorToken::parse("#000000");

        let mut registry = registry();
        registry.register_theme(t1);
        assert!(registry.activate_theme("t1"));

        let css = injected_css(&registry);
        let light: Oklch = custom_property(css, LIGHT_SELECTOR, "background")
            .unwrap()
            .parse()
            .unwrap();
        let dark: Oklch = custom_property(css, DARK_SELECTOR, "background")
            .unwrap()
            .parse()
            .unwrap();

        assert!((light.l - 1.0).abs() < 0.001);
        assert!(dark.l.abs() < 0.001);
    }
}
