use color_eyre::eyre::Result;
use swatch_theme::ColorMode;
use tracing::info;

use crate::config::UserConfig;
use crate::session::open_registry;

fn next_mode(current: ColorMode, requested: Option<ColorMode>) -> ColorMode {
    requested.unwrap_or_else(|| current.toggle())
}

/// Persist the mode and re-apply the current theme under it.
/// With no mode given, flips the configured one.
pub fn run(mut config: UserConfig, requested: Option<ColorMode>) -> Result<()> {
    let mode = next_mode(config.appearance, requested);
    config.appearance = mode;
    config.save()?;

    let mut registry = open_registry(&config)?;
    registry.on_mode_changed(mode);

    info!(mode = mode.label(), "Color mode changed");
    match registry.get_current_theme_id() {
        Some(id) => println!("Mode set to {} (theme: {})", mode.label(), id),
        None => println!("Mode set to {}", mode.label()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_mode() {
        assert_eq!(next_mode(ColorMode::Light, None), ColorMode::Dark);
        assert_eq!(next_mode(ColorMode::Dark, None), ColorMode::Light);
        assert_eq!(next_mode(ColorMode::Dark, Some(ColorMode::Dark)), ColorMode::Dark);
    }
}
