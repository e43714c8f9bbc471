use std::collections::HashSet;
use std::fs;
use std::path::Path;

use color_eyre::eyre::{eyre, Result};
use swatch_theme::storage::{load_user_themes, remove_user_theme, upsert_user_theme};
use swatch_theme::{apply, contrast, export, validation};
use swatch_theme::{
    builtin_theme, get_theme_by_id, load_themes_from_dir, parse_theme_json, ThemeConfig,
};
use tracing::info;

use crate::cli::{ExportFormat, ThemeCommands};
use crate::config::{themes_dir, UserConfig};
use crate::session::{open_registry, Registry};

/// Read and validate a theme file, reporting every problem on failure.
pub fn read_theme_file(path: &Path) -> Result<ThemeConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| eyre!("Could not read {}: {}", path.display(), e))?;

    let result = validation::validate_theme_content(&content, &path.display().to_string());
    if !result.is_valid() {
        validation::print_validation_results(std::slice::from_ref(&result), false);
        return Err(eyre!("{} is not a valid theme", path.display()));
    }

    parse_theme_json(&content).ok_or_else(|| eyre!("{} is not a valid theme", path.display()))
}

fn print_theme_list(registry: &Registry, config: &UserConfig, all: bool) {
    let themes = if all {
        registry.get_all_themes()
    } else {
        registry.themes_for(config.area)
    };

    if themes.is_empty() {
        println!("No themes offered in the {} area.", config.area.label());
        return;
    }

    let current = registry.get_current_theme_id();
    println!("{:<2}{:<20} {:<24} {:<10}", "", "ID", "Name", "Scope");
    println!("{}", "-".repeat(58));
    for theme in themes {
        let marker = if current.as_deref() == Some(theme.id.as_str()) {
            "*"
        } else {
            ""
        };
        println!(
            "{:<2}{:<20} {:<24} {:<10}",
            marker,
            theme.id,
            theme.name,
            theme.scope.label()
        );
    }
}

fn run_check(config: &UserConfig, all: bool, verbose: bool) -> Result<()> {
    let dir = themes_dir();
    let mut has_validation_errors = false;

    let validation_results = validation::validate_theme_files(&dir);
    if !validation_results.is_empty() {
        validation::print_validation_results(&validation_results, verbose);
        has_validation_errors = validation_results.iter().any(|r| !r.is_valid());
        println!();
    }

    let themes: Vec<ThemeConfig> = if all {
        let registry = open_registry(config)?;
        registry.get_all_themes().into_iter().cloned().collect()
    } else {
        let valid_ids: HashSet<_> = validation_results
            .iter()
            .filter(|r| r.is_valid())
            .filter_map(|r| r.theme_id.clone())
            .collect();
        load_themes_from_dir(&dir)
            .into_iter()
            .filter(|t| valid_ids.contains(&t.id))
            .collect()
    };

    if themes.is_empty() {
        if validation_results.is_empty() {
            println!("No user themes found.");
            println!("Use --all to check every theme, or create one with:");
            println!("  swatch theme create <name>");
        } else if has_validation_errors {
            println!("All user themes have validation errors. Fix errors above to run contrast checks.");
        }
        if has_validation_errors {
            std::process::exit(1);
        }
        return Ok(());
    }

    let results = contrast::check_all_themes(&themes);
    contrast::print_results(&results, verbose);

    if has_validation_errors || results.iter().any(|r| !r.pass) {
        std::process::exit(1);
    }
    Ok(())
}

fn run_validate(path: Option<&Path>, verbose: bool) -> Result<()> {
    let target = path.map(Path::to_path_buf).unwrap_or_else(themes_dir);
    let results = if target.is_dir() {
        validation::validate_theme_files(&target)
    } else {
        vec![validation::validate_theme_file(&target)]
    };

    if results.is_empty() {
        println!("No theme files found in {}", target.display());
        return Ok(());
    }

    validation::print_validation_results(&results, verbose);
    if results.iter().any(|r| !r.is_valid()) {
        std::process::exit(1);
    }
    Ok(())
}

fn register_user_theme(registry: &mut Registry, theme: ThemeConfig) -> Result<()> {
    let id = theme.id.clone();
    upsert_user_theme(registry.store_mut(), theme.clone())?;
    registry.register_theme(theme);
    info!(theme_id = %id, "Stored user theme");
    Ok(())
}

/// Remove a stored user theme. Returns true when a builtin or theme file
/// with the same id takes its place again.
fn unregister_user_theme(registry: &mut Registry, id: &str, themes: &Path) -> Result<bool> {
    if !remove_user_theme(registry.store_mut(), id)? {
        if builtin_theme(id).is_some() {
            return Err(eyre!("'{}' is a builtin theme and cannot be removed", id));
        }
        let stored: Vec<_> = load_user_themes(registry.store())
            .into_iter()
            .map(|t| t.id)
            .collect();
        return Err(eyre!(
            "'{}' is not a stored user theme (stored: {})",
            id,
            if stored.is_empty() {
                "none".to_string()
            } else {
                stored.join(", ")
            }
        ));
    }
    info!(theme_id = %id, "Removed user theme");

    match get_theme_by_id(id, registry.store(), Some(themes)) {
        Some(fallback) => {
            let was_current = registry.get_current_theme_id().as_deref() == Some(id);
            registry.register_theme(fallback);
            if was_current {
                registry.activate_theme(id);
            }
            Ok(true)
        }
        None => {
            registry.unregister_theme(id);
            Ok(false)
        }
    }
}

fn run_create(name: &str, base: &str, registry: &Registry) -> Result<()> {
    let base_theme = registry
        .get_theme(base)
        .ok_or_else(|| eyre!("Base theme '{}' not found", base))?;

    let theme = export::theme_from_template(name, base_theme);
    if theme.id.is_empty() {
        return Err(eyre!("Theme name '{}' has no usable characters", name));
    }

    let dir = themes_dir();
    fs::create_dir_all(&dir)?;
    let theme_path = dir.join(format!("{}.json", theme.id));
    if theme_path.exists() {
        eprintln!(
            "Theme '{}' already exists at: {}",
            name,
            theme_path.display()
        );
        std::process::exit(1);
    }

    fs::write(&theme_path, export::to_json(&theme)?)?;
    println!("Created theme '{}' at: {}", name, theme_path.display());
    println!("\nEdit the file, then apply it with: swatch theme activate {}", theme.id);
    Ok(())
}

pub fn run(command: Option<ThemeCommands>, config: &UserConfig) -> Result<()> {
    let cmd = command.unwrap_or(ThemeCommands::Check {
        all: false,
        verbose: false,
    });

    match cmd {
        ThemeCommands::Check { all, verbose } => run_check(config, all, verbose),
        ThemeCommands::Validate { path, verbose } => run_validate(path.as_deref(), verbose),
        ThemeCommands::List { all } => {
            let registry = open_registry(config)?;
            print_theme_list(&registry, config, all);
            Ok(())
        }
        ThemeCommands::Show { id, css } => {
            let registry = open_registry(config)?;
            let theme = registry
                .get_theme(&id)
                .ok_or_else(|| eyre!("Theme '{}' not found", id))?;
            if css {
                print!("{}", apply::build_stylesheet(theme));
            } else {
                println!("{}", export::to_json(theme)?);
            }
            Ok(())
        }
        ThemeCommands::Current => {
            let registry = open_registry(config)?;
            match registry.get_current_theme() {
                Some(theme) => println!("{} ({})", theme.id, theme.name),
                None => println!("No theme selected."),
            }
            Ok(())
        }
        ThemeCommands::Activate { id } => {
            let mut registry = open_registry(config)?;
            if !registry.activate_theme(&id) {
                return Err(eyre!("Theme '{}' not found", id));
            }
            println!("Activated '{}'", id);
            Ok(())
        }
        ThemeCommands::Preview { file } => {
            let theme = read_theme_file(&file)?;
            let id = theme.id.clone();
            let mut registry = open_registry(config)?;
            registry.preview_theme(theme);
            println!("Previewing '{}' (not saved)", id);
            Ok(())
        }
        ThemeCommands::Reset => {
            let mut registry = open_registry(config)?;
            registry.reset_theme();
            println!("Removed theme stylesheet");
            Ok(())
        }
        ThemeCommands::Register { file } => {
            let theme = read_theme_file(&file)?;
            let id = theme.id.clone();
            let mut registry = open_registry(config)?;
            register_user_theme(&mut registry, theme)?;
            println!("Registered '{}'", id);
            Ok(())
        }
        ThemeCommands::Unregister { id } => {
            let mut registry = open_registry(config)?;
            if unregister_user_theme(&mut registry, &id, &themes_dir())? {
                println!("Unregistered '{}', the original theme is back", id);
            } else {
                println!("Unregistered '{}'", id);
            }
            Ok(())
        }
        ThemeCommands::Export { id, format, output } => {
            let registry = open_registry(config)?;
            let theme = registry
                .get_theme(&id)
                .ok_or_else(|| eyre!("Theme '{}' not found", id))?;
            let content = match format {
                ExportFormat::Json => format!("{}\n", export::to_json(theme)?),
                ExportFormat::Const => export::to_const_declaration(theme)?,
            };
            match output {
                Some(path) => {
                    fs::write(&path, content)?;
                    println!("Exported '{}' to {}", id, path.display());
                }
                None => print!("{}", content),
            }
            Ok(())
        }
        ThemeCommands::Create { name, base } => {
            let registry = open_registry(config)?;
            run_create(&name, &base, &registry)
        }
    }
}
