use std::path::Path;
use std::process::Command;

use color_eyre::eyre::{eyre, Result};

use crate::config::{config_path, resolved_paths, UserConfig};

fn open_in_editor(config_file: &Path) -> Result<()> {
    if !config_file.exists() {
        UserConfig::default().save()?;
    }

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor).arg(config_file).status()?;
    if !status.success() {
        return Err(eyre!("{} exited with {}", editor, status));
    }

    // Surface mistakes now rather than on the next run.
    if let Err(e) = UserConfig::try_load_from(config_file) {
        eprintln!("Warning: {}", e);
        eprintln!("Defaults will be used until the file is fixed.");
    }
    Ok(())
}

fn format_paths(config: &UserConfig) -> String {
    let paths = resolved_paths(config);
    let width = paths.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
    paths
        .iter()
        .map(|(label, path)| format!("{:<width$} {}\n", format!("{}:", label), path.display()))
        .collect()
}

pub fn run(path: bool, reset: bool, edit: bool) -> Result<()> {
    let config_file = config_path();

    if path {
        println!("{}", config_file.display());
    } else if reset {
        UserConfig::default().save()?;
        println!("Config reset to defaults at: {}", config_file.display());
    } else if edit {
        open_in_editor(&config_file)?;
    } else {
        let config = UserConfig::load();
        println!("{}", format_paths(&config));
        print!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}
