use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use swatch_theme::{AppArea, ColorMode};
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" => LogLevel::Off,
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }

    pub fn as_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserConfig {
    pub appearance: ColorMode,
    pub area: AppArea,
    pub log_level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet_dir: Option<PathBuf>,
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("swatch")
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("swatch")
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("swatch")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn themes_dir() -> PathBuf {
    config_dir().join("themes")
}

pub fn store_path() -> PathBuf {
    data_dir().join("store.json")
}

pub fn socket_path() -> PathBuf {
    runtime_dir().join("swatch.sock")
}

pub fn ensure_dirs() -> std::io::Result<()> {
    fs::create_dir_all(config_dir())?;
    fs::create_dir_all(data_dir())?;
    Ok(())
}

/// Every location the CLI reads or writes, labelled for display.
pub fn resolved_paths(config: &UserConfig) -> Vec<(&'static str, PathBuf)> {
    vec![
        ("Config file", config_path()),
        ("Store", store_path()),
        ("Themes", themes_dir()),
        ("Stylesheets", config.stylesheet_dir()),
        ("Socket", socket_path()),
        ("Logs", runtime_dir()),
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl UserConfig {
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Missing or unparseable files give the defaults.
    pub fn load_from(path: &Path) -> Self {
        Self::try_load_from(path).unwrap_or_default()
    }

    /// Like [`UserConfig::load`], but reports a file that exists and cannot be used.
    /// Runs before logging is set up, so the caller decides how to report it.
    pub fn try_load() -> Result<Self, ConfigError> {
        Self::try_load_from(&config_path())
    }

    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> std::io::Result<()> {
        let _ = ensure_dirs();
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, content)
    }

    pub fn merge_with_args(&mut self, appearance: Option<ColorMode>, area: Option<AppArea>) {
        if let Some(mode) = appearance {
            self.appearance = mode;
        }
        if let Some(area) = area {
            self.area = area;
        }
    }

    pub fn stylesheet_dir(&self) -> PathBuf {
        self.stylesheet_dir
            .clone()
            .unwrap_or_else(|| data_dir().join("styles"))
    }
}
