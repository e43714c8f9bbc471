mod send;
mod theme;

pub use send::SendCommands;
pub use theme::{ExportFormat, ThemeCommands};

use clap::{Parser, Subcommand};
use swatch_theme::{AppArea, ColorMode};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a color as hex, HSL and OKLCH
    #[command(alias = "c")]
    Convert {
        /// #RRGGBB, "<h> <s>% <l>%" or oklch(L C H)
        color: String,
    },

    /// WCAG contrast between a background and a text color
    Contrast {
        background: String,

        /// Defaults to the suggested text color for the background
        foreground: Option<String>,
    },

    /// Tailwind-style shade scale for a base color
    Shades { base: String },

    #[command(alias = "themes")]
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// Switch between light and dark mode
    Mode {
        /// Toggles the configured mode when omitted
        mode: Option<ColorMode>,
    },

    /// Apply theme messages sent to the local socket
    Listen,

    /// Send a theme message to a running listener
    Send {
        #[command(subcommand)]
        command: SendCommands,
    },

    Config {
        #[arg(long)]
        path: bool,

        #[arg(long)]
        reset: bool,

        #[arg(short, long)]
        edit: bool,
    },
}

#[derive(Debug, Parser)]
#[command(name = "swatch", version, about = "Theme registry and OKLCH color tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Color mode for this run (light, dark)
    #[arg(short, long, global = true)]
    pub appearance: Option<ColorMode>,

    /// Application area for theme listings (frontend, backoffice)
    #[arg(long, global = true)]
    pub area: Option<AppArea>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}
