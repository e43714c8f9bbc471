use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Const,
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommands {
    /// Check themes for validation and WCAG contrast issues (default)
    #[command(alias = "c")]
    Check {
        /// Also check builtin and stored themes
        #[arg(short = 'A', long)]
        all: bool,

        /// Show passing checks too
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate theme files without contrast checks
    Validate {
        /// File or directory (defaults to the user themes directory)
        path: Option<PathBuf>,

        #[arg(short, long)]
        verbose: bool,
    },

    #[command(alias = "ls")]
    List {
        /// Include themes not offered in the configured area
        #[arg(short = 'A', long)]
        all: bool,
    },

    Show {
        id: String,

        /// Print the generated stylesheet instead of the theme JSON
        #[arg(long)]
        css: bool,
    },

    Current,

    /// Apply a theme and remember it
    #[command(alias = "use")]
    Activate { id: String },

    /// Apply a theme file without remembering it
    Preview { file: PathBuf },

    /// Remove the applied stylesheet
    Reset,

    /// Store a theme file as a user theme
    #[command(alias = "add")]
    Register { file: PathBuf },

    #[command(alias = "rm")]
    Unregister { id: String },

    Export {
        id: String,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a new theme file from an existing theme
    #[command(alias = "new")]
    Create {
        name: String,

        #[arg(short, long, default_value = "default")]
        base: String,
    },
}
