use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum SendCommands {
    /// Preview a theme file or registered theme id in every listener
    Apply { theme: String },

    /// Remove the previewed theme from every listener
    Reset,
}
