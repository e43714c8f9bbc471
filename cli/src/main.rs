mod cli;
mod commands;
mod config;
mod logging;
mod session;
mod stylesheet;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands};
use config::{ensure_dirs, LogLevel, UserConfig};
use logging::LogSink;
use tracing::warn;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let (mut config, config_error) = match UserConfig::try_load() {
        Ok(config) => (config, None),
        Err(e) => (UserConfig::default(), Some(e)),
    };
    config.merge_with_args(cli.appearance, cli.area);
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);

    let sink = LogSink::for_command(&cli.command);
    let _guard = logging::init(config.log_level, sink, log_level_override);
    if let Some(e) = config_error {
        warn!(error = %e, "Ignoring invalid config, using defaults");
    }

    match cli.command {
        Commands::Convert { color } => commands::color::run_convert(&color),
        Commands::Contrast {
            background,
            foreground,
        } => commands::color::run_contrast(&background, foreground.as_deref()),
        Commands::Shades { base } => commands::color::run_shades(&base),
        Commands::Theme { command } => commands::theme::run(command, &config),
        Commands::Mode { mode } => commands::mode::run(config, mode),
        Commands::Listen => commands::listen::run(&config),
        Commands::Send { command } => commands::send::run(command, &config),
        Commands::Config { path, reset, edit } => commands::config::run(path, reset, edit),
    }
}
