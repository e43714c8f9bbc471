use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::{Commands, ThemeCommands};
use crate::config::{runtime_dir, LogLevel};

static INIT: OnceLock<()> = OnceLock::new();

/// Where a command's events go. Commands that change persisted or on-disk
/// state also keep a daily log under a prefix of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    Tee(&'static str),
}

impl LogSink {
    pub fn for_command(command: &Commands) -> Self {
        match command {
            Commands::Listen => LogSink::Tee("swatch-listener"),
            Commands::Mode { .. } => LogSink::Tee("swatch"),
            Commands::Theme {
                command:
                    Some(
                        ThemeCommands::Activate { .. }
                        | ThemeCommands::Preview { .. }
                        | ThemeCommands::Reset
                        | ThemeCommands::Register { .. }
                        | ThemeCommands::Unregister { .. },
                    ),
            } => LogSink::Tee("swatch"),
            _ => LogSink::Stderr,
        }
    }

    pub fn file_prefix(&self) -> Option<&'static str> {
        match self {
            LogSink::Stderr => None,
            LogSink::Tee(prefix) => Some(*prefix),
        }
    }
}

pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

pub fn init(level: LogLevel, sink: LogSink, cli_override: Option<LogLevel>) -> LogGuard {
    let mut guard = None;

    INIT.get_or_init(|| {
        let Some(level) = cli_override.unwrap_or(level).as_tracing_level() else {
            return;
        };

        let file_layer = sink.file_prefix().and_then(file_writer).map(|(writer, g)| {
            guard = Some(g);
            fmt::layer()
                .with_writer(writer)
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(build_env_filter(level))
        });

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(UtcTime::rfc_3339())
            .with_ansi(true)
            .with_target(true)
            .with_filter(build_env_filter(level));

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .init();
    });

    LogGuard { _guard: guard }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Falls back to stderr only when the log directory is unusable.
fn file_writer(prefix: &str) -> Option<(NonBlocking, WorkerGuard)> {
    let log_dir = runtime_dir();

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            log_dir, e
        );
        return None;
    }

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(7)
        .build(&log_dir)
        .map_err(|e| eprintln!("Warning: Failed to open {} log: {}", prefix, e))
        .ok()?;

    Some(tracing_appender::non_blocking(appender))
}
