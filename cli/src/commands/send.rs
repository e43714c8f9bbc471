use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result};
use swatch_protocol::ThemeMessage;
use swatch_theme::ThemeConfig;
use tracing::debug;

use crate::cli::SendCommands;
use crate::commands::theme::read_theme_file;
use crate::config::{socket_path, UserConfig};
use crate::session::open_registry;

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("No listener at {path} (start one with `swatch listen`): {source}")]
    NotListening {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to send message: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Write one newline-terminated message to the listener socket.
pub fn send_message(socket: &Path, message: &ThemeMessage) -> Result<(), SendError> {
    let mut stream = UnixStream::connect(socket).map_err(|source| SendError::NotListening {
        path: socket.display().to_string(),
        source,
    })?;
    stream.set_write_timeout(Some(Duration::from_secs(5)))?;

    let json = message.to_json()?;
    stream.write_all(format!("{}\n", json).as_bytes())?;
    stream.flush()?;
    debug!(kind = message.kind(), "Sent theme message");
    Ok(())
}

/// A theme file path, or the id of a registered theme.
fn resolve_theme(theme: &str, config: &UserConfig) -> Result<ThemeConfig> {
    let path = Path::new(theme);
    if path.is_file() {
        return read_theme_file(path);
    }
    let registry = open_registry(config)?;
    registry
        .get_theme(theme)
        .cloned()
        .ok_or_else(|| eyre!("'{}' is neither a theme file nor a registered theme", theme))
}

pub fn run(command: SendCommands, config: &UserConfig) -> Result<()> {
    let message = match command {
        SendCommands::Apply { theme } => ThemeMessage::apply(resolve_theme(&theme, config)?),
        SendCommands::Reset => ThemeMessage::ResetTheme,
    };

    send_message(&socket_path(), &message)?;
    println!("Sent {}", message.kind());
    Ok(())
}
