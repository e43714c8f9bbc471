use swatch_theme::{KeyValueStore, StyleHost, ThemeRegistry};
use tracing::{debug, warn};

use crate::{MessageError, ThemeMessage, ThemeReceiver};

/// Apply a message to this window's registry.
///
/// An applied theme is previewed, never persisted. Applying the same theme
/// again leaves the document unchanged.
pub fn handle_message<S: KeyValueStore, D: StyleHost>(
    registry: &mut ThemeRegistry<S, D>,
    message: ThemeMessage,
) {
    match message {
        ThemeMessage::ApplyTheme { theme } => {
            debug!(theme_id = %theme.id, "Applying theme from editor");
            registry.preview_theme(theme);
        }
        ThemeMessage::ResetTheme => {
            debug!("Resetting theme from editor");
            registry.reset_theme();
        }
    }
}

/// Decode an untrusted payload and handle it. Rejected payloads leave the
/// registry untouched.
pub fn handle_raw<S: KeyValueStore, D: StyleHost>(
    registry: &mut ThemeRegistry<S, D>,
    raw: &str,
) -> Result<(), MessageError> {
    match ThemeMessage::decode(raw) {
        Ok(message) => {
            handle_message(registry, message);
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Ignoring unrecognized theme message");
            Err(e)
        }
    }
}

/// Handle everything currently queued on `receiver`. Returns the count.
pub fn pump<S: KeyValueStore, D: StyleHost>(
    receiver: &mut ThemeReceiver,
    registry: &mut ThemeRegistry<S, D>,
) -> usize {
    let messages = receiver.drain();
    let count = messages.len();
    for message in messages {
        handle_message(registry, message);
    }
    count
}
