use serde::{Deserialize, Serialize};
use swatch_theme::ThemeConfig;

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Malformed theme message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Theme message carries an empty theme id")]
    EmptyThemeId,
}

/// A theme editor instruction sent to other windows.
///
/// Wire shape: `{"type":"APPLY_THEME","theme":{..}}` or `{"type":"RESET_THEME"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThemeMessage {
    ApplyTheme { theme: ThemeConfig },
    ResetTheme,
}

impl ThemeMessage {
    pub fn apply(theme: ThemeConfig) -> Self {
        Self::ApplyTheme { theme }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApplyTheme { .. } => "APPLY_THEME",
            Self::ResetTheme => "RESET_THEME",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse and check a message received from outside this process.
    pub fn decode(s: &str) -> Result<Self, MessageError> {
        let message: Self = serde_json::from_str(s)?;
        if let Self::ApplyTheme { theme } = &message {
            if theme.id.trim().is_empty() {
                return Err(MessageError::EmptyThemeId);
            }
        }
        Ok(message)
    }
}
