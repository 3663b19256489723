use thiserror::Error;

/// Problems turning on-page or persisted text into typed preferences.
///
/// None of these reach the user: callers log them and fall back to the
/// field default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    #[error("unknown contrast theme: {0:?}")]
    UnknownTheme(String),
    #[error("invalid font scale: {0:?}")]
    InvalidFontScale(String),
    #[error("unknown accessibility action: {0:?}")]
    UnknownAction(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
