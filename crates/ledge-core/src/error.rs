//! Error types for Ledge

use thiserror::Error;

/// The main error type for Ledge operations
#[derive(Debug, Error)]
pub enum LedgeError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Host error: {0}")]
    HostError(String),
}

/// Result type alias for Ledge operations
pub type Result<T> = std::result::Result<T, LedgeError>;

impl From<toml::de::Error> for LedgeError {
    fn from(err: toml::de::Error) -> Self {
        LedgeError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for LedgeError {
    fn from(err: toml::ser::Error) -> Self {
        LedgeError::TomlSerError(err.to_string())
    }
}

impl From<serde_json::Error> for LedgeError {
    fn from(err: serde_json::Error) -> Self {
        LedgeError::JsonError(err.to_string())
    }
}
