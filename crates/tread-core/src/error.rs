//! Error types for Tread

use thiserror::Error;

/// The main error type for Tread operations
#[derive(Debug, Error)]
pub enum TreadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Invalid box: min {min:?} exceeds max {max:?}")]
    InvalidBox { min: [f32; 3], max: [f32; 3] },

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Unknown key name: {0}")]
    UnknownKey(String),

    #[error("Level error: {0}")]
    LevelError(String),
}

/// Result type alias for Tread operations
pub type Result<T> = std::result::Result<T, TreadError>;

impl From<toml::de::Error> for TreadError {
    fn from(err: toml::de::Error) -> Self {
        TreadError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for TreadError {
    fn from(err: toml::ser::Error) -> Self {
        TreadError::TomlSerError(err.to_string())
    }
}
