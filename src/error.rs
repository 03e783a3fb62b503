//! Error types for schema path extraction

use thiserror::Error;

/// Result type for schema path operations
pub type Result<T> = std::result::Result<T, PathsError>;

/// Schema path extraction errors
#[derive(Error, Debug)]
pub enum PathsError {
    #[error("Unresolvable reference: {reference}")]
    UnresolvableReference { reference: String },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl PathsError {
    pub fn unresolvable(reference: impl Into<String>) -> Self {
        PathsError::UnresolvableReference { reference: reference.into() }
    }
}
