//! Error types for PGRL

use thiserror::Error;

/// Main error type for PGRL
#[derive(Error, Debug)]
pub enum PgrlError {
    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for PGRL operations
pub type Result<T> = std::result::Result<T, PgrlError>;
