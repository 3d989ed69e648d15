use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the grade-processing core.
#[derive(Error, Debug)]
pub enum LsfError {
    /// A column-mapping file could not be opened or read from disk.
    #[error("Failed to read column map {path}: {source}")]
    ColumnMapRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A column-mapping document could not be parsed.
    #[error("Failed to parse column map: {0}")]
    ColumnMapParse(#[from] serde_json::Error),

    /// A credential the login flow needs is not available.
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// A value accepted as numeric could not be converted to a float.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the LSF crates.
pub type Result<T> = std::result::Result<T, LsfError>;
