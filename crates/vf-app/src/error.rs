//! Error types for the vf-app service layer.

use std::path::PathBuf;

use vf_model::ModelError;
use vf_series::SeriesError;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error("Source unavailable: {origin}: {reason}")]
    SourceUnavailable { origin: String, reason: String },

    #[error("Malformed source: {origin}: {detail}")]
    MalformedSource { origin: String, detail: String },

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Series not found: {0}")]
    SeriesNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used by callers deciding how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Domain,
    SourceUnavailable,
    MalformedSource,
    Config,
    Query,
    Io,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Domain(_) => ErrorKind::Domain,
            AppError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            AppError::MalformedSource { .. } => ErrorKind::MalformedSource,
            AppError::ConfigFileRead { .. }
            | AppError::ConfigFileWrite { .. }
            | AppError::Config(_)
            | AppError::Validation(_) => ErrorKind::Config,
            AppError::SeriesNotFound(_) | AppError::InvalidInput(_) => ErrorKind::Query,
            AppError::Export(_) | AppError::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type for vf-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        match err {
            SeriesError::SourceUnavailable { origin, reason } => {
                AppError::SourceUnavailable { origin, reason }
            }
            SeriesError::MalformedSource { origin, detail } => {
                AppError::MalformedSource { origin, detail }
            }
            SeriesError::InvalidSample { .. } => AppError::MalformedSource {
                origin: "<in-memory>".to_string(),
                detail: err.to_string(),
            },
        }
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        if err.is_domain() {
            AppError::Domain(err.to_string())
        } else {
            AppError::Validation(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Config(format!("Failed to parse config YAML: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Export(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Export(err.to_string())
    }
}
