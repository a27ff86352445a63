//! vf-series: observation series and simulation log ingestion.

pub mod ingest;
pub mod series;
pub mod source;

pub use ingest::{ColumnRef, LogSchema, parse_log, read_log};
pub use series::{ObservationSeries, Sample};
pub use source::{InMemorySource, LogFileSource, SeriesSource};

pub type SeriesResult<T> = Result<T, SeriesError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Source unavailable: {origin}: {reason}")]
    SourceUnavailable { origin: String, reason: String },

    #[error("Malformed source {origin}: {detail}")]
    MalformedSource { origin: String, detail: String },

    #[error("Invalid sample {index}: {reason}")]
    InvalidSample { index: usize, reason: String },
}

impl SeriesError {
    pub fn unavailable(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        SeriesError::SourceUnavailable {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(origin: impl Into<String>, detail: impl Into<String>) -> Self {
        SeriesError::MalformedSource {
            origin: origin.into(),
            detail: detail.into(),
        }
    }

    /// Attach the originating source to a sample-level invariant violation.
    pub fn with_origin(self, origin: &str) -> Self {
        match self {
            SeriesError::InvalidSample { index, reason } => SeriesError::MalformedSource {
                origin: origin.to_string(),
                detail: format!("sample {index}: {reason}"),
            },
            other => other,
        }
    }
}
