//! Providers of observation series.

use std::path::{Path, PathBuf};

use crate::ingest::{LogSchema, read_log};
use crate::series::ObservationSeries;
use crate::SeriesResult;

/// Anything that can hand over one observation series on request.
pub trait SeriesSource {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    fn load(&self) -> SeriesResult<ObservationSeries>;
}

/// Monitor log on disk.
#[derive(Debug, Clone)]
pub struct LogFileSource {
    name: String,
    path: PathBuf,
    schema: LogSchema,
}

impl LogFileSource {
    pub fn new(path: impl Into<PathBuf>, schema: LogSchema) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            path,
            schema,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &LogSchema {
        &self.schema
    }
}

impl SeriesSource for LogFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> SeriesResult<ObservationSeries> {
        read_log(&self.path, &self.schema)
    }
}

/// Series that is already in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    series: ObservationSeries,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, series: ObservationSeries) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}

impl SeriesSource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> SeriesResult<ObservationSeries> {
        Ok(self.series.clone())
    }
}
