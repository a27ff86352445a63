//! Shared application service layer for vesselfill.
//!
//! This crate centralizes config loading, series reconciliation, and bundle
//! queries and exports for the CLI frontend.

pub mod bundle;
pub mod config;
pub mod error;
pub mod export;
pub mod query;
pub mod reconcile;

// Re-export key types for convenience
pub use bundle::{
    ChartPoint, Dash, LabeledSeries, LineStyle, Marker, ReconciliationBundle, SeriesRole,
};
pub use config::{
    LATEST_VERSION, ReconcileConfig, SourceDef, load_config, parse_config, save_config,
    validate_config,
};
pub use error::{AppError, AppResult, ErrorKind};
pub use export::{bundle_to_json, write_bundle_json, write_reference_csv, write_series_csv};
pub use query::{
    ReferenceDeviation, SeriesSummary, find_series, list_labels, reference_deviation,
    series_summaries,
};
pub use reconcile::{
    INITIAL_MARKER_LABEL, INLET_MARKER_LABEL, ReconcileRequest, ReconcileResponse,
    ReconcileTiming, SeriesLabels, assemble_bundle, merge, reconcile, reconcile_config,
    reference_for_config,
};
