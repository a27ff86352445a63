//! Serialized forms of the bundle for external renderers.

use std::io::Write;
use std::path::Path;

use vf_model::ReferenceTrajectory;

use crate::bundle::{LabeledSeries, ReconciliationBundle};
use crate::error::AppResult;

pub fn bundle_to_json(bundle: &ReconciliationBundle) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(bundle)?)
}

pub fn write_bundle_json(path: &Path, bundle: &ReconciliationBundle) -> AppResult<()> {
    std::fs::write(path, bundle_to_json(bundle)?)?;
    Ok(())
}

/// Write one bundle series as `time_min,temperature_k` rows.
pub fn write_series_csv<W: Write>(writer: W, series: &LabeledSeries) -> AppResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["time_min", "temperature_k"])?;
    for p in &series.points {
        out.write_record([p.time_min.to_string(), p.temperature_k.to_string()])?;
    }
    out.flush()?;
    Ok(())
}

/// Write a reference trajectory on its raw time base as `time_s,temperature_k` rows.
pub fn write_reference_csv<W: Write>(
    writer: W,
    reference: &ReferenceTrajectory,
) -> AppResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["time_s", "temperature_k"])?;
    for p in reference.points() {
        out.write_record([p.time_s.to_string(), p.temperature_k.to_string()])?;
    }
    out.flush()?;
    Ok(())
}
