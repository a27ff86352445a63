//! Query helpers for inspecting a reconciliation bundle.

use crate::bundle::{LabeledSeries, ReconciliationBundle, SeriesRole};
use crate::error::{AppError, AppResult};

/// Summary of one series of the bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub label: String,
    pub role: SeriesRole,
    pub sample_count: usize,
    pub time_range_min: Option<(f64, f64)>,
    pub min_temperature_k: Option<f64>,
    pub max_temperature_k: Option<f64>,
    pub final_temperature_k: Option<f64>,
}

/// How far the primary observation strays from the adiabatic reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDeviation {
    pub sample_count: usize,
    /// Largest |observed - reference| (K).
    pub max_abs_k: f64,
    pub at_time_min: f64,
    pub rms_k: f64,
}

pub fn summarize_series(series: &LabeledSeries) -> SeriesSummary {
    let temps = series.points.iter().map(|p| p.temperature_k);
    let (min, max) = temps.fold((None, None), |(lo, hi): (Option<f64>, Option<f64>), t| {
        (
            Some(lo.map_or(t, |v| v.min(t))),
            Some(hi.map_or(t, |v| v.max(t))),
        )
    });

    SeriesSummary {
        label: series.label.clone(),
        role: series.role,
        sample_count: series.len(),
        time_range_min: match (series.points.first(), series.points.last()) {
            (Some(first), Some(last)) => Some((first.time_min, last.time_min)),
            _ => None,
        },
        min_temperature_k: min,
        max_temperature_k: max,
        final_temperature_k: series.points.last().map(|p| p.temperature_k),
    }
}

/// Summaries of all series in bundle order.
pub fn series_summaries(bundle: &ReconciliationBundle) -> Vec<SeriesSummary> {
    bundle.series().iter().map(summarize_series).collect()
}

/// Find a series by its display label.
pub fn find_series<'a>(
    bundle: &'a ReconciliationBundle,
    label: &str,
) -> AppResult<&'a LabeledSeries> {
    bundle
        .by_label(label)
        .ok_or_else(|| AppError::SeriesNotFound(label.to_string()))
}

/// List all series labels in the bundle.
pub fn list_labels(bundle: &ReconciliationBundle) -> Vec<String> {
    bundle.series().iter().map(|s| s.label.clone()).collect()
}

/// Pointwise deviation of the primary observation from the reference.
///
/// Both traces come from the same run, so they share sample times and no
/// interpolation is needed.
pub fn reference_deviation(bundle: &ReconciliationBundle) -> AppResult<ReferenceDeviation> {
    let reference = bundle
        .by_role(SeriesRole::Reference)
        .ok_or_else(|| AppError::SeriesNotFound("reference".to_string()))?;
    let observed = bundle
        .by_role(SeriesRole::ObservedPrimary)
        .ok_or_else(|| AppError::SeriesNotFound("primary observation".to_string()))?;

    if reference.len() != observed.len() {
        return Err(AppError::InvalidInput(format!(
            "Reference has {} samples but primary observation has {}",
            reference.len(),
            observed.len()
        )));
    }
    if reference.is_empty() {
        return Err(AppError::InvalidInput("No samples to compare".to_string()));
    }

    let mut max_abs_k = 0.0;
    let mut at_time_min = reference.points[0].time_min;
    let mut sum_sq = 0.0;
    for (r, o) in reference.points.iter().zip(&observed.points) {
        let diff = o.temperature_k - r.temperature_k;
        sum_sq += diff * diff;
        if diff.abs() > max_abs_k {
            max_abs_k = diff.abs();
            at_time_min = r.time_min;
        }
    }

    Ok(ReferenceDeviation {
        sample_count: reference.len(),
        max_abs_k,
        at_time_min,
        rms_k: (sum_sq / reference.len() as f64).sqrt(),
    })
}
