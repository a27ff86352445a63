//! Series alignment and merging into a reconciliation bundle.

use std::time::Instant;

use vf_core::seconds_to_minutes;
use vf_model::{ReferenceTrajectory, ThermodynamicConstants, reference_trajectory};
use vf_series::{ObservationSeries, SeriesSource};

use crate::bundle::{
    ChartPoint, LabeledSeries, LineStyle, Marker, ReconciliationBundle, SeriesRole,
};
use crate::config::{DisplayDef, ReconcileConfig};
use crate::error::AppResult;

/// Label drawn next to the initial temperature line.
pub const INITIAL_MARKER_LABEL: &str = "Tinit";
/// Label drawn next to the inlet temperature line.
pub const INLET_MARKER_LABEL: &str = "Tinlet";
const MARKER_LABEL_OFFSET_K: f64 = 7.0;

/// Display labels of the three series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLabels {
    pub reference: String,
    pub primary: String,
    pub secondary: String,
}

impl Default for SeriesLabels {
    fn default() -> Self {
        DisplayDef::default().into()
    }
}

impl From<DisplayDef> for SeriesLabels {
    fn from(display: DisplayDef) -> Self {
        Self {
            reference: display.reference_label,
            primary: display.primary_label,
            secondary: display.secondary_label,
        }
    }
}

/// Request to reconcile two runs.
pub struct ReconcileRequest<'a> {
    /// Drives the reference model.
    pub primary: &'a dyn SeriesSource,
    pub secondary: &'a dyn SeriesSource,
    pub constants: &'a ThermodynamicConstants,
    pub labels: SeriesLabels,
}

/// Wall time spent per stage of one reconciliation.
#[derive(Debug, Clone, Default)]
pub struct ReconcileTiming {
    pub load_time_s: f64,
    pub model_time_s: f64,
    pub assemble_time_s: f64,
    pub total_time_s: f64,
}

#[derive(Debug, Clone)]
pub struct ReconcileResponse {
    pub bundle: ReconciliationBundle,
    pub timing: ReconcileTiming,
}

/// Load both sources, compute the reference and assemble the bundle.
///
/// Both sources are loaded before anything is computed; the first failure
/// aborts the call.
pub fn reconcile(request: &ReconcileRequest) -> AppResult<ReconcileResponse> {
    let started = Instant::now();
    let mut timing = ReconcileTiming::default();

    let primary = request.primary.load()?;
    let secondary = request.secondary.load()?;
    timing.load_time_s = started.elapsed().as_secs_f64();
    tracing::debug!(
        primary = request.primary.name(),
        primary_samples = primary.len(),
        secondary = request.secondary.name(),
        secondary_samples = secondary.len(),
        "loaded observation series"
    );

    let model_start = Instant::now();
    let reference = reference_trajectory(request.constants, &primary)?;
    timing.model_time_s = model_start.elapsed().as_secs_f64();

    let assemble_start = Instant::now();
    let bundle = assemble_bundle(
        &primary,
        &secondary,
        &reference,
        request.constants,
        &request.labels,
    );
    timing.assemble_time_s = assemble_start.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    tracing::info!(
        series = bundle.series().len(),
        x_extent_min = bundle.x_extent_min(),
        total_s = timing.total_time_s,
        "reconciliation complete"
    );

    Ok(ReconcileResponse { bundle, timing })
}

/// Reconcile the two log files named in a config.
pub fn reconcile_config(config: &ReconcileConfig) -> AppResult<ReconcileResponse> {
    let constants = config.constants()?;
    let primary = config.sources.primary.to_source();
    let secondary = config.sources.secondary.to_source();

    reconcile(&ReconcileRequest {
        primary: &primary,
        secondary: &secondary,
        constants: &constants,
        labels: config.display.clone().into(),
    })
}

/// Reference trajectory of the primary source named in a config.
pub fn reference_for_config(config: &ReconcileConfig) -> AppResult<ReferenceTrajectory> {
    let constants = config.constants()?;
    let primary = config.sources.primary.to_source().load()?;
    Ok(reference_trajectory(&constants, &primary)?)
}

/// Merge already-loaded series: reference from `primary`, then both observations.
pub fn merge(
    primary: &ObservationSeries,
    secondary: &ObservationSeries,
    constants: &ThermodynamicConstants,
    labels: &SeriesLabels,
) -> AppResult<ReconciliationBundle> {
    let reference = reference_trajectory(constants, primary)?;
    Ok(assemble_bundle(primary, secondary, &reference, constants, labels))
}

/// Put every series on the minute axis and add the boundary markers.
///
/// No resampling: each series keeps its own sample times.
pub fn assemble_bundle(
    primary: &ObservationSeries,
    secondary: &ObservationSeries,
    reference: &ReferenceTrajectory,
    constants: &ThermodynamicConstants,
    labels: &SeriesLabels,
) -> ReconciliationBundle {
    let reference_points = reference
        .points()
        .iter()
        .map(|p| chart_point(p.time_s, p.temperature_k))
        .collect();

    let series = vec![
        labeled(&labels.reference, SeriesRole::Reference, reference_points),
        labeled(
            &labels.primary,
            SeriesRole::ObservedPrimary,
            observed_points(primary),
        ),
        labeled(
            &labels.secondary,
            SeriesRole::ObservedSecondary,
            observed_points(secondary),
        ),
    ];

    let x_end_min = [primary.last(), secondary.last()]
        .into_iter()
        .flatten()
        .map(|s| seconds_to_minutes(s.time_s))
        .fold(0.0, f64::max);

    let markers = vec![
        Marker {
            label: INITIAL_MARKER_LABEL.to_string(),
            temperature_k: constants.initial_temperature_k(),
            x_start_min: 0.0,
            x_end_min,
            color: "black".to_string(),
            label_offset_k: -MARKER_LABEL_OFFSET_K,
        },
        Marker {
            label: INLET_MARKER_LABEL.to_string(),
            temperature_k: constants.inlet_temperature_k(),
            x_start_min: 0.0,
            x_end_min,
            color: "green".to_string(),
            label_offset_k: MARKER_LABEL_OFFSET_K,
        },
    ];

    ReconciliationBundle::new(series, markers)
}

fn chart_point(time_s: f64, temperature_k: f64) -> ChartPoint {
    ChartPoint {
        time_min: seconds_to_minutes(time_s),
        temperature_k,
    }
}

fn observed_points(series: &ObservationSeries) -> Vec<ChartPoint> {
    series
        .samples()
        .iter()
        .map(|s| chart_point(s.time_s, s.temperature_k))
        .collect()
}

fn labeled(label: &str, role: SeriesRole, points: Vec<ChartPoint>) -> LabeledSeries {
    LabeledSeries {
        label: label.to_string(),
        role,
        style: LineStyle::for_role(role),
        points,
    }
}
