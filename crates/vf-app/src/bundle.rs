//! Reconciliation bundle handed to rendering.
//!
//! All series and markers share one coordinate space: time in minutes on x,
//! temperature in kelvin on y.

use serde::Serialize;

/// What a series stands for in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRole {
    Reference,
    ObservedPrimary,
    ObservedSecondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dash {
    Solid,
    Dot,
    Dash,
}

/// Intended line style of a trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub dash: Dash,
}

impl LineStyle {
    pub fn new(color: &str, width: f64, dash: Dash) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash,
        }
    }

    pub fn reference() -> Self {
        Self::new("firebrick", 2.0, Dash::Dot)
    }

    pub fn observed_primary() -> Self {
        Self::new("navy", 2.0, Dash::Solid)
    }

    pub fn observed_secondary() -> Self {
        Self::new("firebrick", 2.0, Dash::Solid)
    }

    pub fn for_role(role: SeriesRole) -> Self {
        match role {
            SeriesRole::Reference => Self::reference(),
            SeriesRole::ObservedPrimary => Self::observed_primary(),
            SeriesRole::ObservedSecondary => Self::observed_secondary(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub time_min: f64,
    pub temperature_k: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSeries {
    pub label: String,
    pub role: SeriesRole,
    pub style: LineStyle,
    pub points: Vec<ChartPoint>,
}

impl LabeledSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn end_time_min(&self) -> Option<f64> {
        self.points.last().map(|p| p.time_min)
    }
}

/// Horizontal reference line with its text annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub label: String,
    pub temperature_k: f64,
    pub x_start_min: f64,
    pub x_end_min: f64,
    pub color: String,
    /// Vertical placement of the label relative to the line (K).
    pub label_offset_k: f64,
}

/// Reference trace, both observed traces and boundary markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationBundle {
    series: Vec<LabeledSeries>,
    markers: Vec<Marker>,
}

impl ReconciliationBundle {
    pub(crate) fn new(series: Vec<LabeledSeries>, markers: Vec<Marker>) -> Self {
        Self { series, markers }
    }

    pub fn series(&self) -> &[LabeledSeries] {
        &self.series
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn by_label(&self, label: &str) -> Option<&LabeledSeries> {
        self.series.iter().find(|s| s.label == label)
    }

    pub fn by_role(&self, role: SeriesRole) -> Option<&LabeledSeries> {
        self.series.iter().find(|s| s.role == role)
    }

    /// Right end of the shared time axis (min).
    pub fn x_extent_min(&self) -> f64 {
        self.series
            .iter()
            .filter_map(LabeledSeries::end_time_min)
            .fold(0.0, f64::max)
    }
}
