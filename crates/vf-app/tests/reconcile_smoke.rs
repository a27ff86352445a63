//! Integration tests for the reconciliation service.

use std::cell::Cell;

use vf_app::*;
use vf_core::{k, kgps};
use vf_model::{FillConditions, GasProperties, ThermodynamicConstants};
use vf_series::{
    InMemorySource, ObservationSeries, Sample, SeriesError, SeriesResult, SeriesSource,
};

fn constants() -> ThermodynamicConstants {
    ThermodynamicConstants::new(
        GasProperties::co2(),
        FillConditions {
            inlet_temperature: k(430.0),
            initial_temperature: k(300.0),
            mass_flow_rate: kgps(0.2),
        },
    )
    .unwrap()
}

/// `n` samples every `dt_s` seconds with a steady mass inflow.
fn fill_run(n: usize, dt_s: f64) -> ObservationSeries {
    ObservationSeries::new(
        (0..n)
            .map(|i| {
                let t = i as f64 * dt_s;
                Sample::new(t, 300.0 + 0.1 * i as f64, 1.0 + 0.2 * t, 1.0e5)
            })
            .collect(),
    )
    .unwrap()
}

/// Source that fails and counts how often it was asked.
struct BrokenSource {
    calls: Cell<usize>,
}

impl SeriesSource for BrokenSource {
    fn name(&self) -> &str {
        "broken"
    }

    fn load(&self) -> SeriesResult<ObservationSeries> {
        self.calls.set(self.calls.get() + 1);
        Err(SeriesError::unavailable("broken", "log file missing"))
    }
}

/// Source that records whether it was loaded.
struct CountingSource {
    inner: InMemorySource,
    calls: Cell<usize>,
}

impl SeriesSource for CountingSource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn load(&self) -> SeriesResult<ObservationSeries> {
        self.calls.set(self.calls.get() + 1);
        self.inner.load()
    }
}

#[test]
fn differing_lengths_keep_their_own_axes() {
    let primary = InMemorySource::new("a", fill_run(100, 6.0));
    let secondary = InMemorySource::new("b", fill_run(250, 3.0));
    let c = constants();

    let response = reconcile(&ReconcileRequest {
        primary: &primary,
        secondary: &secondary,
        constants: &c,
        labels: SeriesLabels::default(),
    })
    .unwrap();
    let bundle = &response.bundle;

    let reference = bundle.by_role(SeriesRole::Reference).unwrap();
    let a = bundle.by_role(SeriesRole::ObservedPrimary).unwrap();
    let b = bundle.by_role(SeriesRole::ObservedSecondary).unwrap();
    assert_eq!(reference.len(), 100);
    assert_eq!(a.len(), 100);
    assert_eq!(b.len(), 250);

    for (i, p) in a.points.iter().enumerate() {
        assert!((p.time_min - i as f64 * 6.0 / 60.0).abs() < 1e-12);
    }
    for (i, p) in b.points.iter().enumerate() {
        assert!((p.time_min - i as f64 * 3.0 / 60.0).abs() < 1e-12);
    }
    for (r, o) in reference.points.iter().zip(&a.points) {
        assert_eq!(r.time_min, o.time_min);
    }

    // primary ends at 594 s, secondary at 747 s
    for marker in bundle.markers() {
        assert_eq!(marker.x_start_min, 0.0);
        assert!((marker.x_end_min - 747.0 / 60.0).abs() < 1e-12);
    }
    assert!(response.timing.total_time_s >= response.timing.model_time_s);
}

#[test]
fn broken_primary_stops_before_anything_else() {
    let primary = BrokenSource {
        calls: Cell::new(0),
    };
    let secondary = CountingSource {
        inner: InMemorySource::new("b", fill_run(10, 1.0)),
        calls: Cell::new(0),
    };
    let c = constants();

    let err = reconcile(&ReconcileRequest {
        primary: &primary,
        secondary: &secondary,
        constants: &c,
        labels: SeriesLabels::default(),
    })
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert_eq!(primary.calls.get(), 1);
    assert_eq!(secondary.calls.get(), 0);
}

#[test]
fn broken_secondary_is_source_unavailable() {
    let primary = InMemorySource::new("a", fill_run(10, 1.0));
    let secondary = BrokenSource {
        calls: Cell::new(0),
    };
    let c = constants();

    let err = reconcile(&ReconcileRequest {
        primary: &primary,
        secondary: &secondary,
        constants: &c,
        labels: SeriesLabels::default(),
    })
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(err.to_string().contains("broken"));
}

#[test]
fn custom_labels_flow_into_bundle() {
    let labels = SeriesLabels {
        reference: "0D adiabatic model".to_string(),
        primary: "NGA2 with Twall=300K".to_string(),
        secondary: "NGA2 with adiabatic walls".to_string(),
    };
    let bundle = merge(&fill_run(5, 1.0), &fill_run(7, 1.0), &constants(), &labels).unwrap();

    assert_eq!(
        list_labels(&bundle),
        vec![
            "0D adiabatic model",
            "NGA2 with Twall=300K",
            "NGA2 with adiabatic walls"
        ]
    );
    assert_eq!(find_series(&bundle, "NGA2 with adiabatic walls").unwrap().len(), 7);
    let err = find_series(&bundle, "nope").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Query);
}

#[test]
fn summaries_and_deviation() {
    let bundle = merge(
        &fill_run(20, 5.0),
        &fill_run(8, 5.0),
        &constants(),
        &SeriesLabels::default(),
    )
    .unwrap();

    let summaries = series_summaries(&bundle);
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[1].sample_count, 20);
    let (start, end) = summaries[1].time_range_min.unwrap();
    assert_eq!(start, 0.0);
    assert!((end - 95.0 / 60.0).abs() < 1e-12);
    assert_eq!(summaries[1].min_temperature_k, Some(300.0));
    assert_eq!(summaries[2].sample_count, 8);

    let deviation = reference_deviation(&bundle).unwrap();
    assert_eq!(deviation.sample_count, 20);
    assert!(deviation.max_abs_k > 0.0);
    assert!(deviation.rms_k <= deviation.max_abs_k);
    assert!(deviation.at_time_min > 0.0);
}
