//! Integration tests: adiabatic reference driven by observation series.

use proptest::prelude::*;
use vf_core::{Tolerances, k, kgps, nearly_equal};
use vf_model::{
    FillConditions, GasProperties, ModelError, ThermodynamicConstants, reference_trajectory,
};
use vf_series::{ObservationSeries, Sample};

/// R=8.314, M=44.01e-3, Cp=40/M, Tinlet=430, Tinit=300.
fn co2_fill() -> ThermodynamicConstants {
    ThermodynamicConstants::new(
        GasProperties {
            r_j_per_mol_k: 8.314,
            molar_mass_kg_per_mol: 44.01e-3,
            cp_molar_j_per_mol_k: 40.0,
        },
        FillConditions {
            inlet_temperature: k(430.0),
            initial_temperature: k(300.0),
            mass_flow_rate: kgps(0.2),
        },
    )
    .unwrap()
}

fn series(masses: &[f64], temperatures: &[f64]) -> ObservationSeries {
    let samples = masses
        .iter()
        .zip(temperatures)
        .enumerate()
        .map(|(i, (&m, &t))| Sample::new(10.0 * i as f64, t, m, 1.0e5))
        .collect();
    ObservationSeries::new(samples).unwrap()
}

#[test]
fn constant_mass_gives_flat_reference() {
    let traj = reference_trajectory(
        &co2_fill(),
        &series(&[1.0, 1.0, 1.0], &[300.0, 310.0, 305.0]),
    )
    .unwrap();

    let tol = Tolerances::default();
    let temps: Vec<f64> = traj.temperatures().collect();
    assert_eq!(temps.len(), 3);
    for t in temps {
        assert!(nearly_equal(t, 300.0, tol), "got {t}");
    }
}

#[test]
fn doubled_charge_matches_energy_balance() {
    let constants = co2_fill();
    let cp = 40.0 / 44.01e-3;
    let cv = cp - 8.314 / 44.01e-3;
    let gamma = cp / cv;

    let traj = reference_trajectory(&constants, &series(&[1.0, 2.0], &[300.0, 350.0])).unwrap();
    let expected = (1.0 * 300.0 + gamma * 430.0 * (2.0 - 1.0)) / 2.0;

    assert_eq!(traj.points()[0].temperature_k, 300.0);
    assert!((traj.points()[1].temperature_k - expected).abs() < 1e-9);
    assert!(traj.points()[1].temperature_k > 300.0);
    assert!(traj.points()[1].temperature_k < 430.0 * gamma);
}

#[test]
fn empty_driving_series_is_rejected() {
    let err = reference_trajectory(&co2_fill(), &ObservationSeries::empty()).unwrap_err();
    assert!(err.is_domain());
    assert_eq!(err, ModelError::EmptySeries);
}

proptest! {
    #[test]
    fn constant_mass_never_heats(
        mass in 0.01_f64..100.0,
        temps in prop::collection::vec(250.0_f64..450.0, 1..40),
    ) {
        let masses = vec![mass; temps.len()];
        let traj = reference_trajectory(&co2_fill(), &series(&masses, &temps)).unwrap();
        let tol = Tolerances { abs: 1e-9, rel: 1e-12 };
        for t in traj.temperatures() {
            prop_assert!(nearly_equal(t, temps[0], tol));
        }
    }

    #[test]
    fn trajectory_mirrors_driving_times(
        increments in prop::collection::vec(0.0_f64..2.0, 1..60),
        t0 in 250.0_f64..400.0,
    ) {
        let mut masses = Vec::with_capacity(increments.len());
        let mut m = 1.0;
        for dm in &increments {
            m += dm;
            masses.push(m);
        }
        let temps = vec![t0; masses.len()];
        let driving = series(&masses, &temps);
        let traj = reference_trajectory(&co2_fill(), &driving).unwrap();

        prop_assert_eq!(traj.len(), driving.len());
        prop_assert_eq!(traj.times().collect::<Vec<_>>(), driving.times().collect::<Vec<_>>());
    }

    #[test]
    fn filling_below_asymptote_heats_monotonically(
        m0 in 0.1_f64..10.0,
        increments in prop::collection::vec(0.0_f64..5.0, 1..60),
        t0 in 200.0_f64..500.0,
    ) {
        let constants = co2_fill();
        prop_assume!(constants.gamma() * constants.inlet_temperature_k() > t0);

        let mut masses = vec![m0];
        for dm in &increments {
            let next = masses[masses.len() - 1] + dm;
            masses.push(next);
        }
        let temps = vec![t0; masses.len()];
        let traj = reference_trajectory(&constants, &series(&masses, &temps)).unwrap();

        let temps: Vec<f64> = traj.temperatures().collect();
        for w in temps.windows(2) {
            prop_assert!(w[1] >= w[0] - 1e-9 * w[0].abs(), "{} then {}", w[0], w[1]);
        }
    }
}
