//! Adiabatic fill reference for a rigid control volume.
//!
//! Energy balance over the vessel with no wall heat exchange: the internal
//! energy of the initial charge plus the enthalpy carried in by the inflow
//! equals the internal energy of the current charge,
//!
//! ```text
//! m0·cv·T0 + (m − m0)·cp·Tin = m·cv·T
//! T = (m0·T0 + γ·Tin·(m − m0)) / m
//! ```
//!
//! As m grows, T approaches γ·Tin.

use vf_series::{ObservationSeries, Sample};

use crate::constants::ThermodynamicConstants;
use crate::error::{ModelError, ModelResult};

/// One point of the reference trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferencePoint {
    pub time_s: f64,
    pub temperature_k: f64,
}

/// Adiabatic temperature for every sample of a driving series.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceTrajectory {
    points: Vec<ReferencePoint>,
    asymptote_k: f64,
}

impl ReferenceTrajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.time_s)
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.temperature_k)
    }

    pub fn final_temperature(&self) -> Option<f64> {
        self.points.last().map(|p| p.temperature_k)
    }

    /// Limit of the trajectory for unbounded inflow, γ·Tin.
    pub fn asymptote_k(&self) -> f64 {
        self.asymptote_k
    }
}

/// Evaluates the adiabatic energy balance with fixed inlet conditions.
#[derive(Clone, Copy, Debug)]
pub struct AdiabaticFill {
    gamma: f64,
    inlet_temperature_k: f64,
}

impl AdiabaticFill {
    pub fn new(constants: &ThermodynamicConstants) -> Self {
        Self {
            gamma: constants.gamma(),
            inlet_temperature_k: constants.inlet_temperature_k(),
        }
    }

    /// Temperature of charge `mass_kg` grown from (`m0_kg`, `t0_k`).
    ///
    /// Caller guarantees `mass_kg > 0`.
    pub fn temperature(&self, m0_kg: f64, t0_k: f64, mass_kg: f64) -> f64 {
        (m0_kg * t0_k + self.gamma * self.inlet_temperature_k * (mass_kg - m0_kg)) / mass_kg
    }

    /// Reference trajectory over raw samples; the first sample is the initial condition.
    pub fn trajectory(&self, samples: &[Sample]) -> ModelResult<ReferenceTrajectory> {
        let initial = samples.first().ok_or(ModelError::EmptySeries)?;

        let points = samples
            .iter()
            .enumerate()
            .map(|(index, sample)| {
                if !(sample.mass_kg.is_finite() && sample.mass_kg > 0.0) {
                    return Err(ModelError::NonPositiveMass {
                        index,
                        mass_kg: sample.mass_kg,
                    });
                }
                Ok(ReferencePoint {
                    time_s: sample.time_s,
                    temperature_k: self.temperature(
                        initial.mass_kg,
                        initial.temperature_k,
                        sample.mass_kg,
                    ),
                })
            })
            .collect::<ModelResult<Vec<_>>>()?;

        Ok(ReferenceTrajectory {
            points,
            asymptote_k: self.gamma * self.inlet_temperature_k,
        })
    }

    pub fn trajectory_for(&self, series: &ObservationSeries) -> ModelResult<ReferenceTrajectory> {
        self.trajectory(series.samples())
    }
}

/// Adiabatic reference trajectory driven by `series`.
pub fn reference_trajectory(
    constants: &ThermodynamicConstants,
    series: &ObservationSeries,
) -> ModelResult<ReferenceTrajectory> {
    AdiabaticFill::new(constants).trajectory_for(series)
}
