//! Observation series data types.

use vf_core::first_non_increasing;

use crate::{SeriesError, SeriesResult};

/// One row of a simulation monitor log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time_s: f64,
    pub temperature_k: f64,
    pub mass_kg: f64,
    pub pressure_pa: f64,
}

impl Sample {
    pub fn new(time_s: f64, temperature_k: f64, mass_kg: f64, pressure_pa: f64) -> Self {
        Self {
            time_s,
            temperature_k,
            mass_kg,
            pressure_pa,
        }
    }
}

/// Time-ordered record of one simulation run.
///
/// Time is strictly increasing, mass and temperature are positive and every
/// value is finite. The series cannot be modified once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    samples: Vec<Sample>,
}

impl ObservationSeries {
    /// Validate and wrap a sample vector.
    pub fn new(samples: Vec<Sample>) -> SeriesResult<Self> {
        for (index, sample) in samples.iter().enumerate() {
            check_sample(index, sample)?;
        }

        let times: Vec<f64> = samples.iter().map(|s| s.time_s).collect();
        if let Some(index) = first_non_increasing(&times) {
            return Err(SeriesError::InvalidSample {
                index,
                reason: format!(
                    "time {} does not exceed previous time {}",
                    times[index],
                    times[index - 1]
                ),
            });
        }

        Ok(Self { samples })
    }

    pub fn empty() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time_s)
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.temperature_k)
    }

    pub fn masses(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.mass_kg)
    }

    pub fn pressures(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.pressure_pa)
    }

    /// First and last time stamp in seconds.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => Some((first.time_s, last.time_s)),
            _ => None,
        }
    }
}

fn check_sample(index: usize, sample: &Sample) -> SeriesResult<()> {
    let fields = [
        ("time", sample.time_s),
        ("temperature", sample.temperature_k),
        ("mass", sample.mass_kg),
        ("pressure", sample.pressure_pa),
    ];
    if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(SeriesError::InvalidSample {
            index,
            reason: format!("{name} is not finite ({value})"),
        });
    }
    if sample.mass_kg <= 0.0 {
        return Err(SeriesError::InvalidSample {
            index,
            reason: format!("mass must be positive, got {}", sample.mass_kg),
        });
    }
    if sample.temperature_k <= 0.0 {
        return Err(SeriesError::InvalidSample {
            index,
            reason: format!("temperature must be positive, got {}", sample.temperature_k),
        });
    }
    Ok(())
}
