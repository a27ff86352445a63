//! Error types for reference model operations.

use thiserror::Error;
use vf_core::CoreError;

/// Errors raised while configuring or evaluating the reference model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("driving series is empty, no initial condition available")]
    EmptySeries,

    #[error("mass at sample {index} is {mass_kg} kg, must be positive")]
    NonPositiveMass { index: usize, mass_kg: f64 },

    #[error("Invalid constant: {0}")]
    InvalidConstant(#[from] CoreError),

    #[error("Non-physical constants: {what}")]
    NonPhysical { what: &'static str },
}

impl ModelError {
    /// True for mathematically undefined evaluations of the energy balance.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            ModelError::EmptySeries | ModelError::NonPositiveMass { .. }
        )
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
