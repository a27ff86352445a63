//! Analytic reference models for vessel fill runs.
//!
//! Provides:
//! - Thermodynamic constants with derived Cv and Gamma
//! - Closed-form adiabatic fill temperature for a rigid control volume

pub mod adiabatic;
pub mod constants;
pub mod error;

// Re-exports for public API
pub use adiabatic::{AdiabaticFill, ReferencePoint, ReferenceTrajectory, reference_trajectory};
pub use constants::{FillConditions, GasProperties, ThermodynamicConstants};
pub use error::{ModelError, ModelResult};
