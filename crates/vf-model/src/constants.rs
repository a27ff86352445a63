//! Immutable thermodynamic configuration for one reconciliation.

use vf_core::units::{MassRate, Temperature, constants};
use vf_core::{ensure_positive, kelvin_of, kgps_of};

use crate::error::{ModelError, ModelResult};

/// Ideal-gas properties of the working fluid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasProperties {
    /// Molar gas constant (J/mol/K)
    pub r_j_per_mol_k: f64,
    /// Molar mass (kg/mol)
    pub molar_mass_kg_per_mol: f64,
    /// Constant-pressure molar heat capacity (J/mol/K)
    pub cp_molar_j_per_mol_k: f64,
}

impl GasProperties {
    /// Carbon dioxide with a constant 40 J/mol/K heat capacity.
    pub fn co2() -> Self {
        Self {
            r_j_per_mol_k: constants::R_J_PER_MOL_K,
            molar_mass_kg_per_mol: constants::M_CO2_KG_PER_MOL,
            cp_molar_j_per_mol_k: 40.0,
        }
    }
}

/// Boundary conditions of the fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillConditions {
    pub inlet_temperature: Temperature,
    pub initial_temperature: Temperature,
    pub mass_flow_rate: MassRate,
}

/// Gas constants plus fill conditions, with Cv and Gamma derived once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermodynamicConstants {
    gas: GasProperties,
    fill: FillConditions,
    cp_j_per_kg_k: f64,
    cv_j_per_kg_k: f64,
    gamma: f64,
}

impl ThermodynamicConstants {
    pub fn new(gas: GasProperties, fill: FillConditions) -> ModelResult<Self> {
        let r = ensure_positive(gas.r_j_per_mol_k, "gas constant")?;
        let molar_mass = ensure_positive(gas.molar_mass_kg_per_mol, "molar mass")?;
        let cp_molar = ensure_positive(gas.cp_molar_j_per_mol_k, "molar heat capacity")?;
        ensure_positive(kelvin_of(fill.inlet_temperature), "inlet temperature")?;
        ensure_positive(kelvin_of(fill.initial_temperature), "initial temperature")?;
        ensure_positive(kgps_of(fill.mass_flow_rate), "mass flow rate")?;

        let cp = cp_molar / molar_mass;
        let cv = cp - r / molar_mass;
        if cv <= 0.0 {
            return Err(ModelError::NonPhysical {
                what: "cv = cp - R/M must be positive",
            });
        }

        Ok(Self {
            gas,
            fill,
            cp_j_per_kg_k: cp,
            cv_j_per_kg_k: cv,
            gamma: cp / cv,
        })
    }

    pub fn gas(&self) -> &GasProperties {
        &self.gas
    }

    pub fn fill(&self) -> &FillConditions {
        &self.fill
    }

    /// Specific gas constant R/M (J/kg/K).
    pub fn specific_gas_constant(&self) -> f64 {
        self.gas.r_j_per_mol_k / self.gas.molar_mass_kg_per_mol
    }

    /// Constant-pressure specific heat (J/kg/K).
    pub fn cp(&self) -> f64 {
        self.cp_j_per_kg_k
    }

    /// Constant-volume specific heat (J/kg/K).
    pub fn cv(&self) -> f64 {
        self.cv_j_per_kg_k
    }

    /// Heat-capacity ratio Cp/Cv.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn inlet_temperature_k(&self) -> f64 {
        kelvin_of(self.fill.inlet_temperature)
    }

    pub fn initial_temperature_k(&self) -> f64 {
        kelvin_of(self.fill.initial_temperature)
    }

    pub fn mass_flow_rate_kg_s(&self) -> f64 {
        kgps_of(self.fill.mass_flow_rate)
    }
}
