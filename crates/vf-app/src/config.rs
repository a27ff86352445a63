//! Reconciliation config: YAML schema, loading, saving and validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use vf_core::{k, kgps};
use vf_model::{FillConditions, GasProperties, ThermodynamicConstants};
use vf_series::{LogFileSource, LogSchema};

use crate::error::{AppError, AppResult};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconcileConfig {
    #[serde(default = "latest_version")]
    pub version: u32,
    #[serde(default)]
    pub gas: GasDef,
    #[serde(default)]
    pub conditions: ConditionsDef,
    pub sources: SourcesDef,
    #[serde(default)]
    pub display: DisplayDef,
}

fn latest_version() -> u32 {
    LATEST_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GasDef {
    pub gas_constant_j_per_mol_k: f64,
    pub molar_mass_kg_per_mol: f64,
    pub cp_molar_j_per_mol_k: f64,
}

impl Default for GasDef {
    fn default() -> Self {
        let co2 = GasProperties::co2();
        Self {
            gas_constant_j_per_mol_k: co2.r_j_per_mol_k,
            molar_mass_kg_per_mol: co2.molar_mass_kg_per_mol,
            cp_molar_j_per_mol_k: co2.cp_molar_j_per_mol_k,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConditionsDef {
    pub inlet_temperature_k: f64,
    pub initial_temperature_k: f64,
    pub mass_flow_rate_kg_s: f64,
}

impl Default for ConditionsDef {
    fn default() -> Self {
        Self {
            inlet_temperature_k: 430.0,
            initial_temperature_k: 300.0,
            mass_flow_rate_kg_s: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourcesDef {
    /// Run driving the reference model.
    pub primary: SourceDef,
    pub secondary: SourceDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceDef {
    pub path: PathBuf,
    #[serde(default)]
    pub schema: LogSchema,
}

impl SourceDef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            schema: LogSchema::default(),
        }
    }

    pub fn to_source(&self) -> LogFileSource {
        LogFileSource::new(&self.path, self.schema.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayDef {
    pub reference_label: String,
    pub primary_label: String,
    pub secondary_label: String,
}

impl Default for DisplayDef {
    fn default() -> Self {
        Self {
            reference_label: "reference model".to_string(),
            primary_label: "observed, condition A".to_string(),
            secondary_label: "observed, condition B".to_string(),
        }
    }
}

impl ReconcileConfig {
    /// Config with default constants and labels for two log paths.
    pub fn with_sources(primary: impl Into<PathBuf>, secondary: impl Into<PathBuf>) -> Self {
        Self {
            version: LATEST_VERSION,
            gas: GasDef::default(),
            conditions: ConditionsDef::default(),
            sources: SourcesDef {
                primary: SourceDef::new(primary),
                secondary: SourceDef::new(secondary),
            },
            display: DisplayDef::default(),
        }
    }

    /// Build the immutable constants for one reconciliation.
    pub fn constants(&self) -> AppResult<ThermodynamicConstants> {
        let gas = GasProperties {
            r_j_per_mol_k: self.gas.gas_constant_j_per_mol_k,
            molar_mass_kg_per_mol: self.gas.molar_mass_kg_per_mol,
            cp_molar_j_per_mol_k: self.gas.cp_molar_j_per_mol_k,
        };
        let fill = FillConditions {
            inlet_temperature: k(self.conditions.inlet_temperature_k),
            initial_temperature: k(self.conditions.initial_temperature_k),
            mass_flow_rate: kgps(self.conditions.mass_flow_rate_kg_s),
        };
        Ok(ThermodynamicConstants::new(gas, fill)?)
    }

    /// Make relative source paths relative to `base_dir`.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        for source in [&mut self.sources.primary, &mut self.sources.secondary] {
            if source.path.is_relative() {
                source.path = base_dir.join(&source.path);
            }
        }
    }
}

/// Parse config text without touching the filesystem.
pub fn parse_config(text: &str) -> AppResult<ReconcileConfig> {
    let config: ReconcileConfig = serde_yaml::from_str(text)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from a YAML file; source paths resolve against its directory.
pub fn load_config(path: &Path) -> AppResult<ReconcileConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config = parse_config(&content)?;
    if let Some(dir) = path.parent() {
        config.resolve_paths(dir);
    }
    tracing::debug!(path = %path.display(), "loaded reconcile config");
    Ok(config)
}

/// Save config to a YAML file.
pub fn save_config(path: &Path, config: &ReconcileConfig) -> AppResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ConfigFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Validate config structure and derived constants.
pub fn validate_config(config: &ReconcileConfig) -> AppResult<()> {
    if config.version > LATEST_VERSION {
        return Err(AppError::Validation(format!(
            "Unsupported config version: {}",
            config.version
        )));
    }

    for (role, source) in [
        ("primary", &config.sources.primary),
        ("secondary", &config.sources.secondary),
    ] {
        if source.path.as_os_str().is_empty() {
            return Err(AppError::Validation(format!(
                "Source '{}' must have a path",
                role
            )));
        }
    }

    let labels = [
        &config.display.reference_label,
        &config.display.primary_label,
        &config.display.secondary_label,
    ];
    if labels.iter().any(|l| l.trim().is_empty()) {
        return Err(AppError::Validation(
            "Series labels must not be empty".to_string(),
        ));
    }
    let distinct: HashSet<&String> = labels.iter().copied().collect();
    if distinct.len() != labels.len() {
        return Err(AppError::Validation(
            "Series labels must be distinct".to_string(),
        ));
    }

    config.constants()?;
    Ok(())
}
