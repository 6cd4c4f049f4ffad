//! Simulation bundle persistence
//!
//! The simulation stage writes one JSON document holding the configuration
//! that produced it plus the `times`, `pof` and `fpt` arrays. JSON has no
//! infinity, so unreached first-passage times are stored as `null`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trtsim_core::{SimulationConfig, SimulationOutput, TimeGrid, enforce_monotone};

use crate::util::io::atomic_write;

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
    /// Bundle arrays disagree in length or hold values outside their domain
    Inconsistent(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {msg}"),
            StorageError::Parse(msg) => write!(f, "Parse error: {msg}"),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
            StorageError::Inconsistent(msg) => write!(f, "Inconsistent bundle: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// On-disk form of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationBundle {
    pub config: SimulationConfig,
    pub times: Vec<f64>,
    pub pof: Vec<f64>,
    pub fpt: Vec<Option<f64>>,
}

impl SimulationBundle {
    pub fn new(config: SimulationConfig, output: SimulationOutput) -> Self {
        Self {
            config,
            times: output.times,
            pof: output.pof,
            fpt: output
                .fpt
                .into_iter()
                .map(|t| t.is_finite().then_some(t))
                .collect(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(self).map_err(|e| {
            StorageError::Serialize(format!("Failed to serialize simulation bundle: {e}"))
        })?;
        atomic_write(path, &json).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {e}", path.display()))
        })
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let content = std::fs::read(path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {e}", path.display())))?;
        let mut bundle: Self = serde_json::from_slice(&content)
            .map_err(|e| StorageError::Parse(format!("{}: {e}", path.display())))?;

        if bundle.times.len() != bundle.pof.len() {
            return Err(StorageError::Inconsistent(format!(
                "{} times but {} PoF values",
                bundle.times.len(),
                bundle.pof.len()
            )));
        }
        TimeGrid::check_times(&bundle.times)
            .map_err(|e| StorageError::Inconsistent(e.to_string()))?;
        if let Some(index) = bundle.pof.iter().position(|p| !(0.0..=1.0).contains(p)) {
            return Err(StorageError::Inconsistent(format!(
                "PoF value {} at index {index} is outside [0, 1]",
                bundle.pof[index]
            )));
        }
        enforce_monotone(&mut bundle.pof);

        Ok(bundle)
    }
}
