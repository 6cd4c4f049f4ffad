//! Run settings loaded from YAML
//!
//! ```yaml
//! simulation:
//!   mu: 0.05
//!   sigma: 0.1
//!   level: 1.0
//!   n_paths: 1000
//!   horizon: 10.0
//!   dt: 0.1
//!   seed: 123
//!   refine: linear
//! policy:
//!   cofs: [1.0, 5.0, 20.0]
//!   epsilons: [0.01, 0.03, 0.05]
//!   mode: interpolated
//! ```
//!
//! Every field is optional. Command-line flags override file values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trtsim_core::{PolicyGrid, SimulationConfig, TrtMode};

use crate::storage::StorageError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySettings {
    #[serde(default = "default_cofs")]
    pub cofs: Vec<f64>,
    #[serde(default = "default_epsilons")]
    pub epsilons: Vec<f64>,
    #[serde(default)]
    pub mode: TrtMode,
}

fn default_cofs() -> Vec<f64> {
    PolicyGrid::default().cofs
}

fn default_epsilons() -> Vec<f64> {
    PolicyGrid::default().epsilons
}

impl Default for PolicySettings {
    fn default() -> Self {
        let PolicyGrid { cofs, epsilons } = PolicyGrid::default();
        Self {
            cofs,
            epsilons,
            mode: TrtMode::default(),
        }
    }
}

impl PolicySettings {
    pub fn grid(&self) -> PolicyGrid {
        PolicyGrid {
            cofs: self.cofs.clone(),
            epsilons: self.epsilons.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunSettings {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub policy: PolicySettings,
}

impl RunSettings {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Load settings from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, StorageError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_yaml(&content)
            .map_err(|e| StorageError::Parse(format!("{}: {e}", path.display())))
    }
}
