//! Simulation configuration
//!
//! `SimulationConfig` carries everything the simulation stage needs. Every
//! field has a default, so partial YAML/JSON documents deserialize cleanly.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::grid::TimeGrid;
use crate::passage::Refinement;
use crate::simulation::WienerProcess;

fn default_mu() -> f64 {
    0.05
}

fn default_sigma() -> f64 {
    0.1
}

fn default_level() -> f64 {
    1.0
}

fn default_n_paths() -> usize {
    100
}

fn default_horizon() -> f64 {
    10.0
}

fn default_dt() -> f64 {
    0.1
}

fn default_seed() -> u64 {
    123
}

/// Complete simulation-stage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Drift per unit time
    #[serde(default = "default_mu")]
    pub mu: f64,
    /// Volatility per square-root unit time
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    /// Failure level `L`
    #[serde(default = "default_level")]
    pub level: f64,
    #[serde(default = "default_n_paths")]
    pub n_paths: usize,
    /// Horizon `H`
    #[serde(default = "default_horizon")]
    pub horizon: f64,
    /// Requested time step
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub refine: Refinement,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mu: default_mu(),
            sigma: default_sigma(),
            level: default_level(),
            n_paths: default_n_paths(),
            horizon: default_horizon(),
            dt: default_dt(),
            seed: default_seed(),
            refine: Refinement::default(),
        }
    }
}

impl SimulationConfig {
    /// Check the configuration and build the process and grid it describes.
    pub fn validate(&self) -> Result<(WienerProcess, TimeGrid)> {
        let process = WienerProcess::new(self.mu, self.sigma)?;
        if !self.level.is_finite() {
            return Err(SimulationError::InvalidParameter {
                name: "level",
                value: self.level,
                reason: "must be finite",
            });
        }
        if self.n_paths == 0 {
            return Err(SimulationError::NoPaths);
        }
        let grid = TimeGrid::new(self.horizon, self.dt)?;
        Ok((process, grid))
    }

    // Builder-style setters, mostly for tests and benches

    #[must_use]
    pub fn with_process(mut self, mu: f64, sigma: f64) -> Self {
        self.mu = mu;
        self.sigma = sigma;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = n_paths;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, horizon: f64, dt: f64) -> Self {
        self.horizon = horizon;
        self.dt = dt;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_refine(mut self, refine: Refinement) -> Self {
        self.refine = refine;
        self
    }
}
