//! Uniform simulation time grid
//!
//! The grid holds `n = round(H / dt) + 1` points spaced evenly over `[0, H]`,
//! so the last point is exactly the horizon. When `H / dt` is not an integer
//! the effective spacing `H / (n - 1)` differs slightly from the requested
//! `dt`; the simulator integrates with the effective spacing.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    times: Vec<f64>,
    step: f64,
}

impl TimeGrid {
    /// Build the grid for a horizon and requested step.
    pub fn new(horizon: f64, dt: f64) -> Result<Self> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(SimulationError::InvalidParameter {
                name: "horizon",
                value: horizon,
                reason: "must be positive and finite",
            });
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimulationError::InvalidParameter {
                name: "dt",
                value: dt,
                reason: "must be positive and finite",
            });
        }

        let steps = (horizon / dt).round();
        if steps < 1.0 {
            return Err(SimulationError::DegenerateGrid { horizon, dt });
        }
        let steps = steps as usize;
        let step = horizon / steps as f64;

        let mut times: Vec<f64> = (0..steps).map(|i| i as f64 * step).collect();
        times.push(horizon);

        Ok(Self { times, step })
    }

    /// Wrap a persisted grid after [`TimeGrid::check_times`]. The step is
    /// taken from the first interval.
    pub fn from_times(times: Vec<f64>) -> Result<Self> {
        Self::check_times(&times)?;

        let step = if times.len() > 1 {
            times[1] - times[0]
        } else {
            0.0
        };
        Ok(Self { times, step })
    }

    /// Check that `times` is non-empty, finite and strictly increasing.
    pub fn check_times(times: &[f64]) -> Result<()> {
        if times.is_empty() {
            return Err(SimulationError::InvalidTimeGrid { index: 0 });
        }
        if let Some(index) = times.iter().position(|t| !t.is_finite()) {
            return Err(SimulationError::InvalidTimeGrid { index });
        }
        if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SimulationError::InvalidTimeGrid { index: index + 1 });
        }
        Ok(())
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Effective spacing between consecutive points
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn horizon(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    pub fn into_times(self) -> Vec<f64> {
        self.times
    }
}
