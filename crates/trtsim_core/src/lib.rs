//! Degradation risk simulation library
//!
//! This crate estimates a probability-of-failure curve from Monte Carlo
//! Wiener-with-drift trajectories and infers the Time to Risk Threshold (TRT)
//! from it. It provides:
//! - Seeded, reproducible path ensembles on a uniform time grid
//! - First-passage extraction with optional linear sub-step refinement
//! - An empirical, non-decreasing PoF curve
//! - Risk curves, a pluggable critical-risk rule and interpolated TRT
//! - A policy sweep over `(cof, epsilon)` grids
//!
//! # Example
//!
//! ```ignore
//! use trtsim_core::{PolicyGrid, RcritRule, SimulationConfig, TrtMode};
//!
//! let output = trtsim_core::run_simulation(&SimulationConfig::default())?;
//! let rows = trtsim_core::sweep_policy(
//!     &output.times,
//!     &output.pof,
//!     &PolicyGrid::default(),
//!     &RcritRule::LINEAR,
//!     TrtMode::Interpolated,
//! )?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Simulation stage
// ============================================================================

pub mod config;
pub mod error;
pub mod grid;
pub mod interp;
pub mod passage;
pub mod pipeline;
pub mod pof;
pub mod simulation;

// ============================================================================
// Policy stage
// ============================================================================

pub mod policy;
pub mod sweep;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::SimulationConfig;
pub use error::{PolicyError, SimulationError};
pub use grid::TimeGrid;
pub use passage::{PassageSummary, Refinement, first_passage_time, first_passage_times};
pub use pipeline::{SimulationOutput, run_simulation};
pub use pof::{PofCurve, enforce_monotone};
pub use policy::{PolicyOutcome, RcritRule, TrtMode, evaluate_policy, infer_trt, risk_curve};
pub use simulation::{PathEnsemble, WienerProcess, simulate_paths};
pub use sweep::{PolicyGrid, TrtRow, sweep_policy};
