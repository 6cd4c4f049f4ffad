//! Policy sweep over a grid of `(cof, epsilon)` pairs
//!
//! Rows come out cof-major / epsilon-minor, matching the order of the
//! persisted TRT table.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::policy::{RcritRule, TrtMode, check_curve, critical_risk, infer_trt, risk_curve};

fn default_cofs() -> Vec<f64> {
    vec![1.0, 5.0, 20.0]
}

fn default_epsilons() -> Vec<f64> {
    vec![0.01, 0.03, 0.05]
}

/// Axes of the policy grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyGrid {
    #[serde(default = "default_cofs")]
    pub cofs: Vec<f64>,
    #[serde(default = "default_epsilons")]
    pub epsilons: Vec<f64>,
}

impl Default for PolicyGrid {
    fn default() -> Self {
        Self {
            cofs: default_cofs(),
            epsilons: default_epsilons(),
        }
    }
}

impl PolicyGrid {
    pub fn len(&self) -> usize {
        self.cofs.len() * self.epsilons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All `(cof, epsilon)` pairs, cof-major
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.cofs
            .iter()
            .flat_map(|&cof| self.epsilons.iter().map(move |&eps| (cof, eps)))
            .collect()
    }
}

/// One row of the TRT table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrtRow {
    pub cof: f64,
    pub epsilon: f64,
    pub rcrit: f64,
    pub trt: f64,
}

fn evaluate_pair(
    times: &[f64],
    pof: &[f64],
    (cof, epsilon): (f64, f64),
    rule: &RcritRule,
    mode: TrtMode,
) -> Result<TrtRow, PolicyError> {
    let rcrit = critical_risk(rule, cof, epsilon)?;
    let risk = risk_curve(pof, cof);
    Ok(TrtRow {
        cof,
        epsilon,
        rcrit,
        trt: infer_trt(times, &risk, rcrit, mode),
    })
}

/// Evaluate every pair of `grid` against one PoF curve.
pub fn sweep_policy(
    times: &[f64],
    pof: &[f64],
    grid: &PolicyGrid,
    rule: &RcritRule,
    mode: TrtMode,
) -> Result<Vec<TrtRow>, PolicyError> {
    check_curve(times, pof)?;
    let pairs = grid.pairs();

    #[cfg(feature = "parallel")]
    let rows = pairs
        .par_iter()
        .map(|&pair| evaluate_pair(times, pof, pair, rule, mode))
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(not(feature = "parallel"))]
    let rows = pairs
        .iter()
        .map(|&pair| evaluate_pair(times, pof, pair, rule, mode))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rule = rule.name, points = pairs.len(), "policy sweep complete");
    Ok(rows)
}
