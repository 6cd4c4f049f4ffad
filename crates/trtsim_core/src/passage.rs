//! First-passage time extraction
//!
//! For each path the first grid index `k` with `path[k] >= level` brackets
//! the crossing in `[t[k-1], t[k]]`. Grid-only detection always rounds the
//! crossing up to `t[k]`; linear refinement places it inside the bracket.
//! Paths that never reach the level get `f64::INFINITY`.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::grid::TimeGrid;
use crate::interp::interpolate_crossing;
use crate::simulation::PathEnsemble;

/// How a crossing is located within its bracketing grid interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Refinement {
    /// Report the first grid time at or above the level
    None,
    /// Interpolate linearly between the bracketing grid points
    #[default]
    Linear,
}

impl Refinement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Refinement::None => "none",
            Refinement::Linear => "linear",
        }
    }
}

/// First-passage time of a single path. `path` and `times` must have the
/// same length.
pub fn first_passage_time(path: &[f64], times: &[f64], level: f64, refine: Refinement) -> f64 {
    let Some(k) = path.iter().position(|&x| x >= level) else {
        return f64::INFINITY;
    };

    if k == 0 {
        return times[0];
    }

    match refine {
        Refinement::None => times[k],
        Refinement::Linear => {
            interpolate_crossing(times[k - 1], times[k], path[k - 1], path[k], level)
        }
    }
}

/// First-passage time of every path in the ensemble, in path order.
pub fn first_passage_times(
    ensemble: &PathEnsemble,
    grid: &TimeGrid,
    level: f64,
    refine: Refinement,
) -> Result<Vec<f64>> {
    if ensemble.n_steps() != grid.len() {
        return Err(SimulationError::ShapeMismatch {
            expected: grid.len(),
            found: ensemble.n_steps(),
        });
    }
    let times = grid.times();

    #[cfg(feature = "parallel")]
    let fpt = ensemble
        .values()
        .par_chunks_exact(ensemble.n_steps())
        .map(|path| first_passage_time(path, times, level, refine))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let fpt = ensemble
        .paths()
        .map(|path| first_passage_time(path, times, level, refine))
        .collect();

    Ok(fpt)
}

/// Summary of an FPT collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassageSummary {
    pub n_paths: usize,
    /// Paths with a finite first-passage time
    pub n_crossed: usize,
    /// Mean over crossing paths only
    pub mean_fpt: Option<f64>,
}

impl PassageSummary {
    #[must_use]
    pub fn from_fpt(fpt: &[f64]) -> Self {
        let (n_crossed, total) = fpt
            .iter()
            .filter(|t| t.is_finite())
            .fold((0usize, 0.0), |(n, sum), t| (n + 1, sum + t));

        Self {
            n_paths: fpt.len(),
            n_crossed,
            mean_fpt: (n_crossed > 0).then(|| total / n_crossed as f64),
        }
    }

    /// Fraction of paths that crossed within the horizon
    #[must_use]
    pub fn crossed_fraction(&self) -> f64 {
        if self.n_paths == 0 {
            0.0
        } else {
            self.n_crossed as f64 / self.n_paths as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES: [f64; 3] = [0.0, 1.0, 2.0];

    #[test]
    fn test_linear_refinement_midpoint() {
        let fpt = first_passage_time(&[0.0, 0.5, 1.5], &TIMES, 1.0, Refinement::Linear);
        assert_eq!(fpt, 1.5);
    }

    #[test]
    fn test_grid_only_rounds_up() {
        let fpt = first_passage_time(&[0.0, 0.5, 1.5], &TIMES, 1.0, Refinement::None);
        assert_eq!(fpt, 2.0);
    }

    #[test]
    fn test_unreached_is_infinite() {
        let fpt = first_passage_time(&[0.0, 0.5, 0.9], &TIMES, 1.0, Refinement::Linear);
        assert_eq!(fpt, f64::INFINITY);
    }

    #[test]
    fn test_at_level_from_start() {
        for refine in [Refinement::None, Refinement::Linear] {
            assert_eq!(first_passage_time(&[0.0, 0.2, 0.4], &TIMES, 0.0, refine), 0.0);
            assert_eq!(first_passage_time(&[0.0, 0.2, 0.4], &TIMES, -1.0, refine), 0.0);
        }
    }

    #[test]
    fn test_exact_tie_uses_leftmost_index() {
        // path touches the level exactly at index 1 and stays above
        let path = [0.0, 1.0, 2.0];
        assert_eq!(first_passage_time(&path, &TIMES, 1.0, Refinement::None), 1.0);
        assert_eq!(first_passage_time(&path, &TIMES, 1.0, Refinement::Linear), 1.0);
    }

    #[test]
    fn test_summary() {
        let summary = PassageSummary::from_fpt(&[1.0, f64::INFINITY, 3.0, f64::INFINITY]);
        assert_eq!(summary.n_paths, 4);
        assert_eq!(summary.n_crossed, 2);
        assert_eq!(summary.mean_fpt, Some(2.0));
        assert_eq!(summary.crossed_fraction(), 0.5);

        let empty = PassageSummary::from_fpt(&[f64::INFINITY]);
        assert_eq!(empty.mean_fpt, None);
        assert_eq!(empty.crossed_fraction(), 0.0);
    }
}
