use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};
use rand_distr::StandardNormal;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::grid::TimeGrid;

/// Drift and volatility of a Wiener process `dX = mu dt + sigma dW`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WienerProcess {
    pub mu: f64,
    pub sigma: f64,
}

impl WienerProcess {
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(SimulationError::InvalidParameter {
                name: "mu",
                value: mu,
                reason: "must be finite",
            });
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(SimulationError::InvalidParameter {
                name: "sigma",
                value: sigma,
                reason: "must be non-negative and finite",
            });
        }
        Ok(Self { mu, sigma })
    }

    /// Fill `path` with one Euler trajectory starting at zero.
    ///
    /// Increments accumulate strictly in order; `path[0]` is always 0.
    pub fn fill_path<R: Rng + ?Sized>(&self, path: &mut [f64], step: f64, rng: &mut R) {
        let Some((first, rest)) = path.split_first_mut() else {
            return;
        };
        *first = 0.0;

        let drift = self.mu * step;
        let scale = self.sigma * step.sqrt();
        let mut x = 0.0;
        for value in rest {
            let z: f64 = rng.sample(StandardNormal);
            x += drift + scale * z;
            *value = x;
        }
    }
}

/// `n_paths` trajectories stored row-major, one row per path
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    n_paths: usize,
    n_steps: usize,
    values: Vec<f64>,
}

impl PathEnsemble {
    /// Wrap pre-computed rows. `values.len()` must equal `n_paths * n_steps`.
    pub fn from_rows(n_paths: usize, n_steps: usize, values: Vec<f64>) -> Result<Self> {
        let expected = n_paths
            .checked_mul(n_steps.max(1))
            .ok_or(SimulationError::EnsembleTooLarge { n_paths, n_steps })?;
        if n_steps == 0 || values.len() != expected {
            return Err(SimulationError::ShapeMismatch {
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            n_paths,
            n_steps,
            values,
        })
    }

    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn path(&self, i: usize) -> Option<&[f64]> {
        (i < self.n_paths).then(|| &self.values[i * self.n_steps..(i + 1) * self.n_steps])
    }

    pub fn paths(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.n_steps)
    }
}

/// Derive one seed per path from the master seed.
///
/// Seeds are drawn in path order from a single generator so the ensemble does
/// not depend on how paths are scheduled across threads.
fn path_seeds(seed: u64, n_paths: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n_paths).map(|_| rng.next_u64()).collect()
}

/// Simulate `n_paths` independent trajectories of `process` on `grid`.
pub fn simulate_paths(
    process: &WienerProcess,
    grid: &TimeGrid,
    n_paths: usize,
    seed: u64,
) -> Result<PathEnsemble> {
    if n_paths == 0 {
        return Err(SimulationError::NoPaths);
    }
    let n_steps = grid.len();
    let len = n_paths
        .checked_mul(n_steps)
        .ok_or(SimulationError::EnsembleTooLarge { n_paths, n_steps })?;
    let step = grid.step();
    let seeds = path_seeds(seed, n_paths);
    let mut values = vec![0.0; len];

    #[cfg(feature = "parallel")]
    values
        .par_chunks_mut(n_steps)
        .zip(seeds.par_iter())
        .for_each(|(path, &path_seed)| {
            let mut rng = SmallRng::seed_from_u64(path_seed);
            process.fill_path(path, step, &mut rng);
        });

    #[cfg(not(feature = "parallel"))]
    for (path, &path_seed) in values.chunks_mut(n_steps).zip(seeds.iter()) {
        let mut rng = SmallRng::seed_from_u64(path_seed);
        process.fill_path(path, step, &mut rng);
    }

    tracing::debug!(n_paths, n_steps, seed, "simulated path ensemble");

    Ok(PathEnsemble {
        n_paths,
        n_steps,
        values,
    })
}
