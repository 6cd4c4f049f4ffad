//! Empirical probability-of-failure curve

use serde::{Deserialize, Serialize};

/// Empirical PoF sampled on the simulation time grid.
///
/// `values[i]` is the fraction of all simulated paths whose first-passage
/// time is finite and `<= times[i]`. The curve is non-decreasing and bounded
/// in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PofCurve {
    values: Vec<f64>,
}

impl PofCurve {
    /// Build the curve from one FPT per path. Unreached paths carry
    /// `f64::INFINITY` (or NaN) and never count as failed.
    #[must_use]
    pub fn from_fpt(fpt: &[f64], times: &[f64]) -> Self {
        let n_paths = fpt.len();
        if n_paths == 0 {
            return Self {
                values: vec![0.0; times.len()],
            };
        }

        let mut finite: Vec<f64> = fpt.iter().copied().filter(|t| t.is_finite()).collect();
        finite.sort_unstable_by(f64::total_cmp);

        let mut values: Vec<f64> = times
            .iter()
            .map(|&t| finite.partition_point(|&x| x <= t) as f64 / n_paths as f64)
            .collect();
        enforce_monotone(&mut values);

        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// PoF at the last grid time
    pub fn terminal(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }
}

/// Replace each value with the running maximum so far.
///
/// Collaborators that round or resample a PoF curve can re-apply this to
/// restore the non-decreasing invariant the policy engine relies on.
pub fn enforce_monotone(values: &mut [f64]) {
    let mut running = f64::NEG_INFINITY;
    for v in values.iter_mut() {
        if *v > running {
            running = *v;
        } else {
            *v = running;
        }
    }
}
