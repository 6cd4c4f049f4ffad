//! Risk curve and Time-to-Risk-Threshold (TRT) inference
//!
//! `R(t) = CoF * PoF(t)`, `Rcrit = rule(CoF, epsilon)`, and TRT is the
//! earliest time `R(t) >= Rcrit`. All functions here are pure; the engine can
//! be re-run against a cached PoF curve for any number of policy pairs.
//!
//! # Edge behavior
//!
//! - `CoF = 0` gives `Rcrit = 0` and TRT `= t[0]`.
//! - `epsilon <= 0` with `CoF >= 0` gives `Rcrit <= 0 <= R[0]` and TRT `= t[0]`.
//! - `Rcrit > R[last]` gives TRT `= +inf`.
//! - A negative CoF is outside the declared domain; the risk curve is then
//!   non-increasing and the search result is unspecified (but never panics).
//! - NaN or infinite `cof`/`epsilon`, and a PoF curve that is non-finite or
//!   decreasing anywhere, are rejected with a [`PolicyError`]. Callers that
//!   resample a curve should run [`crate::pof::enforce_monotone`] first.

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::interp::interpolate_crossing;

/// Named strategy mapping `(cof, epsilon)` to the critical risk level
#[derive(Debug, Clone, Copy)]
pub struct RcritRule {
    pub name: &'static str,
    pub rule: fn(f64, f64) -> f64,
}

impl RcritRule {
    /// `Rcrit = CoF * epsilon`
    pub const LINEAR: RcritRule = RcritRule {
        name: "linear",
        rule: linear_rcrit,
    };

    #[inline]
    pub fn rcrit(&self, cof: f64, epsilon: f64) -> f64 {
        (self.rule)(cof, epsilon)
    }
}

impl Default for RcritRule {
    fn default() -> Self {
        Self::LINEAR
    }
}

fn linear_rcrit(cof: f64, epsilon: f64) -> f64 {
    cof * epsilon
}

/// How TRT is placed once the crossing index is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrtMode {
    /// Interpolate between the grid points straddling the crossing
    #[default]
    Interpolated,
    /// First grid time with `R >= Rcrit` (conservative reference estimator)
    GridPoint,
}

/// Result of evaluating one policy pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyOutcome {
    pub rcrit: f64,
    pub trt: f64,
}

/// `R[i] = cof * pof[i]`
#[must_use]
pub fn risk_curve(pof: &[f64], cof: f64) -> Vec<f64> {
    pof.iter().map(|p| p * cof).collect()
}

/// Earliest time `risk` reaches `rcrit`, or `f64::INFINITY` if it never does.
///
/// `risk` must be non-decreasing and aligned with `times`. Ties resolve to
/// the leftmost index with `risk >= rcrit`.
#[must_use]
pub fn infer_trt(times: &[f64], risk: &[f64], rcrit: f64, mode: TrtMode) -> f64 {
    let Some(&last) = risk.last() else {
        return f64::INFINITY;
    };
    if last < rcrit {
        return f64::INFINITY;
    }

    let idx = risk.partition_point(|&r| r < rcrit);
    if idx == 0 {
        return times[0];
    }

    match mode {
        TrtMode::GridPoint => times[idx],
        TrtMode::Interpolated => interpolate_crossing(
            times[idx - 1],
            times[idx],
            risk[idx - 1],
            risk[idx],
            rcrit,
        ),
    }
}

/// Evaluate a single `(cof, epsilon)` pair against a PoF curve.
pub fn evaluate_policy(
    times: &[f64],
    pof: &[f64],
    cof: f64,
    epsilon: f64,
    rule: &RcritRule,
    mode: TrtMode,
) -> Result<PolicyOutcome, PolicyError> {
    check_curve(times, pof)?;
    let rcrit = critical_risk(rule, cof, epsilon)?;

    let risk = risk_curve(pof, cof);
    let trt = infer_trt(times, &risk, rcrit, mode);

    Ok(PolicyOutcome { rcrit, trt })
}

/// Apply `rule` after checking that both inputs and the result are finite.
pub(crate) fn critical_risk(
    rule: &RcritRule,
    cof: f64,
    epsilon: f64,
) -> Result<f64, PolicyError> {
    finite_parameter("cof", cof)?;
    finite_parameter("epsilon", epsilon)?;
    let rcrit = rule.rcrit(cof, epsilon);
    finite_parameter("rcrit", rcrit)?;
    Ok(rcrit)
}

fn finite_parameter(name: &'static str, value: f64) -> Result<(), PolicyError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PolicyError::InvalidParameter { name, value })
    }
}

pub(crate) fn check_curve(times: &[f64], pof: &[f64]) -> Result<(), PolicyError> {
    if times.len() != pof.len() {
        return Err(PolicyError::LengthMismatch {
            times: times.len(),
            pof: pof.len(),
        });
    }
    if pof.is_empty() {
        return Err(PolicyError::EmptyCurve);
    }
    if let Some(index) = pof.iter().position(|p| !p.is_finite()) {
        return Err(PolicyError::InvalidCurve {
            index,
            value: pof[index],
        });
    }
    if let Some(index) = pof.windows(2).position(|w| w[1] < w[0]) {
        return Err(PolicyError::InvalidCurve {
            index: index + 1,
            value: pof[index + 1],
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
    const POF: [f64; 4] = [0.0, 0.2, 0.6, 0.6];

    #[test]
    fn test_risk_curve_scales_pof() {
        assert_eq!(risk_curve(&POF, 5.0), vec![0.0, 1.0, 3.0, 3.0]);
    }

    #[test]
    fn test_interpolated_crossing() {
        let outcome = evaluate_policy(
            &TIMES,
            &POF,
            5.0,
            0.1,
            &RcritRule::LINEAR,
            TrtMode::Interpolated,
        )
        .unwrap();
        assert_eq!(outcome.rcrit, 0.5);
        assert_eq!(outcome.trt, 0.5);
    }

    #[test]
    fn test_grid_point_crossing() {
        let outcome =
            evaluate_policy(&TIMES, &POF, 5.0, 0.1, &RcritRule::LINEAR, TrtMode::GridPoint)
                .unwrap();
        assert_eq!(outcome.trt, 1.0);
    }

    #[test]
    fn test_never_reached() {
        for mode in [TrtMode::Interpolated, TrtMode::GridPoint] {
            let outcome =
                evaluate_policy(&TIMES, &POF, 5.0, 0.8, &RcritRule::LINEAR, mode).unwrap();
            assert_eq!(outcome.rcrit, 4.0);
            assert_eq!(outcome.trt, f64::INFINITY);
        }
    }

    #[test]
    fn test_zero_cof_is_immediate() {
        let outcome =
            evaluate_policy(&TIMES, &POF, 0.0, 0.1, &RcritRule::LINEAR, TrtMode::Interpolated)
                .unwrap();
        assert_eq!(outcome.rcrit, 0.0);
        assert_eq!(outcome.trt, 0.0);
    }

    #[test]
    fn test_non_positive_epsilon_is_immediate() {
        let outcome =
            evaluate_policy(&TIMES, &POF, 5.0, -0.1, &RcritRule::LINEAR, TrtMode::Interpolated)
                .unwrap();
        assert_eq!(outcome.trt, 0.0);
    }

    #[test]
    fn test_plateau_at_threshold_resolves_to_plateau_start() {
        // R = [0, 0.5, 0.5, 1.0], Rcrit = 0.5: leftmost index 1, segment 0..1
        let risk = [0.0, 0.5, 0.5, 1.0];
        assert_eq!(infer_trt(&TIMES, &risk, 0.5, TrtMode::Interpolated), 1.0);
        assert_eq!(infer_trt(&TIMES, &risk, 0.5, TrtMode::GridPoint), 1.0);
    }

    #[test]
    fn test_threshold_equal_to_final_value() {
        let risk = [0.0, 1.0, 3.0, 3.0];
        assert_eq!(infer_trt(&TIMES, &risk, 3.0, TrtMode::Interpolated), 2.0);
    }

    #[test]
    fn test_empty_risk_is_infinite() {
        assert_eq!(infer_trt(&[], &[], 0.0, TrtMode::Interpolated), f64::INFINITY);
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            evaluate_policy(&TIMES, &[0.0], 1.0, 0.1, &RcritRule::LINEAR, TrtMode::Interpolated),
            Err(PolicyError::LengthMismatch { times: 4, pof: 1 })
        );
        assert_eq!(
            evaluate_policy(&[], &[], 1.0, 0.1, &RcritRule::LINEAR, TrtMode::Interpolated),
            Err(PolicyError::EmptyCurve)
        );
    }

    #[test]
    fn test_decreasing_curve_rejected() {
        let times: Vec<f64> = (0..8).map(f64::from).collect();
        let pof = [0.0, 0.6, 0.0, 0.0, 0.0, 0.0, 0.6, 0.6];
        assert_eq!(
            evaluate_policy(&times, &pof, 1.0, 0.5, &RcritRule::LINEAR, TrtMode::GridPoint),
            Err(PolicyError::InvalidCurve {
                index: 2,
                value: 0.0
            })
        );

        // The running maximum restores the leftmost crossing
        let mut repaired = pof.to_vec();
        crate::pof::enforce_monotone(&mut repaired);
        let outcome =
            evaluate_policy(&times, &repaired, 1.0, 0.5, &RcritRule::LINEAR, TrtMode::GridPoint)
                .unwrap();
        assert_eq!(outcome.trt, 1.0);
    }

    #[test]
    fn test_non_finite_curve_rejected() {
        let result = evaluate_policy(
            &TIMES,
            &[0.0, f64::NAN, 0.6, 0.6],
            5.0,
            0.1,
            &RcritRule::LINEAR,
            TrtMode::Interpolated,
        );
        assert!(matches!(
            result,
            Err(PolicyError::InvalidCurve { index: 1, .. })
        ));
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        for mode in [TrtMode::Interpolated, TrtMode::GridPoint] {
            assert!(matches!(
                evaluate_policy(&TIMES, &POF, 5.0, f64::NAN, &RcritRule::LINEAR, mode),
                Err(PolicyError::InvalidParameter {
                    name: "epsilon",
                    ..
                })
            ));
            assert!(matches!(
                evaluate_policy(&TIMES, &POF, f64::NAN, 0.1, &RcritRule::LINEAR, mode),
                Err(PolicyError::InvalidParameter { name: "cof", .. })
            ));
            assert!(matches!(
                evaluate_policy(&TIMES, &POF, f64::INFINITY, 0.1, &RcritRule::LINEAR, mode),
                Err(PolicyError::InvalidParameter { name: "cof", .. })
            ));
        }
    }

    #[test]
    fn test_rule_producing_nan_rejected() {
        let rule = RcritRule {
            name: "broken",
            rule: |_, _| f64::NAN,
        };
        assert!(matches!(
            evaluate_policy(&TIMES, &POF, 5.0, 0.1, &rule, TrtMode::Interpolated),
            Err(PolicyError::InvalidParameter { name: "rcrit", .. })
        ));
    }

    #[test]
    fn test_custom_rule() {
        let rule = RcritRule {
            name: "half",
            rule: |cof, _| cof / 2.0,
        };
        let outcome =
            evaluate_policy(&TIMES, &POF, 5.0, 0.1, &rule, TrtMode::Interpolated).unwrap();
        assert_eq!(outcome.rcrit, 2.5);
        // between R=1.0 at t=1 and R=3.0 at t=2
        assert_eq!(outcome.trt, 1.75);
    }
}
