use std::fmt;

/// Errors raised by the simulation stage when a caller hands it input
/// outside the declared domain.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// `n_paths` must be at least one
    NoPaths,
    /// Horizon and step produce a grid with fewer than two points
    DegenerateGrid { horizon: f64, dt: f64 },
    /// A persisted time grid is empty, non-finite or not strictly increasing
    InvalidTimeGrid { index: usize },
    /// Ensemble rows and grid length disagree
    ShapeMismatch { expected: usize, found: usize },
    /// `n_paths * n_steps` does not fit in memory addressing
    EnsembleTooLarge { n_paths: usize, n_steps: usize },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid {name} ({value}): {reason}"),
            SimulationError::NoPaths => write!(f, "n_paths must be greater than zero"),
            SimulationError::DegenerateGrid { horizon, dt } => write!(
                f,
                "horizon {horizon} with step {dt} yields fewer than two grid points"
            ),
            SimulationError::InvalidTimeGrid { index } => {
                write!(f, "time grid is not strictly increasing at index {index}")
            }
            SimulationError::ShapeMismatch { expected, found } => {
                write!(f, "expected {expected} values per path, found {found}")
            }
            SimulationError::EnsembleTooLarge { n_paths, n_steps } => write!(
                f,
                "{n_paths} paths of {n_steps} points overflow the ensemble size"
            ),
        }
    }
}

impl std::error::Error for SimulationError {}

/// Errors from the policy stage. Numeric edge cases (zero CoF, non-positive
/// epsilon, unreachable thresholds) are not errors; NaN and infinite inputs
/// are.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyError {
    LengthMismatch { times: usize, pof: usize },
    EmptyCurve,
    /// PoF value that is non-finite or lower than its predecessor
    InvalidCurve { index: usize, value: f64 },
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::LengthMismatch { times, pof } => write!(
                f,
                "time grid has {times} points but PoF curve has {pof}"
            ),
            PolicyError::EmptyCurve => write!(f, "PoF curve is empty"),
            PolicyError::InvalidCurve { index, value } => write!(
                f,
                "PoF value {value} at index {index} breaks a finite non-decreasing curve"
            ),
            PolicyError::InvalidParameter { name, value } => {
                write!(f, "invalid {name} ({value}): must be finite")
            }
        }
    }
}

impl std::error::Error for PolicyError {}

pub type Result<T> = std::result::Result<T, SimulationError>;
