//! Simulation stage entry point: paths -> first-passage times -> PoF.

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::passage::first_passage_times;
use crate::pof::PofCurve;
use crate::simulation::simulate_paths;

/// The triple persisted by the simulation stage
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutput {
    pub times: Vec<f64>,
    pub pof: Vec<f64>,
    /// One entry per path; `f64::INFINITY` when the level is never reached
    pub fpt: Vec<f64>,
}

/// Run the whole simulation stage for one configuration.
///
/// The path ensemble is dropped as soon as first-passage times are extracted.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationOutput> {
    let (process, grid) = config.validate()?;

    let fpt = {
        let ensemble = simulate_paths(&process, &grid, config.n_paths, config.seed)?;
        first_passage_times(&ensemble, &grid, config.level, config.refine)?
    };

    let pof = PofCurve::from_fpt(&fpt, grid.times());
    tracing::debug!(
        n_paths = config.n_paths,
        refine = config.refine.as_str(),
        terminal_pof = pof.terminal(),
        "simulation stage complete"
    );

    Ok(SimulationOutput {
        times: grid.into_times(),
        pof: pof.into_values(),
        fpt,
    })
}
