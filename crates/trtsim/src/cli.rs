//! Command-line arguments and how they override loaded settings

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use trtsim_core::{Refinement, SimulationConfig, TrtMode};

use crate::settings::{PolicySettings, RunSettings};

pub const DEFAULT_BUNDLE: &str = "tables/wiener_demo.json";
pub const DEFAULT_TABLE: &str = "tables/trt_demo_results.csv";

#[derive(Parser, Debug)]
#[command(name = "trtsim")]
#[command(about = "Monte Carlo PoF curves and Time-to-Risk-Threshold inference")]
pub struct Cli {
    /// YAML settings file with optional `simulation` and `policy` sections
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate paths and persist times, PoF and first-passage times
    Simulate {
        #[command(flatten)]
        sim: SimulationArgs,
        /// Output bundle path
        #[arg(short, long, default_value = DEFAULT_BUNDLE)]
        out: PathBuf,
    },
    /// Sweep (CoF, epsilon) pairs against a persisted PoF curve
    Policy {
        #[command(flatten)]
        policy: PolicyArgs,
        /// Simulation bundle to read
        #[arg(short, long, default_value = DEFAULT_BUNDLE)]
        input: PathBuf,
        /// Output CSV table path
        #[arg(short, long, default_value = DEFAULT_TABLE)]
        out: PathBuf,
    },
    /// Simulate, persist the bundle, then sweep and write the table
    Run {
        #[command(flatten)]
        sim: SimulationArgs,
        #[command(flatten)]
        policy: PolicyArgs,
        #[arg(long, default_value = DEFAULT_BUNDLE)]
        bundle: PathBuf,
        #[arg(short, long, default_value = DEFAULT_TABLE)]
        out: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RefineArg {
    None,
    Linear,
}

impl From<RefineArg> for Refinement {
    fn from(arg: RefineArg) -> Self {
        match arg {
            RefineArg::None => Refinement::None,
            RefineArg::Linear => Refinement::Linear,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Interpolated,
    GridPoint,
}

impl From<ModeArg> for TrtMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Interpolated => TrtMode::Interpolated,
            ModeArg::GridPoint => TrtMode::GridPoint,
        }
    }
}

/// Simulation overrides; unset flags keep the file/default value
#[derive(Args, Debug, Default)]
pub struct SimulationArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub mu: Option<f64>,
    #[arg(long)]
    pub sigma: Option<f64>,
    /// Failure level L
    #[arg(long, allow_negative_numbers = true)]
    pub level: Option<f64>,
    #[arg(long)]
    pub n_paths: Option<usize>,
    /// Horizon H
    #[arg(long)]
    pub horizon: Option<f64>,
    #[arg(long)]
    pub dt: Option<f64>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum)]
    pub refine: Option<RefineArg>,
}

impl SimulationArgs {
    pub fn apply(&self, config: &mut SimulationConfig) {
        if let Some(mu) = self.mu {
            config.mu = mu;
        }
        if let Some(sigma) = self.sigma {
            config.sigma = sigma;
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(n_paths) = self.n_paths {
            config.n_paths = n_paths;
        }
        if let Some(horizon) = self.horizon {
            config.horizon = horizon;
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(refine) = self.refine {
            config.refine = refine.into();
        }
    }
}

/// Policy grid overrides
#[derive(Args, Debug, Default)]
pub struct PolicyArgs {
    /// Comma-separated CoF values
    #[arg(long = "cof", value_delimiter = ',')]
    pub cofs: Option<Vec<f64>>,
    /// Comma-separated epsilon values
    #[arg(long = "epsilon", value_delimiter = ',', allow_negative_numbers = true)]
    pub epsilons: Option<Vec<f64>>,
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

impl PolicyArgs {
    pub fn apply(&self, policy: &mut PolicySettings) {
        if let Some(cofs) = &self.cofs {
            policy.cofs = cofs.clone();
        }
        if let Some(epsilons) = &self.epsilons {
            policy.epsilons = epsilons.clone();
        }
        if let Some(mode) = self.mode {
            policy.mode = mode.into();
        }
    }
}

/// Merge command flags over loaded settings
pub fn resolve(mut settings: RunSettings, command: &Command) -> RunSettings {
    match command {
        Command::Simulate { sim, .. } => sim.apply(&mut settings.simulation),
        Command::Policy { policy, .. } => policy.apply(&mut settings.policy),
        Command::Run { sim, policy, .. } => {
            sim.apply(&mut settings.simulation);
            policy.apply(&mut settings.policy);
        }
    }
    settings
}
