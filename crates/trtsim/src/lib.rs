//! Command-line front end for `trtsim_core`
//!
//! This crate owns everything the numerical core deliberately leaves out:
//! - Argument parsing and YAML settings
//! - The JSON simulation bundle and the CSV TRT table
//! - Directory creation and atomic file writes
//! - Tracing setup

// ============================================================================
// Command modules
// ============================================================================

pub mod cli;
pub mod commands;
pub mod logging;

// ============================================================================
// Persistence modules
// ============================================================================

pub mod settings;
pub mod storage;
pub mod table;
pub mod util;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cli::{Cli, Command};
pub use logging::init_logging;
pub use settings::{PolicySettings, RunSettings};
pub use storage::{SimulationBundle, StorageError};
