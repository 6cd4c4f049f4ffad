//! Integration tests for the simulation and policy stages
//!
//! Tests are organized by topic:
//! - `scenarios` - Worked examples with hand-computed results
//! - `properties` - Invariants checked over seeded random inputs
//! - `reproducibility` - Seed determinism of the ensemble and PoF
//! - `pipeline` - End-to-end simulation and sweep runs
