//! Subcommand implementations: thin glue between files and `trtsim_core`

use std::path::Path;

use color_eyre::eyre::WrapErr;
use trtsim_core::{
    PassageSummary, RcritRule, SimulationConfig, TrtRow, run_simulation, sweep_policy,
};

use crate::settings::PolicySettings;
use crate::storage::SimulationBundle;
use crate::table::write_csv;

/// Run the simulation stage and persist its bundle at `out`.
pub fn simulate(config: &SimulationConfig, out: &Path) -> color_eyre::Result<SimulationBundle> {
    tracing::info!(
        mu = config.mu,
        sigma = config.sigma,
        level = config.level,
        n_paths = config.n_paths,
        horizon = config.horizon,
        dt = config.dt,
        seed = config.seed,
        refine = config.refine.as_str(),
        "starting simulation"
    );

    let output = run_simulation(config).wrap_err("simulation failed")?;

    let summary = PassageSummary::from_fpt(&output.fpt);
    tracing::info!(
        crossed = summary.n_crossed,
        n_paths = summary.n_paths,
        crossed_fraction = summary.crossed_fraction(),
        mean_fpt = ?summary.mean_fpt,
        "first-passage summary"
    );

    let bundle = SimulationBundle::new(config.clone(), output);
    bundle
        .save(out)
        .wrap_err_with(|| format!("failed to save bundle to {}", out.display()))?;
    tracing::info!(path = %out.display(), "saved PoF/FPT bundle");

    Ok(bundle)
}

/// Sweep the policy grid against a bundle and write the TRT table to `out`.
pub fn sweep(
    bundle: &SimulationBundle,
    policy: &PolicySettings,
    out: &Path,
) -> color_eyre::Result<Vec<TrtRow>> {
    let grid = policy.grid();
    let rule = RcritRule::LINEAR;
    let rows = sweep_policy(&bundle.times, &bundle.pof, &grid, &rule, policy.mode)
        .wrap_err("policy sweep failed")?;

    for row in &rows {
        tracing::debug!(
            cof = row.cof,
            epsilon = row.epsilon,
            rcrit = row.rcrit,
            trt = row.trt,
            "policy point"
        );
    }
    let never = rows.iter().filter(|r| r.trt.is_infinite()).count();
    tracing::info!(
        points = rows.len(),
        never_reached = never,
        rule = rule.name,
        "policy sweep complete"
    );

    write_csv(out, &rows).wrap_err_with(|| format!("failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), "wrote TRT table");

    Ok(rows)
}

/// Load a persisted bundle and sweep it.
pub fn policy(input: &Path, policy: &PolicySettings, out: &Path) -> color_eyre::Result<Vec<TrtRow>> {
    let bundle = SimulationBundle::load(input)
        .wrap_err_with(|| format!("failed to load bundle {}", input.display()))?;
    sweep(&bundle, policy, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use trtsim_core::TrtMode;

    #[test]
    fn test_simulate_then_policy() {
        let dir = tempdir().unwrap();
        let bundle_path = dir.path().join("tables").join("wiener_demo.json");
        let table_path = dir.path().join("tables").join("trt_demo_results.csv");

        let config = SimulationConfig::default().with_paths(200);
        let bundle = simulate(&config, &bundle_path).unwrap();
        assert_eq!(bundle.fpt.len(), 200);
        assert!(bundle_path.exists());

        let rows = policy(&bundle_path, &PolicySettings::default(), &table_path).unwrap();
        assert_eq!(rows.len(), 9);

        let content = std::fs::read_to_string(&table_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "cof,epsilon,rcrit,trt");
        assert!(lines[1].starts_with("1.0,0.01,"));
        assert!(lines[9].starts_with("20.0,0.05,"));
    }

    #[test]
    fn test_sweep_matches_in_memory_run() {
        let dir = tempdir().unwrap();
        let bundle_path = dir.path().join("bundle.json");
        let table_path = dir.path().join("table.csv");

        let config = SimulationConfig::default().with_process(0.3, 0.2);
        let bundle = simulate(&config, &bundle_path).unwrap();
        let direct = sweep(&bundle, &PolicySettings::default(), &table_path).unwrap();
        let loaded = policy(&bundle_path, &PolicySettings::default(), &table_path).unwrap();
        assert_eq!(direct, loaded);
    }

    #[test]
    fn test_policy_on_dipping_curve_uses_leftmost_crossing() {
        let dir = tempdir().unwrap();
        let bundle_path = dir.path().join("dipping.json");
        let table_path = dir.path().join("table.csv");

        let bundle = SimulationBundle {
            config: SimulationConfig::default(),
            times: (0..8).map(f64::from).collect(),
            pof: vec![0.0, 0.6, 0.0, 0.0, 0.0, 0.0, 0.6, 0.6],
            fpt: vec![Some(1.0), None],
        };
        bundle.save(&bundle_path).unwrap();

        let settings = PolicySettings {
            cofs: vec![1.0],
            epsilons: vec![0.5],
            mode: TrtMode::GridPoint,
        };
        let rows = policy(&bundle_path, &settings, &table_path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trt, 1.0);
    }

    #[test]
    fn test_nan_policy_value_is_an_error() {
        let dir = tempdir().unwrap();
        let bundle_path = dir.path().join("bundle.json");
        let table_path = dir.path().join("table.csv");
        let bundle = simulate(&SimulationConfig::default().with_paths(50), &bundle_path).unwrap();

        let settings = PolicySettings {
            epsilons: vec![0.01, f64::NAN],
            ..PolicySettings::default()
        };
        assert!(sweep(&bundle, &settings, &table_path).is_err());
        assert!(!table_path.exists());
    }

    #[test]
    fn test_policy_missing_bundle() {
        let dir = tempdir().unwrap();
        let result = policy(
            &dir.path().join("missing.json"),
            &PolicySettings::default(),
            &dir.path().join("out.csv"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_simulation_config() {
        let dir = tempdir().unwrap();
        let config = SimulationConfig::default().with_grid(10.0, -1.0);
        assert!(simulate(&config, &dir.path().join("b.json")).is_err());
        assert!(!dir.path().join("b.json").exists());
    }
}
