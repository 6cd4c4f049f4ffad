use clap::Parser;
use color_eyre::eyre::WrapErr;
use trtsim::cli::resolve;
use trtsim::{Cli, Command, RunSettings, commands, init_logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    init_logging(args.log_file.as_deref(), &args.log_level)?;

    let settings = RunSettings::load(args.config.as_deref()).wrap_err("failed to load settings")?;
    let settings = resolve(settings, &args.command);

    match &args.command {
        Command::Simulate { out, .. } => {
            commands::simulate(&settings.simulation, out)?;
        }
        Command::Policy { input, out, .. } => {
            commands::policy(input, &settings.policy, out)?;
        }
        Command::Run { bundle, out, .. } => {
            let bundle = commands::simulate(&settings.simulation, bundle)?;
            commands::sweep(&bundle, &settings.policy, out)?;
        }
    }

    tracing::info!("done");
    Ok(())
}
