//! Dispatch simulator entry point: CLI wiring and config-driven engine construction.

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dispatch_sim::config::ScenarioConfig;
use dispatch_sim::io::export::export_csv;
use dispatch_sim::io::import::import_profile_csv;
use dispatch_sim::sim::Engine;
use dispatch_sim::sim::estimate::ModeEstimate;

use crate::cli::Args;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    // --scenario takes priority, then --preset, then home
    let scenario = match &args.scenario {
        Some(path) => ScenarioConfig::from_toml_file(path)?,
        None => ScenarioConfig::from_preset(args.preset_name())?,
    };

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        bail!("scenario has {} invalid field(s)", errors.len());
    }
    Ok(scenario)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let scenario = load_scenario(&args)?;
    let profile = match &args.demand_csv {
        Some(path) => import_profile_csv(path)
            .with_context(|| format!("failed to import \"{}\"", path.display()))?,
        None => scenario.demand_profile()?,
    };
    let config = scenario.dispatch_config();

    let simulation = Engine::new(&config, profile.clone())?.run();

    for r in &simulation.hours {
        println!("{r}");
    }
    println!("\nFinal battery charge: {:.2} kWh", simulation.final_charge_kwh);
    println!("\n{}", simulation.summary);

    if let Some(mode) = args.estimate_mode {
        let price = config.grid_unit_price_yen_per_kwh;
        let estimate = match args.reduction_factor {
            Some(factor) => ModeEstimate::with_factor(&profile, price, mode, factor)?,
            None => ModeEstimate::new(&profile, price, mode)?,
        };
        println!("\n{estimate}");
    }

    if let Some(path) = &args.telemetry_out {
        export_csv(&simulation.hours, path)
            .with_context(|| format!("failed to write CSV \"{}\"", path.display()))?;
        info!(path = %path.display(), "hourly table written");
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(dispatch_sim::api::AppState { config, simulation });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(dispatch_sim::api::serve(state, addr))
            .with_context(|| format!("API server on {addr} failed"))?;
    }

    Ok(())
}
