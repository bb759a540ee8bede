//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use dispatch_sim::sim::estimate::OperatingMode;

/// Hourly solar / battery / grid dispatch simulator.
///
/// If neither `--scenario` nor `--preset` is given, the `home` preset is used.
#[derive(Debug, Parser)]
#[command(name = "dispatch-sim", version, about)]
pub struct Args {
    /// Load the scenario from a TOML file.
    #[arg(long, env = "DISPATCH_SIM_SCENARIO", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset: home, office or manual.
    #[arg(long)]
    pub preset: Option<String>,

    /// Replace the scenario's demand profile with a `time_slot,demand_kwh` CSV.
    #[arg(long = "demand-csv")]
    pub demand_csv: Option<PathBuf>,

    /// Export the hourly table to CSV.
    #[arg(long = "telemetry-out")]
    pub telemetry_out: Option<PathBuf>,

    /// Also print the flat-reduction estimate for this operating mode.
    #[arg(long = "estimate-mode", value_enum)]
    pub estimate_mode: Option<OperatingMode>,

    /// Override the mode's default reduction factor (0.0 to 1.0).
    #[arg(long = "reduction-factor", requires = "estimate_mode")]
    pub reduction_factor: Option<f64>,

    /// Start the REST API server after the run.
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000, env = "DISPATCH_SIM_PORT")]
    pub port: u16,
}

impl Args {
    /// Preset to load when no scenario file is given.
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or("home")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_home_preset() {
        let args = Args::try_parse_from(["dispatch-sim"]).expect("parse should succeed");
        assert!(args.scenario.is_none());
        assert_eq!(args.preset_name(), "home");
        assert!(args.estimate_mode.is_none());
    }

    #[test]
    fn supports_scenario_cli() {
        let args = Args::try_parse_from(["dispatch-sim", "--scenario", "scenarios/home.toml"])
            .expect("parse should succeed");
        assert_eq!(
            args.scenario.as_deref().and_then(|p| p.to_str()),
            Some("scenarios/home.toml")
        );
    }

    #[test]
    fn scenario_and_preset_are_exclusive() {
        let result = Args::try_parse_from([
            "dispatch-sim",
            "--scenario",
            "a.toml",
            "--preset",
            "office",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_estimate_mode() {
        let args = Args::try_parse_from([
            "dispatch-sim",
            "--estimate-mode",
            "battery-priority",
            "--reduction-factor",
            "0.25",
        ])
        .expect("parse should succeed");
        assert_eq!(args.estimate_mode, Some(OperatingMode::BatteryPriority));
        assert_eq!(args.reduction_factor, Some(0.25));
    }

    #[test]
    fn reduction_factor_requires_mode() {
        assert!(Args::try_parse_from(["dispatch-sim", "--reduction-factor", "0.5"]).is_err());
    }
}
