//! Hourly dispatch engine: solar first, then battery, then grid.

use tracing::{debug, info};

use crate::devices::{Battery, SolarArray};
use crate::error::DispatchError;

use super::eco::EcoWindow;
use super::profile::{HOURS_PER_DAY, HourlyProfile};
use super::summary::SimulationSummary;
use super::types::{DispatchConfig, HourlyResult, Simulation};

/// Dispatch engine owning the battery state for a single run.
///
/// Hours must be stepped in increasing order since the battery charge
/// carries forward. [`Engine::run`] consumes the engine so a finished run
/// cannot be stepped again.
#[derive(Debug, Clone)]
pub struct Engine {
    profile: HourlyProfile,
    battery: Battery,
    solar: SolarArray,
    eco_window: Option<EcoWindow>,
    unit_price_yen_per_kwh: f64,
}

impl Engine {
    /// Creates an engine after validating the configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Battery, solar, tariff and eco window settings
    /// * `profile` - Validated 24-hour demand profile
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConfiguration`] if any setting is out of range.
    pub fn new(config: &DispatchConfig, profile: HourlyProfile) -> Result<Self, DispatchError> {
        config.validate()?;
        Ok(Self {
            profile,
            battery: Battery::new(config.battery_capacity_kwh, config.initial_charge_kwh()),
            solar: SolarArray::new(config.solar_rated_power_w, config.solar_policy),
            eco_window: config.eco_window,
            unit_price_yen_per_kwh: config.grid_unit_price_yen_per_kwh,
        })
    }

    /// Dispatches one hour and updates the battery charge.
    ///
    /// # Arguments
    ///
    /// * `hour` - Hour of day, `0..24`
    ///
    /// # Returns
    ///
    /// The `HourlyResult` splitting this hour's demand across solar,
    /// battery and grid, plus any eco recharge bought in the same hour.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24`.
    pub fn step(&mut self, hour: usize) -> HourlyResult {
        let demand_kwh = self.profile[hour];

        // 1. Solar covers what it can
        let solar_kwh = self.solar.available_kwh(hour).min(demand_kwh);
        let after_solar = demand_kwh - solar_kwh;

        // 2. Battery covers the remainder while charge lasts
        let battery_kwh = self.battery.discharge(after_solar);

        // 3. Grid covers whatever is left
        let grid_kwh = after_solar - battery_kwh;

        // 4. Eco window recharge, billed but not serving demand
        let grid_charge_kwh = self.eco_window.map_or(0.0, |eco| {
            self.battery.charge(eco.recharge_allowance_kwh(hour))
        });

        let result = HourlyResult {
            hour,
            demand_kwh,
            solar_kwh,
            battery_kwh,
            grid_kwh,
            grid_charge_kwh,
            battery_level_kwh: self.battery.charge_kwh(),
            cost_yen: (grid_kwh + grid_charge_kwh) * self.unit_price_yen_per_kwh,
        };

        debug!(
            hour,
            demand_kwh,
            solar_kwh,
            battery_kwh,
            grid_kwh,
            grid_charge_kwh,
            battery_level_kwh = result.battery_level_kwh,
            "dispatched hour"
        );

        result
    }

    /// Dispatches all 24 hours in order and aggregates the results.
    pub fn run(mut self) -> Simulation {
        let hours: Vec<HourlyResult> = (0..HOURS_PER_DAY).map(|hour| self.step(hour)).collect();
        let summary = SimulationSummary::from_results(&hours, self.unit_price_yen_per_kwh);

        info!(
            cost_before_yen = summary.cost_before_yen,
            cost_after_yen = summary.cost_after_yen,
            saved_yen = summary.saved_yen,
            final_charge_kwh = self.battery.charge_kwh(),
            "simulation finished"
        );

        Simulation {
            hours,
            final_charge_kwh: self.battery.charge_kwh(),
            summary,
        }
    }

    /// Returns a reference to the battery (for inspecting the charge mid-run).
    pub fn battery(&self) -> &Battery {
        &self.battery
    }
}

/// Runs a complete 24-hour dispatch.
///
/// Both the demand and the configuration are validated before hour 0; a
/// failure yields no partial results.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidInput`] when `demand` is not 24 finite
/// values and [`DispatchError::InvalidConfiguration`] when `config` is out of range.
pub fn simulate(demand: &[f64], config: &DispatchConfig) -> Result<Simulation, DispatchError> {
    let profile = HourlyProfile::new(demand)?;
    Ok(Engine::new(config, profile)?.run())
}
