//! Core simulation types: configuration and per-hour results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::devices::SolarPolicy;
use crate::error::DispatchError;

use super::eco::EcoWindow;
use super::profile::{HOURS_PER_DAY, HourLabel};
use super::summary::SimulationSummary;

/// Immutable configuration for one dispatch run.
///
/// # Examples
///
/// ```
/// use dispatch_sim::sim::types::DispatchConfig;
///
/// let cfg = DispatchConfig::new(4.0, 1000.0, 35.0);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.initial_charge_kwh(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Maximum energy the battery can hold (kWh). Zero means no battery.
    pub battery_capacity_kwh: f64,
    /// Battery charge at hour 0 (kWh). `None` starts the battery full.
    pub initial_charge_kwh: Option<f64>,
    /// Nameplate solar power (W).
    pub solar_rated_power_w: f64,
    /// How rated solar power turns into hourly energy.
    pub solar_policy: SolarPolicy,
    /// Price of one kWh bought from the grid (yen).
    pub grid_unit_price_yen_per_kwh: f64,
    /// Optional grid recharge window.
    pub eco_window: Option<EcoWindow>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::new(4.0, 1000.0, 35.0)
    }
}

impl DispatchConfig {
    /// Creates a configuration with the default 7-16 solar window and no eco window.
    pub fn new(
        battery_capacity_kwh: f64,
        solar_rated_power_w: f64,
        grid_unit_price_yen_per_kwh: f64,
    ) -> Self {
        Self {
            battery_capacity_kwh,
            initial_charge_kwh: None,
            solar_rated_power_w,
            solar_policy: SolarPolicy::default(),
            grid_unit_price_yen_per_kwh,
            eco_window: None,
        }
    }

    /// Replaces the solar availability policy.
    #[must_use]
    pub fn with_solar_policy(mut self, policy: SolarPolicy) -> Self {
        self.solar_policy = policy;
        self
    }

    /// Enables grid recharging inside `window`.
    #[must_use]
    pub fn with_eco_window(mut self, window: EcoWindow) -> Self {
        self.eco_window = Some(window);
        self
    }

    /// Starts the run with `kwh` stored instead of a full battery.
    #[must_use]
    pub fn with_initial_charge(mut self, kwh: f64) -> Self {
        self.initial_charge_kwh = Some(kwh);
        self
    }

    /// Battery charge at hour 0 (kWh).
    pub fn initial_charge_kwh(&self) -> f64 {
        self.initial_charge_kwh.unwrap_or(self.battery_capacity_kwh)
    }

    /// Checks every field and returns the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConfiguration`] for negative or
    /// non-finite quantities and hours outside the day.
    pub fn validate(&self) -> Result<(), DispatchError> {
        non_negative("battery.capacity_kwh", self.battery_capacity_kwh)?;
        if let Some(initial) = self.initial_charge_kwh {
            non_negative("battery.initial_charge_kwh", initial)?;
            if initial > self.battery_capacity_kwh {
                return Err(DispatchError::config(
                    "battery.initial_charge_kwh",
                    "must be <= battery.capacity_kwh",
                ));
            }
        }
        non_negative("solar.rated_power_w", self.solar_rated_power_w)?;
        non_negative("grid.unit_price_yen_per_kwh", self.grid_unit_price_yen_per_kwh)?;

        match self.solar_policy {
            SolarPolicy::Window {
                start_hour,
                end_hour,
            } => {
                if end_hour > HOURS_PER_DAY {
                    return Err(DispatchError::config(
                        "solar.window_end",
                        format!("must be <= {HOURS_PER_DAY}, got {end_hour}"),
                    ));
                }
                if start_hour > end_hour {
                    return Err(DispatchError::config(
                        "solar.window_start",
                        "must be <= solar.window_end",
                    ));
                }
            }
            SolarPolicy::Flat { duty_hours } => non_negative("solar.duty_hours", duty_hours)?,
        }

        if let Some(eco) = &self.eco_window {
            if eco.start_hour >= HOURS_PER_DAY {
                return Err(DispatchError::config(
                    "eco.start_hour",
                    format!("must be < {HOURS_PER_DAY}, got {}", eco.start_hour),
                ));
            }
            if eco.end_hour > HOURS_PER_DAY {
                return Err(DispatchError::config(
                    "eco.end_hour",
                    format!("must be <= {HOURS_PER_DAY}, got {}", eco.end_hour),
                ));
            }
            non_negative("eco.recharge_kwh_per_hour", eco.recharge_kwh_per_hour)?;
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), DispatchError> {
    if !value.is_finite() {
        return Err(DispatchError::config(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(DispatchError::config(field, format!("must be >= 0, got {value}")));
    }
    Ok(())
}

/// Allocation of one hour's demand across the three supply sources.
///
/// `solar_kwh + battery_kwh + grid_kwh == demand_kwh` for every hour.
/// Eco recharge energy is bought from the grid as well but is reported
/// separately in `grid_charge_kwh` since it does not serve demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyResult {
    /// Hour of day, `0..24`.
    pub hour: usize,
    /// Demand for this hour after clamping (kWh).
    pub demand_kwh: f64,
    /// Demand met by solar generation (kWh).
    pub solar_kwh: f64,
    /// Demand met by battery discharge (kWh).
    pub battery_kwh: f64,
    /// Demand met by grid purchase (kWh).
    pub grid_kwh: f64,
    /// Grid energy bought to recharge the battery in the eco window (kWh).
    pub grid_charge_kwh: f64,
    /// Battery charge at the end of this hour (kWh).
    pub battery_level_kwh: f64,
    /// Cost of all grid energy bought this hour (yen).
    pub cost_yen: f64,
}

impl HourlyResult {
    /// All grid energy bought this hour, for demand and for recharge (kWh).
    pub fn grid_purchase_kwh(&self) -> f64 {
        self.grid_kwh + self.grid_charge_kwh
    }
}

impl fmt::Display for HourlyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>2} ({:>11}) | demand={:>5.2} kWh | solar={:.2}  battery={:.2}  \
             grid={:.2}  recharge={:.2} | level={:>5.2} kWh | cost={:>6.1} yen",
            self.hour,
            HourLabel(self.hour).to_string(),
            self.demand_kwh,
            self.solar_kwh,
            self.battery_kwh,
            self.grid_kwh,
            self.grid_charge_kwh,
            self.battery_level_kwh,
            self.cost_yen,
        )
    }
}

/// Complete outcome of one 24-hour dispatch run.
#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    /// Per-hour allocation in hour order.
    pub hours: Vec<HourlyResult>,
    /// Battery charge after the last hour (kWh).
    pub final_charge_kwh: f64,
    /// Totals and before/after cost comparison.
    pub summary: SimulationSummary,
}
