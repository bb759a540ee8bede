//! Post-hoc totals and before/after cost comparison.

use std::fmt;

use serde::Serialize;

use super::types::HourlyResult;

/// Aggregate figures derived from a complete dispatch run.
///
/// Computed post-hoc from the per-hour results so the headline numbers can
/// never disagree with the hourly table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    /// Total demand over the day (kWh).
    pub total_demand_kwh: f64,
    /// Demand met by solar (kWh).
    pub total_solar_kwh: f64,
    /// Demand met by the battery (kWh).
    pub total_battery_kwh: f64,
    /// Demand met by the grid (kWh).
    pub total_grid_kwh: f64,
    /// Grid energy bought for eco recharging (kWh).
    pub total_grid_charge_kwh: f64,
    /// Largest single-hour grid purchase, demand plus recharge (kWh).
    pub peak_grid_kwh: f64,
    /// Share of demand not bought from the grid (%).
    pub self_sufficiency_pct: f64,
    /// Hypothetical cost if all demand were bought from the grid (yen).
    pub cost_before_yen: f64,
    /// Actual grid cost under dispatch, eco recharging included (yen).
    pub cost_after_yen: f64,
    /// `cost_before_yen - cost_after_yen`; negative when recharging costs more than it saves.
    pub saved_yen: f64,
}

impl SimulationSummary {
    /// Computes all totals from the hourly results.
    ///
    /// # Arguments
    ///
    /// * `hours` - Per-hour allocation from one run
    /// * `unit_price_yen_per_kwh` - Grid price applied to every purchased kWh
    pub fn from_results(hours: &[HourlyResult], unit_price_yen_per_kwh: f64) -> Self {
        let mut demand = 0.0_f64;
        let mut solar = 0.0_f64;
        let mut battery = 0.0_f64;
        let mut grid = 0.0_f64;
        let mut grid_charge = 0.0_f64;
        let mut peak_grid = 0.0_f64;

        for r in hours {
            demand += r.demand_kwh;
            solar += r.solar_kwh;
            battery += r.battery_kwh;
            grid += r.grid_kwh;
            grid_charge += r.grid_charge_kwh;
            peak_grid = peak_grid.max(r.grid_purchase_kwh());
        }

        let self_sufficiency_pct = if demand > 0.0 {
            100.0 * (solar + battery) / demand
        } else {
            0.0
        };

        let cost_before_yen = demand * unit_price_yen_per_kwh;
        let cost_after_yen = (grid + grid_charge) * unit_price_yen_per_kwh;

        Self {
            total_demand_kwh: demand,
            total_solar_kwh: solar,
            total_battery_kwh: battery,
            total_grid_kwh: grid,
            total_grid_charge_kwh: grid_charge,
            peak_grid_kwh: peak_grid,
            self_sufficiency_pct,
            cost_before_yen,
            cost_after_yen,
            saved_yen: cost_before_yen - cost_after_yen,
        }
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Summary ---")?;
        writeln!(f, "Total demand:        {:.2} kWh", self.total_demand_kwh)?;
        writeln!(f, "From solar:          {:.2} kWh", self.total_solar_kwh)?;
        writeln!(f, "From battery:        {:.2} kWh", self.total_battery_kwh)?;
        writeln!(f, "From grid:           {:.2} kWh", self.total_grid_kwh)?;
        writeln!(f, "Eco recharge:        {:.2} kWh", self.total_grid_charge_kwh)?;
        writeln!(f, "Peak grid hour:      {:.2} kWh", self.peak_grid_kwh)?;
        writeln!(f, "Self-sufficiency:    {:.1}%", self.self_sufficiency_pct)?;
        writeln!(f, "Cost before:         {:.0} yen", self.cost_before_yen)?;
        writeln!(f, "Cost after:          {:.0} yen", self.cost_after_yen)?;
        write!(f, "Saved:               {:.0} yen", self.saved_yen)
    }
}
