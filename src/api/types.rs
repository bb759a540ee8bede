//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::sim::profile::HourLabel;
use crate::sim::summary::SimulationSummary;
use crate::sim::types::{DispatchConfig, HourlyResult};

/// Configuration, totals and final battery charge of the run.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Configuration used for the run.
    pub config: DispatchConfig,
    /// Totals and before/after cost comparison.
    pub summary: SimulationSummary,
    /// Battery charge after hour 23 (kWh).
    pub final_charge_kwh: f64,
}

/// One hour of the dispatch table, with its display label.
#[derive(Debug, Serialize)]
pub struct HourRecord {
    pub hour: usize,
    /// e.g. `"7:00-8:00"`
    pub time_slot: String,
    pub demand_kwh: f64,
    pub solar_kwh: f64,
    pub battery_kwh: f64,
    pub grid_kwh: f64,
    pub grid_charge_kwh: f64,
    pub battery_level_kwh: f64,
    pub cost_yen: f64,
}

impl From<&HourlyResult> for HourRecord {
    fn from(r: &HourlyResult) -> Self {
        Self {
            hour: r.hour,
            time_slot: HourLabel(r.hour).to_string(),
            demand_kwh: r.demand_kwh,
            solar_kwh: r.solar_kwh,
            battery_kwh: r.battery_kwh,
            grid_kwh: r.grid_kwh,
            grid_charge_kwh: r.grid_charge_kwh,
            battery_level_kwh: r.battery_level_kwh,
            cost_yen: r.cost_yen,
        }
    }
}

/// Optional range query parameters for the hours endpoint.
#[derive(Debug, Deserialize)]
pub struct HoursQuery {
    /// First hour (inclusive).
    pub from: Option<usize>,
    /// Last hour (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
