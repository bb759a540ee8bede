//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use dispatch_sim::devices::SolarPolicy;
use dispatch_sim::sim::eco::EcoWindow;
use dispatch_sim::sim::{DispatchConfig, HOURS_PER_DAY, HourlyResult};

/// Balance tolerance for floating point comparisons.
pub const EPS: f64 = 1e-9;

/// Reference setup: 4 kWh battery, 1000 W solar over hours 7-16, 35 yen/kWh.
pub fn reference_config() -> DispatchConfig {
    DispatchConfig::new(4.0, 1000.0, 35.0)
}

/// Reference setup with an overnight 23-6 eco window.
pub fn eco_config() -> DispatchConfig {
    reference_config()
        .with_initial_charge(0.0)
        .with_eco_window(EcoWindow::new(23, 6))
}

/// Solar window that never generates.
pub fn no_solar() -> SolarPolicy {
    SolarPolicy::Window {
        start_hour: 0,
        end_hour: 0,
    }
}

/// Same demand in every hour.
pub fn flat_demand(kwh: f64) -> Vec<f64> {
    vec![kwh; HOURS_PER_DAY]
}

/// Asserts `solar + battery + grid == demand` and non-negative components.
pub fn assert_balanced(r: &HourlyResult) {
    let supplied = r.solar_kwh + r.battery_kwh + r.grid_kwh;
    assert!(
        (supplied - r.demand_kwh).abs() <= EPS,
        "hour {} unbalanced: supplied {supplied}, demand {}",
        r.hour,
        r.demand_kwh
    );
    assert!(r.solar_kwh >= 0.0 && r.battery_kwh >= 0.0 && r.grid_kwh >= 0.0);
    assert!(r.grid_charge_kwh >= 0.0);
}
