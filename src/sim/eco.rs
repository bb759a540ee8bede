use serde::{Deserialize, Serialize};

/// Default per-hour grid recharge cap (kWh).
pub const DEFAULT_RECHARGE_KWH_PER_HOUR: f64 = 1.0;

/// Scheduled window in which the grid may recharge the battery.
///
/// Hour `h` is inside when `start_hour <= h || h < end_hour`, for every pair
/// of bounds. With `start_hour > end_hour` this is the usual overnight span;
/// any `start_hour <= end_hour` covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EcoWindow {
    /// First hour of the window (inclusive), `0..24`.
    pub start_hour: usize,
    /// End of the window (exclusive), `0..=24`.
    pub end_hour: usize,
    /// Maximum energy bought from the grid per hour for recharging (kWh).
    pub recharge_kwh_per_hour: f64,
}

impl EcoWindow {
    /// Creates a window spanning `start_hour..end_hour` with the default 1 kWh/h recharge cap.
    pub fn new(start_hour: usize, end_hour: usize) -> Self {
        Self {
            start_hour,
            end_hour,
            recharge_kwh_per_hour: DEFAULT_RECHARGE_KWH_PER_HOUR,
        }
    }

    /// Overrides the per-hour recharge cap.
    #[must_use]
    pub fn with_recharge_rate(mut self, recharge_kwh_per_hour: f64) -> Self {
        self.recharge_kwh_per_hour = recharge_kwh_per_hour;
        self
    }

    /// Returns `true` when the window spans midnight as a proper overnight
    /// range. Descriptive only; [`EcoWindow::contains`] does not branch on it.
    pub fn wraps_midnight(&self) -> bool {
        self.start_hour > self.end_hour
    }

    /// Returns `true` when `hour` falls within the window.
    pub fn contains(&self, hour: usize) -> bool {
        hour >= self.start_hour || hour < self.end_hour
    }

    /// Recharge cap for `hour` (kWh), zero outside the window.
    pub fn recharge_allowance_kwh(&self, hour: usize) -> f64 {
        if self.contains(hour) {
            self.recharge_kwh_per_hour.max(0.0)
        } else {
            0.0
        }
    }
}
