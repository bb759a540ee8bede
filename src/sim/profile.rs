//! Hourly demand profiles and the built-in presets.

use std::fmt;
use std::ops::Index;

use serde::Serialize;
use tracing::warn;

use crate::error::DispatchError;

/// Number of hour slots in a simulated day.
pub const HOURS_PER_DAY: usize = 24;

/// Demand for each hour of the day (kWh), indexed by hour `0..24`.
///
/// Construction rejects anything that is not exactly 24 finite numbers and
/// clamps negative entries to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyProfile([f64; HOURS_PER_DAY]);

impl HourlyProfile {
    /// Builds a profile from raw per-hour demand values.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidInput`] when `values` does not hold
    /// exactly 24 entries or contains a non-finite number.
    pub fn new(values: &[f64]) -> Result<Self, DispatchError> {
        if values.len() != HOURS_PER_DAY {
            return Err(DispatchError::InvalidInput(format!(
                "demand profile must have {HOURS_PER_DAY} hourly values, got {}",
                values.len()
            )));
        }

        let mut hours = [0.0; HOURS_PER_DAY];
        for (hour, (&value, slot)) in values.iter().zip(hours.iter_mut()).enumerate() {
            if !value.is_finite() {
                return Err(DispatchError::InvalidInput(format!(
                    "demand at hour {hour} is not a finite number ({value})"
                )));
            }
            if value < 0.0 {
                warn!(hour, demand_kwh = value, "negative demand clamped to zero");
            }
            *slot = value.max(0.0);
        }
        Ok(Self(hours))
    }

    /// Same demand in every hour.
    pub fn flat(kwh: f64) -> Self {
        Self([kwh.max(0.0); HOURS_PER_DAY])
    }

    /// All-zero profile, the starting point for manual entry.
    pub fn zeros() -> Self {
        Self::flat(0.0)
    }

    /// Typical household: low overnight, morning bump, evening peak.
    pub fn home() -> Self {
        let mut hours = [0.0; HOURS_PER_DAY];
        for (hour, slot) in hours.iter_mut().enumerate() {
            *slot = match hour {
                0..=5 => 0.3,
                6..=7 => 0.6,
                8..=11 => 0.4,
                12..=16 => 0.8,
                17..=20 => 1.0,
                _ => 0.6,
            };
        }
        Self(hours)
    }

    /// Office: 1.2 kWh during working hours 8-15, 0.2 kWh standby otherwise.
    pub fn office() -> Self {
        let mut hours = [0.2; HOURS_PER_DAY];
        hours[8..16].fill(1.2);
        Self(hours)
    }

    /// Total daily demand (kWh).
    pub fn total_kwh(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl AsRef<[f64]> for HourlyProfile {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl Index<usize> for HourlyProfile {
    type Output = f64;

    fn index(&self, hour: usize) -> &f64 {
        &self.0[hour]
    }
}

impl TryFrom<Vec<f64>> for HourlyProfile {
    type Error = DispatchError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(&values)
    }
}

/// Display label of an hour slot, e.g. `"7:00-8:00"`.
#[derive(Debug, Clone, Copy)]
pub struct HourLabel(pub usize);

impl fmt::Display for HourLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00-{}:00", self.0, self.0 + 1)
    }
}
