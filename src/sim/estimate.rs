//! Flat-reduction savings estimate for the simplified operating modes.
//!
//! Unlike the dispatch engine this model never looks at individual hours:
//! each mode cuts the all-grid cost by a constant factor.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

use super::profile::HourlyProfile;

/// Simplified operating mode of the hybrid inverter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OperatingMode {
    /// Solar output is consumed first, battery only as backup.
    SolarPriority,
    /// Battery discharges first, solar tops it up.
    BatteryPriority,
    /// Battery charged from cheap night-time grid energy.
    Eco,
}

impl OperatingMode {
    /// All modes, in display order.
    pub const ALL: [Self; 3] = [Self::SolarPriority, Self::BatteryPriority, Self::Eco];

    /// Share of the all-grid cost this mode is assumed to save.
    pub fn default_reduction_factor(self) -> f64 {
        match self {
            Self::SolarPriority => 0.30,
            Self::BatteryPriority => 0.20,
            Self::Eco => 0.40,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::SolarPriority => "solar-priority",
            Self::BatteryPriority => "battery-priority",
            Self::Eco => "eco",
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Before/after cost under a flat reduction factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeEstimate {
    /// Mode the estimate was made for.
    pub mode: OperatingMode,
    /// Fraction of the all-grid cost saved, `0.0..=1.0`.
    pub reduction_factor: f64,
    /// Cost if all demand were bought from the grid (yen).
    pub cost_before_yen: f64,
    /// Cost after the flat reduction (yen).
    pub cost_after_yen: f64,
    /// `cost_before_yen - cost_after_yen`.
    pub saved_yen: f64,
}

impl ModeEstimate {
    /// Estimates savings with the mode's default reduction factor.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConfiguration`] for a negative or
    /// non-finite price.
    pub fn new(
        profile: &HourlyProfile,
        unit_price_yen_per_kwh: f64,
        mode: OperatingMode,
    ) -> Result<Self, DispatchError> {
        Self::with_factor(
            profile,
            unit_price_yen_per_kwh,
            mode,
            mode.default_reduction_factor(),
        )
    }

    /// Estimates savings with an explicit reduction factor.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConfiguration`] when the factor is
    /// outside `[0, 1]` or the price is negative or non-finite.
    pub fn with_factor(
        profile: &HourlyProfile,
        unit_price_yen_per_kwh: f64,
        mode: OperatingMode,
        reduction_factor: f64,
    ) -> Result<Self, DispatchError> {
        if !(0.0..=1.0).contains(&reduction_factor) {
            return Err(DispatchError::config(
                "estimate.reduction_factor",
                format!("must be in [0.0, 1.0], got {reduction_factor}"),
            ));
        }
        if !unit_price_yen_per_kwh.is_finite() || unit_price_yen_per_kwh < 0.0 {
            return Err(DispatchError::config(
                "grid.unit_price_yen_per_kwh",
                format!("must be a finite number >= 0, got {unit_price_yen_per_kwh}"),
            ));
        }

        let cost_before_yen = profile.total_kwh() * unit_price_yen_per_kwh;
        let cost_after_yen = cost_before_yen * (1.0 - reduction_factor);
        Ok(Self {
            mode,
            reduction_factor,
            cost_before_yen,
            cost_after_yen,
            saved_yen: cost_before_yen - cost_after_yen,
        })
    }
}

impl fmt::Display for ModeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Mode estimate ({}) ---", self.mode)?;
        writeln!(f, "Reduction factor:    {:.0}%", self.reduction_factor * 100.0)?;
        writeln!(f, "Cost before:         {:.0} yen", self.cost_before_yen)?;
        writeln!(f, "Cost after:          {:.0} yen", self.cost_after_yen)?;
        write!(f, "Saved:               {:.0} yen", self.saved_yen)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn default_factors_per_mode() {
        let profile = HourlyProfile::flat(1.0);
        let eco = ModeEstimate::new(&profile, 35.0, OperatingMode::Eco).expect("valid");
        assert_abs_diff_eq!(eco.cost_before_yen, 840.0, epsilon = 1e-9);
        assert_abs_diff_eq!(eco.cost_after_yen, 504.0, epsilon = 1e-9);
        assert_abs_diff_eq!(eco.saved_yen, 336.0, epsilon = 1e-9);

        let battery =
            ModeEstimate::new(&profile, 35.0, OperatingMode::BatteryPriority).expect("valid");
        assert_abs_diff_eq!(battery.saved_yen, 168.0, epsilon = 1e-9);
    }

    #[test]
    fn factor_out_of_range_rejected() {
        let profile = HourlyProfile::home();
        assert!(ModeEstimate::with_factor(&profile, 35.0, OperatingMode::Eco, 1.5).is_err());
        assert!(ModeEstimate::with_factor(&profile, 35.0, OperatingMode::Eco, -0.1).is_err());
    }

    #[test]
    fn negative_price_rejected() {
        let profile = HourlyProfile::home();
        let err = ModeEstimate::new(&profile, -1.0, OperatingMode::SolarPriority).unwrap_err();
        assert!(err.to_string().contains("grid.unit_price_yen_per_kwh"));
    }

    #[test]
    fn zero_factor_saves_nothing() {
        let profile = HourlyProfile::office();
        let est = ModeEstimate::with_factor(&profile, 35.0, OperatingMode::Eco, 0.0).expect("valid");
        assert_eq!(est.saved_yen, 0.0);
        assert_eq!(est.cost_after_yen, est.cost_before_yen);
    }

    #[test]
    fn mode_names_are_kebab_case() {
        let names: Vec<String> = OperatingMode::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["solar-priority", "battery-priority", "eco"]);
    }
}
