//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::devices::SolarPolicy;
use crate::devices::solar::{DEFAULT_DUTY_HOURS, DEFAULT_WINDOW_END, DEFAULT_WINDOW_START};
use crate::sim::eco::{DEFAULT_RECHARGE_KWH_PER_HOUR, EcoWindow};
use crate::sim::{DispatchConfig, HOURS_PER_DAY, HourlyProfile};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the `home` preset. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or pick a built-in preset with
/// [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Hourly demand profile selection.
    #[serde(default)]
    pub demand: DemandConfig,
    /// Battery storage parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Solar PV parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Grid tariff.
    #[serde(default)]
    pub grid: GridConfig,
    /// Scheduled grid recharging.
    #[serde(default)]
    pub eco: EcoConfig,
}

/// Hourly demand profile selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemandConfig {
    /// Built-in profile: `"home"`, `"office"` or `"manual"` (all zeros).
    pub profile: String,
    /// Explicit 24 hourly values (kWh); overrides `profile` when present.
    pub hourly_kwh: Option<Vec<f64>>,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            profile: "home".to_string(),
            hourly_kwh: None,
        }
    }
}

/// Battery storage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (kWh).
    pub capacity_kwh: f64,
    /// Charge at hour 0 (kWh). Omit to start full.
    pub initial_charge_kwh: Option<f64>,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 4.0,
            initial_charge_kwh: None,
        }
    }
}

/// Solar PV parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Nameplate power (W).
    pub rated_power_w: f64,
    /// Availability policy: `"window"` or `"flat"`.
    pub policy: String,
    /// First generating hour (inclusive), window policy only.
    pub window_start: usize,
    /// Last generating hour (exclusive), window policy only.
    pub window_end: usize,
    /// Hours of rated output granted per hour, flat policy only.
    pub duty_hours: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            rated_power_w: 1000.0,
            policy: "window".to_string(),
            window_start: DEFAULT_WINDOW_START,
            window_end: DEFAULT_WINDOW_END,
            duty_hours: DEFAULT_DUTY_HOURS,
        }
    }
}

/// Grid tariff.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Flat price per kWh bought (yen).
    pub unit_price_yen_per_kwh: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            unit_price_yen_per_kwh: 35.0,
        }
    }
}

/// Scheduled grid recharging.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EcoConfig {
    /// Whether the eco window is active at all.
    pub enabled: bool,
    /// First recharge hour (inclusive).
    pub start_hour: usize,
    /// Hours before this one are inside the window as well; hour `h` is
    /// inside when `start_hour <= h || h < end_hour`.
    pub end_hour: usize,
    /// Grid energy offered to the battery per eco hour (kWh).
    pub recharge_kwh_per_hour: f64,
}

impl Default for EcoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            start_hour: 23,
            end_hour: 6,
            recharge_kwh_per_hour: DEFAULT_RECHARGE_KWH_PER_HOUR,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Household with the dashboard's default equipment.
    pub fn home() -> Self {
        Self::default()
    }

    /// Office: daytime load, larger battery and array.
    pub fn office() -> Self {
        Self {
            demand: DemandConfig {
                profile: "office".to_string(),
                hourly_kwh: None,
            },
            battery: BatteryConfig {
                capacity_kwh: 6.0,
                ..BatteryConfig::default()
            },
            solar: SolarConfig {
                rated_power_w: 2000.0,
                ..SolarConfig::default()
            },
            ..Self::default()
        }
    }

    /// Empty profile to be filled in by hand or from CSV.
    pub fn manual() -> Self {
        Self {
            demand: DemandConfig {
                profile: "manual".to_string(),
                hourly_kwh: None,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["home", "office", "manual"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "home" => Ok(Self::home()),
            "office" => Ok(Self::office()),
            "manual" => Ok(Self::manual()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let d = &self.demand;
        match &d.hourly_kwh {
            Some(values) => {
                if values.len() != HOURS_PER_DAY {
                    errors.push(ConfigError::new(
                        "demand.hourly_kwh",
                        format!("must have {HOURS_PER_DAY} values, got {}", values.len()),
                    ));
                }
                if let Some(hour) = values.iter().position(|v| !v.is_finite()) {
                    errors.push(ConfigError::new(
                        "demand.hourly_kwh",
                        format!("value at hour {hour} is not a finite number"),
                    ));
                }
            }
            None => {
                if !Self::PRESETS.contains(&d.profile.as_str()) {
                    errors.push(ConfigError::new(
                        "demand.profile",
                        format!(
                            "must be one of {}, got \"{}\"",
                            Self::PRESETS.join(", "),
                            d.profile
                        ),
                    ));
                }
            }
        }

        let bat = &self.battery;
        check_non_negative(&mut errors, "battery.capacity_kwh", bat.capacity_kwh);
        if let Some(initial) = bat.initial_charge_kwh {
            check_non_negative(&mut errors, "battery.initial_charge_kwh", initial);
            if initial > bat.capacity_kwh {
                errors.push(ConfigError::new(
                    "battery.initial_charge_kwh",
                    "must be <= battery.capacity_kwh",
                ));
            }
        }

        let sol = &self.solar;
        check_non_negative(&mut errors, "solar.rated_power_w", sol.rated_power_w);
        match sol.policy.as_str() {
            "window" => {
                if sol.window_end > HOURS_PER_DAY {
                    errors.push(ConfigError::new(
                        "solar.window_end",
                        format!("must be <= {HOURS_PER_DAY}"),
                    ));
                }
                if sol.window_start > sol.window_end {
                    errors.push(ConfigError::new(
                        "solar.window_start",
                        "must be <= solar.window_end",
                    ));
                }
            }
            "flat" => check_non_negative(&mut errors, "solar.duty_hours", sol.duty_hours),
            other => errors.push(ConfigError::new(
                "solar.policy",
                format!("must be \"window\" or \"flat\", got \"{other}\""),
            )),
        }

        check_non_negative(
            &mut errors,
            "grid.unit_price_yen_per_kwh",
            self.grid.unit_price_yen_per_kwh,
        );

        let eco = &self.eco;
        if eco.enabled {
            if eco.start_hour >= HOURS_PER_DAY {
                errors.push(ConfigError::new(
                    "eco.start_hour",
                    format!("must be < {HOURS_PER_DAY}"),
                ));
            }
            if eco.end_hour > HOURS_PER_DAY {
                errors.push(ConfigError::new(
                    "eco.end_hour",
                    format!("must be <= {HOURS_PER_DAY}"),
                ));
            }
            check_non_negative(
                &mut errors,
                "eco.recharge_kwh_per_hour",
                eco.recharge_kwh_per_hour,
            );
        }

        errors
    }

    /// Builds the engine configuration from the battery, solar, grid and eco sections.
    pub fn dispatch_config(&self) -> DispatchConfig {
        let solar_policy = match self.solar.policy.as_str() {
            "flat" => SolarPolicy::Flat {
                duty_hours: self.solar.duty_hours,
            },
            _ => SolarPolicy::Window {
                start_hour: self.solar.window_start,
                end_hour: self.solar.window_end,
            },
        };

        let mut config = DispatchConfig::new(
            self.battery.capacity_kwh,
            self.solar.rated_power_w,
            self.grid.unit_price_yen_per_kwh,
        )
        .with_solar_policy(solar_policy);

        if let Some(initial) = self.battery.initial_charge_kwh {
            config = config.with_initial_charge(initial);
        }
        if self.eco.enabled {
            config = config.with_eco_window(
                EcoWindow::new(self.eco.start_hour, self.eco.end_hour)
                    .with_recharge_rate(self.eco.recharge_kwh_per_hour),
            );
        }
        config
    }

    /// Resolves the `[demand]` section into a validated profile.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown profile name or malformed
    /// explicit values.
    pub fn demand_profile(&self) -> Result<HourlyProfile, ConfigError> {
        if let Some(values) = &self.demand.hourly_kwh {
            return HourlyProfile::new(values)
                .map_err(|e| ConfigError::new("demand.hourly_kwh", e.to_string()));
        }
        match self.demand.profile.as_str() {
            "home" => Ok(HourlyProfile::home()),
            "office" => Ok(HourlyProfile::office()),
            "manual" => Ok(HourlyProfile::zeros()),
            other => Err(ConfigError::new(
                "demand.profile",
                format!("unknown profile \"{other}\""),
            )),
        }
    }
}

fn check_non_negative(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(ConfigError::new(
            field,
            format!("must be a finite number >= 0, got {value}"),
        ));
    }
}
