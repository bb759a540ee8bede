use serde::{Deserialize, Serialize};

/// Default first generating hour of the window policy (inclusive).
pub const DEFAULT_WINDOW_START: usize = 7;
/// Default end of the window policy (exclusive), i.e. hours 7-16 generate.
pub const DEFAULT_WINDOW_END: usize = 17;
/// Duty hours used by the flat policy when nothing else is configured.
pub const DEFAULT_DUTY_HOURS: f64 = 1.0;

/// How rated solar power turns into an hourly energy contribution.
///
/// Both variants feed the same dispatch loop; they only decide how much
/// solar energy is available in a given hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SolarPolicy {
    /// Rated output for one hour in each hour of `[start_hour, end_hour)`,
    /// nothing outside of it.
    Window {
        /// First generating hour (inclusive).
        start_hour: usize,
        /// End of generation (exclusive).
        end_hour: usize,
    },
    /// Legacy mode: every hour of the day is offered
    /// `rated_kw * duty_hours`, which the dispatch loop then bounds by that
    /// hour's demand.
    Flat {
        /// Assumed generation duration credited to each hour.
        duty_hours: f64,
    },
}

impl Default for SolarPolicy {
    fn default() -> Self {
        Self::Window {
            start_hour: DEFAULT_WINDOW_START,
            end_hour: DEFAULT_WINDOW_END,
        }
    }
}

impl SolarPolicy {
    /// Returns `true` when the policy lets solar generate during `hour`.
    pub fn is_generating(&self, hour: usize) -> bool {
        match *self {
            Self::Window {
                start_hour,
                end_hour,
            } => hour >= start_hour && hour < end_hour,
            Self::Flat { duty_hours } => duty_hours > 0.0,
        }
    }
}

/// Solar array described by its nameplate power and availability policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarArray {
    /// Nameplate power in watts.
    pub rated_power_w: f64,
    /// Availability policy.
    pub policy: SolarPolicy,
}

impl SolarArray {
    /// Creates a solar array; negative rated power is clamped to zero.
    pub fn new(rated_power_w: f64, policy: SolarPolicy) -> Self {
        Self {
            rated_power_w: rated_power_w.max(0.0),
            policy,
        }
    }

    /// Rated power in kilowatts.
    pub fn rated_kw(&self) -> f64 {
        self.rated_power_w / 1000.0
    }

    /// Solar energy available during `hour` (kWh), before demand is considered.
    pub fn available_kwh(&self, hour: usize) -> f64 {
        if !self.policy.is_generating(hour) {
            return 0.0;
        }
        match self.policy {
            SolarPolicy::Window { .. } => self.rated_kw(),
            SolarPolicy::Flat { duty_hours } => self.rated_kw() * duty_hours,
        }
    }
}
