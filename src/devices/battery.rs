/// Home battery holding the only state carried across simulated hours.
///
/// The stored energy is always kept within `[0, capacity_kwh]`. Energy is
/// moved in kWh per hour; there are no power limits or conversion losses in
/// this model, so one call to [`Battery::discharge`] or [`Battery::charge`]
/// corresponds to one simulated hour.
#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    /// Maximum energy the battery can hold (kWh).
    pub capacity_kwh: f64,

    /// Energy currently stored (kWh).
    charge_kwh: f64,
}

impl Battery {
    /// Creates a battery holding `initial_charge_kwh`, clamped into `[0, capacity_kwh]`.
    ///
    /// A negative capacity is treated as zero; callers validate configuration
    /// before constructing the battery.
    pub fn new(capacity_kwh: f64, initial_charge_kwh: f64) -> Self {
        let capacity_kwh = capacity_kwh.max(0.0);
        Self {
            capacity_kwh,
            charge_kwh: initial_charge_kwh.clamp(0.0, capacity_kwh),
        }
    }

    /// Creates a fully charged battery.
    pub fn full(capacity_kwh: f64) -> Self {
        Self::new(capacity_kwh, capacity_kwh)
    }

    /// Energy currently stored (kWh).
    pub fn charge_kwh(&self) -> f64 {
        self.charge_kwh
    }

    /// Free space left before the battery is full (kWh).
    pub fn headroom_kwh(&self) -> f64 {
        (self.capacity_kwh - self.charge_kwh).max(0.0)
    }

    /// Draws up to `requested_kwh` from the battery.
    ///
    /// # Returns
    ///
    /// The energy actually delivered, `min(charge, requested)`.
    pub fn discharge(&mut self, requested_kwh: f64) -> f64 {
        let delivered = requested_kwh.max(0.0).min(self.charge_kwh);
        self.charge_kwh = (self.charge_kwh - delivered).clamp(0.0, self.capacity_kwh);
        delivered
    }

    /// Stores up to `offered_kwh`, limited by the remaining headroom.
    ///
    /// # Returns
    ///
    /// The energy actually stored.
    pub fn charge(&mut self, offered_kwh: f64) -> f64 {
        let stored = offered_kwh.max(0.0).min(self.headroom_kwh());
        self.charge_kwh = (self.charge_kwh + stored).clamp(0.0, self.capacity_kwh);
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_battery_clamps_initial_charge() {
        assert_eq!(Battery::new(4.0, 6.0).charge_kwh(), 4.0);
        assert_eq!(Battery::new(4.0, -1.0).charge_kwh(), 0.0);
        assert_eq!(Battery::new(4.0, 2.5).charge_kwh(), 2.5);
    }

    #[test]
    fn test_negative_capacity_is_empty_battery() {
        let battery = Battery::full(-2.0);
        assert_eq!(battery.capacity_kwh, 0.0);
        assert_eq!(battery.charge_kwh(), 0.0);
    }

    #[test]
    fn test_discharge_limited_by_stored_energy() {
        let mut battery = Battery::new(4.0, 1.5);
        assert_eq!(battery.discharge(1.0), 1.0);
        assert_eq!(battery.discharge(1.0), 0.5);
        assert_eq!(battery.charge_kwh(), 0.0);
        assert_eq!(battery.discharge(1.0), 0.0);
    }

    #[test]
    fn test_charge_limited_by_headroom() {
        let mut battery = Battery::new(4.0, 3.5);
        assert_eq!(battery.charge(1.0), 0.5);
        assert_eq!(battery.charge_kwh(), 4.0);
        assert_eq!(battery.headroom_kwh(), 0.0);
        assert_eq!(battery.charge(1.0), 0.0);
    }

    #[test]
    fn test_negative_requests_move_no_energy() {
        let mut battery = Battery::new(4.0, 2.0);
        assert_eq!(battery.discharge(-1.0), 0.0);
        assert_eq!(battery.charge(-1.0), 0.0);
        assert_eq!(battery.charge_kwh(), 2.0);
    }

    #[test]
    fn test_zero_capacity_never_stores() {
        let mut battery = Battery::full(0.0);
        assert_eq!(battery.charge(1.0), 0.0);
        assert_eq!(battery.discharge(1.0), 0.0);
    }

    #[test]
    fn test_complete_discharge_then_recharge_cycle() {
        let mut battery = Battery::full(2.0);
        let mut delivered = 0.0;
        for _ in 0..4 {
            delivered += battery.discharge(1.0);
        }
        assert_eq!(delivered, 2.0);

        let mut stored = 0.0;
        for _ in 0..4 {
            stored += battery.charge(1.0);
        }
        assert_eq!(stored, 2.0);
        assert_eq!(battery.charge_kwh(), 2.0);
    }
}
