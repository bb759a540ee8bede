//! Property tests for the per-hour dispatch invariants.

mod common;

use proptest::prelude::*;

use dispatch_sim::devices::SolarPolicy;
use dispatch_sim::sim::eco::EcoWindow;
use dispatch_sim::sim::{DispatchConfig, HOURS_PER_DAY, simulate};

fn demand_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..5.0_f64, HOURS_PER_DAY)
}

fn solar_policy_strategy() -> impl Strategy<Value = SolarPolicy> {
    prop_oneof![
        (0..=24_usize, 0..=24_usize).prop_map(|(a, b)| SolarPolicy::Window {
            start_hour: a.min(b),
            end_hour: a.max(b),
        }),
        (0.0..3.0_f64).prop_map(|duty_hours| SolarPolicy::Flat { duty_hours }),
    ]
}

fn config_strategy() -> impl Strategy<Value = DispatchConfig> {
    (
        0.0..10.0_f64,
        0.0..1.0_f64,
        0.0..4000.0_f64,
        1.0..100.0_f64,
        solar_policy_strategy(),
        prop::option::of((0..24_usize, 0..=24_usize, 0.0..3.0_f64)),
    )
        .prop_map(|(capacity, initial_share, solar_w, price, policy, eco)| {
            let mut config = DispatchConfig::new(capacity, solar_w, price)
                .with_initial_charge(capacity * initial_share)
                .with_solar_policy(policy);
            if let Some((start, end, rate)) = eco {
                config = config.with_eco_window(EcoWindow::new(start, end).with_recharge_rate(rate));
            }
            config
        })
}

proptest! {
    #[test]
    fn eco_membership_matches_either_bound(start in 0..24_usize, end in 0..=24_usize, hour in 0..24_usize) {
        let window = EcoWindow::new(start, end);
        prop_assert_eq!(window.contains(hour), start <= hour || hour < end);
    }

    #[test]
    fn every_hour_balances(demand in demand_strategy(), config in config_strategy()) {
        let sim = simulate(&demand, &config).unwrap();
        for r in &sim.hours {
            let supplied = r.solar_kwh + r.battery_kwh + r.grid_kwh;
            prop_assert!((supplied - r.demand_kwh).abs() <= common::EPS);
            prop_assert!(r.solar_kwh >= 0.0);
            prop_assert!(r.battery_kwh >= 0.0);
            prop_assert!(r.grid_kwh >= 0.0);
        }
    }

    #[test]
    fn battery_stays_within_capacity(demand in demand_strategy(), config in config_strategy()) {
        let sim = simulate(&demand, &config).unwrap();
        for r in &sim.hours {
            prop_assert!(r.battery_level_kwh >= 0.0);
            prop_assert!(r.battery_level_kwh <= config.battery_capacity_kwh + common::EPS);
        }
    }

    #[test]
    fn dispatch_never_costs_more_without_eco(demand in demand_strategy(), config in config_strategy()) {
        let config = DispatchConfig { eco_window: None, ..config };
        let sim = simulate(&demand, &config).unwrap();
        prop_assert!(sim.summary.cost_after_yen <= sim.summary.cost_before_yen + 1e-6);
        prop_assert!(sim.summary.total_grid_charge_kwh == 0.0);
    }

    #[test]
    fn hourly_costs_sum_to_cost_after(demand in demand_strategy(), config in config_strategy()) {
        let sim = simulate(&demand, &config).unwrap();
        let billed: f64 = sim.hours.iter().map(|r| r.cost_yen).sum();
        prop_assert!((billed - sim.summary.cost_after_yen).abs() <= 1e-6);
    }
}
