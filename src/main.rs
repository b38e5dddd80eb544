#![allow(dead_code)]

mod aircraft;
mod coordinator;
mod entities;
mod error;
mod geo;
mod precomputed;
mod scenario;
mod simulator;
mod logger;
mod units;

use aircraft::{UavAttributes, WaterBomberAttributes};
use coordinator::{CoordinatorChoice, DispatchConfig, PrioritisationChoice, TargetLatency};
use entities::{Base, BaseKind, Lightning, WaterTank};
use geo::Location;
use scenario::{Scenario, UavSpec, WaterBomberSpec};
use simulator::Simulator;
use units::{Distance, Speed, Volume};

/// Builds a small illustrative scenario and runs it to completion, printing a
/// per-strike latency summary. Real deployments assemble a `Scenario` from loaded
/// parameters rather than hardcoding one here; this entry point exists to exercise
/// the dispatch core end to end.
fn main() {
    let scenario = demo_scenario();
    info!("running scenario with {} strikes, {} aircraft", scenario.strikes.len(), scenario.aircraft.len());

    let result = Simulator::new(scenario).run();

    for s in &result.strikes {
        match (s.inspected_time, s.suppressed_time) {
            (Some(i), Some(sup)) => info!(
                "strike {}: inspected after {:.2}h, suppressed after {:.2}h",
                s.strike_id,
                i - s.spawn_time,
                sup - s.spawn_time
            ),
            (Some(i), None) => info!("strike {}: inspected after {:.2}h, no ignition", s.strike_id, i - s.spawn_time),
            (None, _) => warn!("strike {} was never inspected", s.strike_id),
        }
    }
}

fn demo_scenario() -> Scenario {
    let home = Base::new(0, Location::new(0.0, 0.0), BaseKind::Both);
    let bases = vec![home];

    let tank = WaterTank::new(0, Location::new(0.2, 0.2), Volume(1500.0));
    let tanks = vec![tank];

    let strikes = vec![
        Lightning::new(0, Location::new(0.3, 0.3), 0.0, true, 0.6),
        Lightning::new(1, Location::new(0.5, 0.1), 0.5, false, 0.2),
        Lightning::new(2, Location::new(0.1, 0.6), 1.0, true, 0.9),
    ];

    let uavs = vec![UavSpec {
        id: 0,
        attrs: UavAttributes {
            flight_speed: Speed(120.0),
            fuel_refill_time: 0.25,
            range: Distance(300.0),
            inspection_time: 0.1,
            pct_fuel_cutoff: 0.15,
            initial_fuel: 1.0,
            starting_at_base: 0,
        },
    }];

    let water_bombers = vec![WaterBomberSpec {
        id: 0,
        attrs: WaterBomberAttributes {
            flight_speed: Speed(90.0),
            fuel_refill_time: 0.3,
            range_empty: Distance(250.0),
            range_loaded: Distance(150.0),
            pct_fuel_cutoff: 0.2,
            initial_fuel: 1.0,
            starting_at_base: 0,
            water_capacity: Volume(1500.0),
            water_refill_time: 0.4,
            suppression_time: 0.15,
            water_per_suppression: Volume(700.0),
            type_tag: "medium".to_string(),
        },
    }];

    let uav_config = DispatchConfig {
        policy: CoordinatorChoice::Insertion,
        prioritise: PrioritisationChoice::Time,
        target_latency: TargetLatency::Unbounded,
        mean_time_power: 1.0,
    };
    let wb_config = DispatchConfig {
        policy: CoordinatorChoice::MinimiseMeanTime,
        prioritise: PrioritisationChoice::Product,
        target_latency: TargetLatency::Unbounded,
        mean_time_power: 1.0,
    };

    Scenario::build(bases, tanks, strikes, uavs, water_bombers, uav_config, wb_config)
        .unwrap_or_else(|e| fatal!("demo scenario failed to build: {e}"))
}
