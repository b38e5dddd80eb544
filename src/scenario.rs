//! Scenario assembly and validation.
//!
//! Building a scenario is the one place this crate returns a `Result`: everything
//! downstream (the simulator loop, the coordinators) trusts the invariants checked
//! here and panics via `fatal!` if they are ever violated later, since that would mean
//! a bug in this crate rather than a bad input.

use crate::aircraft::{Aircraft, UavAttributes, UavState, WaterBomberAttributes, WaterBomberState};
use crate::coordinator::DispatchConfig;
use crate::entities::{Base, Lightning, WaterTank};
use crate::error::ScenarioBuildError;
use crate::precomputed::PrecomputedDistances;

/// Everything the simulator driver needs for one run: the aircraft fleets, the static
/// entities they operate over, the lightning stream, and the two dispatch
/// configurations (one per aircraft class — a UAV run may use a different coordinator
/// policy than the water-bomber run over the same bases).
pub struct Scenario {
    pub bases: Vec<Base>,
    pub tanks: Vec<WaterTank>,
    pub strikes: Vec<Lightning>,
    pub aircraft: Vec<Aircraft>,
    pub precomputed: PrecomputedDistances,
    pub uav_config: DispatchConfig,
    pub wb_config: DispatchConfig,
}

/// Per-UAV load-time parameters, paired with which base it starts at.
pub struct UavSpec {
    pub id: u32,
    pub attrs: UavAttributes,
}

/// Per-water-bomber load-time parameters, paired with which base it starts at.
pub struct WaterBomberSpec {
    pub id: u32,
    pub attrs: WaterBomberAttributes,
}

impl Scenario {
    /// Validates and assembles a scenario. Checks, in order: tank capacities are
    /// non-negative, every aircraft's `pct_fuel_cutoff` lies in `(0, 1]`, every
    /// aircraft's `starting_at_base` resolves to a known base, the lightning stream is
    /// sorted by non-decreasing spawn time, and both dispatch configs carry a
    /// `mean_time_power` of at least `1.0`.
    pub fn build(
        bases: Vec<Base>,
        tanks: Vec<WaterTank>,
        strikes: Vec<Lightning>,
        uavs: Vec<UavSpec>,
        water_bombers: Vec<WaterBomberSpec>,
        uav_config: DispatchConfig,
        wb_config: DispatchConfig,
    ) -> Result<Scenario, ScenarioBuildError> {
        for tank in &tanks {
            if tank.remaining().0 < 0.0 {
                return Err(ScenarioBuildError::NegativeCapacity { entity: "water tank", id: tank.id });
            }
        }

        for spec in &uavs {
            if !(0.0..=1.0).contains(&spec.attrs.pct_fuel_cutoff) || spec.attrs.pct_fuel_cutoff == 0.0 {
                return Err(ScenarioBuildError::InvalidFuelCutoff {
                    aircraft_id: spec.id,
                    value: spec.attrs.pct_fuel_cutoff,
                });
            }
            if !bases.iter().any(|b| b.id == spec.attrs.starting_at_base) {
                return Err(ScenarioBuildError::DanglingReference { entity: "base", id: spec.attrs.starting_at_base });
            }
        }
        for spec in &water_bombers {
            if !(0.0..=1.0).contains(&spec.attrs.pct_fuel_cutoff) || spec.attrs.pct_fuel_cutoff == 0.0 {
                return Err(ScenarioBuildError::InvalidFuelCutoff {
                    aircraft_id: spec.id,
                    value: spec.attrs.pct_fuel_cutoff,
                });
            }
            if !bases.iter().any(|b| b.id == spec.attrs.starting_at_base) {
                return Err(ScenarioBuildError::DanglingReference { entity: "base", id: spec.attrs.starting_at_base });
            }
        }

        for (i, pair) in strikes.windows(2).enumerate() {
            if pair[1].spawn_time < pair[0].spawn_time {
                return Err(ScenarioBuildError::NonMonotoneSpawnTimes { index: i + 1 });
            }
        }

        for config in [&uav_config, &wb_config] {
            if config.mean_time_power < 1.0 {
                return Err(ScenarioBuildError::InvalidPolicyParameter {
                    parameter: "mean_time_power",
                    value: config.mean_time_power,
                });
            }
        }

        let aircraft = uavs
            .into_iter()
            .map(|spec| {
                let base = bases.iter().find(|b| b.id == spec.attrs.starting_at_base).unwrap();
                Aircraft::Uav(UavState::new(spec.id, spec.attrs, base.location))
            })
            .chain(water_bombers.into_iter().map(|spec| {
                let base = bases.iter().find(|b| b.id == spec.attrs.starting_at_base).unwrap();
                Aircraft::WaterBomber(WaterBomberState::new(spec.id, spec.attrs, base.location))
            }))
            .collect();

        let precomputed = PrecomputedDistances::build(&strikes, &bases, &tanks);

        Ok(Scenario { bases, tanks, strikes, aircraft, precomputed, uav_config, wb_config })
    }
}
