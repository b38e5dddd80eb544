//! The event-driven driver: strike-by-strike dispatch to UAVs, followed by
//! ignition-by-ignition dispatch of confirmed ignitions to water bombers.
//!
//! The two phases are sequential rather than interleaved: every UAV inspection must
//! have already happened (or been ruled infeasible) before a water bomber can be
//! dispatched at an ignition, since dispatch needs the inspection's confirmed timing
//! to know when that ignition became actionable.

use crate::aircraft::{Aircraft, CompletionKind};
use crate::coordinator::{UavCoordinator, WbCoordinator};
use crate::entities::{Base, Lightning, WaterTank};
use crate::precomputed::PrecomputedDistances;
use crate::scenario::Scenario;

/// Per-strike timing the simulator reports once a run completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeOutcome {
    pub strike_id: u32,
    pub spawn_time: f64,
    pub inspected_time: Option<f64>,
    pub suppressed_time: Option<f64>,
}

/// One complete run's results: per-strike latency outcomes, every aircraft's
/// completed-event history, and the final water-tank levels, for downstream analysis
/// this crate does not itself do.
pub struct RunResult {
    pub strikes: Vec<StrikeOutcome>,
    pub aircraft: Vec<Aircraft>,
    pub tanks: Vec<WaterTank>,
}

pub struct Simulator {
    bases: Vec<Base>,
    tanks: Vec<WaterTank>,
    strikes: Vec<Lightning>,
    aircraft: Vec<Aircraft>,
    precomputed: PrecomputedDistances,
    uav_coordinator: UavCoordinator,
    wb_coordinator: WbCoordinator,
}

impl Simulator {
    #[must_use]
    pub fn new(scenario: Scenario) -> Self {
        let strike_ids: Vec<u32> = scenario.strikes.iter().map(|s| s.id).collect();
        let ignition_ids: Vec<u32> = scenario.strikes.iter().filter(|s| s.ignition).map(|s| s.id).collect();
        Simulator {
            bases: scenario.bases,
            tanks: scenario.tanks,
            strikes: scenario.strikes,
            aircraft: scenario.aircraft,
            precomputed: scenario.precomputed,
            uav_coordinator: UavCoordinator::new(scenario.uav_config, strike_ids),
            wb_coordinator: WbCoordinator::new(scenario.wb_config, ignition_ids),
        }
    }

    /// Runs both phases to completion and returns the resulting latency outcomes and
    /// aircraft histories. Consumes `self` since a `Simulator` is single-use.
    #[must_use]
    pub fn run(mut self) -> RunResult {
        self.run_inspection_phase();
        self.run_suppression_phase();

        let strikes = self
            .strikes
            .iter()
            .map(|s| StrikeOutcome {
                strike_id: s.id,
                spawn_time: s.spawn_time,
                inspected_time: s.inspected_time(),
                suppressed_time: s.suppressed_time(),
            })
            .collect();

        RunResult { strikes, aircraft: self.aircraft, tanks: self.tanks }
    }

    fn run_inspection_phase(&mut self) {
        let spawn_times: Vec<f64> = self.strikes.iter().map(|s| s.spawn_time).collect();

        for (idx, spawn_time) in spawn_times.into_iter().enumerate() {
            let strike_id = self.strikes[idx].id;
            self.advance_uavs_to(spawn_time);

            self.uav_coordinator.new_strike(strike_id, &self.strikes, &mut self.aircraft, &self.bases, &self.precomputed);
        }

        self.drain_uavs();
    }

    fn run_suppression_phase(&mut self) {
        let mut ignitions: Vec<(f64, u32)> = self
            .strikes
            .iter()
            .filter(|s| s.ignition)
            .filter_map(|s| s.inspected_time().map(|t| (t, s.id)))
            .collect();
        ignitions.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        for (inspected_time, strike_id) in ignitions {
            self.advance_wbs_to(inspected_time);

            self.wb_coordinator.new_ignition(
                strike_id,
                &self.strikes,
                &mut self.aircraft,
                &self.bases,
                &mut self.tanks,
                &self.precomputed,
            );
        }

        self.drain_wbs();
    }

    /// Advances every UAV to `t`, recording completed inspections on the shared
    /// strike list and arming return-to-base obligations for any that go idle.
    fn advance_uavs_to(&mut self, t: f64) {
        for aircraft in &mut self.aircraft {
            let Aircraft::Uav(_) = aircraft else { continue };
            let completions = aircraft.update_to_time(t, &mut self.tanks, &mut self.strikes);
            for c in completions {
                if let CompletionKind::Inspected(id) = c {
                    self.uav_coordinator.lightning_strike_inspected(id);
                }
            }
            aircraft.go_to_base_when_necessary(&self.bases, t);
        }
    }

    fn advance_wbs_to(&mut self, t: f64) {
        for aircraft in &mut self.aircraft {
            let Aircraft::WaterBomber(_) = aircraft else { continue };
            let completions = aircraft.update_to_time(t, &mut self.tanks, &mut self.strikes);
            for c in completions {
                if let CompletionKind::Suppressed(id) = c {
                    self.wb_coordinator.lightning_strike_suppressed(id);
                }
            }
            aircraft.go_to_base_when_necessary(&self.bases, t);
        }
    }

    /// Runs every UAV queue out to its own last completion time, so strikes accepted
    /// late in the spawn stream still get inspected before the suppression phase
    /// starts reading `inspected_time`.
    fn drain_uavs(&mut self) {
        let last = self
            .aircraft
            .iter()
            .filter(|a| matches!(a, Aircraft::Uav(_)))
            .filter_map(|a| a.queue().peek_last().map(|e| e.completion_time))
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |m: f64| m.max(t))));
        if let Some(t) = last {
            self.advance_uavs_to(t);
        }
    }

    fn drain_wbs(&mut self) {
        let last = self
            .aircraft
            .iter()
            .filter(|a| matches!(a, Aircraft::WaterBomber(_)))
            .filter_map(|a| a.queue().peek_last().map(|e| e.completion_time))
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |m: f64| m.max(t))));
        if let Some(t) = last {
            self.advance_wbs_to(t);
        }
    }
}
