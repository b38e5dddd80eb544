//! `UavCoordinator`/`WbCoordinator`: the per-aircraft-class wrapper around the shared
//! insertion engine. Each owns the set of strikes it still has outstanding work for
//! and, for `ReprocessMaxTime`, the previous high-water latency mark; both of those
//! mirror `abstract_coordinator`'s split into a thin wrapper (`new_strike`/
//! `new_ignition`) plus the shared dispatch machinery.

use std::collections::HashSet;

use crate::aircraft::{Aircraft, EventTarget, NodeId};
use crate::coordinator::insertion::{self, DispatchConfig, DispatchRole};
use crate::entities::{Base, Lightning, WaterTank};
use crate::precomputed::PrecomputedDistances;

/// Shared engine behind both `UavCoordinator` and `WbCoordinator`. Not exposed
/// directly: callers go through the aircraft-class-specific wrappers below so that
/// `new_strike` can only ever be called on a UAV coordinator and `new_ignition` only
/// on a water-bomber one.
struct Engine {
    config: DispatchConfig,
    role: DispatchRole,
    outstanding: HashSet<u32>,
    max_latency_seen: f64,
}

impl Engine {
    fn new(config: DispatchConfig, role: DispatchRole, ids: impl IntoIterator<Item = u32>) -> Self {
        Engine { config, role, outstanding: ids.into_iter().collect(), max_latency_seen: f64::NEG_INFINITY }
    }

    fn mark_done(&mut self, id: u32) {
        self.outstanding.remove(&id);
    }

    fn dispatch(
        &mut self,
        id: u32,
        strikes: &[Lightning],
        aircraft: &mut [Aircraft],
        bases: &[Base],
        tanks: &mut [WaterTank],
        precomputed: &PrecomputedDistances,
        allow_reprocess: bool,
    ) {
        let Some(strike) = strikes.iter().find(|s| s.id == id) else {
            crate::fatal!("coordinator asked to dispatch unknown strike {id}");
        };
        let (location, risk, spawn_time) = (strike.location, strike.risk, strike.spawn_time);

        let dispatched = insertion::dispatch(
            id, location, risk, spawn_time, aircraft, bases, tanks, strikes, precomputed, self.role, &self.config,
        );
        if !dispatched {
            return;
        }

        if self.config.policy.reprocesses_max() && allow_reprocess {
            self.reprocess_if_needed(strikes, aircraft, bases, tanks, precomputed);
        }
    }

    /// Finds the single highest-latency strike across every aircraft's queue; if it
    /// exceeds the previous high-water mark, evicts it (re-appending the rest of its
    /// aircraft's suffix unchanged) and reprocesses it exactly once.
    fn reprocess_if_needed(
        &mut self,
        strikes: &[Lightning],
        aircraft: &mut [Aircraft],
        bases: &[Base],
        tanks: &mut [WaterTank],
        precomputed: &PrecomputedDistances,
    ) {
        let mut worst: Option<(usize, NodeId, Option<NodeId>, u32, f64)> = None;
        for (ai, ac) in aircraft.iter().enumerate() {
            if !self.role.admits(ac) {
                continue;
            }
            for (node, event, prev) in ac.queue().iter_forward() {
                let EventTarget::Strike { id, .. } = event.target else { continue };
                let Some(s) = strikes.iter().find(|s| s.id == id) else { continue };
                let latency = event.completion_time - s.spawn_time;
                let is_worse = worst.as_ref().is_none_or(|&(_, _, _, _, w)| latency > w);
                if is_worse {
                    worst = Some((ai, node, prev, id, latency));
                }
            }
        }

        let Some((ai, node, prev, evicted_id, latency)) = worst else { return };
        if latency <= self.max_latency_seen {
            return;
        }
        self.max_latency_seen = latency;

        let suffix: Vec<EventTarget> = aircraft[ai]
            .queue()
            .iter_forward()
            .skip(node.0 + 1)
            .map(|(_, e, _)| e.target)
            .collect();

        aircraft[ai].queue_truncate_after(prev);
        for target in &suffix {
            let departure = aircraft[ai].start_state_at(aircraft[ai].queue().last_node()).time;
            aircraft[ai].add_location_to_queue(*target, departure, tanks);
        }

        self.outstanding.insert(evicted_id);
        self.dispatch(evicted_id, strikes, aircraft, bases, tanks, precomputed, false);
    }
}

/// Dispatches newly-spawned lightning strikes to UAVs for inspection.
pub struct UavCoordinator {
    engine: Engine,
}

impl UavCoordinator {
    #[must_use]
    pub fn new(config: DispatchConfig, strike_ids: impl IntoIterator<Item = u32>) -> Self {
        UavCoordinator { engine: Engine::new(config, DispatchRole::Inspection, strike_ids) }
    }

    #[must_use]
    pub fn outstanding(&self) -> &HashSet<u32> {
        &self.engine.outstanding
    }

    pub fn lightning_strike_inspected(&mut self, id: u32) {
        self.engine.mark_done(id);
    }

    pub fn new_strike(
        &mut self,
        strike_id: u32,
        strikes: &[Lightning],
        aircraft: &mut [Aircraft],
        bases: &[Base],
        precomputed: &PrecomputedDistances,
    ) {
        self.engine.dispatch(strike_id, strikes, aircraft, bases, &mut [], precomputed, true);
    }
}

/// Dispatches confirmed ignitions to water bombers for suppression.
pub struct WbCoordinator {
    engine: Engine,
}

impl WbCoordinator {
    #[must_use]
    pub fn new(config: DispatchConfig, ignition_ids: impl IntoIterator<Item = u32>) -> Self {
        WbCoordinator { engine: Engine::new(config, DispatchRole::Suppression, ignition_ids) }
    }

    #[must_use]
    pub fn outstanding(&self) -> &HashSet<u32> {
        &self.engine.outstanding
    }

    pub fn lightning_strike_suppressed(&mut self, id: u32) {
        self.engine.mark_done(id);
    }

    pub fn new_ignition(
        &mut self,
        ignition_id: u32,
        strikes: &[Lightning],
        aircraft: &mut [Aircraft],
        bases: &[Base],
        tanks: &mut [WaterTank],
        precomputed: &PrecomputedDistances,
    ) {
        self.engine.dispatch(ignition_id, strikes, aircraft, bases, tanks, precomputed, true);
    }
}
