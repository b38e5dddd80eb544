//! The generic insertion-scoring loop shared by all four dispatch policies and by
//! both aircraft classes. One function walks every aircraft and every insertion
//! boundary in its queue, scores feasible candidates with [`crate::coordinator::objective::score`],
//! and commits the winner. Policy variation lives entirely in the objective, not in a
//! second copy of this loop.

use crate::aircraft::{Aircraft, EventTarget, NodeId};
use crate::coordinator::objective::{self, CoordinatorChoice, ShiftedStrike, TargetLatency};
use crate::coordinator::prioritisation::PrioritisationChoice;
use crate::entities::{Base, Lightning, WaterTank};
use crate::geo::Location;
use crate::precomputed::PrecomputedDistances;

#[derive(Debug, Clone, Copy)]
pub struct DispatchConfig {
    pub policy: CoordinatorChoice,
    pub prioritise: PrioritisationChoice,
    pub target_latency: TargetLatency,
    pub mean_time_power: f64,
}

/// Which fleet a `dispatch` call may place the target onto. A strike is inspected by
/// UAVs and (once confirmed as an ignition) suppressed by water bombers; the two
/// never compete for the same slot, so `dispatch` only ever scores one fleet at a
/// time even though aircraft of both kinds may share one `Vec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchRole {
    Inspection,
    Suppression,
}

impl DispatchRole {
    pub(crate) fn admits(self, aircraft: &Aircraft) -> bool {
        match self {
            DispatchRole::Inspection => matches!(aircraft, Aircraft::Uav(_)),
            DispatchRole::Suppression => matches!(aircraft, Aircraft::WaterBomber(_)),
        }
    }
}

struct Candidate {
    aircraft_idx: usize,
    node: Option<NodeId>,
    prefix: Vec<EventTarget>,
    /// The original queue's `[eᵢ₊₁, …, eₙ]`, re-appended after the new target once
    /// this candidate is committed — truncating after `node` would otherwise discard
    /// it outright.
    suffix: Vec<EventTarget>,
    objective: f64,
    within_target: bool,
}

fn lookup<'a>(strikes: &'a [Lightning], id: u32) -> Option<&'a Lightning> {
    strikes.iter().find(|s| s.id == id)
}

/// Every candidate detour a coordinator may try ahead of the target, in the order it
/// tries them: direct, then via each eligible base, then (water bombers only, when
/// still out of water) via each tank alone, and via every base-then-tank and
/// tank-then-base ordering. When `strike_idx` resolves (the target already has an
/// entry in `precomputed`), bases and tanks are each ordered nearest-to-the-target
/// first using the precomputed matrix, so the early-break in `dispatch` actually tries
/// the cheapest detour first rather than whatever order the entity lists happen to be
/// stored in.
fn candidate_prefixes(
    aircraft: &Aircraft,
    bases: &[Base],
    tanks: &[WaterTank],
    strike_idx: Option<usize>,
    precomputed: &PrecomputedDistances,
) -> Vec<Vec<EventTarget>> {
    let mut prefixes = vec![Vec::new()];

    let mut eligible_base_idx: Vec<usize> = bases
        .iter()
        .enumerate()
        .filter(|(_, b)| match aircraft {
            Aircraft::Uav(_) => b.kind.serves_uav(),
            Aircraft::WaterBomber(_) => b.kind.serves_water_bomber(),
        })
        .map(|(i, _)| i)
        .collect();
    if let Some(idx) = strike_idx {
        eligible_base_idx.sort_by(|&a, &b| {
            precomputed.strike_to_base(idx, a).0.partial_cmp(&precomputed.strike_to_base(idx, b).0).unwrap()
        });
    }
    let eligible_bases: Vec<EventTarget> =
        eligible_base_idx.iter().map(|&i| EventTarget::Base { id: bases[i].id, location: bases[i].location }).collect();
    for b in &eligible_bases {
        prefixes.push(vec![*b]);
    }

    if matches!(aircraft, Aircraft::WaterBomber(_)) {
        let mut tank_idx: Vec<usize> = (0..tanks.len()).collect();
        if let Some(idx) = strike_idx {
            tank_idx.sort_by(|&a, &b| {
                precomputed.strike_to_tank(idx, a).0.partial_cmp(&precomputed.strike_to_tank(idx, b).0).unwrap()
            });
        }
        let tank_targets: Vec<EventTarget> =
            tank_idx.iter().map(|&i| EventTarget::WaterTank { id: tanks[i].id, location: tanks[i].location }).collect();
        for t in &tank_targets {
            prefixes.push(vec![*t]);
        }
        for b in &eligible_bases {
            for t in &tank_targets {
                prefixes.push(vec![*b, *t]);
                prefixes.push(vec![*t, *b]);
            }
        }
    }

    prefixes
}

/// Nearest base (of the kind this aircraft may use) to a given strike, read off the
/// precomputed strike↔base matrix rather than recomputed live — both ends are static
/// entities known in advance.
fn nearest_eligible_base(
    aircraft: &Aircraft,
    bases: &[Base],
    strike_idx: usize,
    precomputed: &PrecomputedDistances,
) -> Option<EventTarget> {
    bases
        .iter()
        .enumerate()
        .filter(|(_, b)| match aircraft {
            Aircraft::Uav(_) => b.kind.serves_uav(),
            Aircraft::WaterBomber(_) => b.kind.serves_water_bomber(),
        })
        .min_by(|(a, _), (b, _)| {
            precomputed.strike_to_base(strike_idx, *a).0.partial_cmp(&precomputed.strike_to_base(strike_idx, *b).0).unwrap()
        })
        .map(|(_, b)| EventTarget::Base { id: b.id, location: b.location })
}

/// Everything `dispatch` needs to know about the queue preserved past a candidate
/// boundary: its targets (to literally re-append on commit), the per-strike marginal
/// cost inputs (to score `MinimiseMeanTime`/`ReprocessMaxTime`), and the original
/// departure time the whole chain used to hang off (to compute how far it shifts).
///
/// That baseline is *not* always `start_state_at(node).time`: when `node` is `None`
/// and the queue is non-empty, the candidate departs from the aircraft's current
/// live state, which has nothing to do with the time the existing suffix was
/// originally scheduled from — only the first preserved event's own stored
/// `departure_time` records that.
struct Suffix {
    targets: Vec<EventTarget>,
    shifts: Vec<ShiftedStrike>,
    original_departure: Option<f64>,
}

fn suffix_after(aircraft: &Aircraft, node: Option<NodeId>, strikes: &[Lightning]) -> Suffix {
    let start_idx = match node {
        None => 0,
        Some(NodeId(i)) => i + 1,
    };
    let mut targets = Vec::new();
    let mut shifts = Vec::new();
    let mut original_departure = None;
    for (_, event, _) in aircraft.queue().iter_forward().skip(start_idx) {
        if original_departure.is_none() {
            original_departure = Some(event.departure_time);
        }
        targets.push(event.target);
        if let EventTarget::Strike { id, .. } = event.target {
            if let Some(s) = lookup(strikes, id) {
                shifts.push(ShiftedStrike { old_latency: event.completion_time - s.spawn_time, risk: s.risk });
            }
        }
    }
    Suffix { targets, shifts, original_departure }
}

/// Attempts to place `target` (a strike or ignition) onto the best feasible aircraft
/// queue position. Returns `true` if some aircraft accepted it, having already
/// committed the winning plan; `false` (no mutation) if no aircraft could.
pub fn dispatch(
    target_id: u32,
    target_location: Location,
    target_risk: f64,
    target_spawn_time: f64,
    aircraft: &mut [Aircraft],
    bases: &[Base],
    tanks: &mut [WaterTank],
    strikes: &[Lightning],
    precomputed: &PrecomputedDistances,
    role: DispatchRole,
    config: &DispatchConfig,
) -> bool {
    let prioritise = config.prioritise.as_fn();
    let strike_event = EventTarget::Strike { id: target_id, location: target_location };
    let cap = config.target_latency.cap();
    let target_idx = strikes.iter().position(|s| s.id == target_id);

    let mut best: Option<Candidate> = None;

    for (aircraft_idx, ac) in aircraft.iter().enumerate() {
        if !role.admits(ac) {
            continue;
        }
        // `Simple` never reorders an aircraft's existing plan: it only ever considers
        // appending after the last queued event (or departing now, if the queue is
        // empty). The other three policies search every insertion boundary, which is
        // what lets them place a newly-spawned strike ahead of one already queued.
        let boundaries: Vec<Option<NodeId>> = if config.policy == CoordinatorChoice::Simple {
            vec![ac.queue().last_node()]
        } else {
            std::iter::once(None).chain(ac.queue().iter_forward().map(|(n, _, _)| Some(n))).collect()
        };

        for node in boundaries {
            let start = ac.start_state_at(node);
            let suffix = suffix_after(ac, node, strikes);

            for prefix in candidate_prefixes(ac, bases, tanks, target_idx, precomputed) {
                let mut path = prefix.clone();
                path.push(strike_event);

                // Feasibility must cover the whole sequence this candidate would leave
                // behind: the new strike, the preserved suffix re-appended in `commit`,
                // and — when the chain doesn't already end at a refuel stop — a
                // trailing return to the nearest eligible base. Scoring below still
                // reads off `path`/`path + suffix` alone; the synthetic base leg exists
                // only to gate feasibility and is never committed.
                let mut feasibility_path = path.clone();
                feasibility_path.extend(suffix.targets.iter().copied());
                if let Some(EventTarget::Strike { id, .. }) = feasibility_path.last().copied() {
                    if let Some(last_idx) = strikes.iter().position(|s| s.id == id) {
                        if let Some(base) = nearest_eligible_base(ac, bases, last_idx, precomputed) {
                            feasibility_path.push(base);
                        }
                    }
                }

                let mut risks = Vec::with_capacity(1 + suffix.shifts.len());
                risks.push(target_risk);
                risks.extend(suffix.shifts.iter().map(|s| s.risk));

                if ac.enough_fuel(&feasibility_path, start, &risks, &prioritise).is_none() {
                    continue;
                }
                if !ac.enough_water(&feasibility_path, start) {
                    continue;
                }

                let steps = ac.plan_completion_times(&path, start);
                let Some(&completion) = steps.last() else { continue };
                let new_latency = completion - target_spawn_time;
                let delta = match suffix.original_departure {
                    Some(baseline) => (completion - baseline).max(0.0),
                    None => 0.0,
                };

                let tail_completion = if suffix.targets.is_empty() {
                    completion
                } else {
                    let mut full_path = path.clone();
                    full_path.extend(suffix.targets.iter().copied());
                    ac.plan_completion_times(&full_path, start).last().copied().unwrap_or(completion)
                };
                let tail_latency = tail_completion - target_spawn_time;

                let within_target =
                    new_latency <= cap && suffix.shifts.iter().all(|s| s.old_latency + delta <= cap);

                let objective = objective::score(
                    config.policy,
                    &prioritise,
                    config.mean_time_power,
                    new_latency,
                    target_risk,
                    delta,
                    &suffix.shifts,
                    tail_latency,
                );

                let candidate = Candidate {
                    aircraft_idx,
                    node,
                    prefix,
                    suffix: suffix.targets.clone(),
                    objective,
                    within_target,
                };
                let better = match &best {
                    None => true,
                    Some(b) => {
                        (candidate.within_target && !b.within_target)
                            || (candidate.within_target == b.within_target && candidate.objective < b.objective)
                    }
                };
                if better {
                    best = Some(candidate);
                }
                // Only the first feasible prefix at this boundary is explored further;
                // cheaper detours are tried first so this keeps the loop from growing
                // quadratically in the number of bases/tanks without changing which
                // boundary ultimately wins.
                break;
            }
        }
    }

    let Some(candidate) = best else {
        crate::warn!("strike {target_id} could not be dispatched to any aircraft");
        return false;
    };

    commit(candidate, strike_event, aircraft, tanks);
    true
}

fn commit(candidate: Candidate, strike_event: EventTarget, aircraft: &mut [Aircraft], tanks: &mut [WaterTank]) {
    let ac = &mut aircraft[candidate.aircraft_idx];
    ac.queue_truncate_after(candidate.node);
    let committed = candidate.prefix.iter().chain(std::iter::once(&strike_event)).chain(candidate.suffix.iter());
    for target in committed {
        let departure = ac.start_state_at(ac.queue().last_node()).time;
        ac.add_location_to_queue(*target, departure, tanks);
    }
}

impl Aircraft {
    /// Public alias used only by the coordinator commit step; kept distinct from the
    /// queue's own `truncate_after` so the aircraft stays the sole owner of mutating
    /// its queue.
    pub fn queue_truncate_after(&mut self, node: Option<NodeId>) {
        match self {
            Aircraft::Uav(u) => u.queue.truncate_after(node),
            Aircraft::WaterBomber(w) => w.queue.truncate_after(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::UavAttributes;
    use crate::precomputed::PrecomputedDistances;
    use crate::units::{Distance, Speed, Volume};

    fn uav(id: u32, position: Location, inspection_time: f64) -> Aircraft {
        Aircraft::Uav(crate::aircraft::UavState::new(
            id,
            UavAttributes {
                flight_speed: Speed(100.0),
                fuel_refill_time: 0.1,
                range: Distance(10_000.0),
                inspection_time,
                pct_fuel_cutoff: 0.05,
                initial_fuel: 1.0,
                starting_at_base: 0,
            },
            position,
        ))
    }

    fn config(policy: CoordinatorChoice, target_latency: TargetLatency) -> DispatchConfig {
        DispatchConfig { policy, prioritise: PrioritisationChoice::Time, target_latency, mean_time_power: 1.0 }
    }

    #[test]
    fn role_admits_only_the_matching_aircraft_kind() {
        let uav = uav(0, Location::new(0.0, 0.0), 0.0);
        let wb = Aircraft::WaterBomber(crate::aircraft::WaterBomberState::new(
            1,
            crate::aircraft::WaterBomberAttributes {
                flight_speed: Speed(100.0),
                fuel_refill_time: 0.1,
                range_empty: Distance(200.0),
                range_loaded: Distance(150.0),
                pct_fuel_cutoff: 0.1,
                initial_fuel: 1.0,
                starting_at_base: 0,
                water_capacity: Volume(1000.0),
                water_refill_time: 0.2,
                suppression_time: 0.1,
                water_per_suppression: Volume(500.0),
                type_tag: "light".to_string(),
            },
            Location::new(0.0, 0.0),
        ));
        assert!(DispatchRole::Inspection.admits(&uav));
        assert!(!DispatchRole::Inspection.admits(&wb));
        assert!(DispatchRole::Suppression.admits(&wb));
        assert!(!DispatchRole::Suppression.admits(&uav));
    }

    #[test]
    fn simple_never_reorders_an_existing_queue() {
        let mut aircraft = vec![uav(0, Location::new(0.0, 0.0), 0.0)];
        let bases = [];
        let mut tanks = [];

        let strikes = vec![
            Lightning::new(0, Location::new(0.0, 0.5), 0.0, false, 0.1),
            Lightning::new(1, Location::new(0.0, 0.4), 0.1, false, 0.1),
        ];
        let cfg = config(CoordinatorChoice::Simple, TargetLatency::Unbounded);
        let precomputed = PrecomputedDistances::build(&strikes, &bases, &tanks);

        let s0 = &strikes[0];
        assert!(dispatch(
            s0.id, s0.location, s0.risk, s0.spawn_time,
            &mut aircraft, &bases, &mut tanks, &strikes, &precomputed, DispatchRole::Inspection, &cfg,
        ));
        let s1 = &strikes[1];
        assert!(dispatch(
            s1.id, s1.location, s1.risk, s1.spawn_time,
            &mut aircraft, &bases, &mut tanks, &strikes, &precomputed, DispatchRole::Inspection, &cfg,
        ));

        let queue = aircraft[0].queue();
        let ids: Vec<u32> = queue
            .iter_forward()
            .map(|(_, e, _)| match e.target {
                EventTarget::Strike { id, .. } => id,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(ids, vec![0, 1], "Simple must append strikes in arrival order, never reorder");
    }

    #[test]
    fn minimise_mean_time_can_insert_ahead_of_an_already_queued_strike() {
        let mut aircraft = vec![uav(0, Location::new(0.0, 0.0), 0.0)];
        let bases = [];
        let mut tanks = [];

        // Strike 0 is far; strike 1 spawns later but sits much closer to the aircraft's
        // start position, so reordering it ahead of strike 0 lowers the mean latency.
        let strikes = vec![
            Lightning::new(0, Location::new(0.0, 0.5), 0.0, false, 0.1),
            Lightning::new(1, Location::new(0.0, 0.02), 0.1, false, 0.1),
        ];
        let cfg = config(CoordinatorChoice::MinimiseMeanTime, TargetLatency::Unbounded);
        let precomputed = PrecomputedDistances::build(&strikes, &bases, &tanks);

        let s0 = &strikes[0];
        assert!(dispatch(
            s0.id, s0.location, s0.risk, s0.spawn_time,
            &mut aircraft, &bases, &mut tanks, &strikes, &precomputed, DispatchRole::Inspection, &cfg,
        ));
        let s1 = &strikes[1];
        assert!(dispatch(
            s1.id, s1.location, s1.risk, s1.spawn_time,
            &mut aircraft, &bases, &mut tanks, &strikes, &precomputed, DispatchRole::Inspection, &cfg,
        ));

        let queue = aircraft[0].queue();
        let ids: Vec<u32> = queue
            .iter_forward()
            .map(|(_, e, _)| match e.target {
                EventTarget::Strike { id, .. } => id,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(ids, vec![1, 0], "closer strike 1 should be reordered ahead of strike 0");
    }

    #[test]
    fn commit_preserves_the_suffix_after_an_ahead_insertion() {
        let mut aircraft = vec![uav(0, Location::new(0.0, 0.0), 0.0)];
        let bases = [];
        let mut tanks = [];

        let strikes = vec![
            Lightning::new(0, Location::new(0.0, 0.3), 0.0, false, 0.1),
            Lightning::new(1, Location::new(0.0, 0.6), 0.2, false, 0.1),
            Lightning::new(2, Location::new(0.0, 0.02), 0.3, false, 0.1),
        ];
        let cfg = config(CoordinatorChoice::MinimiseMeanTime, TargetLatency::Unbounded);
        let precomputed = PrecomputedDistances::build(&strikes, &bases, &tanks);

        for s in &strikes {
            assert!(dispatch(
                s.id, s.location, s.risk, s.spawn_time,
                &mut aircraft, &bases, &mut tanks, &strikes, &precomputed, DispatchRole::Inspection, &cfg,
            ));
        }

        // Every strike must appear exactly once in the final queue regardless of how
        // it was reordered — a dropped suffix would shrink this set.
        let queue = aircraft[0].queue();
        let mut ids: Vec<u32> = queue
            .iter_forward()
            .map(|(_, e, _)| match e.target {
                EventTarget::Strike { id, .. } => id,
                _ => unreachable!(),
            })
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn target_latency_band_prefers_the_in_band_candidate_despite_a_worse_objective() {
        // Aircraft X starts exactly where the new strike is and already has one far
        // queued strike Q sitting just under the cap; inserting the new strike ahead
        // of Q is cheap (low objective) but tips Q over the cap. Aircraft Y starts
        // further from the new strike (costlier, higher objective) but has no queue
        // to disturb, so taking the new strike keeps everything under the cap.
        let cap = 1.0;
        let dwell = 0.03;

        let mut x = uav(0, Location::new(0.0, 0.0), dwell);
        let q = Lightning::new(1, Location::new(0.0, 0.854), 0.0, false, 0.0);
        // Seed X's queue with Q directly, the same way a prior dispatch would have.
        x.add_location_to_queue(EventTarget::Strike { id: q.id, location: q.location }, 0.0, &mut []);

        let y = uav(1, Location::new(0.0, -0.72), dwell);

        let mut aircraft = vec![x, y];
        let bases = [];
        let mut tanks = [];

        let new_strike = Lightning::new(2, Location::new(0.0, 0.0), 0.0, false, 0.0);
        let strikes = vec![q, new_strike.clone()];
        let cfg = config(CoordinatorChoice::MinimiseMeanTime, TargetLatency::Seconds(cap));
        let precomputed = PrecomputedDistances::build(&strikes, &bases, &tanks);

        assert!(dispatch(
            new_strike.id,
            new_strike.location,
            new_strike.risk,
            new_strike.spawn_time,
            &mut aircraft,
            &bases,
            &mut tanks,
            &strikes,
            &precomputed,
            DispatchRole::Inspection,
            &cfg,
        ));

        // The new strike must have gone to Y (queue grows to 1), not X (queue stays at 1,
        // still just Q), since only Y's candidate keeps every latency under the cap.
        assert_eq!(aircraft[0].queue().len(), 1, "X must not take the strike that would breach the cap");
        assert_eq!(aircraft[1].queue().len(), 1, "Y should take the strike, keeping all latencies in band");
    }

    fn uav_with_range(id: u32, position: Location, range: f64) -> Aircraft {
        Aircraft::Uav(crate::aircraft::UavState::new(
            id,
            UavAttributes {
                flight_speed: Speed(100.0),
                fuel_refill_time: 0.1,
                range: Distance(range),
                inspection_time: 0.0,
                pct_fuel_cutoff: 0.05,
                initial_fuel: 1.0,
                starting_at_base: 0,
            },
            position,
        ))
    }

    #[test]
    fn ahead_of_queue_insertion_respects_the_preserved_suffixs_fuel() {
        // X has just enough range to serve Q or the new strike S alone, but not both in
        // either order: detouring to S before Q, or returning to Q after S, both exceed
        // one tank. Y sits much further out but carries fuel to spare. If feasibility
        // only covered the newly inserted strike and ignored the preserved suffix, X
        // would accept S ahead of Q and strand Q with negative arrival fuel once commit
        // replays the queue.
        let x = uav_with_range(0, Location::new(0.0, 0.0), 120.0);
        let y = uav_with_range(1, Location::new(0.0, 5.0), 10_000.0);
        let mut aircraft = vec![x, y];
        let bases = [];
        let mut tanks = [];

        let q = Lightning::new(0, Location::new(0.0, 0.5), 0.0, false, 0.1);
        let s = Lightning::new(1, Location::new(0.0, -0.3), 0.1, false, 0.1);
        let strikes = vec![q.clone(), s.clone()];
        let cfg = config(CoordinatorChoice::MinimiseMeanTime, TargetLatency::Unbounded);
        let precomputed = PrecomputedDistances::build(&strikes, &bases, &tanks);

        assert!(dispatch(
            q.id, q.location, q.risk, q.spawn_time,
            &mut aircraft, &bases, &mut tanks, &strikes, &precomputed, DispatchRole::Inspection, &cfg,
        ));
        assert_eq!(aircraft[0].queue().len(), 1, "Q should go to the much nearer aircraft, X");

        assert!(dispatch(
            s.id, s.location, s.risk, s.spawn_time,
            &mut aircraft, &bases, &mut tanks, &strikes, &precomputed, DispatchRole::Inspection, &cfg,
        ));

        assert_eq!(
            aircraft[0].queue().len(),
            1,
            "X must not take S at any boundary without enough fuel left to still reach Q"
        );
        assert_eq!(aircraft[1].queue().len(), 1, "S must fall through to Y once X is correctly ruled infeasible");
    }
}
