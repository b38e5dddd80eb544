//! The four dispatch policies, expressed as one objective function parameterised by a
//! [`CoordinatorChoice`] tag rather than as four trait implementations. Per the design
//! note this crate follows, policies never subclass a shared scoring loop — the loop
//! in `insertion.rs` is the single generic function and this module only supplies the
//! scalar it minimises.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorChoice {
    Simple,
    Insertion,
    MinimiseMeanTime,
    ReprocessMaxTime,
}

impl CoordinatorChoice {
    #[must_use]
    pub fn reprocesses_max(self) -> bool {
        matches!(self, CoordinatorChoice::ReprocessMaxTime)
    }
}

/// The latency band above which a candidate is demoted to the secondary pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetLatency {
    Unbounded,
    Seconds(f64),
}

impl TargetLatency {
    #[must_use]
    pub fn cap(self) -> f64 {
        match self {
            TargetLatency::Unbounded => f64::INFINITY,
            TargetLatency::Seconds(s) => s,
        }
    }
}

/// One already-queued strike whose latency would shift if a candidate is inserted
/// ahead of it.
#[derive(Debug, Clone, Copy)]
pub struct ShiftedStrike {
    pub old_latency: f64,
    pub risk: f64,
}

/// Scores a candidate plan. `new_latency`/`new_risk` describe the strike the
/// coordinator is placing right now; `shifted` lists every already-queued strike whose
/// completion moves later by `delta` as a consequence of this insertion.
#[must_use]
pub fn score(
    policy: CoordinatorChoice,
    prioritise: &dyn Fn(f64, f64) -> f64,
    mean_time_power: f64,
    new_latency: f64,
    new_risk: f64,
    delta: f64,
    shifted: &[ShiftedStrike],
    tail_latency: f64,
) -> f64 {
    match policy {
        CoordinatorChoice::Simple => new_latency,
        // Insertion scores the completion of the whole inserted sequence (the new
        // strike plus whatever suffix follows it), not just the new strike's own
        // arrival — otherwise it degenerates into Simple's objective.
        CoordinatorChoice::Insertion => tail_latency,
        CoordinatorChoice::MinimiseMeanTime | CoordinatorChoice::ReprocessMaxTime => {
            let mut total = prioritise(new_latency, new_risk).powf(mean_time_power);
            for s in shifted {
                let before = prioritise(s.old_latency, s.risk).powf(mean_time_power);
                let after = prioritise(s.old_latency + delta, s.risk).powf(mean_time_power);
                total += after - before;
            }
            total
        }
    }
}
