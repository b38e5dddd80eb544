use crate::geo::Location;

/// A lightning strike: spawns at a fixed time and location, may or may not have
/// ignited, and accumulates at most one write each to `inspected_time` and (for
/// ignitions) `suppressed_time` over its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Lightning {
    pub id: u32,
    pub location: Location,
    pub spawn_time: f64,
    pub ignition: bool,
    /// In `[0, 1]`; influences dispatch objectives via the prioritisation function.
    pub risk: f64,
    inspected_time: Option<f64>,
    suppressed_time: Option<f64>,
}

impl Lightning {
    #[must_use]
    pub fn new(id: u32, location: Location, spawn_time: f64, ignition: bool, risk: f64) -> Self {
        Lightning {
            id,
            location,
            spawn_time,
            ignition,
            risk,
            inspected_time: None,
            suppressed_time: None,
        }
    }

    #[must_use]
    pub fn inspected_time(&self) -> Option<f64> {
        self.inspected_time
    }

    #[must_use]
    pub fn suppressed_time(&self) -> Option<f64> {
        self.suppressed_time
    }

    #[must_use]
    pub fn is_inspected(&self) -> bool {
        self.inspected_time.is_some()
    }

    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed_time.is_some()
    }

    /// Records the inspection time. Panics if called twice — inspection is a
    /// once-only lifecycle transition and a double-write indicates a driver bug.
    pub fn mark_inspected(&mut self, time: f64) {
        if self.inspected_time.is_some() {
            crate::fatal!("strike {} inspected twice", self.id);
        }
        self.inspected_time = Some(time);
    }

    /// Records the suppression time. Panics if called twice, or on a strike that never
    /// ignited, or before it has been inspected.
    pub fn mark_suppressed(&mut self, time: f64) {
        if !self.ignition {
            crate::fatal!("strike {} suppressed but never ignited", self.id);
        }
        if self.suppressed_time.is_some() {
            crate::fatal!("strike {} suppressed twice", self.id);
        }
        let Some(inspected) = self.inspected_time else {
            crate::fatal!("strike {} suppressed before inspection", self.id);
        };
        if time < inspected {
            crate::fatal!("strike {} suppressed before its own inspection time", self.id);
        }
        self.suppressed_time = Some(time);
    }

    /// `inspected_time - spawn_time`, once inspected.
    #[must_use]
    pub fn inspection_latency(&self) -> Option<f64> {
        self.inspected_time.map(|t| t - self.spawn_time)
    }

    /// `suppressed_time - spawn_time`, once suppressed.
    #[must_use]
    pub fn suppression_latency(&self) -> Option<f64> {
        self.suppressed_time.map(|t| t - self.spawn_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strike() -> Lightning {
        Lightning::new(1, Location::new(0.0, 0.0), 10.0, true, 0.5)
    }

    #[test]
    fn fresh_strike_is_unresolved() {
        let s = strike();
        assert!(!s.is_inspected());
        assert!(!s.is_suppressed());
    }

    #[test]
    fn inspection_then_suppression_latencies() {
        let mut s = strike();
        s.mark_inspected(12.0);
        s.mark_suppressed(15.0);
        assert_eq!(s.inspection_latency(), Some(2.0));
        assert_eq!(s.suppression_latency(), Some(5.0));
    }

    #[test]
    #[should_panic]
    fn double_inspection_is_fatal() {
        let mut s = strike();
        s.mark_inspected(12.0);
        s.mark_inspected(13.0);
    }

    #[test]
    #[should_panic]
    fn suppression_without_inspection_is_fatal() {
        let mut s = strike();
        s.mark_suppressed(15.0);
    }
}
