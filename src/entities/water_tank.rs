use crate::geo::Location;
use crate::units::Volume;

/// A refill site for water bombers.
///
/// `remaining` is the physically present water; `reserved` is the slice of
/// `remaining` that some aircraft's queued (but not yet drawn) event has already
/// claimed, so that two aircraft can never both plan to draw the same marginal
/// litres. The invariant `0 ≤ reserved ≤ remaining` holds after every mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterTank {
    pub id: u32,
    pub location: Location,
    remaining: Volume,
    reserved: Volume,
}

impl WaterTank {
    #[must_use]
    pub fn new(id: u32, location: Location, initial_capacity: Volume) -> Self {
        WaterTank { id, location, remaining: initial_capacity, reserved: Volume::ZERO }
    }

    #[must_use]
    pub fn remaining(&self) -> Volume {
        self.remaining
    }

    #[must_use]
    pub fn reserved(&self) -> Volume {
        self.reserved
    }

    /// Volume available to a *new* reservation: physically present minus already
    /// claimed.
    #[must_use]
    pub fn available(&self) -> Volume {
        Volume((self.remaining.0 - self.reserved.0).max(0.0))
    }

    /// Claim `amount` against this tank for a queued-but-not-yet-drawn event.
    ///
    /// Returns `false` without mutating if `amount` exceeds [`WaterTank::available`].
    pub fn reserve(&mut self, amount: Volume) -> bool {
        if amount.0 > self.available().0 + 1e-9 {
            return false;
        }
        self.reserved = Volume(self.reserved.0 + amount.0);
        true
    }

    /// Release a previously reserved volume back to the available pool, e.g. because
    /// the event that held the reservation was truncated out of its aircraft's queue
    /// before being drawn.
    pub fn release(&mut self, amount: Volume) {
        self.reserved = Volume((self.reserved.0 - amount.0).max(0.0));
    }

    /// Commit a previously reserved draw: the water physically leaves the tank and the
    /// reservation backing it is cleared in the same step.
    pub fn draw(&mut self, amount: Volume) {
        self.remaining = Volume((self.remaining.0 - amount.0).max(0.0));
        self.release(amount);
    }

    pub fn refill(&mut self, amount: Volume) {
        self.remaining = Volume(self.remaining.0 + amount.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Location;

    fn tank(capacity: f64) -> WaterTank {
        WaterTank::new(0, Location::new(0.0, 0.0), Volume(capacity))
    }

    #[test]
    fn reserve_then_draw_keeps_invariant() {
        let mut t = tank(1500.0);
        assert!(t.reserve(Volume(800.0)));
        assert_eq!(t.reserved().0, 800.0);
        t.draw(Volume(800.0));
        assert_eq!(t.remaining().0, 700.0);
        assert_eq!(t.reserved().0, 0.0);
    }

    #[test]
    fn reserve_beyond_available_fails_without_mutation() {
        let mut t = tank(500.0);
        assert!(t.reserve(Volume(400.0)));
        assert!(!t.reserve(Volume(200.0)));
        assert_eq!(t.reserved().0, 400.0);
    }

    #[test]
    fn release_returns_volume_to_available_pool() {
        let mut t = tank(1000.0);
        t.reserve(Volume(600.0));
        t.release(Volume(600.0));
        assert_eq!(t.available().0, 1000.0);
    }

    #[test]
    fn remaining_never_goes_negative() {
        let mut t = tank(100.0);
        t.reserve(Volume(100.0));
        t.draw(Volume(100.0));
        t.draw(Volume(50.0));
        assert!(t.remaining().0 >= 0.0);
    }
}
