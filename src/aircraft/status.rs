/// Lifecycle state of an aircraft. The simulator and coordinators both branch on this,
/// so it carries no payload beyond the tag itself — positional/temporal data lives on
/// [`crate::aircraft::Aircraft`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    WaitingAtBase,
    GoingToBase,
    RefuelingAtBase,
    GoingToStrike,
    InspectingStrike,
    Hovering,
    GoingToWater,
    RefillingWater,
    WaitingAtWater,
    Unassigned,
}

impl Status {
    /// Idle statuses are the only ones from which `go_to_base_when_necessary` may
    /// install a latent return-to-base obligation.
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Status::Hovering | Status::Unassigned)
    }

    /// Whether the aircraft is presently airborne and consuming range, as opposed to
    /// sitting at a base or tank.
    #[must_use]
    pub fn is_in_flight(self) -> bool {
        matches!(self, Status::GoingToBase | Status::GoingToStrike | Status::GoingToWater)
    }
}
