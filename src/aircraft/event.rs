use crate::aircraft::Status;
use crate::geo::Location;
use crate::units::Volume;

/// What a queued event is headed towards. All three carry an id and a location;
/// `add_location_to_queue` and an event's completion handling both dispatch on this
/// tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventTarget {
    Base { id: u32, location: Location },
    WaterTank { id: u32, location: Location },
    Strike { id: u32, location: Location },
}

impl EventTarget {
    #[must_use]
    pub fn location(&self) -> Location {
        match *self {
            EventTarget::Base { location, .. }
            | EventTarget::WaterTank { location, .. }
            | EventTarget::Strike { location, .. } => location,
        }
    }
}

/// One planned task on an aircraft's queue.
///
/// `departure_time ≤ arrival_time ≤ completion_time` always holds. `arrival_fuel` is
/// `prior_fuel - travel_distance / range`; `completion_fuel` accounts for any on-site
/// hovering/dwell, or is reset to `1.0` when the target is a base refuel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub target: EventTarget,
    pub departure_time: f64,
    pub arrival_time: f64,
    pub completion_time: f64,
    pub arrival_fuel: f64,
    pub completion_fuel: f64,
    /// Water bombers only; `0.0` for UAVs.
    pub water_on_board_at_completion: Volume,
    /// Status the aircraft assumes once this event completes.
    pub status_on_completion: Status,
}

impl Event {
    #[must_use]
    pub fn travel_duration(&self) -> f64 {
        self.arrival_time - self.departure_time
    }

    #[must_use]
    pub fn dwell_duration(&self) -> f64 {
        self.completion_time - self.arrival_time
    }
}
