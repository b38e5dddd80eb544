use crate::aircraft::{Event, EventQueue, Status};
use crate::geo::Location;
use crate::units::{Distance, Speed};

/// Static, load-time attributes of one UAV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UavAttributes {
    pub flight_speed: Speed,
    pub fuel_refill_time: f64,
    pub range: Distance,
    pub inspection_time: f64,
    pub pct_fuel_cutoff: f64,
    pub initial_fuel: f64,
    pub starting_at_base: u32,
}

/// Mutable state of one UAV as the scenario runs.
#[derive(Debug, Clone, PartialEq)]
pub struct UavState {
    pub id: u32,
    pub attrs: UavAttributes,
    pub position: Location,
    pub time: f64,
    /// Fraction of a full tank, in `[0, 1]`.
    pub fuel: f64,
    pub status: Status,
    pub queue: EventQueue,
    /// Append-only completed-event log.
    pub history: Vec<Event>,
    /// `(base_id, deadline)` installed by `go_to_base_when_necessary`.
    pub required_return: Option<(u32, f64)>,
    /// Drift target set by the out-of-scope area-coverage component.
    pub unassigned_target: Option<Location>,
}

impl UavState {
    #[must_use]
    pub fn new(id: u32, attrs: UavAttributes, position: Location) -> Self {
        UavState {
            id,
            fuel: attrs.initial_fuel,
            attrs,
            position,
            time: 0.0,
            status: Status::WaitingAtBase,
            queue: EventQueue::new(),
            history: Vec::new(),
            required_return: None,
            unassigned_target: None,
        }
    }

    /// UAV range is constant, independent of any cargo.
    #[must_use]
    pub fn range(&self) -> Distance {
        self.attrs.range
    }
}
