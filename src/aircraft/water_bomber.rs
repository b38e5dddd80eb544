use crate::aircraft::{Event, EventQueue, Status};
use crate::geo::Location;
use crate::units::{Distance, Speed, Volume};

/// Static, load-time attributes of one water bomber.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterBomberAttributes {
    pub flight_speed: Speed,
    pub fuel_refill_time: f64,
    pub range_empty: Distance,
    pub range_loaded: Distance,
    pub pct_fuel_cutoff: f64,
    pub initial_fuel: f64,
    pub starting_at_base: u32,
    pub water_capacity: Volume,
    pub water_refill_time: f64,
    pub suppression_time: f64,
    pub water_per_suppression: Volume,
    pub type_tag: String,
}

/// Mutable state of one water bomber as the scenario runs.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterBomberState {
    pub id: u32,
    pub attrs: WaterBomberAttributes,
    pub position: Location,
    pub time: f64,
    pub fuel: f64,
    pub water: Volume,
    pub status: Status,
    pub queue: EventQueue,
    pub history: Vec<Event>,
    pub required_return: Option<(u32, f64)>,
    pub unassigned_target: Option<Location>,
}

impl WaterBomberState {
    #[must_use]
    pub fn new(id: u32, attrs: WaterBomberAttributes, position: Location) -> Self {
        let water = attrs.water_capacity;
        WaterBomberState {
            id,
            fuel: attrs.initial_fuel,
            water,
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

    /// Range varies linearly with the water fraction currently on board:
    /// `R(w) = R_empty + (R_loaded - R_empty) * w / W_cap`.
    #[must_use]
    pub fn range(&self) -> Distance {
        self.range_at(self.water)
    }

    #[must_use]
    pub fn range_at(&self, water: Volume) -> Distance {
        let fraction = water / self.attrs.water_capacity;
        Distance(self.attrs.range_empty.0 + (self.attrs.range_loaded.0 - self.attrs.range_empty.0) * fraction)
    }
}
