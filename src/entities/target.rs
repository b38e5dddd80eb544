use crate::geo::Location;

/// An area-attraction point used by the out-of-scope area-coverage repositioning
/// component to steer unassigned aircraft. The dispatch core never reads a `Target`'s
/// fields beyond passing its location through as an aircraft's `unassigned_target`
/// drift hint (see [`crate::aircraft::Aircraft::update_to_time`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: u32,
    pub location: Location,
}

impl Target {
    #[must_use]
    pub fn new(id: u32, location: Location) -> Self {
        Target { id, location }
    }
}
