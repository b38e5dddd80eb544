use crate::geo::Location;

/// Which aircraft kind(s) may refuel at a base. Water bomber bases are further
/// restricted per bomber type by the scenario's `water_bomber_bases_by_type` mapping,
/// which lives on [`crate::scenario::Scenario`] rather than on the base itself, since
/// the restriction is a many-to-many relation, not a property of one base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseKind {
    Uav,
    WaterBomber,
    Both,
}

impl BaseKind {
    #[must_use]
    pub fn serves_uav(self) -> bool {
        matches!(self, BaseKind::Uav | BaseKind::Both)
    }

    #[must_use]
    pub fn serves_water_bomber(self) -> bool {
        matches!(self, BaseKind::WaterBomber | BaseKind::Both)
    }
}

/// A stable refuel site. Created from input, never destroyed or mutated once loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Base {
    pub id: u32,
    pub location: Location,
    pub kind: BaseKind,
}

impl Base {
    #[must_use]
    pub fn new(id: u32, location: Location, kind: BaseKind) -> Self {
        Base { id, location, kind }
    }
}
