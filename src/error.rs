//! Error types surfaced at the scenario-construction boundary.
//!
//! Dispatch infeasibility is not modelled as an `Err` anywhere in this crate — per the
//! error-handling design, an unservicable strike is informational, not exceptional.
//! Invariant violations discovered once a scenario is running are reported with the
//! `fatal!` macro rather than propagated, since they indicate a bug rather than a
//! legitimate runtime outcome.

use std::fmt;

/// Failures detected while assembling a [`crate::scenario::Scenario`] from caller-supplied
/// entities, before any simulation step has run.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioBuildError {
    /// A water tank (or aircraft tank) was given a negative capacity.
    NegativeCapacity { entity: &'static str, id: u32 },
    /// `pct_fuel_cutoff` must lie in `(0, 1]`.
    InvalidFuelCutoff { aircraft_id: u32, value: f64 },
    /// The lightning stream was not sorted by non-decreasing spawn time.
    NonMonotoneSpawnTimes { index: usize },
    /// An aircraft referenced a base id or tank id that does not exist in the scenario.
    DanglingReference { entity: &'static str, id: u32 },
    /// A coordinator policy parameter was out of its documented domain.
    InvalidPolicyParameter { parameter: &'static str, value: f64 },
}

impl fmt::Display for ScenarioBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioBuildError::NegativeCapacity { entity, id } => {
                write!(f, "{entity} {id} has a negative capacity")
            }
            ScenarioBuildError::InvalidFuelCutoff { aircraft_id, value } => {
                write!(
                    f,
                    "aircraft {aircraft_id} has pct_fuel_cutoff = {value}, expected (0, 1]"
                )
            }
            ScenarioBuildError::NonMonotoneSpawnTimes { index } => {
                write!(f, "lightning stream is not spawn-time sorted at index {index}")
            }
            ScenarioBuildError::DanglingReference { entity, id } => {
                write!(f, "reference to unknown {entity} {id}")
            }
            ScenarioBuildError::InvalidPolicyParameter { parameter, value } => {
                write!(f, "policy parameter {parameter} = {value} is out of domain")
            }
        }
    }
}

impl std::error::Error for ScenarioBuildError {}
