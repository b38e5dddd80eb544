mod coordinator;
mod insertion;
mod objective;
mod prioritisation;

pub use coordinator::{UavCoordinator, WbCoordinator};
pub use insertion::{DispatchConfig, DispatchRole};
pub use objective::{CoordinatorChoice, TargetLatency};
pub use prioritisation::PrioritisationChoice;
