mod aircraft;
mod event;
mod event_queue;
mod status;
mod uav;
mod water_bomber;

pub use aircraft::{Aircraft, CompletionKind, StartState};
pub use event::{Event, EventTarget};
pub use event_queue::{EventQueue, NodeId};
pub use status::Status;
pub use uav::{UavAttributes, UavState};
pub use water_bomber::{WaterBomberAttributes, WaterBomberState};
