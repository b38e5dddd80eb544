mod base;
mod lightning;
mod target;
mod water_tank;

pub use base::{Base, BaseKind};
pub use lightning::Lightning;
pub use target::Target;
pub use water_tank::WaterTank;
