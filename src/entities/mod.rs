//! Domain entities: plain state with the invariants that guard it.

pub mod battery;
pub mod environment;

pub use battery::{Battery, BatteryIndicator};
pub use environment::{DisplayMode, Environment};
