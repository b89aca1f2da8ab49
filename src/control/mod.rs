//! Control algorithms.
//!
//! Pure functions only; the climate state machine lives in [`crate::fsm`].

pub mod comparator;

pub use comparator::{compare, compare_reading, TemperatureVerdict, DEFAULT_HYSTERESIS};
