//! Thermostat library.
//!
//! A hexagonal thermostat core: hysteresis comparator, battery classifier,
//! table-driven climate state machine and the controller that ties them to
//! an actuator.  File, TCP, console and simulated adapters plug into the
//! port traits in [`app::ports`]; [`runtime::Thermostat`] drives them all
//! from one serialized operator loop.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod entities;
pub mod error;
pub mod fsm;
pub mod runtime;
pub mod scheduler;

pub use error::{Error, Result};
