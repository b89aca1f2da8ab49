//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules of the thermostat: climate
//! orchestration, battery monitoring, setpoint handling and presentation.
//! All interaction with sensors, actuators and displays happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod battery;
pub mod climate;
pub mod commands;
pub mod environment;
pub mod events;
pub mod ports;
pub mod presenter;
pub mod service;
