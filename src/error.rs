//! Unified error types for the thermostat.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! operator loop's error handling uniform.  All variants are `Copy` so they
//! can be passed through the state machine and the service without
//! allocation.

use core::fmt;

use crate::fsm::{ClimateAction, ClimateState};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the thermostat core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A constructor received parameters outside their valid domain.
    InvalidConfiguration(&'static str),
    /// The climate device was asked for a `(state, action)` pair its table
    /// does not define.  Always a caller bug.
    InvalidTransition {
        state: ClimateState,
        action: ClimateAction,
    },
    /// A comparison was requested while the ambient temperature is unset.
    TemperatureUnknown,
    /// A sensor adapter failed.
    Sensor(SensorError),
    /// The climate actuator rejected `action`; the device state was not
    /// advanced.
    Actuator {
        action: ClimateAction,
        error: ActuatorError,
    },
    /// The start-up check did not pass.
    NotReady(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::InvalidTransition { state, action } => {
                write!(f, "invalid transition: state={state}, action={action}")
            }
            Self::TemperatureUnknown => write!(f, "ambient temperature unknown"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator { action, error } => write!(f, "actuator: {action}: {error}"),
            Self::NotReady(what) => write!(f, "start-up check failed: {what}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The underlying file / socket could not be read.
    ReadFailed,
    /// Data was read but is not a valid value.
    Malformed,
    /// The source has never produced a value.
    Unavailable,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "read failed"),
            Self::Malformed => write!(f, "malformed reading"),
            Self::Unavailable => write!(f, "no reading available"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// The command could not be written to the device.
    WriteFailed,
    /// The device endpoint could not be reached.
    Unreachable,
    /// The device does not support the requested action.
    Unsupported,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "write failed"),
            Self::Unreachable => write!(f, "device unreachable"),
            Self::Unsupported => write!(f, "action not supported"),
        }
    }
}

impl std::error::Error for ActuatorError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
