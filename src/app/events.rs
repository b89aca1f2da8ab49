//! Outbound application events.
//!
//! The [`ThermostatService`](super::service::ThermostatService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them, such as logging them to the
//! console.

use crate::entities::{BatteryIndicator, DisplayMode};
use crate::error::{ActuatorError, SensorError};
use crate::fsm::{ClimateAction, ClimateState};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Start-up check passed; carries the initial setpoint.
    Started { desired: f64 },

    /// Start-up check failed.
    StartupFailed(&'static str),

    /// A battery reading was stored (or cleared, when both are `None`).
    BatteryRead {
        level: Option<f64>,
        indicator: Option<BatteryIndicator>,
    },

    /// An ambient reading was stored; `None` after a sensor failure.
    AmbientRead(Option<f64>),

    /// A sensor port failed.
    SensorFault { sensor: &'static str, error: SensorError },

    /// The actuator confirmed `action` and the device moved `from -> to`.
    ClimateActuated {
        action: ClimateAction,
        from: ClimateState,
        to: ClimateState,
    },

    /// The actuator rejected `action`; the device state is unchanged.
    ActuationFailed {
        action: ClimateAction,
        error: ActuatorError,
    },

    /// A climate cycle was skipped because ambient temperature is unknown.
    ClimateSkipped,

    /// The setpoint changed.
    DesiredChanged { from: f64, to: f64 },

    /// The temperature display switched mode.
    DisplayModeChanged(DisplayMode),
}
