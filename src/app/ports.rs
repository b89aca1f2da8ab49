//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ThermostatService (domain)
//! ```
//!
//! Driven adapters (sensors, actuator, displays, event sinks) implement these
//! traits.  The service consumes them via generics, so the domain core never
//! touches files or sockets directly.
//!
//! Every port is also implemented for `Box<T>` so the runtime can hold the
//! adapters chosen by configuration as trait objects.

use crate::app::commands::SetpointCommand;
use crate::entities::{BatteryIndicator, DisplayMode};
use crate::error::{ActuatorError, SensorError};
use crate::fsm::{ClimateAction, ClimateState};
use crate::scheduler::Job;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: world → domain)
// ───────────────────────────────────────────────────────────────

/// Ambient temperature source.
pub trait TemperatureSensorPort {
    /// Read the ambient temperature in °C.
    fn read(&mut self) -> Result<f64, SensorError>;
}

/// Battery tension source.
pub trait BatterySensorPort {
    /// Read the battery level.  `Ok(None)` means "no new data", which is
    /// distinct from a failed read.
    fn read(&mut self) -> Result<Option<f64>, SensorError>;
}

/// Button that chooses which temperature the display shows.
pub trait DisplaySelectorPort {
    fn selected_mode(&mut self) -> Result<DisplayMode, SensorError>;
}

/// User setpoint input (up / down buttons).
pub trait SetpointInputPort {
    /// Return the next pending command, if any.  Never blocks.
    fn poll(&mut self) -> Result<Option<SetpointCommand>, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → world)
// ───────────────────────────────────────────────────────────────

/// The physical (or simulated) climate device.
pub trait ClimateActuatorPort {
    /// Perform `action`.  Synchronous; not retried by the core.
    fn actuate(&mut self, action: ClimateAction) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Visualizer ports (fire-and-forget)
// ───────────────────────────────────────────────────────────────

pub trait TemperatureDisplayPort {
    /// `None` shows an unknown ambient reading.
    fn show_temperature(&mut self, mode: DisplayMode, celsius: Option<f64>);
}

pub trait BatteryDisplayPort {
    fn show_tension(&mut self, level: Option<f64>);
    fn show_indicator(&mut self, indicator: Option<BatteryIndicator>);
}

pub trait ClimateDisplayPort {
    fn show_climate_state(&mut self, state: ClimateState);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the service)
// ───────────────────────────────────────────────────────────────

/// Callback the [`Scheduler`](crate::scheduler::Scheduler) invokes for
/// every due job.  The scheduler itself knows nothing about sensors or
/// displays.
pub trait SchedulerDelegate {
    fn on_job_due(&mut self, job: Job);
}

// ───────────────────────────────────────────────────────────────
// Boxed adapters
// ───────────────────────────────────────────────────────────────

impl<T: TemperatureSensorPort + ?Sized> TemperatureSensorPort for Box<T> {
    fn read(&mut self) -> Result<f64, SensorError> {
        (**self).read()
    }
}

impl<T: BatterySensorPort + ?Sized> BatterySensorPort for Box<T> {
    fn read(&mut self) -> Result<Option<f64>, SensorError> {
        (**self).read()
    }
}

impl<T: DisplaySelectorPort + ?Sized> DisplaySelectorPort for Box<T> {
    fn selected_mode(&mut self) -> Result<DisplayMode, SensorError> {
        (**self).selected_mode()
    }
}

impl<T: SetpointInputPort + ?Sized> SetpointInputPort for Box<T> {
    fn poll(&mut self) -> Result<Option<SetpointCommand>, SensorError> {
        (**self).poll()
    }
}

impl<T: ClimateActuatorPort + ?Sized> ClimateActuatorPort for Box<T> {
    fn actuate(&mut self, action: ClimateAction) -> Result<(), ActuatorError> {
        (**self).actuate(action)
    }
}

impl<T: TemperatureDisplayPort + ?Sized> TemperatureDisplayPort for Box<T> {
    fn show_temperature(&mut self, mode: DisplayMode, celsius: Option<f64>) {
        (**self).show_temperature(mode, celsius);
    }
}

impl<T: BatteryDisplayPort + ?Sized> BatteryDisplayPort for Box<T> {
    fn show_tension(&mut self, level: Option<f64>) {
        (**self).show_tension(level);
    }

    fn show_indicator(&mut self, indicator: Option<BatteryIndicator>) {
        (**self).show_indicator(indicator);
    }
}

impl<T: ClimateDisplayPort + ?Sized> ClimateDisplayPort for Box<T> {
    fn show_climate_state(&mut self, state: ClimateState) {
        (**self).show_climate_state(state);
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn emit(&mut self, event: &super::events::AppEvent) {
        (**self).emit(event);
    }
}
