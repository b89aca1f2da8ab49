//! Climate controller: compare, decide, actuate, then transition.
//!
//! ```text
//!  Environment ──▶ compare ──▶ decide_action ──▶ actuator.actuate ──▶ transition
//!                                   │ None
//!                                   └──────────▶ (no call, no transition)
//! ```
//!
//! The recorded device state must never claim an actuation that did not
//! happen: the transition runs only after the actuator returned `Ok`.

use log::{debug, warn};

use crate::app::ports::ClimateActuatorPort;
use crate::control::comparator::compare_reading;
use crate::entities::Environment;
use crate::error::{Error, Result};
use crate::fsm::{ClimateAction, ClimateDevice, ClimateState};

/// Orchestrates one climate device against the environment.
#[derive(Debug, Clone)]
pub struct ClimateController {
    device: ClimateDevice,
}

impl ClimateController {
    pub fn new(device: ClimateDevice) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &ClimateDevice {
        &self.device
    }

    pub fn state(&self) -> ClimateState {
        self.device.state()
    }

    /// Run one control decision against `environment`.
    ///
    /// Makes zero or one actuator call and at most one transition, in that
    /// order.  Returns the action that was carried out, if any.
    ///
    /// # Errors
    ///
    /// - [`Error::TemperatureUnknown`](crate::error::Error::TemperatureUnknown)
    ///   when ambient is unset (nothing is called).
    /// - [`Error::Actuator`] when the actuator fails; it names the
    ///   rejected action and the device state is not advanced.
    /// - [`Error::InvalidTransition`](crate::error::Error::InvalidTransition)
    ///   if the decision table asks for an undefined move.
    pub fn apply(
        &mut self,
        environment: &Environment,
        actuator: &mut impl ClimateActuatorPort,
    ) -> Result<Option<ClimateAction>> {
        let verdict = compare_reading(
            environment.ambient_temperature,
            environment.desired_temperature,
            self.device.hysteresis(),
        )?;

        let Some(action) = self.device.decide_action(verdict) else {
            debug!(
                "Climate: verdict={} state={} -> no action",
                verdict,
                self.device.state()
            );
            return Ok(None);
        };

        if let Err(error) = actuator.actuate(action) {
            warn!("Climate: actuator rejected '{}': {}", action, error);
            return Err(Error::Actuator { action, error });
        }
        self.device.transition(action)?;
        Ok(Some(action))
    }
}
