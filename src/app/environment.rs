//! Environment manager: owns the ambient/desired snapshot.

use log::{debug, warn};

use crate::app::ports::{TemperatureDisplayPort, TemperatureSensorPort};
use crate::entities::{DisplayMode, Environment};
use crate::error::SensorError;

pub struct EnvironmentManager {
    environment: Environment,
    step: f64,
}

impl EnvironmentManager {
    /// `step` is the setpoint increment applied by increase / decrease.
    pub fn new(desired: f64, step: f64) -> Self {
        Self {
            environment: Environment::new(desired),
            step,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn ambient(&self) -> Option<f64> {
        self.environment.ambient_temperature
    }

    pub fn desired(&self) -> f64 {
        self.environment.desired_temperature
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.environment.display_mode
    }

    /// Store a fresh ambient reading.  Any sensor failure leaves ambient
    /// unset; the error is handed back for event reporting.
    pub fn read_ambient(
        &mut self,
        sensor: &mut impl TemperatureSensorPort,
    ) -> Result<f64, SensorError> {
        match sensor.read() {
            Ok(celsius) => {
                debug!("Ambient: {:.1}", celsius);
                self.environment.ambient_temperature = Some(celsius);
                Ok(celsius)
            }
            Err(e) => {
                warn!("Ambient sensor failed: {} (ambient now unknown)", e);
                self.environment.ambient_temperature = None;
                Err(e)
            }
        }
    }

    pub fn set_desired(&mut self, celsius: f64) {
        self.environment.desired_temperature = celsius;
    }

    pub fn increase_desired(&mut self) -> f64 {
        self.environment.desired_temperature += self.step;
        self.environment.desired_temperature
    }

    pub fn decrease_desired(&mut self) -> f64 {
        self.environment.desired_temperature -= self.step;
        self.environment.desired_temperature
    }

    /// Returns `true` if the mode actually changed.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> bool {
        let changed = self.environment.display_mode != mode;
        self.environment.display_mode = mode;
        changed
    }

    /// Push the value selected by the display mode.
    pub fn show(&self, display: &mut impl TemperatureDisplayPort) {
        display.show_temperature(
            self.environment.display_mode,
            self.environment.displayed_temperature(),
        );
    }
}
