//! Simulated peripherals for running without any external producer.

use crate::app::commands::SetpointCommand;
use crate::app::ports::{
    BatterySensorPort, DisplaySelectorPort, SetpointInputPort, TemperatureSensorPort,
};
use crate::entities::DisplayMode;
use crate::error::SensorError;

/// Ambient temperature drifting in a triangle wave around `base`.
///
/// Reading `n` yields `base + amplitude * tri(n / period)`, where `tri`
/// rises 0 → 1 → 0 → -1 → 0 over one period.  Fully deterministic.
pub struct SimulatedTemperatureSensor {
    base: f64,
    amplitude: f64,
    period: u32,
    reads: u32,
}

impl SimulatedTemperatureSensor {
    pub fn new(base: f64, amplitude: f64, period: u32) -> Self {
        Self {
            base,
            amplitude,
            period: period.max(1),
            reads: 0,
        }
    }

    fn triangle(&self, n: u32) -> f64 {
        let t = f64::from(n % self.period) / f64::from(self.period);
        if t < 0.25 {
            4.0 * t
        } else if t < 0.75 {
            2.0 - 4.0 * t
        } else {
            4.0 * t - 4.0
        }
    }
}

impl TemperatureSensorPort for SimulatedTemperatureSensor {
    fn read(&mut self) -> Result<f64, SensorError> {
        let value = self.base + self.amplitude * self.triangle(self.reads);
        self.reads = self.reads.wrapping_add(1);
        Ok(value)
    }
}

pub struct SimulatedBatterySensor {
    level: f64,
}

impl SimulatedBatterySensor {
    pub fn new(level: f64) -> Self {
        Self { level }
    }
}

impl BatterySensorPort for SimulatedBatterySensor {
    fn read(&mut self) -> Result<Option<f64>, SensorError> {
        Ok(Some(self.level))
    }
}

/// Selector stuck on one mode.
pub struct FixedSelector(pub DisplayMode);

impl DisplaySelectorPort for FixedSelector {
    fn selected_mode(&mut self) -> Result<DisplayMode, SensorError> {
        Ok(self.0)
    }
}

/// No setpoint buttons attached.
pub struct NoSetpointInput;

impl SetpointInputPort for NoSetpointInput {
    fn poll(&mut self) -> Result<Option<SetpointCommand>, SensorError> {
        Ok(None)
    }
}
