//! Log-based adapters.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (routed to the terminal by the binary).  The same
//! module provides log-only stand-ins for the actuator and the displays.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{
    BatteryDisplayPort, ClimateActuatorPort, ClimateDisplayPort, EventSink,
    TemperatureDisplayPort,
};
use crate::entities::{BatteryIndicator, DisplayMode};
use crate::error::ActuatorError;
use crate::fsm::{ClimateAction, ClimateState};

fn opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{v:.precision$}"))
}

/// Adapter that logs every [`AppEvent`] as one line.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { desired } => {
                info!("START | desired={:.1}", desired);
            }
            AppEvent::StartupFailed(what) => {
                warn!("START | failed: {} not ready", what);
            }
            AppEvent::BatteryRead { level, indicator } => {
                info!(
                    "BATT  | level={} indicator={}",
                    opt(*level, 2),
                    indicator.map_or_else(|| "--".to_string(), |i| i.to_string())
                );
            }
            AppEvent::AmbientRead(celsius) => {
                info!("TEMP  | ambient={}", opt(*celsius, 1));
            }
            AppEvent::SensorFault { sensor, error } => {
                warn!("FAULT | {} sensor: {}", sensor, error);
            }
            AppEvent::ClimateActuated { action, from, to } => {
                info!("STATE | {} --{}--> {}", from, action, to);
            }
            AppEvent::ActuationFailed { action, error } => {
                warn!("STATE | '{}' not applied: {}", action, error);
            }
            AppEvent::ClimateSkipped => {
                info!("STATE | skipped, ambient unknown");
            }
            AppEvent::DesiredChanged { from, to } => {
                info!("SETPT | {:.1} -> {:.1}", from, to);
            }
            AppEvent::DisplayModeChanged(mode) => {
                info!("DISP  | showing {}", mode);
            }
        }
    }
}

/// Climate device that only logs what it was told.
#[derive(Default)]
pub struct LogActuator {
    last: Option<ClimateAction>,
}

impl LogActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<ClimateAction> {
        self.last
    }
}

impl ClimateActuatorPort for LogActuator {
    fn actuate(&mut self, action: ClimateAction) -> Result<(), ActuatorError> {
        info!("ACT   | climate <- {}", action);
        self.last = Some(action);
        Ok(())
    }
}

/// Visualizer that writes to the log instead of a screen.
#[derive(Default)]
pub struct LogDisplay;

impl TemperatureDisplayPort for LogDisplay {
    fn show_temperature(&mut self, mode: DisplayMode, celsius: Option<f64>) {
        info!("SHOW  | {}={}", mode, opt(celsius, 1));
    }
}

impl BatteryDisplayPort for LogDisplay {
    fn show_tension(&mut self, level: Option<f64>) {
        info!("SHOW  | battery={}", opt(level, 2));
    }

    fn show_indicator(&mut self, indicator: Option<BatteryIndicator>) {
        info!(
            "SHOW  | indicator={}",
            indicator.map_or_else(|| "--".to_string(), |i| i.to_string())
        );
    }
}

impl ClimateDisplayPort for LogDisplay {
    fn show_climate_state(&mut self, state: ClimateState) {
        info!("SHOW  | climate={}", state);
    }
}
