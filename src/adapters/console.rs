//! Console visualizer: framed values on stdout.
//!
//! ```text
//! | ambient     |   21.5 °C |
//! | battery     |    4.50 V |
//! | indicator   |    NORMAL |
//! | climate     |   heating |
//! ```

use std::io::{self, Write};

use log::debug;

use crate::app::ports::{BatteryDisplayPort, ClimateDisplayPort, TemperatureDisplayPort};
use crate::entities::{BatteryIndicator, DisplayMode};
use crate::fsm::ClimateState;

pub struct ConsoleDisplay<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleDisplay {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, label: &str, value: &str) {
        if let Err(e) = writeln!(self.out, "| {label:<11} | {value:>9} |") {
            debug!("Console: write failed: {}", e);
        }
    }
}

impl<W: Write> TemperatureDisplayPort for ConsoleDisplay<W> {
    fn show_temperature(&mut self, mode: DisplayMode, celsius: Option<f64>) {
        let value = celsius.map_or_else(|| "--".to_string(), |c| format!("{c:.1} °C"));
        self.line(&mode.to_string(), &value);
    }
}

impl<W: Write> BatteryDisplayPort for ConsoleDisplay<W> {
    fn show_tension(&mut self, level: Option<f64>) {
        let value = level.map_or_else(|| "--".to_string(), |v| format!("{v:.2} V"));
        self.line("battery", &value);
    }

    fn show_indicator(&mut self, indicator: Option<BatteryIndicator>) {
        let value = indicator.map_or_else(|| "--".to_string(), |i| i.to_string());
        self.line("indicator", &value);
    }
}

impl<W: Write> ClimateDisplayPort for ConsoleDisplay<W> {
    fn show_climate_state(&mut self, state: ClimateState) {
        self.line("climate", &state.to_string());
    }
}
