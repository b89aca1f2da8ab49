//! Inbound commands to the thermostat service.
//!
//! These represent actions requested by the outside world (setpoint buttons,
//! selector, a remote adapter) that the
//! [`ThermostatService`](super::service::ThermostatService) interprets.

use serde::{Deserialize, Serialize};

use crate::entities::DisplayMode;

/// One press of the setpoint up / down buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetpointCommand {
    Increase,
    Decrease,
}

impl SetpointCommand {
    /// Parse the textual form used by input adapters (`increase`, `+`, ...).
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "increase" | "up" | "+" | "1" => Some(Self::Increase),
            "decrease" | "down" | "-" | "2" => Some(Self::Decrease),
            _ => None,
        }
    }
}

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    /// Replace the setpoint.
    SetDesired(f64),
    /// Nudge the setpoint by the configured step.
    Adjust(SetpointCommand),
    /// Switch what the temperature display shows.
    ShowMode(DisplayMode),
}
