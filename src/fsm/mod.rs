//! Table-driven climate device state machine.
//!
//! Two fixed tables per device variant, built once at construction:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  TransitionTable   (state, action)   ──▶ next state           │
//! │  DecisionTable     (verdict, state)  ──▶ action to request    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The variant is a tag selected at construction; there is no per-variant
//! code path beyond the tables in [`tables`].  A missing transition entry is
//! an error (the caller asked for something the device cannot do), while a
//! missing decision entry simply means "no action this cycle".

pub mod tables;

use core::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::control::comparator::TemperatureVerdict;
use crate::error::{Error, Result};
use tables::{DecisionTable, TransitionTable};

// ---------------------------------------------------------------------------
// States, actions, variants
// ---------------------------------------------------------------------------

/// Operating state of the climate device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateState {
    #[default]
    Off,
    Heating,
    Cooling,
}

impl fmt::Display for ClimateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Heating => write!(f, "heating"),
            Self::Cooling => write!(f, "cooling"),
        }
    }
}

/// Command sent to the actuator and fed to the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateAction {
    Heat,
    Cool,
    Off,
}

impl ClimateAction {
    /// Wire name used by actuator adapters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for ClimateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device flavour, chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceVariant {
    /// Heats and cools.
    #[default]
    Full,
    /// Heats only; cooling requests are absorbed.
    HeaterOnly,
}

impl fmt::Display for DeviceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::HeaterOnly => write!(f, "heater_only"),
        }
    }
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// A climate device: current state plus its variant's fixed tables.
#[derive(Debug, Clone)]
pub struct ClimateDevice {
    variant: DeviceVariant,
    state: ClimateState,
    hysteresis: f64,
    transitions: TransitionTable,
    decisions: DecisionTable,
}

impl ClimateDevice {
    /// Construct a device of `variant`, starting in [`ClimateState::Off`].
    pub fn new(variant: DeviceVariant, hysteresis: f64) -> Self {
        Self {
            variant,
            state: ClimateState::Off,
            hysteresis,
            transitions: tables::build_transition_table(variant),
            decisions: tables::build_decision_table(variant),
        }
    }

    pub fn state(&self) -> ClimateState {
        self.state
    }

    pub fn variant(&self) -> DeviceVariant {
        self.variant
    }

    /// Tolerance band (degrees) handed to the comparator.
    pub fn hysteresis(&self) -> f64 {
        self.hysteresis
    }

    /// Advance the state for `action`.
    ///
    /// Fails with [`Error::InvalidTransition`] when the pair is not in the
    /// table; the state is left untouched in that case.
    pub fn transition(&mut self, action: ClimateAction) -> Result<ClimateState> {
        let next = *self
            .transitions
            .get(&(self.state, action))
            .ok_or(Error::InvalidTransition {
                state: self.state,
                action,
            })?;

        if next != self.state {
            info!("Climate transition: {} --{}--> {}", self.state, action, next);
        }
        self.state = next;
        Ok(next)
    }

    /// Action the device wants for `verdict` in its current state, if any.
    pub fn decide_action(&self, verdict: TemperatureVerdict) -> Option<ClimateAction> {
        self.decisions.get(&(verdict, self.state)).copied()
    }
}
