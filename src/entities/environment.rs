//! The space being climatised.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which temperature the display currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Ambient,
    Desired,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambient => write!(f, "ambient"),
            Self::Desired => write!(f, "desired"),
        }
    }
}

/// One sampled state of the physical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// Last ambient reading; `None` until the first successful read or
    /// after a sensor failure.
    pub ambient_temperature: Option<f64>,
    /// Setpoint.
    pub desired_temperature: f64,
    pub display_mode: DisplayMode,
}

impl Environment {
    pub fn new(desired_temperature: f64) -> Self {
        Self {
            ambient_temperature: None,
            desired_temperature,
            display_mode: DisplayMode::Ambient,
        }
    }

    /// Value the display should show for the current mode.
    pub fn displayed_temperature(&self) -> Option<f64> {
        match self.display_mode {
            DisplayMode::Ambient => self.ambient_temperature,
            DisplayMode::Desired => Some(self.desired_temperature),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(0.0)
    }
}
