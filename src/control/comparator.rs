//! Hysteresis temperature comparator.
//!
//! Classifies an ambient reading against the setpoint using a symmetric
//! tolerance band:
//!
//! ```text
//!        LOW          NORMAL (closed band)          HIGH
//!  ──────────────[desired - h ······ desired + h]──────────────
//! ```
//!
//! Both band edges count as `Normal`, so a reading sitting exactly on
//! `desired ± h` never triggers an actuation.

use core::fmt;

use crate::error::{Error, Result};

/// Band half-width used when the caller has no configured value.
pub const DEFAULT_HYSTERESIS: f64 = 2.0;

/// Three-way classification of ambient vs. desired temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureVerdict {
    /// Ambient is strictly above `desired + hysteresis`.
    High,
    /// Ambient is strictly below `desired - hysteresis`.
    Low,
    /// Ambient is inside the closed band.
    Normal,
}

impl fmt::Display for TemperatureVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// Compare `actual` against `desired` with a band of `hysteresis` degrees.
///
/// Never fails; negative and zero values are accepted as-is.
pub fn compare(actual: f64, desired: f64, hysteresis: f64) -> TemperatureVerdict {
    let upper = desired + hysteresis;
    let lower = desired - hysteresis;

    if actual > upper {
        TemperatureVerdict::High
    } else if actual < lower {
        TemperatureVerdict::Low
    } else {
        TemperatureVerdict::Normal
    }
}

/// [`compare`] for a reading that may be unset.
///
/// Fails fast with [`Error::TemperatureUnknown`] instead of guessing a
/// verdict for a sensor that has not produced a value.
pub fn compare_reading(
    actual: Option<f64>,
    desired: f64,
    hysteresis: f64,
) -> Result<TemperatureVerdict> {
    let actual = actual.ok_or(Error::TemperatureUnknown)?;
    Ok(compare(actual, desired, hysteresis))
}
