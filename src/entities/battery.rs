//! Battery entity and its charge-level classifier.
//!
//! The indicator is derived state: it is recomputed synchronously every time
//! a level is stored, so `indicator` and `level` can never disagree.

use core::fmt;

use crate::error::{Error, Result};

/// Charge classification shown next to the battery tension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryIndicator {
    Low,
    Normal,
}

impl fmt::Display for BatteryIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Normal => write!(f, "NORMAL"),
        }
    }
}

/// Classify `level` against `max_capacity * low_threshold_fraction`.
///
/// The threshold itself is `Low`.  Zero and negative levels fall through
/// the same comparison.
pub fn classify(level: f64, max_capacity: f64, low_threshold_fraction: f64) -> BatteryIndicator {
    if level <= max_capacity * low_threshold_fraction {
        BatteryIndicator::Low
    } else {
        BatteryIndicator::Normal
    }
}

/// Power source state.
#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    max_capacity: f64,
    low_threshold_fraction: f64,
    level: Option<f64>,
    indicator: Option<BatteryIndicator>,
}

impl Battery {
    /// Build a battery model.
    ///
    /// Rejects `max_capacity <= 0` (or non-finite) and a threshold fraction
    /// outside `[0, 1]` with [`Error::InvalidConfiguration`].
    pub fn new(max_capacity: f64, low_threshold_fraction: f64) -> Result<Self> {
        if !max_capacity.is_finite() || max_capacity <= 0.0 {
            return Err(Error::InvalidConfiguration(
                "battery max_capacity must be a finite value > 0",
            ));
        }
        if !(0.0..=1.0).contains(&low_threshold_fraction) {
            return Err(Error::InvalidConfiguration(
                "battery low_threshold_fraction must be within [0, 1]",
            ));
        }
        Ok(Self {
            max_capacity,
            low_threshold_fraction,
            level: None,
            indicator: None,
        })
    }

    /// Store a new level and recompute the indicator.
    pub fn set_level(&mut self, level: f64) {
        self.level = Some(level);
        self.indicator = Some(classify(
            level,
            self.max_capacity,
            self.low_threshold_fraction,
        ));
    }

    /// Forget the last reading (sensor failure).
    pub fn clear_level(&mut self) {
        self.level = None;
        self.indicator = None;
    }

    /// Last stored level; `None` until the first successful read.
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    /// Indicator for the last stored level; `None` while the level is unset.
    pub fn indicator(&self) -> Option<BatteryIndicator> {
        self.indicator
    }

    pub fn max_capacity(&self) -> f64 {
        self.max_capacity
    }

    pub fn low_threshold_fraction(&self) -> f64 {
        self.low_threshold_fraction
    }

    /// Absolute level at or below which the indicator reads `Low`.
    pub fn low_threshold(&self) -> f64 {
        self.max_capacity * self.low_threshold_fraction
    }
}
