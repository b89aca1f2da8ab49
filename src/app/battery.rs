//! Battery monitor: keeps the [`Battery`] entity fed from its sensor.
//!
//! | sensor result | stored level        |
//! |---------------|---------------------|
//! | `Ok(Some(v))` | `v` (indicator recomputed) |
//! | `Ok(None)`    | previous reading kept |
//! | `Err(_)`      | cleared to unset    |

use log::{debug, warn};

use crate::app::ports::{BatteryDisplayPort, BatterySensorPort};
use crate::entities::{Battery, BatteryIndicator};
use crate::error::SensorError;

pub struct BatteryMonitor {
    battery: Battery,
}

impl BatteryMonitor {
    pub fn new(battery: Battery) -> Self {
        Self { battery }
    }

    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    pub fn level(&self) -> Option<f64> {
        self.battery.level()
    }

    pub fn indicator(&self) -> Option<BatteryIndicator> {
        self.battery.indicator()
    }

    /// Poll the sensor once.  Returns the new level, `Ok(None)` when the
    /// sensor had nothing new.
    pub fn check_level(
        &mut self,
        sensor: &mut impl BatterySensorPort,
    ) -> Result<Option<f64>, SensorError> {
        match sensor.read() {
            Ok(Some(level)) => {
                self.battery.set_level(level);
                debug!(
                    "Battery: level={:.2} indicator={:?}",
                    level,
                    self.battery.indicator()
                );
                Ok(Some(level))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!("Battery sensor failed: {} (level cleared)", e);
                self.battery.clear_level();
                Err(e)
            }
        }
    }

    pub fn show(&self, display: &mut impl BatteryDisplayPort) {
        display.show_tension(self.battery.level());
        display.show_indicator(self.battery.indicator());
    }
}
