//! Presenter: pushes the current readings to every visualizer.

use crate::app::battery::BatteryMonitor;
use crate::app::climate::ClimateController;
use crate::app::environment::EnvironmentManager;
use crate::app::ports::{BatteryDisplayPort, ClimateDisplayPort, TemperatureDisplayPort};

/// Borrowed view over the three managers that have something to show.
pub struct Presenter<'a> {
    pub battery: &'a BatteryMonitor,
    pub environment: &'a EnvironmentManager,
    pub climate: &'a ClimateController,
}

impl Presenter<'_> {
    /// Battery first, then temperature, then climate state.
    pub fn present(
        &self,
        displays: &mut (impl BatteryDisplayPort + TemperatureDisplayPort + ClimateDisplayPort),
    ) {
        self.battery.show(displays);
        self.environment.show(displays);
        displays.show_climate_state(self.climate.state());
    }
}
