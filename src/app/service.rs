//! Application service: the hexagonal core.
//!
//! [`ThermostatService`] owns the environment manager, the battery monitor
//! and the climate controller.  It exposes one method per periodic job plus
//! the start-up check.  All I/O flows through port traits injected at call
//! sites, so the whole service is testable with mock adapters.
//!
//! ```text
//!  BatterySensorPort ─────▶ ┌──────────────────────────┐ ──▶ EventSink
//!  TemperatureSensorPort ─▶ │    ThermostatService     │
//!  DisplaySelectorPort ───▶ │ Environment · Battery ·  │ ──▶ Displays
//!  SetpointInputPort ─────▶ │   ClimateController      │
//!                           └──────────────────────────┘ ──▶ ClimateActuatorPort
//! ```

use log::{info, warn};

use crate::config::ThermostatConfig;
use crate::entities::{Battery, BatteryIndicator, DisplayMode, Environment};
use crate::error::{Error, Result};
use crate::fsm::{ClimateAction, ClimateDevice, ClimateState};

use super::battery::BatteryMonitor;
use super::climate::ClimateController;
use super::commands::{AppCommand, SetpointCommand};
use super::environment::EnvironmentManager;
use super::events::AppEvent;
use super::ports::{
    BatteryDisplayPort, BatterySensorPort, ClimateActuatorPort, ClimateDisplayPort,
    DisplaySelectorPort, EventSink, SetpointInputPort, TemperatureDisplayPort,
    TemperatureSensorPort,
};
use super::presenter::Presenter;

// ───────────────────────────────────────────────────────────────
// ThermostatService
// ───────────────────────────────────────────────────────────────

pub struct ThermostatService {
    environment: EnvironmentManager,
    battery: BatteryMonitor,
    climate: ClimateController,
    initial_desired: f64,
}

impl ThermostatService {
    /// Construct the service from configuration.
    ///
    /// Does **not** run the start-up check: call [`startup`](Self::startup)
    /// before the first periodic job.
    pub fn new(config: &ThermostatConfig) -> Result<Self> {
        let hysteresis = config.climate.hysteresis;
        if !hysteresis.is_finite() || hysteresis < 0.0 {
            return Err(Error::InvalidConfiguration(
                "hysteresis must be a finite value >= 0",
            ));
        }
        let battery = Battery::new(
            config.battery.max_capacity,
            config.battery.low_threshold_fraction,
        )?;
        let device = ClimateDevice::new(config.climate.device, hysteresis);
        info!(
            "ThermostatService: device={} hysteresis={} battery max={} low<={}",
            config.climate.device,
            hysteresis,
            battery.max_capacity(),
            battery.low_threshold()
        );

        Ok(Self {
            environment: EnvironmentManager::new(
                config.initial_desired_temperature,
                config.setpoint_step,
            ),
            battery: BatteryMonitor::new(battery),
            climate: ClimateController::new(device),
            initial_desired: config.initial_desired_temperature,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start-up check: reset the setpoint, require a NORMAL battery and a
    /// known ambient temperature, then present once.
    ///
    /// # Errors
    ///
    /// [`Error::NotReady`] naming the failed check.  The periodic loop must
    /// not be entered after a failure.
    pub fn startup(
        &mut self,
        battery_sensor: &mut impl BatterySensorPort,
        temperature_sensor: &mut impl TemperatureSensorPort,
        displays: &mut (impl BatteryDisplayPort + TemperatureDisplayPort + ClimateDisplayPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        info!("Start-up: desired={}", self.initial_desired);
        self.environment.set_desired(self.initial_desired);

        self.read_battery(battery_sensor, sink);
        if self.battery.indicator() != Some(BatteryIndicator::Normal) {
            warn!(
                "Start-up: battery not ready (level={:?} indicator={:?})",
                self.battery.level(),
                self.battery.indicator()
            );
            sink.emit(&AppEvent::StartupFailed("battery"));
            return Err(Error::NotReady("battery"));
        }

        self.read_temperature(temperature_sensor, sink);
        if self.environment.ambient().is_none() {
            warn!("Start-up: no ambient temperature");
            sink.emit(&AppEvent::StartupFailed("temperature sensor"));
            return Err(Error::NotReady("temperature sensor"));
        }

        self.present(displays);
        sink.emit(&AppEvent::Started {
            desired: self.environment.desired(),
        });
        info!("Start-up: OK");
        Ok(())
    }

    // ── Periodic jobs ─────────────────────────────────────────

    pub fn read_battery(&mut self, sensor: &mut impl BatterySensorPort, sink: &mut impl EventSink) {
        match self.battery.check_level(sensor) {
            Ok(Some(_)) => sink.emit(&AppEvent::BatteryRead {
                level: self.battery.level(),
                indicator: self.battery.indicator(),
            }),
            Ok(None) => {}
            Err(error) => {
                sink.emit(&AppEvent::SensorFault {
                    sensor: "battery",
                    error,
                });
                sink.emit(&AppEvent::BatteryRead {
                    level: None,
                    indicator: None,
                });
            }
        }
    }

    pub fn read_temperature(
        &mut self,
        sensor: &mut impl TemperatureSensorPort,
        sink: &mut impl EventSink,
    ) {
        if let Err(error) = self.environment.read_ambient(sensor) {
            sink.emit(&AppEvent::SensorFault {
                sensor: "temperature",
                error,
            });
        }
        sink.emit(&AppEvent::AmbientRead(self.environment.ambient()));
    }

    /// One climate decision.  Skipped while ambient is unknown.
    ///
    /// # Errors
    ///
    /// Whatever [`ClimateController::apply`] returns; an actuator failure is
    /// also reported as [`AppEvent::ActuationFailed`].
    pub fn actuate_climate(
        &mut self,
        actuator: &mut impl ClimateActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<Option<ClimateAction>> {
        let environment = *self.environment.environment();
        if environment.ambient_temperature.is_none() {
            info!("Climate: ambient unknown, skipping");
            sink.emit(&AppEvent::ClimateSkipped);
            return Ok(None);
        }

        let from = self.climate.state();
        match self.climate.apply(&environment, actuator) {
            Ok(Some(action)) => {
                sink.emit(&AppEvent::ClimateActuated {
                    action,
                    from,
                    to: self.climate.state(),
                });
                Ok(Some(action))
            }
            Ok(None) => Ok(None),
            Err(e @ Error::Actuator { action, error }) => {
                sink.emit(&AppEvent::ActuationFailed { action, error });
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn present(
        &self,
        displays: &mut (impl BatteryDisplayPort + TemperatureDisplayPort + ClimateDisplayPort),
    ) {
        let presenter = Presenter {
            battery: &self.battery,
            environment: &self.environment,
            climate: &self.climate,
        };
        presenter.present(displays);
    }

    /// Follow the display selector; while it asks for the setpoint, show it
    /// and apply at most one pending up / down command.
    pub fn check_selector(
        &mut self,
        selector: &mut impl DisplaySelectorPort,
        input: &mut impl SetpointInputPort,
        display: &mut impl TemperatureDisplayPort,
        sink: &mut impl EventSink,
    ) {
        let mode = match selector.selected_mode() {
            Ok(mode) => mode,
            Err(error) => {
                warn!("Selector: read failed: {} (mode unchanged)", error);
                sink.emit(&AppEvent::SensorFault {
                    sensor: "selector",
                    error,
                });
                return;
            }
        };

        self.handle_command(AppCommand::ShowMode(mode), sink);
        if mode != DisplayMode::Desired {
            return;
        }

        self.environment.show(display);
        match input.poll() {
            Ok(Some(cmd)) => {
                self.handle_command(AppCommand::Adjust(cmd), sink);
                self.environment.show(display);
            }
            Ok(None) => {}
            Err(error) => sink.emit(&AppEvent::SensorFault {
                sensor: "setpoint input",
                error,
            }),
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (selector, setpoint buttons, remote).
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::SetDesired(celsius) => {
                if !celsius.is_finite() {
                    warn!("Setpoint: ignoring non-finite value {}", celsius);
                    return;
                }
                let from = self.environment.desired();
                self.environment.set_desired(celsius);
                if from != celsius {
                    sink.emit(&AppEvent::DesiredChanged { from, to: celsius });
                }
            }
            AppCommand::Adjust(step) => {
                let from = self.environment.desired();
                let to = match step {
                    SetpointCommand::Increase => self.environment.increase_desired(),
                    SetpointCommand::Decrease => self.environment.decrease_desired(),
                };
                info!("Setpoint: {} -> {}", from, to);
                sink.emit(&AppEvent::DesiredChanged { from, to });
            }
            AppCommand::ShowMode(mode) => {
                if self.environment.set_display_mode(mode) {
                    sink.emit(&AppEvent::DisplayModeChanged(mode));
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn environment(&self) -> &Environment {
        self.environment.environment()
    }

    pub fn battery(&self) -> &Battery {
        self.battery.battery()
    }

    pub fn climate_state(&self) -> ClimateState {
        self.climate.state()
    }

    pub fn climate_device(&self) -> &ClimateDevice {
        self.climate.device()
    }
}
