//! Adapter factory: turns the `adapters` section of the configuration into
//! a bundle of boxed ports.

use log::{error, info};

use crate::app::ports::{
    BatteryDisplayPort, BatterySensorPort, ClimateActuatorPort, ClimateDisplayPort,
    DisplaySelectorPort, SetpointInputPort, TemperatureDisplayPort, TemperatureSensorPort,
};
use crate::config::{
    ActuatorKind, DisplayKind, SelectorKind, SensorKind, SetpointInputKind, ThermostatConfig,
};
use crate::entities::{BatteryIndicator, DisplayMode};
use crate::error::{Error, Result, SensorError};
use crate::fsm::ClimateState;

use super::console::ConsoleDisplay;
use super::file::{
    FileBatterySensor, FileClimateActuator, FileDisplaySelector, FileSetpointInput,
    FileTemperatureSensor,
};
use super::http::HttpDisplay;
use super::log_sink::{LogActuator, LogDisplay};
use super::simulated::{
    FixedSelector, NoSetpointInput, SimulatedBatterySensor, SimulatedTemperatureSensor,
};
use super::tcp::{TcpActuator, TcpDisplay, TcpValueSensor};

// ── Bundles ───────────────────────────────────────────────────

/// The three visualizers, usable wherever all display ports are needed.
pub struct DisplayBank {
    pub battery: Box<dyn BatteryDisplayPort>,
    pub temperature: Box<dyn TemperatureDisplayPort>,
    pub climate: Box<dyn ClimateDisplayPort>,
}

impl BatteryDisplayPort for DisplayBank {
    fn show_tension(&mut self, level: Option<f64>) {
        self.battery.show_tension(level);
    }

    fn show_indicator(&mut self, indicator: Option<BatteryIndicator>) {
        self.battery.show_indicator(indicator);
    }
}

impl TemperatureDisplayPort for DisplayBank {
    fn show_temperature(&mut self, mode: DisplayMode, celsius: Option<f64>) {
        self.temperature.show_temperature(mode, celsius);
    }
}

impl ClimateDisplayPort for DisplayBank {
    fn show_climate_state(&mut self, state: ClimateState) {
        self.climate.show_climate_state(state);
    }
}

/// Every peripheral the runtime drives.
pub struct Peripherals {
    pub battery_sensor: Box<dyn BatterySensorPort>,
    pub temperature_sensor: Box<dyn TemperatureSensorPort>,
    pub actuator: Box<dyn ClimateActuatorPort>,
    pub displays: DisplayBank,
    pub selector: Box<dyn DisplaySelectorPort>,
    pub setpoint_input: Box<dyn SetpointInputPort>,
}

// ── Factory ───────────────────────────────────────────────────

pub struct AdapterFactory;

impl AdapterFactory {
    /// Build the adapters selected by `config.adapters`.
    ///
    /// # Errors
    ///
    /// `Error::Sensor(SensorError::Unavailable)` when a TCP sensor cannot
    /// bind its port; `Error::InvalidConfiguration` when an HTTP display
    /// cannot create its client.
    pub fn build(config: &ThermostatConfig) -> Result<Peripherals> {
        let kinds = &config.adapters;
        info!("AdapterFactory: {:?}", kinds);

        Ok(Peripherals {
            battery_sensor: Self::battery_sensor(config, kinds.battery_sensor)?,
            temperature_sensor: Self::temperature_sensor(config, kinds.temperature_sensor)?,
            actuator: Self::actuator(config, kinds.climate_actuator),
            displays: DisplayBank {
                battery: Self::battery_display(config, kinds.battery_display)?,
                temperature: Self::temperature_display(config, kinds.temperature_display)?,
                climate: Self::climate_display(config, kinds.climate_display)?,
            },
            selector: Self::selector(config, kinds.display_selector),
            setpoint_input: Self::setpoint_input(config, kinds.setpoint_input),
        })
    }

    fn tcp_sensor(config: &ThermostatConfig, port: u16) -> Result<TcpValueSensor> {
        TcpValueSensor::bind(&config.network.host, port).map_err(|e| {
            error!(
                "AdapterFactory: cannot listen on {}:{}: {}",
                config.network.host, port, e
            );
            Error::Sensor(SensorError::Unavailable)
        })
    }

    fn battery_sensor(
        config: &ThermostatConfig,
        kind: SensorKind,
    ) -> Result<Box<dyn BatterySensorPort>> {
        Ok(match kind {
            SensorKind::File => Box::new(FileBatterySensor::new(&config.files.battery)),
            SensorKind::Tcp => Box::new(Self::tcp_sensor(
                config,
                config.network.battery_sensor_port,
            )?),
            SensorKind::Simulated => {
                Box::new(SimulatedBatterySensor::new(config.simulation.battery_level))
            }
        })
    }

    fn temperature_sensor(
        config: &ThermostatConfig,
        kind: SensorKind,
    ) -> Result<Box<dyn TemperatureSensorPort>> {
        let sim = &config.simulation;
        Ok(match kind {
            SensorKind::File => Box::new(FileTemperatureSensor::new(&config.files.temperature)),
            SensorKind::Tcp => Box::new(Self::tcp_sensor(
                config,
                config.network.temperature_sensor_port,
            )?),
            SensorKind::Simulated => Box::new(SimulatedTemperatureSensor::new(
                sim.base_temperature,
                sim.drift_amplitude,
                sim.drift_period_ticks,
            )),
        })
    }

    fn actuator(config: &ThermostatConfig, kind: ActuatorKind) -> Box<dyn ClimateActuatorPort> {
        match kind {
            ActuatorKind::File => Box::new(FileClimateActuator::new(&config.files.climate)),
            ActuatorKind::Log => Box::new(LogActuator::new()),
            ActuatorKind::Tcp => Box::new(TcpActuator::new(
                config.network.host.clone(),
                config.network.climate_actuator_port,
            )),
        }
    }

    fn battery_display(
        config: &ThermostatConfig,
        kind: DisplayKind,
    ) -> Result<Box<dyn BatteryDisplayPort>> {
        Ok(match kind {
            DisplayKind::Console => Box::new(ConsoleDisplay::stdout()),
            DisplayKind::Tcp => Box::new(TcpDisplay::new(
                config.network.host.clone(),
                config.network.battery_display_port,
            )),
            DisplayKind::Http => Box::new(HttpDisplay::new(&config.network.http_base_url)?),
            DisplayKind::Log => Box::new(LogDisplay),
        })
    }

    fn temperature_display(
        config: &ThermostatConfig,
        kind: DisplayKind,
    ) -> Result<Box<dyn TemperatureDisplayPort>> {
        Ok(match kind {
            DisplayKind::Console => Box::new(ConsoleDisplay::stdout()),
            DisplayKind::Tcp => Box::new(TcpDisplay::new(
                config.network.host.clone(),
                config.network.temperature_display_port,
            )),
            DisplayKind::Http => Box::new(HttpDisplay::new(&config.network.http_base_url)?),
            DisplayKind::Log => Box::new(LogDisplay),
        })
    }

    fn climate_display(
        config: &ThermostatConfig,
        kind: DisplayKind,
    ) -> Result<Box<dyn ClimateDisplayPort>> {
        Ok(match kind {
            DisplayKind::Console => Box::new(ConsoleDisplay::stdout()),
            DisplayKind::Tcp => Box::new(TcpDisplay::new(
                config.network.host.clone(),
                config.network.climate_display_port,
            )),
            DisplayKind::Http => Box::new(HttpDisplay::new(&config.network.http_base_url)?),
            DisplayKind::Log => Box::new(LogDisplay),
        })
    }

    fn selector(config: &ThermostatConfig, kind: SelectorKind) -> Box<dyn DisplaySelectorPort> {
        match kind {
            SelectorKind::File => Box::new(FileDisplaySelector::new(&config.files.display_mode)),
            SelectorKind::Fixed => Box::new(FixedSelector(DisplayMode::Ambient)),
        }
    }

    fn setpoint_input(
        config: &ThermostatConfig,
        kind: SetpointInputKind,
    ) -> Box<dyn SetpointInputPort> {
        match kind {
            SetpointInputKind::File => Box::new(FileSetpointInput::new(&config.files.setpoint)),
            SetpointInputKind::None => Box::new(NoSetpointInput),
        }
    }
}
