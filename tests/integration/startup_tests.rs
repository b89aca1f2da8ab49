//! Integration tests for the start-up check.

use crate::mock_hw::{call_log, Call, LogSink, MockDisplays, ScriptedBattery, ScriptedTemperature};

use thermostat::app::events::AppEvent;
use thermostat::app::service::ThermostatService;
use thermostat::config::ThermostatConfig;
use thermostat::entities::{BatteryIndicator, DisplayMode};
use thermostat::error::{Error, SensorError};
use thermostat::fsm::ClimateState;

fn config() -> ThermostatConfig {
    let mut config = ThermostatConfig::default();
    config.battery.max_capacity = 5.0;
    config.battery.low_threshold_fraction = 0.95;
    config
}

#[test]
fn healthy_start_presents_once() {
    let log = call_log();
    let mut svc = ThermostatService::new(&config()).unwrap();
    let mut sink = LogSink::new();

    let result = svc.startup(
        &mut ScriptedBattery::new([Ok(Some(4.8))]),
        &mut ScriptedTemperature::new([Ok(21.0)]),
        &mut MockDisplays::new(&log),
        &mut sink,
    );

    assert_eq!(result, Ok(()));
    assert_eq!(svc.environment().desired_temperature, 24.0);
    assert_eq!(
        *log.borrow(),
        vec![
            Call::ShowTension(Some(4.8)),
            Call::ShowIndicator(Some(BatteryIndicator::Normal)),
            Call::ShowTemperature(DisplayMode::Ambient, Some(21.0)),
            Call::ShowClimate(ClimateState::Off),
        ]
    );
    assert!(sink.contains(&AppEvent::Started { desired: 24.0 }));
}

#[test]
fn low_battery_blocks_start() {
    let log = call_log();
    let mut svc = ThermostatService::new(&config()).unwrap();
    let mut sink = LogSink::new();

    // 4.75 sits exactly on the threshold: LOW.
    let result = svc.startup(
        &mut ScriptedBattery::new([Ok(Some(4.75))]),
        &mut ScriptedTemperature::new([Ok(21.0)]),
        &mut MockDisplays::new(&log),
        &mut sink,
    );

    assert_eq!(result, Err(Error::NotReady("battery")));
    assert_eq!(svc.battery().indicator(), Some(BatteryIndicator::Low));
    assert!(log.borrow().is_empty(), "nothing presented on failure");
    assert!(sink.contains(&AppEvent::StartupFailed("battery")));
    assert!(!sink.contains(&AppEvent::Started { desired: 24.0 }));
}

#[test]
fn silent_battery_blocks_start() {
    let mut svc = ThermostatService::new(&config()).unwrap();
    let mut sink = LogSink::new();

    let result = svc.startup(
        &mut ScriptedBattery::new([Ok(None)]),
        &mut ScriptedTemperature::new([Ok(21.0)]),
        &mut MockDisplays::new(&call_log()),
        &mut sink,
    );

    assert_eq!(result, Err(Error::NotReady("battery")));
    assert_eq!(svc.battery().level(), None);
}

#[test]
fn failed_battery_read_blocks_start() {
    let mut svc = ThermostatService::new(&config()).unwrap();
    let mut sink = LogSink::new();

    let result = svc.startup(
        &mut ScriptedBattery::new([Err(SensorError::ReadFailed)]),
        &mut ScriptedTemperature::new([Ok(21.0)]),
        &mut MockDisplays::new(&call_log()),
        &mut sink,
    );

    assert_eq!(result, Err(Error::NotReady("battery")));
    assert!(sink.contains(&AppEvent::SensorFault {
        sensor: "battery",
        error: SensorError::ReadFailed,
    }));
}

#[test]
fn missing_temperature_blocks_start() {
    let mut svc = ThermostatService::new(&config()).unwrap();
    let mut sink = LogSink::new();

    let result = svc.startup(
        &mut ScriptedBattery::new([Ok(Some(5.0))]),
        &mut ScriptedTemperature::new([Err(SensorError::Unavailable)]),
        &mut MockDisplays::new(&call_log()),
        &mut sink,
    );

    assert_eq!(result, Err(Error::NotReady("temperature sensor")));
    assert_eq!(svc.environment().ambient_temperature, None);
    assert!(sink.contains(&AppEvent::StartupFailed("temperature sensor")));
}

#[test]
fn startup_resets_setpoint() {
    let mut svc = ThermostatService::new(&config()).unwrap();
    let mut sink = LogSink::new();
    svc.handle_command(
        thermostat::app::commands::AppCommand::SetDesired(30.0),
        &mut sink,
    );

    svc.startup(
        &mut ScriptedBattery::new([Ok(Some(5.0))]),
        &mut ScriptedTemperature::new([Ok(20.0)]),
        &mut MockDisplays::new(&call_log()),
        &mut sink,
    )
    .unwrap();

    assert_eq!(svc.environment().desired_temperature, 24.0);
}

#[test]
fn invalid_battery_parameters_are_rejected() {
    let mut config = config();
    config.battery.low_threshold_fraction = 1.2;
    assert!(matches!(
        ThermostatService::new(&config),
        Err(Error::InvalidConfiguration(_))
    ));
}
