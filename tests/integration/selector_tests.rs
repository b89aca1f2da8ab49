//! Integration tests for the display selector and setpoint input.

use crate::mock_hw::{
    call_log, Call, LogSink, MockDisplays, ScriptedSelector, ScriptedSetpoint, ScriptedTemperature,
};

use thermostat::app::commands::{AppCommand, SetpointCommand};
use thermostat::app::events::AppEvent;
use thermostat::app::service::ThermostatService;
use thermostat::config::ThermostatConfig;
use thermostat::entities::DisplayMode;
use thermostat::error::SensorError;

fn service() -> ThermostatService {
    let mut config = ThermostatConfig::default();
    config.setpoint_step = 0.5;
    ThermostatService::new(&config).unwrap()
}

#[test]
fn desired_mode_shows_and_adjusts_setpoint() {
    let log = call_log();
    let mut svc = service();
    let mut sink = LogSink::new();
    let mut selector = ScriptedSelector::new([Ok(DisplayMode::Desired)]);
    let mut input = ScriptedSetpoint::new([SetpointCommand::Increase, SetpointCommand::Increase]);
    let mut display = MockDisplays::new(&log);

    svc.check_selector(&mut selector, &mut input, &mut display, &mut sink);

    // One press per run.
    assert_eq!(input.remaining(), 1);
    assert_eq!(svc.environment().display_mode, DisplayMode::Desired);
    assert_eq!(svc.environment().desired_temperature, 24.5);
    assert_eq!(
        *log.borrow(),
        vec![
            Call::ShowTemperature(DisplayMode::Desired, Some(24.0)),
            Call::ShowTemperature(DisplayMode::Desired, Some(24.5)),
        ]
    );
    assert!(sink.contains(&AppEvent::DisplayModeChanged(DisplayMode::Desired)));
    assert!(sink.contains(&AppEvent::DesiredChanged { from: 24.0, to: 24.5 }));
}

#[test]
fn desired_mode_without_press_only_shows() {
    let log = call_log();
    let mut svc = service();
    let mut sink = LogSink::new();

    svc.check_selector(
        &mut ScriptedSelector::new([Ok(DisplayMode::Desired)]),
        &mut ScriptedSetpoint::new([]),
        &mut MockDisplays::new(&log),
        &mut sink,
    );

    assert_eq!(svc.environment().desired_temperature, 24.0);
    assert_eq!(
        *log.borrow(),
        vec![Call::ShowTemperature(DisplayMode::Desired, Some(24.0))]
    );
}

#[test]
fn ambient_mode_switches_back_and_ignores_buttons() {
    let log = call_log();
    let mut svc = service();
    let mut sink = LogSink::new();
    let mut selector =
        ScriptedSelector::new([Ok(DisplayMode::Desired), Ok(DisplayMode::Ambient)]);
    let mut input = ScriptedSetpoint::new([]);
    let mut display = MockDisplays::new(&log);

    svc.check_selector(&mut selector, &mut input, &mut display, &mut sink);
    input.0.push_back(Ok(SetpointCommand::Decrease));
    svc.check_selector(&mut selector, &mut input, &mut display, &mut sink);

    assert_eq!(svc.environment().display_mode, DisplayMode::Ambient);
    assert_eq!(svc.environment().desired_temperature, 24.0);
    assert_eq!(input.remaining(), 1);
    assert!(sink.contains(&AppEvent::DisplayModeChanged(DisplayMode::Ambient)));
}

#[test]
fn selector_failure_keeps_mode() {
    let mut svc = service();
    let mut sink = LogSink::new();
    let mut selector = ScriptedSelector::new([
        Ok(DisplayMode::Desired),
        Err(SensorError::ReadFailed),
    ]);
    let mut input = ScriptedSetpoint::new([]);
    let mut display = MockDisplays::new(&call_log());

    svc.check_selector(&mut selector, &mut input, &mut display, &mut sink);
    svc.check_selector(&mut selector, &mut input, &mut display, &mut sink);

    assert_eq!(svc.environment().display_mode, DisplayMode::Desired);
    assert!(sink.contains(&AppEvent::SensorFault {
        sensor: "selector",
        error: SensorError::ReadFailed,
    }));
}

#[test]
fn broken_input_is_reported() {
    let mut svc = service();
    let mut sink = LogSink::new();
    let mut input = ScriptedSetpoint(vec![Err(SensorError::Malformed)].into());

    svc.check_selector(
        &mut ScriptedSelector::new([Ok(DisplayMode::Desired)]),
        &mut input,
        &mut MockDisplays::new(&call_log()),
        &mut sink,
    );

    assert_eq!(svc.environment().desired_temperature, 24.0);
    assert!(sink.contains(&AppEvent::SensorFault {
        sensor: "setpoint input",
        error: SensorError::Malformed,
    }));
}

#[test]
fn presented_temperature_follows_mode() {
    let log = call_log();
    let mut svc = service();
    let mut sink = LogSink::new();
    let mut display = MockDisplays::new(&log);

    svc.read_temperature(&mut ScriptedTemperature::new([Ok(19.5)]), &mut sink);
    svc.present(&mut display);
    svc.handle_command(AppCommand::ShowMode(DisplayMode::Desired), &mut sink);
    svc.present(&mut display);

    let shown: Vec<Call> = log
        .borrow()
        .iter()
        .filter(|c| matches!(c, Call::ShowTemperature(..)))
        .cloned()
        .collect();
    assert_eq!(
        shown,
        vec![
            Call::ShowTemperature(DisplayMode::Ambient, Some(19.5)),
            Call::ShowTemperature(DisplayMode::Desired, Some(24.0)),
        ]
    );
}

#[test]
fn set_desired_command() {
    let mut svc = service();
    let mut sink = LogSink::new();

    svc.handle_command(AppCommand::SetDesired(19.0), &mut sink);
    svc.handle_command(AppCommand::SetDesired(19.0), &mut sink);
    svc.handle_command(AppCommand::SetDesired(f64::NAN), &mut sink);
    svc.handle_command(AppCommand::Adjust(SetpointCommand::Decrease), &mut sink);

    assert_eq!(svc.environment().desired_temperature, 18.5);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::DesiredChanged { .. })),
        2
    );
}
