//! Integration tests for the comparator → climate device → actuator chain.
//!
//! Scenarios run through `ClimateController` and `ThermostatService`
//! against the recording mocks; no real device is involved.

use crate::mock_hw::{actuations, call_log, Call, LogSink, MockActuator, ScriptedTemperature};

use thermostat::app::climate::ClimateController;
use thermostat::app::events::AppEvent;
use thermostat::app::service::ThermostatService;
use thermostat::config::ThermostatConfig;
use thermostat::control::{compare, TemperatureVerdict};
use thermostat::entities::Environment;
use thermostat::error::{ActuatorError, Error};
use thermostat::fsm::{ClimateAction, ClimateDevice, ClimateState, DeviceVariant};

fn env(ambient: f64, desired: f64) -> Environment {
    Environment {
        ambient_temperature: Some(ambient),
        ..Environment::new(desired)
    }
}

fn controller(variant: DeviceVariant) -> ClimateController {
    ClimateController::new(ClimateDevice::new(variant, 2.0))
}

fn service(variant: DeviceVariant) -> ThermostatService {
    let mut config = ThermostatConfig::default();
    config.climate.device = variant;
    config.initial_desired_temperature = 22.0;
    ThermostatService::new(&config).unwrap()
}

// ── Concrete scenarios ────────────────────────────────────────

#[test]
fn cold_room_heats() {
    assert_eq!(compare(18.0, 22.0, 2.0), TemperatureVerdict::Low);

    let log = call_log();
    let mut ctl = controller(DeviceVariant::Full);
    let mut act = MockActuator::new(&log);

    assert_eq!(ctl.apply(&env(18.0, 22.0), &mut act), Ok(Some(ClimateAction::Heat)));
    assert_eq!(*log.borrow(), vec![Call::Actuate(ClimateAction::Heat)]);
    assert_eq!(ctl.state(), ClimateState::Heating);
}

#[test]
fn hot_room_cools() {
    assert_eq!(compare(28.0, 22.0, 2.0), TemperatureVerdict::High);

    let log = call_log();
    let mut ctl = controller(DeviceVariant::Full);
    let mut act = MockActuator::new(&log);

    ctl.apply(&env(28.0, 22.0), &mut act).unwrap();
    assert_eq!(actuations(&log), vec![ClimateAction::Cool]);
    assert_eq!(ctl.state(), ClimateState::Cooling);
}

#[test]
fn comfortable_room_stays_off() {
    assert_eq!(compare(22.0, 22.0, 2.0), TemperatureVerdict::Normal);

    let log = call_log();
    let mut ctl = controller(DeviceVariant::Full);
    let mut act = MockActuator::new(&log);

    assert_eq!(ctl.apply(&env(22.0, 22.0), &mut act), Ok(None));
    assert!(log.borrow().is_empty());
    assert_eq!(ctl.state(), ClimateState::Off);
}

#[test]
fn heater_only_ignores_hot_room() {
    let log = call_log();
    let mut ctl = controller(DeviceVariant::HeaterOnly);
    let mut act = MockActuator::new(&log);

    assert_eq!(ctl.device().decide_action(TemperatureVerdict::High), None);
    assert_eq!(ctl.apply(&env(28.0, 22.0), &mut act), Ok(None));
    assert!(log.borrow().is_empty());
    assert_eq!(ctl.state(), ClimateState::Off);
}

#[test]
fn full_round_trip_through_every_state() {
    let mut device = ClimateDevice::new(DeviceVariant::Full, 2.0);
    let steps = [
        (ClimateAction::Heat, ClimateState::Heating),
        (ClimateAction::Off, ClimateState::Off),
        (ClimateAction::Cool, ClimateState::Cooling),
        (ClimateAction::Off, ClimateState::Off),
    ];
    for (action, expected) in steps {
        assert_eq!(device.transition(action), Ok(expected));
        assert_eq!(device.state(), expected);
    }
}

#[test]
fn controller_follows_temperature_swings() {
    let log = call_log();
    let mut ctl = controller(DeviceVariant::Full);
    let mut act = MockActuator::new(&log);

    // cold → heat, in band twice (stays heating), hot → off, hot → cool,
    // cold → off, cold → heat
    for ambient in [18.0, 21.0, 23.0, 25.0, 25.0, 19.0, 19.0] {
        ctl.apply(&env(ambient, 22.0), &mut act).unwrap();
    }
    assert_eq!(
        actuations(&log),
        vec![
            ClimateAction::Heat,
            ClimateAction::Off,
            ClimateAction::Cool,
            ClimateAction::Off,
            ClimateAction::Heat,
        ]
    );
    assert_eq!(ctl.state(), ClimateState::Heating);
}

#[test]
fn heater_switches_off_once_comfortable() {
    let log = call_log();
    let mut ctl = controller(DeviceVariant::HeaterOnly);
    let mut act = MockActuator::new(&log);

    for ambient in [18.0, 19.0, 22.0, 22.0, 30.0] {
        ctl.apply(&env(ambient, 22.0), &mut act).unwrap();
    }
    assert_eq!(actuations(&log), vec![ClimateAction::Heat, ClimateAction::Off]);
    assert_eq!(ctl.state(), ClimateState::Off);
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn repeated_normal_verdicts_are_inert() {
    let log = call_log();
    let mut ctl = controller(DeviceVariant::Full);
    let mut act = MockActuator::new(&log);
    let snapshot = env(23.5, 22.0);

    for _ in 0..50 {
        assert_eq!(ctl.apply(&snapshot, &mut act), Ok(None));
    }
    assert!(log.borrow().is_empty());
    assert_eq!(ctl.state(), ClimateState::Off);
}

// ── Actuate-then-transition ordering ──────────────────────────

#[test]
fn failing_actuator_leaves_state_untouched() {
    let log = call_log();
    let mut ctl = controller(DeviceVariant::Full);
    let mut act = MockActuator::failing(&log, ActuatorError::Unreachable);

    for _ in 0..3 {
        assert_eq!(
            ctl.apply(&env(18.0, 22.0), &mut act),
            Err(Error::Actuator {
                action: ClimateAction::Heat,
                error: ActuatorError::Unreachable,
            })
        );
        assert_eq!(ctl.state(), ClimateState::Off);
    }
    // Retried every cycle, never recorded as done.
    assert_eq!(actuations(&log), vec![ClimateAction::Heat; 3]);

    act.fail_with = None;
    ctl.apply(&env(18.0, 22.0), &mut act).unwrap();
    assert_eq!(ctl.state(), ClimateState::Heating);
}

#[test]
fn service_reports_failed_actuation() {
    let log = call_log();
    let mut svc = service(DeviceVariant::Full);
    let mut sink = LogSink::new();
    let mut temp = ScriptedTemperature::new([Ok(17.0)]);
    let mut act = MockActuator::failing(&log, ActuatorError::WriteFailed);

    svc.read_temperature(&mut temp, &mut sink);
    assert_eq!(
        svc.actuate_climate(&mut act, &mut sink),
        Err(Error::Actuator {
            action: ClimateAction::Heat,
            error: ActuatorError::WriteFailed,
        })
    );

    assert!(sink.contains(&AppEvent::ActuationFailed {
        action: ClimateAction::Heat,
        error: ActuatorError::WriteFailed,
    }));
    assert_eq!(svc.climate_state(), ClimateState::Off);
}

#[test]
fn service_reports_successful_actuation() {
    let log = call_log();
    let mut svc = service(DeviceVariant::Full);
    let mut sink = LogSink::new();
    let mut temp = ScriptedTemperature::new([Ok(26.5)]);
    let mut act = MockActuator::new(&log);

    svc.read_temperature(&mut temp, &mut sink);
    assert_eq!(
        svc.actuate_climate(&mut act, &mut sink),
        Ok(Some(ClimateAction::Cool))
    );
    assert!(sink.contains(&AppEvent::ClimateActuated {
        action: ClimateAction::Cool,
        from: ClimateState::Off,
        to: ClimateState::Cooling,
    }));
}

// ── Unknown ambient ───────────────────────────────────────────

#[test]
fn unknown_ambient_skips_the_cycle() {
    let log = call_log();
    let mut svc = service(DeviceVariant::Full);
    let mut sink = LogSink::new();
    let mut act = MockActuator::new(&log);

    assert_eq!(svc.actuate_climate(&mut act, &mut sink), Ok(None));
    assert!(sink.contains(&AppEvent::ClimateSkipped));
    assert!(log.borrow().is_empty());
}

#[test]
fn sensor_failure_makes_ambient_unknown_again() {
    let log = call_log();
    let mut svc = service(DeviceVariant::Full);
    let mut sink = LogSink::new();
    let mut temp = ScriptedTemperature::new([
        Ok(18.0),
        Err(thermostat::error::SensorError::ReadFailed),
    ]);
    let mut act = MockActuator::new(&log);

    svc.read_temperature(&mut temp, &mut sink);
    svc.actuate_climate(&mut act, &mut sink).unwrap();
    svc.read_temperature(&mut temp, &mut sink);

    assert_eq!(svc.environment().ambient_temperature, None);
    assert_eq!(svc.actuate_climate(&mut act, &mut sink), Ok(None));
    assert_eq!(actuations(&log), vec![ClimateAction::Heat]);
    assert_eq!(sink.count(|e| *e == AppEvent::ClimateSkipped), 1);
}
