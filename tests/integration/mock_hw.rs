//! Mock peripherals for integration tests.
//!
//! Every actuator and display call is appended to one shared, ordered
//! [`CallLog`] so tests can assert on the full command history (and on the
//! interleaving of actuation and display) without any file or socket.
//! Sensors replay scripted readings.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use thermostat::adapters::{DisplayBank, Peripherals};
use thermostat::app::commands::SetpointCommand;
use thermostat::app::events::AppEvent;
use thermostat::app::ports::{
    BatteryDisplayPort, BatterySensorPort, ClimateActuatorPort, ClimateDisplayPort,
    DisplaySelectorPort, EventSink, SetpointInputPort, TemperatureDisplayPort,
    TemperatureSensorPort,
};
use thermostat::entities::{BatteryIndicator, DisplayMode};
use thermostat::error::{ActuatorError, SensorError};
use thermostat::fsm::{ClimateAction, ClimateState};

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Actuate(ClimateAction),
    ShowTemperature(DisplayMode, Option<f64>),
    ShowTension(Option<f64>),
    ShowIndicator(Option<BatteryIndicator>),
    ShowClimate(ClimateState),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

#[allow(dead_code)]
pub fn actuations(log: &CallLog) -> Vec<ClimateAction> {
    log.borrow()
        .iter()
        .filter_map(|c| match c {
            Call::Actuate(a) => Some(*a),
            _ => None,
        })
        .collect()
}

// ── Actuator ──────────────────────────────────────────────────

pub struct MockActuator {
    log: CallLog,
    /// When set, every call is recorded and then rejected with this error.
    pub fail_with: Option<ActuatorError>,
}

#[allow(dead_code)]
impl MockActuator {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: Rc::clone(log),
            fail_with: None,
        }
    }

    pub fn failing(log: &CallLog, error: ActuatorError) -> Self {
        Self {
            log: Rc::clone(log),
            fail_with: Some(error),
        }
    }
}

impl ClimateActuatorPort for MockActuator {
    fn actuate(&mut self, action: ClimateAction) -> Result<(), ActuatorError> {
        self.log.borrow_mut().push(Call::Actuate(action));
        match self.fail_with {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── Displays ──────────────────────────────────────────────────

pub struct MockDisplays {
    log: CallLog,
}

impl MockDisplays {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: Rc::clone(log),
        }
    }
}

impl TemperatureDisplayPort for MockDisplays {
    fn show_temperature(&mut self, mode: DisplayMode, celsius: Option<f64>) {
        self.log
            .borrow_mut()
            .push(Call::ShowTemperature(mode, celsius));
    }
}

impl BatteryDisplayPort for MockDisplays {
    fn show_tension(&mut self, level: Option<f64>) {
        self.log.borrow_mut().push(Call::ShowTension(level));
    }

    fn show_indicator(&mut self, indicator: Option<BatteryIndicator>) {
        self.log.borrow_mut().push(Call::ShowIndicator(indicator));
    }
}

impl ClimateDisplayPort for MockDisplays {
    fn show_climate_state(&mut self, state: ClimateState) {
        self.log.borrow_mut().push(Call::ShowClimate(state));
    }
}

// ── Scripted sensors ──────────────────────────────────────────

/// Replays `script`; once exhausted, repeats the last entry forever.
pub struct Script<T: Clone> {
    script: VecDeque<T>,
    last: Option<T>,
}

impl<T: Clone> Script<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            script: items.into_iter().collect(),
            last: None,
        }
    }

    fn next(&mut self) -> Option<T> {
        if let Some(item) = self.script.pop_front() {
            self.last = Some(item.clone());
        }
        self.last.clone()
    }
}

pub type ScriptedTemperature = Script<Result<f64, SensorError>>;
pub type ScriptedBattery = Script<Result<Option<f64>, SensorError>>;
pub type ScriptedSelector = Script<Result<DisplayMode, SensorError>>;

impl TemperatureSensorPort for ScriptedTemperature {
    fn read(&mut self) -> Result<f64, SensorError> {
        self.next().unwrap_or(Err(SensorError::Unavailable))
    }
}

impl BatterySensorPort for ScriptedBattery {
    fn read(&mut self) -> Result<Option<f64>, SensorError> {
        self.next().unwrap_or(Ok(None))
    }
}

impl DisplaySelectorPort for ScriptedSelector {
    fn selected_mode(&mut self) -> Result<DisplayMode, SensorError> {
        self.next().unwrap_or(Ok(DisplayMode::Ambient))
    }
}

/// Button presses, each consumed once.
pub struct ScriptedSetpoint(pub VecDeque<Result<SetpointCommand, SensorError>>);

#[allow(dead_code)]
impl ScriptedSetpoint {
    pub fn new(presses: impl IntoIterator<Item = SetpointCommand>) -> Self {
        Self(presses.into_iter().map(Ok).collect())
    }

    pub fn remaining(&self) -> usize {
        self.0.len()
    }
}

impl SetpointInputPort for ScriptedSetpoint {
    fn poll(&mut self) -> Result<Option<SetpointCommand>, SensorError> {
        self.0.pop_front().transpose()
    }
}

// ── Event sink ────────────────────────────────────────────────

/// Records every emitted event.  Cloning shares the record.
#[derive(Clone, Default)]
pub struct LogSink {
    pub events: Rc<RefCell<Vec<AppEvent>>>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.borrow().contains(event)
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

// ── Runtime bundle ────────────────────────────────────────────

#[allow(dead_code)]
pub fn peripherals(
    log: &CallLog,
    battery: ScriptedBattery,
    temperature: ScriptedTemperature,
    selector: ScriptedSelector,
    setpoint: ScriptedSetpoint,
) -> Peripherals {
    Peripherals {
        battery_sensor: Box::new(battery),
        temperature_sensor: Box::new(temperature),
        actuator: Box::new(MockActuator::new(log)),
        displays: DisplayBank {
            battery: Box::new(MockDisplays::new(log)),
            temperature: Box::new(MockDisplays::new(log)),
            climate: Box::new(MockDisplays::new(log)),
        },
        selector: Box::new(selector),
        setpoint_input: Box::new(setpoint),
    }
}
