//! File adapters: every value lives in its own small text file.
//!
//! | Adapter               | Port                  | File content            |
//! |-----------------------|-----------------------|-------------------------|
//! | `FileTemperatureSensor` | TemperatureSensorPort | `21.5`                |
//! | `FileBatterySensor`   | BatterySensorPort     | `4.80` (empty = no data) |
//! | `FileDisplaySelector` | DisplaySelectorPort   | `ambient` / `desired`   |
//! | `FileSetpointInput`   | SetpointInputPort     | `increase` / `decrease`, consumed |
//! | `FileClimateActuator` | ClimateActuatorPort   | `heat` / `cool` / `off`, overwritten |

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::app::commands::SetpointCommand;
use crate::app::ports::{
    BatterySensorPort, ClimateActuatorPort, DisplaySelectorPort, SetpointInputPort,
    TemperatureSensorPort,
};
use crate::entities::DisplayMode;
use crate::error::{ActuatorError, SensorError};
use crate::fsm::ClimateAction;

fn read_text(path: &Path) -> Result<String, SensorError> {
    fs::read_to_string(path).map_err(|e| {
        warn!("File: cannot read {}: {}", path.display(), e);
        SensorError::ReadFailed
    })
}

fn parse_number(path: &Path, text: &str) -> Result<f64, SensorError> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => {
            warn!("File: {} holds '{}', not a number", path.display(), text.trim());
            Err(SensorError::Malformed)
        }
    }
}

// ── Sensors ───────────────────────────────────────────────────

pub struct FileTemperatureSensor {
    path: PathBuf,
}

impl FileTemperatureSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemperatureSensorPort for FileTemperatureSensor {
    fn read(&mut self) -> Result<f64, SensorError> {
        let text = read_text(&self.path)?;
        parse_number(&self.path, &text)
    }
}

pub struct FileBatterySensor {
    path: PathBuf,
}

impl FileBatterySensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BatterySensorPort for FileBatterySensor {
    fn read(&mut self) -> Result<Option<f64>, SensorError> {
        let text = read_text(&self.path)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        parse_number(&self.path, &text).map(Some)
    }
}

// ── Selector ──────────────────────────────────────────────────

pub struct FileDisplaySelector {
    path: PathBuf,
}

impl FileDisplaySelector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DisplaySelectorPort for FileDisplaySelector {
    fn selected_mode(&mut self) -> Result<DisplayMode, SensorError> {
        let text = read_text(&self.path)?;
        match text.trim().to_ascii_lowercase().as_str() {
            "ambient" | "ambiente" => Ok(DisplayMode::Ambient),
            "desired" | "deseada" => Ok(DisplayMode::Desired),
            other => {
                warn!("Selector: unknown mode '{}'", other);
                Err(SensorError::Malformed)
            }
        }
    }
}

// ── Setpoint input ────────────────────────────────────────────

/// One command per write; the file is emptied once it has been read.
pub struct FileSetpointInput {
    path: PathBuf,
}

impl FileSetpointInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SetpointInputPort for FileSetpointInput {
    fn poll(&mut self) -> Result<Option<SetpointCommand>, SensorError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                warn!("Setpoint: cannot read {}: {}", self.path.display(), e);
                return Err(SensorError::ReadFailed);
            }
        };
        if text.trim().is_empty() {
            return Ok(None);
        }

        if let Err(e) = fs::write(&self.path, "") {
            warn!("Setpoint: cannot clear {}: {}", self.path.display(), e);
        }
        SetpointCommand::parse(&text)
            .map(Some)
            .ok_or(SensorError::Malformed)
    }
}

// ── Actuator ──────────────────────────────────────────────────

/// Writes the requested action to the climate device's command file.
pub struct FileClimateActuator {
    path: PathBuf,
}

impl FileClimateActuator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClimateActuatorPort for FileClimateActuator {
    fn actuate(&mut self, action: ClimateAction) -> Result<(), ActuatorError> {
        fs::write(&self.path, action.as_str()).map_err(|e| {
            warn!("Actuator: cannot write {}: {}", self.path.display(), e);
            ActuatorError::WriteFailed
        })
    }
}
