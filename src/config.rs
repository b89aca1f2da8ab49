//! Thermostat configuration.
//!
//! Loaded once from a JSON file (`termostato.json` by default) and passed by
//! reference into every constructor.  Every section is optional in the file;
//! missing sections and fields fall back to [`Default`].
//!
//! ```json
//! {
//!   "climate":  { "device": "heater_only", "hysteresis": 1.5 },
//!   "battery":  { "max_capacity": 5.0, "low_threshold_fraction": 0.95 },
//!   "adapters": { "temperature_sensor": "tcp", "climate_display": "console" },
//!   "timing":   { "climate_interval_ms": 3000 }
//! }
//! ```

use core::fmt;
use std::io;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::control::DEFAULT_HYSTERESIS;
use crate::fsm::DeviceVariant;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file does not exist.
    NotFound,
    /// The file exists but could not be read.
    Io,
    /// The file is not valid configuration JSON.
    Corrupted,
    /// A value is outside its valid domain.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "configuration file not found"),
            Self::Io => write!(f, "configuration file unreadable"),
            Self::Corrupted => write!(f, "configuration file corrupted"),
            Self::ValidationFailed(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    pub device: DeviceVariant,
    /// Half-width of the comfort band, °C.
    pub hysteresis: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            device: DeviceVariant::Full,
            hysteresis: DEFAULT_HYSTERESIS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    /// Full-charge tension.
    pub max_capacity: f64,
    /// Fraction of `max_capacity` at or below which the battery is LOW.
    pub low_threshold_fraction: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            max_capacity: 5.0,
            low_threshold_fraction: 0.8,
        }
    }
}

/// Where a sensor reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    File,
    Tcp,
    #[default]
    Simulated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorKind {
    /// Writes the action to `files.climate`.
    File,
    #[default]
    Log,
    Tcp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    #[default]
    Console,
    Tcp,
    /// POSTs JSON to `network.http_base_url`.
    Http,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    File,
    /// Always shows the ambient temperature.
    #[default]
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetpointInputKind {
    File,
    #[default]
    None,
}

/// Adapter selection, one kind per port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    pub battery_sensor: SensorKind,
    pub temperature_sensor: SensorKind,
    pub climate_actuator: ActuatorKind,
    pub temperature_display: DisplayKind,
    pub battery_display: DisplayKind,
    pub climate_display: DisplayKind,
    pub display_selector: SelectorKind,
    pub setpoint_input: SetpointInputKind,
}

/// Paths used by the file adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub battery: String,
    pub temperature: String,
    pub display_mode: String,
    pub setpoint: String,
    /// Command file written by the file actuator.
    pub climate: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            battery: "bateria".into(),
            temperature: "temperatura".into(),
            display_mode: "tipo_temperatura".into(),
            setpoint: "seteo".into(),
            climate: "climatizador".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub host: String,
    pub battery_sensor_port: u16,
    pub temperature_sensor_port: u16,
    pub battery_display_port: u16,
    pub temperature_display_port: u16,
    pub climate_display_port: u16,
    pub climate_actuator_port: u16,
    /// Web front-end used by the HTTP visualizers.
    pub http_base_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            battery_sensor_port: 11000,
            temperature_sensor_port: 12000,
            battery_display_port: 14000,
            temperature_display_port: 14001,
            climate_display_port: 14002,
            climate_actuator_port: 14003,
            http_base_url: "http://localhost:5050".into(),
        }
    }
}

/// Parameters of the simulated sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub base_temperature: f64,
    /// Peak deviation from `base_temperature`, °C.
    pub drift_amplitude: f64,
    /// Reads per full up-and-down cycle.
    pub drift_period_ticks: u32,
    pub battery_level: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            base_temperature: 22.0,
            drift_amplitude: 4.0,
            drift_period_ticks: 40,
            battery_level: 4.5,
        }
    }
}

/// Periods of the operator jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub battery_interval_ms: u32,
    pub temperature_interval_ms: u32,
    pub climate_interval_ms: u32,
    pub present_interval_ms: u32,
    pub selector_interval_ms: u32,
    /// Sleep between scheduler ticks.
    pub tick_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            battery_interval_ms: 1000,
            temperature_interval_ms: 2000,
            climate_interval_ms: 5000,
            present_interval_ms: 5000,
            selector_interval_ms: 5000,
            tick_ms: 100,
        }
    }
}

impl TimingConfig {
    fn intervals(&self) -> [u32; 5] {
        [
            self.battery_interval_ms,
            self.temperature_interval_ms,
            self.climate_interval_ms,
            self.present_interval_ms,
            self.selector_interval_ms,
        ]
    }
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermostatConfig {
    pub climate: ClimateConfig,
    pub battery: BatteryConfig,
    /// Setpoint applied by the start-up check.
    pub initial_desired_temperature: f64,
    /// Setpoint change per increase / decrease command.
    pub setpoint_step: f64,
    pub adapters: AdapterConfig,
    pub files: FileConfig,
    pub network: NetworkConfig,
    pub simulation: SimulationConfig,
    pub timing: TimingConfig,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            climate: ClimateConfig::default(),
            battery: BatteryConfig::default(),
            initial_desired_temperature: 24.0,
            setpoint_step: 1.0,
            adapters: AdapterConfig::default(),
            files: FileConfig::default(),
            network: NetworkConfig::default(),
            simulation: SimulationConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl ThermostatConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            warn!("Config: parse error: {}", e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound
            } else {
                warn!("Config: cannot read {}: {}", path.display(), e);
                ConfigError::Io
            }
        })?;
        let config = Self::from_json_str(&text)?;
        info!("Config: loaded {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = self.climate.hysteresis;
        if !h.is_finite() || h < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "climate.hysteresis must be a finite value >= 0",
            ));
        }
        if !self.battery.max_capacity.is_finite() || self.battery.max_capacity <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "battery.max_capacity must be > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.battery.low_threshold_fraction) {
            return Err(ConfigError::ValidationFailed(
                "battery.low_threshold_fraction must be within [0, 1]",
            ));
        }
        if !self.initial_desired_temperature.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "initial_desired_temperature must be finite",
            ));
        }
        if !self.setpoint_step.is_finite() || self.setpoint_step <= 0.0 {
            return Err(ConfigError::ValidationFailed("setpoint_step must be > 0"));
        }
        let url = &self.network.http_base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed(
                "network.http_base_url must start with http:// or https://",
            ));
        }
        if self.simulation.drift_period_ticks == 0 {
            return Err(ConfigError::ValidationFailed(
                "simulation.drift_period_ticks must be > 0",
            ));
        }
        let intervals = self.timing.intervals();
        if intervals.contains(&0) {
            return Err(ConfigError::ValidationFailed(
                "timing intervals must be > 0",
            ));
        }
        let shortest = intervals.iter().copied().min().unwrap_or(u32::MAX);
        if self.timing.tick_ms == 0 || self.timing.tick_ms > shortest {
            return Err(ConfigError::ValidationFailed(
                "timing.tick_ms must be 1..=shortest interval",
            ));
        }
        Ok(())
    }
}
