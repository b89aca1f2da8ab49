//! Thermostat: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  File / TCP / Simulated sensors    Console / TCP / HTTP / Log  │
//! │  File / Log / TCP climate actuator   displays · LogEventSink   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           ThermostatService (pure logic)               │    │
//! │  │  Comparator · ClimateDevice FSM · Battery · Setpoint   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (delegate-driven) · Thermostat runtime loop         │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `thermostat [CONFIG_PATH]` (default `termostato.json`).

use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use log::{info, warn};
use tracing_subscriber::prelude::*;

use thermostat::adapters::{AdapterFactory, LogEventSink};
use thermostat::config::{ConfigError, ThermostatConfig};
use thermostat::runtime::Thermostat;

const DEFAULT_CONFIG_PATH: &str = "termostato.json";

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(path: &str) -> Result<ThermostatConfig> {
    match ThermostatConfig::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound) => {
            warn!("Config file '{}' not found, using built-in defaults", path);
            Ok(ThermostatConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("loading configuration from '{path}'")),
    }
}

fn main() -> Result<()> {
    init_logging();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&path)?;
    info!(
        "Thermostat starting: device={} hysteresis={} desired={}",
        config.climate.device, config.climate.hysteresis, config.initial_desired_temperature
    );

    let peripherals = AdapterFactory::build(&config).context("building adapters")?;
    let mut thermostat = Thermostat::new(&config, peripherals, Box::new(LogEventSink::new()))
        .context("constructing thermostat")?;

    thermostat.startup().context("start-up check")?;

    // Never raised: the process runs until it is killed.
    let shutdown = AtomicBool::new(false);
    thermostat.run(&shutdown)?;
    Ok(())
}
