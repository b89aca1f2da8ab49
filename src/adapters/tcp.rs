//! TCP adapters.
//!
//! Sensors listen: a remote producer opens one short connection per value
//! and writes the number as UTF-8 text.  Displays and the actuator connect
//! out: one short-lived connection per message.
//!
//! ```text
//!   producer ──connect/"21.5"/close──▶ TcpValueSensor (listening, non-blocking)
//!   TcpDisplay ──connect/"ambient: 21.5"/close──▶ remote visualizer
//!   TcpActuator ──connect/"heat"/close──▶ remote climate device
//! ```

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::{debug, info, warn};

use crate::app::ports::{
    BatteryDisplayPort, BatterySensorPort, ClimateActuatorPort, ClimateDisplayPort,
    TemperatureDisplayPort, TemperatureSensorPort,
};
use crate::entities::{BatteryIndicator, DisplayMode};
use crate::error::{ActuatorError, SensorError};
use crate::fsm::{ClimateAction, ClimateState};

const IO_TIMEOUT: Duration = Duration::from_millis(250);

// ───────────────────────────────────────────────────────────────
// Listening sensor
// ───────────────────────────────────────────────────────────────

/// Accepts pushed readings and caches the most recent one.
pub struct TcpValueSensor {
    listener: TcpListener,
    last: Option<f64>,
}

impl TcpValueSensor {
    /// Bind a non-blocking listener.  Port `0` lets the OS pick one (see
    /// [`local_addr`](Self::local_addr)).
    pub fn bind(host: &str, port: u16) -> io::Result<Self> {
        let listener = TcpListener::bind((host, port))?;
        listener.set_nonblocking(true)?;
        info!("TCP sensor: listening on {}:{}", host, port);
        Ok(Self {
            listener,
            last: None,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn last(&self) -> Option<f64> {
        self.last
    }

    /// Drain every pending connection.  Returns the newest valid value
    /// received by this call, if any.
    pub fn poll(&mut self) -> Result<Option<f64>, SensorError> {
        let mut fresh = None;
        loop {
            match self.listener.accept() {
                Ok((stream, addr)) => match receive_value(stream) {
                    Ok(v) => {
                        debug!("TCP sensor: {} from {}", v, addr);
                        fresh = Some(v);
                    }
                    Err(e) => warn!("TCP sensor: bad payload from {}: {}", addr, e),
                },
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    warn!("TCP sensor: accept error: {}", e);
                    return Err(SensorError::ReadFailed);
                }
            }
        }
        if fresh.is_some() {
            self.last = fresh;
        }
        Ok(fresh)
    }
}

fn receive_value(mut stream: TcpStream) -> Result<f64, SensorError> {
    stream
        .set_nonblocking(false)
        .and_then(|()| stream.set_read_timeout(Some(IO_TIMEOUT)))
        .map_err(|_| SensorError::ReadFailed)?;
    let mut text = String::new();
    stream
        .read_to_string(&mut text)
        .map_err(|_| SensorError::ReadFailed)?;
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SensorError::Malformed),
    }
}

impl TemperatureSensorPort for TcpValueSensor {
    fn read(&mut self) -> Result<f64, SensorError> {
        self.poll()?;
        self.last.ok_or(SensorError::Unavailable)
    }
}

impl BatterySensorPort for TcpValueSensor {
    fn read(&mut self) -> Result<Option<f64>, SensorError> {
        self.poll()
    }
}

// ───────────────────────────────────────────────────────────────
// Outbound connections
// ───────────────────────────────────────────────────────────────

fn send(host: &str, port: u16, payload: &str) -> io::Result<()> {
    let addr = (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "host did not resolve"))?;
    let mut stream = TcpStream::connect_timeout(&addr, IO_TIMEOUT)?;
    stream.set_write_timeout(Some(IO_TIMEOUT))?;
    stream.write_all(payload.as_bytes())
}

/// Fire-and-forget visualizer on a remote socket.
pub struct TcpDisplay {
    host: String,
    port: u16,
    reachable: bool,
}

impl TcpDisplay {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            reachable: true,
        }
    }

    fn publish(&mut self, payload: &str) {
        match send(&self.host, self.port, payload) {
            Ok(()) => {
                if !self.reachable {
                    info!("TCP display {}:{} back online", self.host, self.port);
                }
                self.reachable = true;
            }
            Err(e) => {
                if self.reachable {
                    warn!("TCP display {}:{} unreachable: {}", self.host, self.port, e);
                }
                self.reachable = false;
            }
        }
    }
}

impl TemperatureDisplayPort for TcpDisplay {
    fn show_temperature(&mut self, mode: DisplayMode, celsius: Option<f64>) {
        let payload = match celsius {
            Some(c) => format!("{mode}: {c:.1}"),
            None => format!("{mode}: --"),
        };
        self.publish(&payload);
    }
}

impl BatteryDisplayPort for TcpDisplay {
    fn show_tension(&mut self, level: Option<f64>) {
        let payload = match level {
            Some(v) => format!("battery: {v:.2}"),
            None => "battery: --".to_string(),
        };
        self.publish(&payload);
    }

    fn show_indicator(&mut self, indicator: Option<BatteryIndicator>) {
        let payload = match indicator {
            Some(i) => format!("indicator: {i}"),
            None => "indicator: --".to_string(),
        };
        self.publish(&payload);
    }
}

impl ClimateDisplayPort for TcpDisplay {
    fn show_climate_state(&mut self, state: ClimateState) {
        self.publish(&format!("climate: {state}"));
    }
}

/// Sends the action name to a remote climate device.
pub struct TcpActuator {
    host: String,
    port: u16,
}

impl TcpActuator {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl ClimateActuatorPort for TcpActuator {
    fn actuate(&mut self, action: ClimateAction) -> Result<(), ActuatorError> {
        send(&self.host, self.port, action.as_str()).map_err(|e| {
            warn!("TCP actuator {}:{}: {}", self.host, self.port, e);
            match e.kind() {
                io::ErrorKind::ConnectionRefused
                | io::ErrorKind::TimedOut
                | io::ErrorKind::NotFound => ActuatorError::Unreachable,
                _ => ActuatorError::WriteFailed,
            }
        })
    }
}
