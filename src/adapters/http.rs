//! HTTP visualizer: every value is POSTed as a small JSON document to the
//! web front-end.
//!
//! | Port call                      | Path                              | Body                     |
//! |--------------------------------|-----------------------------------|--------------------------|
//! | `show_temperature(Ambient, v)` | `/termostato/temperatura_ambiente` | `{"ambiente": v}`       |
//! | `show_temperature(Desired, v)` | `/termostato/temperatura_deseada` | `{"deseada": v}`         |
//! | `show_tension(v)`              | `/termostato/bateria`             | `{"tension": v}`         |
//! | `show_indicator(i)`            | `/termostato/indicador_bateria`   | `{"indicador": "LOW"}`   |
//! | `show_climate_state(s)`        | `/termostato/estado_climatizador` | `{"climatizador": "off"}` |
//!
//! An unknown value is sent as `null`.

use std::time::Duration;

use log::{debug, error, info, warn};
use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::app::ports::{BatteryDisplayPort, ClimateDisplayPort, TemperatureDisplayPort};
use crate::entities::{BatteryIndicator, DisplayMode};
use crate::error::{Error, Result};
use crate::fsm::ClimateState;

const HTTP_TIMEOUT: Duration = Duration::from_millis(500);

/// Fire-and-forget visualizer behind a web API.
pub struct HttpDisplay {
    client: Client,
    base_url: String,
    reachable: bool,
}

impl HttpDisplay {
    /// `base_url` is the scheme and authority, e.g. `http://localhost:5050`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| {
                error!("HTTP display: cannot build client: {}", e);
                Error::InvalidConfiguration("network.http_base_url")
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            reachable: true,
        })
    }

    /// `false` after the last POST failed.
    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    fn post(&mut self, path: &str, body: &Value) {
        let url = format!("{}/termostato/{}", self.base_url, path);
        let sent = self
            .client
            .post(&url)
            .json(body)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status);

        match sent {
            Ok(_) => {
                if !self.reachable {
                    info!("HTTP display {} back online", self.base_url);
                }
                debug!("HTTP display: POST {} {}", url, body);
                self.reachable = true;
            }
            Err(e) => {
                if self.reachable {
                    warn!("HTTP display: POST {} failed: {}", url, e);
                }
                self.reachable = false;
            }
        }
    }
}

impl TemperatureDisplayPort for HttpDisplay {
    fn show_temperature(&mut self, mode: DisplayMode, celsius: Option<f64>) {
        match mode {
            DisplayMode::Ambient => {
                self.post("temperatura_ambiente", &json!({ "ambiente": celsius }));
            }
            DisplayMode::Desired => {
                self.post("temperatura_deseada", &json!({ "deseada": celsius }));
            }
        }
    }
}

impl BatteryDisplayPort for HttpDisplay {
    fn show_tension(&mut self, level: Option<f64>) {
        self.post("bateria", &json!({ "tension": level }));
    }

    fn show_indicator(&mut self, indicator: Option<BatteryIndicator>) {
        let indicator = indicator.map(|i| i.to_string());
        self.post("indicador_bateria", &json!({ "indicador": indicator }));
    }
}

impl ClimateDisplayPort for HttpDisplay {
    fn show_climate_state(&mut self, state: ClimateState) {
        self.post(
            "estado_climatizador",
            &json!({ "climatizador": state.to_string() }),
        );
    }
}
