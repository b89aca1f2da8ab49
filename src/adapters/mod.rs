//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements                        | Connects to               |
//! |--------------|-----------------------------------|---------------------------|
//! | `file`       | Temperature/Battery sensor ports  | plain text files          |
//! |              | DisplaySelectorPort, SetpointInputPort |                      |
//! |              | ClimateActuatorPort               | command file              |
//! | `tcp`        | sensor ports (listening)          | remote producers          |
//! |              | display ports, ClimateActuatorPort| remote visualizer / device|
//! | `http`       | display ports                     | web API (JSON POST)       |
//! | `console`    | display ports                     | stdout                    |
//! | `log_sink`   | EventSink, ClimateActuatorPort,   | `log` facade              |
//! |              | display ports                     |                           |
//! | `simulated`  | sensor, selector and input ports  | in-process simulation     |
//! | `factory`    | -                                 | builds [`Peripherals`] from config |

pub mod console;
pub mod factory;
pub mod file;
pub mod http;
pub mod log_sink;
pub mod simulated;
pub mod tcp;

pub use factory::{AdapterFactory, DisplayBank, Peripherals};
pub use log_sink::LogEventSink;
