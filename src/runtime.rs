//! Runtime: binds the service, the configured peripherals and the
//! scheduler into one serialized operator loop.
//!
//! ```text
//!  startup() ──ok──▶ run(shutdown) ─┬─ sleep(tick_ms)
//!                                   ├─ Scheduler::tick(elapsed) → due jobs
//!                                   └─ run_job(job) for each, in order
//! ```
//!
//! Everything runs on the calling thread; jobs never overlap, so the
//! service needs no locking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{error, info, warn};

use crate::adapters::Peripherals;
use crate::app::ports::{EventSink, SchedulerDelegate};
use crate::app::service::ThermostatService;
use crate::config::ThermostatConfig;
use crate::error::{Error, Result};
use crate::scheduler::{Job, Scheduler};

/// Jobs that fell due on one tick.
type DueJobs = heapless::Vec<Job, { Job::ALL.len() }>;

struct Collector(DueJobs);

impl SchedulerDelegate for Collector {
    fn on_job_due(&mut self, job: Job) {
        if self.0.push(job).is_err() {
            warn!("Runtime: due-job list full, dropping '{}'", job);
        }
    }
}

pub struct Thermostat {
    service: ThermostatService,
    peripherals: Peripherals,
    sink: Box<dyn EventSink>,
    scheduler: Scheduler,
    tick: Duration,
    started: bool,
}

impl Thermostat {
    pub fn new(
        config: &ThermostatConfig,
        peripherals: Peripherals,
        sink: Box<dyn EventSink>,
    ) -> Result<Self> {
        Ok(Self {
            service: ThermostatService::new(config)?,
            peripherals,
            sink,
            scheduler: Scheduler::new(&config.timing),
            tick: Duration::from_millis(u64::from(config.timing.tick_ms.max(1))),
            started: false,
        })
    }

    pub fn service(&self) -> &ThermostatService {
        &self.service
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Run the start-up check.  Required before [`run`](Self::run).
    pub fn startup(&mut self) -> Result<()> {
        let p = &mut self.peripherals;
        self.service.startup(
            &mut p.battery_sensor,
            &mut p.temperature_sensor,
            &mut p.displays,
            &mut self.sink,
        )?;
        self.scheduler.reset();
        self.started = true;
        Ok(())
    }

    /// Run one job now.  Failures are logged; nothing is propagated.
    pub fn run_job(&mut self, job: Job) {
        let p = &mut self.peripherals;
        let sink = &mut self.sink;
        match job {
            Job::ReadBattery => self.service.read_battery(&mut p.battery_sensor, sink),
            Job::ReadTemperature => self.service.read_temperature(&mut p.temperature_sensor, sink),
            Job::ActuateClimate => {
                if let Err(e) = self.service.actuate_climate(&mut p.actuator, sink) {
                    error!("Runtime: climate job failed: {}", e);
                }
            }
            Job::Present => self.service.present(&mut p.displays),
            Job::CheckSelector => self.service.check_selector(
                &mut p.selector,
                &mut p.setpoint_input,
                &mut p.displays,
                sink,
            ),
        }
    }

    /// Advance the scheduler and run every job that fell due.
    pub fn tick(&mut self, elapsed_ms: u64) -> DueJobs {
        let mut due = Collector(DueJobs::new());
        self.scheduler.tick(elapsed_ms, &mut due);
        for &job in &due.0 {
            self.run_job(job);
        }
        due.0
    }

    /// Operator loop.  Returns once `shutdown` is raised.
    ///
    /// # Errors
    ///
    /// [`Error::NotReady`] if [`startup`](Self::startup) has not succeeded.
    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<()> {
        if !self.started {
            return Err(Error::NotReady("start-up check"));
        }
        info!("Runtime: operator loop running (tick {:?})", self.tick);

        let mut last = Instant::now();
        while !shutdown.load(Ordering::Relaxed) {
            std::thread::sleep(self.tick);
            let now = Instant::now();
            let elapsed = u64::try_from(now.duration_since(last).as_millis()).unwrap_or(u64::MAX);
            last = now;
            self.tick(elapsed);
        }

        info!("Runtime: shutdown requested");
        Ok(())
    }
}
