//! Periodic job scheduler.
//!
//! Every operator job runs serialized on the one worker that calls
//! [`Scheduler::tick`].  The scheduler only keeps time; it notifies a
//! [`SchedulerDelegate`] when a job is due and the runtime decides what to
//! do with it.
//!
//! ```text
//!   run loop ── sleep(tick_ms) ──▶ Scheduler::tick(elapsed_ms)
//!                                        │ due jobs, fixed order
//!                                        ▼
//!                              SchedulerDelegate::on_job_due
//!                                        │
//!                                        ▼
//!                 ThermostatService::{read_battery, read_temperature,
//!                                     actuate_climate, present,
//!                                     check_selector}
//! ```

use core::fmt;

use log::{debug, info};

use crate::app::ports::SchedulerDelegate;
use crate::config::TimingConfig;

// ═══════════════════════════════════════════════════════════════
//  Jobs
// ═══════════════════════════════════════════════════════════════

/// The periodic operator jobs, in the order they are reported when several
/// fall due on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    ReadBattery,
    ReadTemperature,
    ActuateClimate,
    Present,
    CheckSelector,
}

impl Job {
    pub const ALL: [Job; 5] = [
        Job::ReadBattery,
        Job::ReadTemperature,
        Job::ActuateClimate,
        Job::Present,
        Job::CheckSelector,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ReadBattery => "battery",
            Self::ReadTemperature => "temperature",
            Self::ActuateClimate => "climate",
            Self::Present => "present",
            Self::CheckSelector => "selector",
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
struct JobEntry {
    job: Job,
    interval_ms: u32,
    elapsed_ms: u64,
}

pub struct Scheduler {
    entries: [JobEntry; Job::ALL.len()],
}

impl Scheduler {
    pub fn new(timing: &TimingConfig) -> Self {
        let entries = Job::ALL.map(|job| JobEntry {
            job,
            interval_ms: match job {
                Job::ReadBattery => timing.battery_interval_ms,
                Job::ReadTemperature => timing.temperature_interval_ms,
                Job::ActuateClimate => timing.climate_interval_ms,
                Job::Present => timing.present_interval_ms,
                Job::CheckSelector => timing.selector_interval_ms,
            }
            .max(1),
            elapsed_ms: 0,
        });
        for e in &entries {
            info!("Scheduler: '{}' every {} ms", e.job, e.interval_ms);
        }
        Self { entries }
    }

    pub fn interval_ms(&self, job: Job) -> u32 {
        self.entries
            .iter()
            .find(|e| e.job == job)
            .map_or(0, |e| e.interval_ms)
    }

    /// Advance every job clock by `elapsed_ms` and report the due ones.
    ///
    /// A job fires at most once per tick.  After a stall longer than its
    /// interval the backlog is dropped rather than replayed.
    pub fn tick(&mut self, elapsed_ms: u64, delegate: &mut dyn SchedulerDelegate) {
        for entry in &mut self.entries {
            entry.elapsed_ms = entry.elapsed_ms.saturating_add(elapsed_ms);
            let interval = u64::from(entry.interval_ms);
            if entry.elapsed_ms < interval {
                continue;
            }

            entry.elapsed_ms -= interval;
            if entry.elapsed_ms >= interval {
                debug!(
                    "Scheduler: '{}' overran by {} ms, dropping backlog",
                    entry.job, entry.elapsed_ms
                );
                entry.elapsed_ms = 0;
            }
            delegate.on_job_due(entry.job);
        }
    }

    /// Restart every job clock from zero.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.elapsed_ms = 0;
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
