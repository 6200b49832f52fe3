//! Timer data model: lifecycle status, the central `TimerState`, and the
//! days/hours/minutes/seconds decomposition used by every display.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Lifecycle state of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Complete,
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// A duration split into display units.
///
/// Produced from a single second counter by fixed divisors, so the parts
/// always add back up to the counter they came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeParts {
    pub fn new(days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Decompose a second counter; integer truncation only.
    pub fn from_total(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    /// `days*86400 + hours*3600 + minutes*60 + seconds`, saturating at `u64::MAX`.
    pub fn total_seconds(&self) -> u64 {
        self.days
            .saturating_mul(SECONDS_PER_DAY)
            .saturating_add(self.hours.saturating_mul(SECONDS_PER_HOUR))
            .saturating_add(self.minutes.saturating_mul(SECONDS_PER_MINUTE))
            .saturating_add(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }
}

/// The canonical countdown state owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub status: TimerStatus,
    /// Seconds left. Authoritative unless `status` is `Running`.
    pub remaining_seconds: u64,
    /// Absolute deadline in epoch milliseconds, only set while running.
    pub target_epoch_millis: Option<u64>,
    pub initial_total_seconds: u64,
}

impl TimerState {
    /// Fresh idle state for a configured duration.
    pub fn idle(total_seconds: u64) -> Self {
        Self {
            status: TimerStatus::Idle,
            remaining_seconds: total_seconds,
            target_epoch_millis: None,
            initial_total_seconds: total_seconds,
        }
    }

    pub fn complete(initial_total_seconds: u64) -> Self {
        Self {
            status: TimerStatus::Complete,
            remaining_seconds: 0,
            target_epoch_millis: None,
            initial_total_seconds,
        }
    }

    pub fn parts(&self) -> TimeParts {
        TimeParts::from_total(self.remaining_seconds)
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }

    pub fn is_complete(&self) -> bool {
        self.status == TimerStatus::Complete
    }
}
