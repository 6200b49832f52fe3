//! Persisted snapshot format and reload recovery.
//!
//! A snapshot is one JSON record stored under a fixed key:
//!
//! ```text
//! {
//!   "status": "idle" | "running" | "paused" | "complete",
//!   "targetTime": <epoch ms> | null,
//!   "remainingTime": <whole seconds>,
//!   "initialTotalSeconds": <whole seconds>
//! }
//! ```
//!
//! Recovery never fails: anything that cannot be trusted is discarded and the
//! timer starts fresh from the configured duration.

use crate::timer::{TimerState, TimerStatus};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialized form of [`TimerState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub status: TimerStatus,
    #[serde(default)]
    pub target_time: Option<u64>,
    pub remaining_time: u64,
    pub initial_total_seconds: u64,
}

#[derive(Debug)]
pub enum SnapshotError {
    /// Not JSON, wrong field types, negative or fractional numbers, unknown status.
    Decode(serde_json::Error),
    Encode(serde_json::Error),
    /// A running snapshot has no deadline to recompute from.
    MissingTarget,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Decode(e) => write!(f, "Failed to parse timer snapshot: {}", e),
            SnapshotError::Encode(e) => write!(f, "Failed to serialize timer snapshot: {}", e),
            SnapshotError::MissingTarget => {
                write!(f, "Running timer snapshot has no target time")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<&TimerState> for Snapshot {
    fn from(state: &TimerState) -> Self {
        let running = state.status == TimerStatus::Running;
        Snapshot {
            status: state.status,
            target_time: if running { state.target_epoch_millis } else { None },
            remaining_time: if state.status == TimerStatus::Complete {
                0
            } else {
                state.remaining_seconds
            },
            initial_total_seconds: state.initial_total_seconds,
        }
    }
}

impl Snapshot {
    pub fn decode(raw: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(raw).map_err(SnapshotError::Decode)
    }

    pub fn encode(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(SnapshotError::Encode)
    }

    /// Rebuild live state at wall-clock time `now_ms`.
    ///
    /// Returns `Ok(None)` for snapshots that carry nothing worth restoring
    /// (an idle record), letting the caller fall back to its configured duration.
    pub fn restore_at(&self, now_ms: u64) -> Result<Option<TimerState>, SnapshotError> {
        match self.status {
            TimerStatus::Running => {
                let target = self.target_time.ok_or(SnapshotError::MissingTarget)?;
                let remaining = seconds_until(target, now_ms);
                if remaining > 0 {
                    Ok(Some(TimerState {
                        status: TimerStatus::Running,
                        remaining_seconds: remaining,
                        target_epoch_millis: Some(target),
                        initial_total_seconds: self.initial_total_seconds,
                    }))
                } else {
                    Ok(Some(TimerState::complete(self.initial_total_seconds)))
                }
            }
            TimerStatus::Paused => Ok(Some(TimerState {
                status: TimerStatus::Paused,
                remaining_seconds: self.remaining_time,
                target_epoch_millis: None,
                initial_total_seconds: self.initial_total_seconds,
            })),
            TimerStatus::Complete => Ok(Some(TimerState::complete(self.initial_total_seconds))),
            TimerStatus::Idle => Ok(None),
        }
    }
}

/// `ceil((target - now) / 1000)`, or zero once the deadline has passed.
pub fn seconds_until(target_ms: u64, now_ms: u64) -> u64 {
    target_ms.saturating_sub(now_ms).div_ceil(1000)
}

/// Initial state for a page load: the persisted snapshot if it can be trusted,
/// otherwise a fresh idle timer of `configured_total` seconds.
pub fn restore(raw: Option<&str>, configured_total: u64, now_ms: u64) -> TimerState {
    let Some(raw) = raw else {
        return TimerState::idle(configured_total);
    };

    match Snapshot::decode(raw).and_then(|snapshot| snapshot.restore_at(now_ms)) {
        Ok(Some(state)) => {
            info!(
                "Restored {} timer with {}s remaining",
                state.status, state.remaining_seconds
            );
            state
        }
        Ok(None) => {
            debug!("Idle snapshot found, starting from configured duration");
            TimerState::idle(configured_total)
        }
        Err(e) => {
            warn!("Discarding timer snapshot: {}", e);
            TimerState::idle(configured_total)
        }
    }
}
