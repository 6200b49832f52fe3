//! Countdown core for the Flip Timer widget.
//!
//! The engine owns remaining time and status, ticks once per second while
//! running, and survives page reloads through a persisted snapshot. The Yew
//! front end in `main.rs` only renders what the engine exposes and calls its
//! controls.

pub mod clock;
pub mod engine;
pub mod snapshot;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use clock::{Clock, SystemClock};
pub use engine::CountdownEngine;
pub use snapshot::{Snapshot, SnapshotError};
pub use storage::{KeyValueStore, LocalStore, MemoryStore};
pub use ticker::{IntervalTicker, Ticker};
pub use timer::{TimeParts, TimerState, TimerStatus};

/// Core timing constants
pub mod defaults {
    /// Local storage key holding the timer snapshot.
    pub const STORAGE_KEY: &str = "flip-timer-state";
    pub const TICK_INTERVAL_MS: u32 = 1000;
}

/// The engine as wired up in the browser.
pub type BrowserEngine = CountdownEngine<LocalStore, SystemClock, IntervalTicker>;
