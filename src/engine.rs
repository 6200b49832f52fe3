//! Countdown engine: the single owner of remaining time and timer status.
//!
//! The engine is a synchronous state machine. Storage, wall clock and the
//! one-second schedule are injected, so it runs the same in the browser and
//! in native tests.
//!
//! ```text
//! idle --start--> running --pause--> paused --resume--> running
//! running --tick(0)--> complete
//! any --reset--> idle
//! idle | paused | complete --set_time--> idle | running
//! ```
//!
//! Operations that do not apply to the current status are ignored.

use crate::clock::Clock;
use crate::snapshot::{self, Snapshot};
use crate::storage::KeyValueStore;
use crate::ticker::Ticker;
use crate::timer::{TimeParts, TimerState, TimerStatus};
use log::{debug, info, warn};

pub struct CountdownEngine<S, C, T> {
    state: TimerState,
    store: S,
    clock: C,
    ticker: T,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl<S, C, T> CountdownEngine<S, C, T>
where
    S: KeyValueStore,
    C: Clock,
    T: Ticker,
{
    /// Boot from the persisted snapshot, or from `configured_total` seconds
    /// when there is none (or it cannot be trusted). A restored running timer
    /// starts ticking immediately.
    pub fn initialize(configured_total: u64, store: S, clock: C, ticker: T) -> Self {
        let raw = store.load();
        let state = snapshot::restore(raw.as_deref(), configured_total, clock.now_ms());
        let mut engine = Self {
            state,
            store,
            clock,
            ticker,
            on_complete: None,
        };
        if engine.state.is_running() {
            engine.ticker.arm();
        }
        engine
    }

    /// Callback invoked once each time a running countdown reaches zero.
    pub fn with_on_complete(mut self, on_complete: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn status(&self) -> TimerStatus {
        self.state.status
    }

    pub fn parts(&self) -> TimeParts {
        self.state.parts()
    }

    pub fn total_seconds(&self) -> u64 {
        self.state.remaining_seconds
    }

    pub fn initial_total_seconds(&self) -> u64 {
        self.state.initial_total_seconds
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    // ── Controls ─────────────────────────────────────────────────────

    pub fn start(&mut self) {
        if self.state.status != TimerStatus::Idle {
            debug!("Ignoring start while {}", self.state.status);
            return;
        }
        if self.state.remaining_seconds == 0 {
            debug!("Ignoring start with no time set");
            return;
        }
        self.run();
    }

    pub fn pause(&mut self) {
        if !self.state.is_running() {
            debug!("Ignoring pause while {}", self.state.status);
            return;
        }
        self.transition(TimerState {
            status: TimerStatus::Paused,
            target_epoch_millis: None,
            ..self.state
        });
        self.persist();
        info!("Paused with {}s remaining", self.state.remaining_seconds);
    }

    pub fn resume(&mut self) {
        if !self.state.is_paused() || self.state.remaining_seconds == 0 {
            debug!("Ignoring resume while {}", self.state.status);
            return;
        }
        self.run();
    }

    pub fn reset(&mut self) {
        self.transition(TimerState::idle(self.state.initial_total_seconds));
        self.store.clear();
        info!("Reset to {}s", self.state.initial_total_seconds);
    }

    /// Configure a new duration. Inputs are expected to be validated by the
    /// caller; unnormalized values (e.g. 90 minutes) are accepted as-is.
    pub fn set_time(&mut self, days: u64, hours: u64, minutes: u64, seconds: u64, auto_start: bool) {
        if self.state.is_running() {
            debug!("Ignoring set_time while running");
            return;
        }
        let total = TimeParts::new(days, hours, minutes, seconds).total_seconds();
        self.transition(TimerState::idle(total));
        if auto_start && total > 0 {
            self.run();
        } else {
            self.store.clear();
            info!("Timer set to {}s", total);
        }
    }

    /// One elapsed second. Ticks that arrive outside `running` are stale and
    /// dropped.
    pub fn tick(&mut self) {
        if !self.state.is_running() {
            debug!("Dropping stale tick while {}", self.state.status);
            return;
        }

        let next = self.state.remaining_seconds.saturating_sub(1);
        if next > 0 {
            self.state.remaining_seconds = next;
            return;
        }

        self.transition(TimerState::complete(self.state.initial_total_seconds));
        self.persist();
        info!("Countdown complete");
        if let Some(on_complete) = self.on_complete.as_mut() {
            on_complete();
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Enter `running` with a deadline computed from the current remaining time.
    fn run(&mut self) {
        let target = self
            .clock
            .now_ms()
            .saturating_add(self.state.remaining_seconds.saturating_mul(1000));
        self.transition(TimerState {
            status: TimerStatus::Running,
            target_epoch_millis: Some(target),
            ..self.state
        });
        self.persist();
        info!("Running with {}s remaining", self.state.remaining_seconds);
    }

    /// Every status change goes through here: the pending tick is cancelled
    /// before the state is replaced, and a new schedule is armed only when
    /// the new status is `running`.
    fn transition(&mut self, next: TimerState) {
        self.ticker.disarm();
        self.state = next;
        if self.state.is_running() {
            self.ticker.arm();
        }
    }

    fn persist(&mut self) {
        match Snapshot::from(&self.state).encode() {
            Ok(json) => self.store.save(&json),
            Err(e) => warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::Cell;
    use std::rc::Rc;

    const T0: u64 = 1_700_000_000_000;

    #[derive(Clone)]
    struct ManualClock(Rc<Cell<u64>>);

    impl ManualClock {
        fn at(ms: u64) -> Self {
            Self(Rc::new(Cell::new(ms)))
        }

        fn advance(&self, ms: u64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
    }

    /// Records scheduling instead of running it; tests deliver ticks by hand.
    #[derive(Clone, Default)]
    struct ManualTicker {
        armed: Rc<Cell<bool>>,
        arm_count: Rc<Cell<usize>>,
        live_streams: Rc<Cell<usize>>,
    }

    impl Ticker for ManualTicker {
        fn arm(&mut self) {
            self.disarm();
            self.armed.set(true);
            self.arm_count.set(self.arm_count.get() + 1);
            self.live_streams.set(self.live_streams.get() + 1);
        }

        fn disarm(&mut self) {
            if self.armed.replace(false) {
                self.live_streams.set(self.live_streams.get() - 1);
            }
        }

        fn is_armed(&self) -> bool {
            self.armed.get()
        }
    }

    type TestEngine = CountdownEngine<MemoryStore, ManualClock, ManualTicker>;

    struct Harness {
        store: MemoryStore,
        clock: ManualClock,
        ticker: ManualTicker,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                store: MemoryStore::new(),
                clock: ManualClock::at(T0),
                ticker: ManualTicker::default(),
            }
        }

        fn with_snapshot(raw: &str) -> Self {
            Self {
                store: MemoryStore::with_value(raw),
                ..Self::new()
            }
        }

        fn boot(&self, configured_total: u64) -> TestEngine {
            CountdownEngine::initialize(
                configured_total,
                self.store.clone(),
                self.clock.clone(),
                self.ticker.clone(),
            )
        }

        fn stored(&self) -> Option<Snapshot> {
            self.store.load().map(|raw| Snapshot::decode(&raw).unwrap())
        }
    }

    fn assert_total_identity(engine: &TestEngine) {
        let p = engine.parts();
        assert_eq!(
            engine.total_seconds(),
            p.days * 86_400 + p.hours * 3_600 + p.minutes * 60 + p.seconds
        );
    }

    #[test]
    fn fresh_boot_is_idle_with_configured_duration() {
        let h = Harness::new();
        let engine = h.boot(1_500);
        assert_eq!(engine.status(), TimerStatus::Idle);
        assert_eq!(engine.total_seconds(), 1_500);
        assert_eq!(engine.initial_total_seconds(), 1_500);
        assert_eq!(engine.parts(), TimeParts::new(0, 0, 25, 0));
        assert!(!engine.ticker().is_armed());
    }

    #[test]
    fn set_time_round_trips_through_derived_fields() {
        let h = Harness::new();
        let mut engine = h.boot(0);
        for (d, hr, m, s) in [(0, 0, 0, 1), (1, 2, 3, 4), (0, 23, 59, 59), (99, 0, 0, 0), (365, 12, 30, 45)] {
            engine.set_time(d, hr, m, s, false);
            assert_eq!(engine.parts(), TimeParts::new(d, hr, m, s));
            assert_eq!(engine.status(), TimerStatus::Idle);
            assert_total_identity(&engine);
        }
    }

    #[test]
    fn total_identity_holds_after_every_operation() {
        let h = Harness::new();
        let mut engine = h.boot(0);
        engine.set_time(1, 1, 1, 3, false);
        assert_total_identity(&engine);
        engine.start();
        assert_total_identity(&engine);
        engine.tick();
        assert_total_identity(&engine);
        engine.pause();
        assert_total_identity(&engine);
        engine.resume();
        assert_total_identity(&engine);
        engine.reset();
        assert_total_identity(&engine);
    }

    #[test]
    fn start_persists_a_running_snapshot_with_a_deadline() {
        let h = Harness::new();
        let mut engine = h.boot(90);
        engine.start();

        assert_eq!(engine.status(), TimerStatus::Running);
        assert!(engine.ticker().is_armed());
        assert_eq!(engine.state().target_epoch_millis, Some(T0 + 90_000));

        let stored = h.stored().unwrap();
        assert_eq!(stored.status, TimerStatus::Running);
        assert_eq!(stored.target_time, Some(T0 + 90_000));
        assert_eq!(stored.initial_total_seconds, 90);
    }

    #[test]
    fn start_pause_resume_within_a_tick_keeps_remaining() {
        let h = Harness::new();
        let mut engine = h.boot(45);
        engine.start();
        engine.pause();
        engine.resume();

        assert_eq!(engine.status(), TimerStatus::Running);
        assert_eq!(engine.total_seconds(), 45);
    }

    #[test]
    fn pause_freezes_the_decremented_value() {
        let h = Harness::new();
        let mut engine = h.boot(10);
        engine.start();
        engine.tick();
        engine.tick();
        h.clock.advance(2_000);
        engine.pause();

        assert_eq!(engine.status(), TimerStatus::Paused);
        assert_eq!(engine.total_seconds(), 8);
        assert!(!engine.ticker().is_armed());

        let stored = h.stored().unwrap();
        assert_eq!(stored.status, TimerStatus::Paused);
        assert_eq!(stored.remaining_time, 8);
        assert_eq!(stored.target_time, None);
    }

    #[test]
    fn resume_recomputes_the_deadline() {
        let h = Harness::new();
        let mut engine = h.boot(10);
        engine.start();
        engine.pause();
        h.clock.advance(60_000);
        engine.resume();

        assert_eq!(engine.state().target_epoch_millis, Some(T0 + 60_000 + 10_000));
        assert_eq!(h.stored().unwrap().target_time, Some(T0 + 70_000));
    }

    #[test]
    fn invalid_operations_are_ignored() {
        let h = Harness::new();
        let mut engine = h.boot(30);

        engine.pause();
        engine.resume();
        engine.tick();
        assert_eq!(*engine.state(), TimerState::idle(30));
        assert_eq!(h.stored(), None);

        engine.start();
        let running = *engine.state();
        engine.start();
        engine.resume();
        engine.set_time(0, 0, 5, 0, false);
        assert_eq!(*engine.state(), running);
    }

    #[test]
    fn repeated_arming_never_leaves_two_tick_streams() {
        let h = Harness::new();
        let mut engine = h.boot(30);
        engine.start();
        engine.pause();
        engine.resume();
        engine.pause();
        engine.resume();

        assert_eq!(h.ticker.arm_count.get(), 3);
        assert_eq!(h.ticker.live_streams.get(), 1);

        engine.reset();
        assert_eq!(h.ticker.live_streams.get(), 0);
    }

    #[test]
    fn reset_always_returns_to_the_initial_duration() {
        let h = Harness::new();
        let mut engine = h.boot(0);
        engine.set_time(0, 0, 0, 5, true);

        for _ in 0..3 {
            engine.tick();
        }
        engine.reset();
        assert_eq!(*engine.state(), TimerState::idle(5));
        assert_eq!(h.stored(), None);
        assert!(!engine.ticker().is_armed());

        engine.start();
        engine.pause();
        engine.reset();
        assert_eq!(*engine.state(), TimerState::idle(5));

        engine.start();
        for _ in 0..5 {
            engine.tick();
        }
        assert!(engine.state().is_complete());
        engine.reset();
        assert_eq!(*engine.state(), TimerState::idle(5));
    }

    #[test]
    fn completion_fires_the_callback_exactly_once() {
        let h = Harness::new();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut engine = h.boot(1).with_on_complete(move || counter.set(counter.get() + 1));

        engine.start();
        engine.tick();
        assert_eq!(fired.get(), 1);
        assert_eq!(*engine.state(), TimerState::complete(1));
        assert!(!engine.ticker().is_armed());

        engine.tick();
        engine.tick();
        assert_eq!(fired.get(), 1);

        let stored = h.stored().unwrap();
        assert_eq!(stored.status, TimerStatus::Complete);
        assert_eq!(stored.remaining_time, 0);
        assert_eq!(stored.target_time, None);
    }

    #[test]
    fn each_completion_event_notifies() {
        let h = Harness::new();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut engine = h.boot(2).with_on_complete(move || counter.set(counter.get() + 1));

        engine.start();
        engine.tick();
        engine.tick();
        engine.start();
        assert_eq!(engine.status(), TimerStatus::Complete);

        engine.set_time(0, 0, 0, 1, true);
        engine.tick();
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn zero_duration_is_not_startable() {
        let h = Harness::new();
        let mut engine = h.boot(120);
        engine.set_time(0, 0, 0, 0, false);
        engine.start();

        assert_eq!(engine.status(), TimerStatus::Idle);
        assert_eq!(engine.total_seconds(), 0);
        assert!(!engine.ticker().is_armed());
        assert_eq!(h.stored(), None);
    }

    #[test]
    fn zero_duration_auto_start_stays_idle() {
        let h = Harness::new();
        let mut engine = h.boot(120);
        engine.set_time(0, 0, 0, 0, true);
        assert_eq!(engine.status(), TimerStatus::Idle);
    }

    #[test]
    fn set_time_with_auto_start_runs_immediately() {
        let h = Harness::new();
        let mut engine = h.boot(0);
        engine.set_time(0, 1, 0, 0, true);

        assert_eq!(engine.status(), TimerStatus::Running);
        assert_eq!(engine.initial_total_seconds(), 3_600);
        assert_eq!(engine.state().target_epoch_millis, Some(T0 + 3_600_000));
        assert_eq!(h.stored().unwrap().status, TimerStatus::Running);
    }

    #[test]
    fn set_time_without_auto_start_clears_the_snapshot() {
        let h = Harness::new();
        let mut engine = h.boot(10);
        engine.start();
        engine.pause();
        assert!(h.stored().is_some());

        engine.set_time(0, 0, 2, 0, false);
        assert_eq!(h.stored(), None);
        assert_eq!(*engine.state(), TimerState::idle(120));
    }

    #[test]
    fn reload_mid_countdown_resumes_running() {
        let h = Harness::new();
        let mut engine = h.boot(10);
        engine.start();
        drop(engine);

        h.clock.advance(4_000);
        let engine = h.boot(999);
        assert_eq!(engine.status(), TimerStatus::Running);
        assert!((5..=7).contains(&engine.total_seconds()));
        assert_eq!(engine.initial_total_seconds(), 10);
        assert!(engine.ticker().is_armed());
    }

    #[test]
    fn reload_after_deadline_is_complete() {
        let raw = format!(
            r#"{{"status":"running","targetTime":{},"remainingTime":10,"initialTotalSeconds":10}}"#,
            T0 - 5_000
        );
        let h = Harness::with_snapshot(&raw);
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let engine = h.boot(60).with_on_complete(move || counter.set(counter.get() + 1));

        assert_eq!(engine.status(), TimerStatus::Complete);
        assert_eq!(engine.total_seconds(), 0);
        assert!(!engine.ticker().is_armed());
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn reload_while_paused_keeps_the_frozen_value() {
        let h = Harness::new();
        let mut engine = h.boot(10);
        engine.start();
        engine.tick();
        engine.pause();
        drop(engine);

        h.clock.advance(3_600_000);
        let mut engine = h.boot(999);
        assert_eq!(engine.status(), TimerStatus::Paused);
        assert_eq!(engine.total_seconds(), 9);

        engine.resume();
        assert_eq!(engine.status(), TimerStatus::Running);
    }

    #[test]
    fn corrupted_snapshot_boots_fresh() {
        let h = Harness::with_snapshot("{\"status\":");
        let engine = h.boot(300);
        assert_eq!(*engine.state(), TimerState::idle(300));
    }
}
