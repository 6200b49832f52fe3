//! Cancellable once-per-second schedule driving the countdown.

use crate::defaults::TICK_INTERVAL_MS;
use gloo_timers::callback::Interval;
use std::rc::Rc;

/// A repeating one-second schedule owned by the engine.
///
/// `arm` must replace any schedule that is already active, so at most one
/// tick stream exists at a time.
pub trait Ticker {
    fn arm(&mut self);
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
}

/// Browser ticker backed by `setInterval`. The interval is cleared on
/// `disarm` and when the ticker is dropped.
pub struct IntervalTicker {
    on_tick: Rc<dyn Fn()>,
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub fn new(on_tick: impl Fn() + 'static) -> Self {
        Self {
            on_tick: Rc::new(on_tick),
            interval: None,
        }
    }
}

impl Ticker for IntervalTicker {
    fn arm(&mut self) {
        self.disarm();
        let on_tick = Rc::clone(&self.on_tick);
        self.interval = Some(Interval::new(TICK_INTERVAL_MS, move || on_tick()));
    }

    fn disarm(&mut self) {
        // Dropping an `Interval` clears it.
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}
