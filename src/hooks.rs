use crate::utils::{clamp_field, parse_duration_text};
use flip_timer::defaults::STORAGE_KEY;
use flip_timer::{
    BrowserEngine, CountdownEngine, IntervalTicker, LocalStore, SystemClock, TimeParts,
    TimerStatus,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub type SharedEngine = Rc<RefCell<BrowserEngine>>;

/// The countdown as seen by one render, plus callbacks into the engine.
///
/// Starting goes through `set_time` with `auto_start`, which is how the
/// setup form hands over a duration.
#[derive(Clone)]
pub struct Countdown {
    pub parts: TimeParts,
    pub initial_total_seconds: u64,
    pub status: TimerStatus,
    pub pause: Callback<()>,
    pub resume: Callback<()>,
    pub reset: Callback<()>,
    /// `(duration, auto_start)`
    pub set_time: Callback<(TimeParts, bool)>,
}

/// Build the engine with a ticker that only holds a weak reference back to
/// it, so dropping the component drops the engine and clears its interval.
fn boot_engine(
    configured: TimeParts,
    on_complete: Callback<()>,
    redraw: UseForceUpdateHandle,
) -> SharedEngine {
    Rc::new_cyclic(|weak: &Weak<RefCell<BrowserEngine>>| {
        let weak = weak.clone();
        let ticker = IntervalTicker::new(move || {
            if let Some(engine) = weak.upgrade() {
                engine.borrow_mut().tick();
                redraw.force_update();
            }
        });
        let engine = CountdownEngine::initialize(
            configured.total_seconds(),
            LocalStore::new(STORAGE_KEY),
            SystemClock,
            ticker,
        )
        .with_on_complete(move || on_complete.emit(()));
        RefCell::new(engine)
    })
}

/// Wrap an engine operation in a callback that re-renders afterwards.
fn control(
    engine: &SharedEngine,
    redraw: &UseForceUpdateHandle,
    op: fn(&mut BrowserEngine),
) -> Callback<()> {
    let engine = engine.clone();
    let redraw = redraw.clone();
    Callback::from(move |_| {
        op(&mut engine.borrow_mut());
        redraw.force_update();
    })
}

/// Countdown engine bound to the component lifetime.
///
/// The engine is created once, restoring any persisted snapshot; later
/// renders only read from it. `on_complete` is captured at creation.
#[hook]
pub fn use_countdown(configured: TimeParts, on_complete: Callback<()>) -> Countdown {
    let redraw = use_force_update();
    let engine = {
        let redraw = redraw.clone();
        use_state(move || boot_engine(configured, on_complete, redraw))
    };
    let engine: SharedEngine = (*engine).clone();

    let set_time = {
        let engine = engine.clone();
        let redraw = redraw.clone();
        Callback::from(move |(parts, auto_start): (TimeParts, bool)| {
            engine
                .borrow_mut()
                .set_time(parts.days, parts.hours, parts.minutes, parts.seconds, auto_start);
            redraw.force_update();
        })
    };

    let state = *engine.borrow().state();
    Countdown {
        parts: state.parts(),
        initial_total_seconds: state.initial_total_seconds,
        status: state.status,
        pause: control(&engine, &redraw, BrowserEngine::pause),
        resume: control(&engine, &redraw, BrowserEngine::resume),
        reset: control(&engine, &redraw, BrowserEngine::reset),
        set_time,
    }
}

/// A numeric setup field clamped into `[0, max]`; `None` leaves it unbounded.
#[derive(Clone)]
pub struct UnitField {
    pub value: u64,
    /// Callback for the input's `oninput` event. Clamps and writes the
    /// canonical value back into the element.
    pub on_input: Callback<InputEvent>,
    /// Programmatic update, e.g. from a preset.
    pub set_value: Callback<u64>,
}

#[hook]
pub fn use_unit_field(initial: u64, max: Option<u64>) -> UnitField {
    let value = use_state(|| max.map_or(initial, |max| initial.min(max)));

    let on_input = {
        let setter = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let clamped = clamp_field(&input.value(), max);
            // Keep the DOM in step even when the state value does not change.
            input.set_value(&clamped.to_string());
            setter.set(clamped);
        })
    };

    let set_value = {
        let setter = value.clone();
        Callback::from(move |v: u64| setter.set(max.map_or(v, |max| v.min(max))))
    };

    UnitField {
        value: *value,
        on_input,
        set_value,
    }
}

/// Free-text duration entry ("25:00", "1h30m", ...).
#[derive(Clone)]
pub struct DurationEntry {
    pub text: String,
    pub error: Option<String>,
    pub on_text_input: Callback<InputEvent>,
    /// Parse the current text; on success the parts go to `on_parsed` and the
    /// field is cleared.
    pub on_commit: Callback<()>,
}

#[hook]
pub fn use_duration_entry(on_parsed: Callback<TimeParts>) -> DurationEntry {
    let text = use_state(String::new);
    let error = use_state(|| None::<String>);

    let on_text_input = {
        let text = text.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
            error.set(None);
        })
    };

    let on_commit = {
        let text = text.clone();
        let error = error.clone();
        Callback::from(move |_| {
            if text.trim().is_empty() {
                return;
            }
            match parse_duration_text(&text) {
                Ok(parts) => {
                    on_parsed.emit(parts);
                    text.set(String::new());
                    error.set(None);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        })
    };

    DurationEntry {
        text: (*text).clone(),
        error: (*error).clone(),
        on_text_input,
        on_commit,
    }
}
