//! Main module for the Flip Timer application using Yew.
//! Wires the countdown hook to the setup form and the full-page display.

use flip_timer::timer::SECONDS_PER_DAY;
use flip_timer::{TimeParts, TimerStatus};
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod notify;
mod theme;
mod utils;

use components::{DisplaySize, TimerDisplay, TimerSetup};
use config::{DEFAULT_DAYS, DEFAULT_HOURS, DEFAULT_MINUTES, DEFAULT_SECONDS};
use hooks::{use_countdown, Countdown};

/// Controls shown under the running/paused/completed display.
fn render_controls(timer: &Countdown) -> Html {
    let toggle = match timer.status {
        TimerStatus::Paused => html! {
            <button class="btn-timer" onclick={timer.resume.reform(|_| ())}>{ "▶ Resume" }</button>
        },
        TimerStatus::Running => html! {
            <button class="btn-secondary" onclick={timer.pause.reform(|_| ())}>{ "⏸ Pause" }</button>
        },
        TimerStatus::Idle | TimerStatus::Complete => html! {},
    };

    html! {
        <div class="controls">
            { toggle }
            <button class="btn-outline" onclick={timer.reset.reform(|_| ())}>{ "↺ New Timer" }</button>
        </div>
    }
}

fn render_status_banner(status: TimerStatus) -> Html {
    match status {
        TimerStatus::Complete => html! {
            <div class="status-banner complete">
                <span class="status-icon">{ "🎉" }</span>
                <span>{ "Time's Up!" }</span>
            </div>
        },
        TimerStatus::Paused => html! {
            <div class="status-banner paused">
                <span>{ "Paused" }</span>
            </div>
        },
        TimerStatus::Idle | TimerStatus::Running => html! {},
    }
}

/// Primary application component: setup view while idle, full-page timer
/// otherwise. A timer restored from storage lands straight on the full page.
#[function_component]
pub fn App() -> Html {
    use_effect_with((), |_| notify::request_permission());

    // The setup form configures every timer, so the engine starts empty.
    let timer = use_countdown(TimeParts::default(), Callback::from(|_| notify::notify_complete()));

    let handle_start = {
        let set_time = timer.set_time.clone();
        Callback::from(move |parts: TimeParts| set_time.emit((parts, true)))
    };

    if timer.status != TimerStatus::Idle {
        let show_days = timer.initial_total_seconds >= SECONDS_PER_DAY;
        return html! {
            <div class="page full-page">
                <button class="exit-button" aria-label="Close timer" onclick={timer.reset.reform(|_| ())}>
                    { "✕" }
                </button>

                { render_status_banner(timer.status) }

                <div class={classes!("timer-wrapper", (timer.status == TimerStatus::Complete).then_some("pulse-glow"))}>
                    <TimerDisplay parts={timer.parts} {show_days} size={DisplaySize::Lg} />
                </div>

                { render_controls(&timer) }
            </div>
        };
    }

    let preview = TimeParts::new(DEFAULT_DAYS, DEFAULT_HOURS, DEFAULT_MINUTES, DEFAULT_SECONDS);

    html! {
        <div class="page split-page">
            <div class="preview-pane">
                <div class="branding">
                    <h1>{ "Flip" }<span class="accent">{ "Timer" }</span></h1>
                    <p class="muted">{ "Beautiful countdown timer for focus, productivity, and more" }</p>
                </div>
                <div class="preview">
                    <TimerDisplay parts={preview} size={DisplaySize::Md} />
                </div>
            </div>

            <div class="setup-pane">
                <TimerSetup on_start={handle_start} />
            </div>
        </div>
    }
}

/// Entry point: installs the panic hook and mounts the App.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
