//! Yew view components for the Flip Timer UI.
//!
//! Display components are driven purely by props; the setup form owns only
//! its draft field values and hands a finished duration to its parent.

use crate::config::{
    DEFAULT_DAYS, DEFAULT_HOURS, DEFAULT_MINUTES, DEFAULT_SECONDS, FLIP_DURATION_MS, MAX_HOURS,
    MAX_MINUTES, MAX_SECONDS, QUICK_TIMERS,
};
use crate::hooks::{use_duration_entry, use_unit_field, UnitField};
use crate::theme::{apply_theme, load_theme, save_theme, Theme};
use crate::utils::{clamp_parts, format_unit, preset_parts};
use flip_timer::TimeParts;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplaySize {
    Sm,
    Md,
    Lg,
    #[default]
    Xl,
}

impl DisplaySize {
    fn class(self) -> &'static str {
        match self {
            DisplaySize::Sm => "size-sm",
            DisplaySize::Md => "size-md",
            DisplaySize::Lg => "size-lg",
            DisplaySize::Xl => "size-xl",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct FlipDigitProps {
    pub value: char,
    #[prop_or_default]
    pub size: DisplaySize,
}

/// A single flip card. When `value` changes the old digit folds away over
/// `FLIP_DURATION_MS` before the new one settles.
#[function_component(FlipDigit)]
pub fn flip_digit(props: &FlipDigitProps) -> Html {
    let shown = use_state(|| props.value);
    let previous = use_state(|| props.value);
    let flipping = use_state(|| false);

    {
        let shown = shown.clone();
        let previous = previous.clone();
        let flipping = flipping.clone();
        use_effect_with((props.value, *shown), move |&(value, current)| {
            let pending = (value != current).then(|| {
                previous.set(current);
                flipping.set(true);
                Timeout::new(FLIP_DURATION_MS, move || {
                    shown.set(value);
                    flipping.set(false);
                })
            });
            // Dropping a pending timeout cancels it.
            move || drop(pending)
        });
    }

    let upper = if *flipping { *previous } else { *shown };

    html! {
        <div class={classes!("flip-card", props.size.class())}>
            <div class="flip-digit">
                <div class="flip-upper">
                    <span class={classes!("flip-digit-text", flipping.then_some("flip-animate-top"))}>
                        { upper.to_string() }
                    </span>
                </div>
                <div class="flip-lower">
                    <span class={classes!("flip-digit-text", flipping.then_some("flip-animate-bottom"))}>
                        { shown.to_string() }
                    </span>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FlipUnitProps {
    pub value: u64,
    pub label: AttrValue,
    #[prop_or_default]
    pub size: DisplaySize,
    #[prop_or(true)]
    pub show_label: bool,
}

/// One time unit: its zero-padded digits plus a caption.
#[function_component(FlipUnit)]
pub fn flip_unit(props: &FlipUnitProps) -> Html {
    html! {
        <div class="flip-unit">
            <div class={classes!("flip-unit-digits", props.size.class())}>
                { format_unit(props.value).chars().enumerate().map(|(i, digit)| {
                    html! { <FlipDigit key={format!("{}-{}", props.label, i)} value={digit} size={props.size} /> }
                }).collect::<Html>() }
            </div>
            if props.show_label {
                <span class={classes!("flip-unit-label", props.size.class())}>{ props.label.clone() }</span>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SeparatorProps {
    size: DisplaySize,
}

#[function_component(Separator)]
fn separator(props: &SeparatorProps) -> Html {
    html! {
        <div class={classes!("separator", props.size.class())}>
            <div class="separator-dot" />
            <div class="separator-dot" />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimerDisplayProps {
    pub parts: TimeParts,
    #[prop_or_default]
    pub show_days: bool,
    #[prop_or_default]
    pub size: DisplaySize,
    #[prop_or_default]
    pub class: Classes,
}

/// Hours, minutes and seconds (and days when asked for and non-zero).
#[function_component(TimerDisplay)]
pub fn timer_display(props: &TimerDisplayProps) -> Html {
    let size = props.size;
    html! {
        <div class={classes!("timer-display", "timer-glow", size.class(), props.class.clone())}>
            if props.show_days && props.parts.days > 0 {
                <>
                    <FlipUnit value={props.parts.days} label="Days" {size} />
                    <Separator {size} />
                </>
            }
            <FlipUnit value={props.parts.hours} label="Hours" {size} />
            <Separator {size} />
            <FlipUnit value={props.parts.minutes} label="Minutes" {size} />
            <Separator {size} />
            <FlipUnit value={props.parts.seconds} label="Seconds" {size} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct UnitInputProps {
    label: AttrValue,
    #[prop_or_default]
    max: Option<u64>,
    value: u64,
    oninput: Callback<InputEvent>,
}

#[function_component(UnitInput)]
fn unit_input(props: &UnitInputProps) -> Html {
    html! {
        <div class="form-group">
            <label>{ props.label.clone() }</label>
            <input
                type="number"
                min="0"
                max={props.max.map(|max| max.to_string())}
                value={props.value.to_string()}
                oninput={props.oninput.clone()}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimerSetupProps {
    pub on_start: Callback<TimeParts>,
}

fn set_fields(fields: [&UnitField; 4], parts: TimeParts) {
    let [days, hours, minutes, seconds] = fields;
    days.set_value.emit(parts.days);
    hours.set_value.emit(parts.hours);
    minutes.set_value.emit(parts.minutes);
    seconds.set_value.emit(parts.seconds);
}

/// Duration form: four clamped fields, quick presets, and a free-text entry.
#[function_component(TimerSetup)]
pub fn timer_setup(props: &TimerSetupProps) -> Html {
    let days = use_unit_field(DEFAULT_DAYS, None);
    let hours = use_unit_field(DEFAULT_HOURS, Some(MAX_HOURS));
    let minutes = use_unit_field(DEFAULT_MINUTES, Some(MAX_MINUTES));
    let seconds = use_unit_field(DEFAULT_SECONDS, Some(MAX_SECONDS));

    let current = TimeParts::new(days.value, hours.value, minutes.value, seconds.value);

    let entry = {
        let fields = [days.clone(), hours.clone(), minutes.clone(), seconds.clone()];
        use_duration_entry(Callback::from(move |parts: TimeParts| {
            let [d, h, m, s] = &fields;
            set_fields([d, h, m, s], clamp_parts(parts));
        }))
    };

    let on_entry_keydown = {
        let on_commit = entry.on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_commit.emit(());
            }
        })
    };

    let handle_start = {
        let on_start = props.on_start.clone();
        Callback::from(move |_| {
            if !current.is_zero() {
                on_start.emit(current);
            }
        })
    };

    html! {
        <div class="timer-setup">
            <div class="setup-theme-toggle">
                <ThemeToggle />
            </div>

            <div class="setup-header">
                <span class="setup-badge">{ "Set Your Timer" }</span>
                <h2>{ "How long do you need?" }</h2>
                <p class="muted">{ "Set your countdown and stay focused" }</p>
            </div>

            <div class="quick-timers">
                { QUICK_TIMERS.iter().map(|&(label, icon, preset_minutes)| {
                    let preset = preset_parts(preset_minutes);
                    let selected = preset == current;
                    let onclick = {
                        let fields = [days.clone(), hours.clone(), minutes.clone(), seconds.clone()];
                        Callback::from(move |_| {
                            let [d, h, m, s] = &fields;
                            set_fields([d, h, m, s], preset);
                        })
                    };
                    html! {
                        <button key={label} class={classes!("quick-timer", selected.then_some("selected"))} {onclick}>
                            <span class="quick-timer-icon">{ icon }</span>
                            <span class="quick-timer-label">{ label }</span>
                        </button>
                    }
                }).collect::<Html>() }
            </div>

            <div class="form-row unit-inputs">
                <UnitInput label="Days" value={days.value} oninput={days.on_input.clone()} />
                <UnitInput label="Hours" max={Some(MAX_HOURS)} value={hours.value} oninput={hours.on_input.clone()} />
                <UnitInput label="Min" max={Some(MAX_MINUTES)} value={minutes.value} oninput={minutes.on_input.clone()} />
                <UnitInput label="Sec" max={Some(MAX_SECONDS)} value={seconds.value} oninput={seconds.on_input.clone()} />
            </div>

            <div class="form-group">
                <label for="duration_text_input">{ "Or type a duration:" }</label>
                <input
                    type="text"
                    id="duration_text_input"
                    placeholder="25:00, 1h30m, 2d 4h"
                    value={entry.text.clone()}
                    class={if entry.error.is_some() { "invalid" } else { "" }}
                    oninput={entry.on_text_input.clone()}
                    onchange={entry.on_commit.reform(|_| ())}
                    onkeydown={on_entry_keydown}
                />
                if let Some(ref err) = entry.error {
                    <div class="input-error">{ err }</div>
                }
            </div>

            <button class="btn-timer btn-start" onclick={handle_start} disabled={current.is_zero()}>
                { "Start Timer" }
            </button>

            <p class="muted tip">{ "Tip: Use the Pomodoro technique (25 min work, 5 min break)" }</p>
        </div>
    }
}

/// Light/dark switch, persisted across visits.
#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let theme = use_state(load_theme);

    {
        let theme = *theme;
        use_effect_with((), move |_| {
            apply_theme(theme);
        });
    }

    let onclick = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = theme.toggled();
            save_theme(next);
            apply_theme(next);
            theme.set(next);
        })
    };

    html! {
        <button class="theme-toggle" aria-label="Toggle theme" {onclick}>
            { if *theme == Theme::Light { "☀" } else { "☾" } }
        </button>
    }
}
