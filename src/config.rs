//! Application-level configuration constants.

// UI Behavior
pub const FLIP_DURATION_MS: u32 = 300;
pub const THEME_KEY: &str = "theme";

// Default values for the setup form
pub const DEFAULT_DAYS: u64 = 0;
pub const DEFAULT_HOURS: u64 = 0;
pub const DEFAULT_MINUTES: u64 = 25;
pub const DEFAULT_SECONDS: u64 = 0;

// Max limits for setup fields (all minimums are 0, days are unbounded)
pub const MAX_HOURS: u64 = 23;
pub const MAX_MINUTES: u64 = 59;
pub const MAX_SECONDS: u64 = 59;

/// Quick preset buttons: (label, icon, minutes)
pub const QUICK_TIMERS: [(&str, &str, u64); 4] = [
    ("5 min", "⚡", 5),
    ("15 min", "☕", 15),
    ("25 min", "🎯", 25),
    ("1 hour", "💪", 60),
];

// Completion notification
pub const NOTIFICATION_TITLE: &str = "Timer Complete!";
pub const NOTIFICATION_BODY: &str = "Your countdown has finished!";
pub const NOTIFICATION_ICON: &str = "/favicon.ico";
