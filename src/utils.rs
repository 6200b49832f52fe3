use crate::config::{MAX_HOURS, MAX_MINUTES, MAX_SECONDS};
use flip_timer::TimeParts;
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for quick-entry parsing
static DURATION_MIN_SEC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2})$").unwrap());
static DURATION_HMS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})$").unwrap());
static DURATION_UNITS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+)\s*d)?\s*(?:(\d+)\s*h)?\s*(?:(\d+)\s*m)?\s*(?:(\d+)\s*s)?$").unwrap()
});

/// Zero-pad a unit value to at least two digits ("7" -> "07", "123" stays).
pub fn format_unit(value: u64) -> String {
    format!("{:02}", value)
}

/// Coerce raw field text into `[0, max]`, or `[0, ∞)` when `max` is `None`.
///
/// Reads the leading integer the way a browser `parseInt` does ("4.5" -> 4,
/// "12abc" -> 12). Text without one becomes 0, negatives clamp to 0 and
/// numbers too large for `u64` saturate before the bound is applied.
pub fn clamp_field(input: &str, max: Option<u64>) -> u64 {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if negative || digits.is_empty() {
        return 0;
    }
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    max.map_or(value, |max| value.min(max))
}

/// Clamp each field of an entered duration into the setup form's bounds.
/// Days have no upper bound.
pub fn clamp_parts(parts: TimeParts) -> TimeParts {
    TimeParts {
        days: parts.days,
        hours: parts.hours.min(MAX_HOURS),
        minutes: parts.minutes.min(MAX_MINUTES),
        seconds: parts.seconds.min(MAX_SECONDS),
    }
}

/// Form fields for a quick preset of whole minutes (60 -> 1h 0m).
pub fn preset_parts(minutes: u64) -> TimeParts {
    TimeParts::new(0, minutes / 60, minutes % 60, 0)
}

/// Duration parsing error types for the quick-entry field
#[derive(Debug, PartialEq, Eq)]
pub enum DurationParseError {
    EmptyInput,
    InvalidFormat(String),
    InvalidSeconds(u64),
    InvalidMinutes(u64),
}

impl std::fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationParseError::EmptyInput => write!(f, "Duration cannot be empty"),
            DurationParseError::InvalidFormat(hint) => write!(f, "Invalid duration format. {}", hint),
            DurationParseError::InvalidSeconds(s) => write!(f, "Invalid seconds: {} (must be 0-59)", s),
            DurationParseError::InvalidMinutes(m) => write!(f, "Invalid minutes: {} (must be 0-59)", m),
        }
    }
}

impl std::error::Error for DurationParseError {}

fn capture_u64(captures: &regex::Captures<'_>, group: usize) -> Result<u64, DurationParseError> {
    match captures.get(group) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| DurationParseError::InvalidFormat("Number is too large".to_string())),
        None => Ok(0),
    }
}

/// Parse a typed duration into normalized form fields.
///
/// Supported formats:
/// - Pure number: "45" (minutes)
/// - Minutes and seconds: "25:00"
/// - Hours, minutes and seconds: "1:30:00"
/// - Units in d/h/m/s order: "2d 4h", "1h30m", "90s"
///
/// Overflowing units carry over ("90s" -> 1m 30s); days are unbounded.
pub fn parse_duration_text(input: &str) -> Result<TimeParts, DurationParseError> {
    let trimmed = input.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return Err(DurationParseError::EmptyInput);
    }

    let total = if let Ok(minutes) = trimmed.parse::<u64>() {
        TimeParts::new(0, 0, minutes, 0).total_seconds()
    } else if let Some(captures) = DURATION_HMS_REGEX.captures(&trimmed) {
        let hours = capture_u64(&captures, 1)?;
        let minutes = capture_u64(&captures, 2)?;
        let seconds = capture_u64(&captures, 3)?;
        if minutes > 59 {
            return Err(DurationParseError::InvalidMinutes(minutes));
        }
        if seconds > 59 {
            return Err(DurationParseError::InvalidSeconds(seconds));
        }
        TimeParts::new(0, hours, minutes, seconds).total_seconds()
    } else if let Some(captures) = DURATION_MIN_SEC_REGEX.captures(&trimmed) {
        let minutes = capture_u64(&captures, 1)?;
        let seconds = capture_u64(&captures, 2)?;
        if seconds > 59 {
            return Err(DurationParseError::InvalidSeconds(seconds));
        }
        TimeParts::new(0, 0, minutes, seconds).total_seconds()
    } else {
        match DURATION_UNITS_REGEX.captures(&trimmed) {
            // The pattern also matches strings made only of whitespace between
            // absent groups; require at least one unit.
            Some(captures) if captures.iter().skip(1).any(|g| g.is_some()) => TimeParts::new(
                capture_u64(&captures, 1)?,
                capture_u64(&captures, 2)?,
                capture_u64(&captures, 3)?,
                capture_u64(&captures, 4)?,
            )
            .total_seconds(),
            _ => {
                return Err(DurationParseError::InvalidFormat(
                    "Use: 25, 25:00, 1:30:00, 2d 4h, 1h30m or 90s".to_string(),
                ))
            }
        }
    };

    Ok(TimeParts::from_total(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_pad_to_two_digits() {
        assert_eq!(format_unit(0), "00");
        assert_eq!(format_unit(7), "07");
        assert_eq!(format_unit(42), "42");
        assert_eq!(format_unit(123), "123");
    }

    #[test]
    fn fields_clamp_into_bounds() {
        assert_eq!(clamp_field("12", Some(MAX_HOURS)), 12);
        assert_eq!(clamp_field(" 30 ", Some(MAX_HOURS)), 23);
        assert_eq!(clamp_field("-4", Some(MAX_MINUTES)), 0);
        assert_eq!(clamp_field("", Some(MAX_SECONDS)), 0);
        assert_eq!(clamp_field("abc", Some(MAX_SECONDS)), 0);
        assert_eq!(clamp_field("99999999999999999999999", Some(MAX_HOURS)), MAX_HOURS);
    }

    #[test]
    fn fields_read_the_leading_integer() {
        assert_eq!(clamp_field("4.5", Some(MAX_SECONDS)), 4);
        assert_eq!(clamp_field("12abc", Some(MAX_SECONDS)), 12);
        assert_eq!(clamp_field("+7", Some(MAX_SECONDS)), 7);
        assert_eq!(clamp_field("-0.5", Some(MAX_SECONDS)), 0);
        assert_eq!(clamp_field(".5", Some(MAX_SECONDS)), 0);
    }

    #[test]
    fn day_field_has_no_upper_bound() {
        assert_eq!(clamp_field("150", None), 150);
        assert_eq!(clamp_field("100000", None), 100_000);
        assert_eq!(clamp_field("99999999999999999999999", None), u64::MAX);
        assert_eq!(clamp_field("-3", None), 0);
    }

    #[test]
    fn presets_split_whole_hours() {
        assert_eq!(preset_parts(25), TimeParts::new(0, 0, 25, 0));
        assert_eq!(preset_parts(60), TimeParts::new(0, 1, 0, 0));
        assert_eq!(preset_parts(90), TimeParts::new(0, 1, 30, 0));
    }

    #[test]
    fn clamp_parts_caps_each_field() {
        assert_eq!(
            clamp_parts(TimeParts::new(150, 30, 75, 61)),
            TimeParts::new(150, 23, 59, 59)
        );
    }

    #[test]
    fn quick_entry_formats() {
        assert_eq!(parse_duration_text("45"), Ok(TimeParts::new(0, 0, 45, 0)));
        assert_eq!(parse_duration_text("25:00"), Ok(TimeParts::new(0, 0, 25, 0)));
        assert_eq!(parse_duration_text("1:30:05"), Ok(TimeParts::new(0, 1, 30, 5)));
        assert_eq!(parse_duration_text("2d 4h"), Ok(TimeParts::new(2, 4, 0, 0)));
        assert_eq!(parse_duration_text("1h30m"), Ok(TimeParts::new(0, 1, 30, 0)));
        assert_eq!(parse_duration_text(" 1D 2H 3M 4S "), Ok(TimeParts::new(1, 2, 3, 4)));
    }

    #[test]
    fn quick_entry_carries_overflowing_units() {
        assert_eq!(parse_duration_text("90s"), Ok(TimeParts::new(0, 0, 1, 30)));
        assert_eq!(parse_duration_text("90"), Ok(TimeParts::new(0, 1, 30, 0)));
        assert_eq!(parse_duration_text("25h"), Ok(TimeParts::new(1, 1, 0, 0)));
    }

    #[test]
    fn quick_entry_accepts_long_durations() {
        assert_eq!(parse_duration_text("120d"), Ok(TimeParts::new(120, 0, 0, 0)));
        assert_eq!(parse_duration_text("400d 5h"), Ok(TimeParts::new(400, 5, 0, 0)));
        assert_eq!(parse_duration_text("2400h"), Ok(TimeParts::new(100, 0, 0, 0)));
    }

    #[test]
    fn quick_entry_rejects_bad_input() {
        assert_eq!(parse_duration_text("  "), Err(DurationParseError::EmptyInput));
        assert_eq!(parse_duration_text("1:75"), Err(DurationParseError::InvalidSeconds(75)));
        assert_eq!(parse_duration_text("1:75:00"), Err(DurationParseError::InvalidMinutes(75)));
        assert!(matches!(
            parse_duration_text("soon"),
            Err(DurationParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_duration_text("4s 2m"),
            Err(DurationParseError::InvalidFormat(_))
        ));
    }
}
