//! Clock time codec - formatted time strings to minutes-since-midnight and back
//!
//! The whole engine works in fractional minutes since local midnight, so a
//! single codec owns the conversion in both directions. Parsing is the only
//! place where external string data enters the geometry pipeline, so failures
//! here must never reach the renderer as a panic.

use chrono::{Local, Timelike};

/// Sentinel for a time value that could not be parsed.
///
/// Downstream geometry treats NaN as "unknown" and renders the affected
/// marker at the degenerate-range fallback position instead of crashing.
pub const UNKNOWN_MINUTES: f32 = f32::NAN;

/// Minutes in a full day, used for next-day wraparound.
pub const MINUTES_PER_DAY: f32 = 1440.0;

/// Error type for time string parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedTimeError {
    /// No AM/PM marker present
    MissingMeridiem,
    /// Clock portion has no colon separator
    MissingColon,
    /// Hour, minute, or second was not a number
    NonNumeric(String),
    /// Minute or second outside 0-59, or hour outside 1-12
    OutOfRange(String),
}

impl std::fmt::Display for MalformedTimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedTimeError::MissingMeridiem => write!(f, "missing AM/PM marker"),
            MalformedTimeError::MissingColon => write!(f, "clock portion has no colon"),
            MalformedTimeError::NonNumeric(s) => write!(f, "non-numeric component: {}", s),
            MalformedTimeError::OutOfRange(s) => write!(f, "component out of range: {}", s),
        }
    }
}

impl std::error::Error for MalformedTimeError {}

/// Parse a formatted 12-hour time string into fractional minutes since midnight.
///
/// Accepts `"H:MM AM/PM"` and `"H:MM:SS AM/PM"` with a case-insensitive
/// meridiem marker. Seconds contribute `seconds / 60` to the result.
///
/// Standard 12/24-hour correction: `PM` adds 720 unless the hour is 12;
/// `12:xx AM` subtracts 720 so midnight lands at 0.
pub fn parse(text: &str) -> Result<f32, MalformedTimeError> {
    let trimmed = text.trim();
    let mut parts = trimmed.split_whitespace();

    let clock = parts.next().ok_or(MalformedTimeError::MissingColon)?;
    let meridiem = parts
        .next()
        .ok_or(MalformedTimeError::MissingMeridiem)?
        .to_ascii_uppercase();

    let is_pm = match meridiem.as_str() {
        "AM" => false,
        "PM" => true,
        _ => return Err(MalformedTimeError::MissingMeridiem),
    };

    if !clock.contains(':') {
        return Err(MalformedTimeError::MissingColon);
    }

    let mut fields = clock.split(':');
    let hour = parse_component(fields.next().unwrap_or(""))?;
    let minute = parse_component(fields.next().unwrap_or(""))?;
    let second = match fields.next() {
        Some(s) => parse_component(s)?,
        None => 0,
    };

    if !(1..=12).contains(&hour) || minute > 59 || second > 59 {
        return Err(MalformedTimeError::OutOfRange(trimmed.to_string()));
    }

    let mut minutes = (hour * 60 + minute) as f32 + second as f32 / 60.0;
    if is_pm && hour != 12 {
        minutes += 720.0;
    }
    if !is_pm && hour == 12 {
        minutes -= 720.0;
    }

    Ok(minutes)
}

fn parse_component(field: &str) -> Result<u32, MalformedTimeError> {
    field
        .parse::<u32>()
        .map_err(|_| MalformedTimeError::NonNumeric(field.to_string()))
}

/// Render-path-safe parse: malformed input becomes the NaN sentinel.
pub fn parse_or_unknown(text: &str) -> f32 {
    parse(text).unwrap_or(UNKNOWN_MINUTES)
}

/// True when a minute value carries the "unknown" sentinel.
pub fn is_unknown(minutes: f32) -> bool {
    minutes.is_nan()
}

/// Format minutes since midnight back into a clock string.
///
/// Minutes are zero-padded; seconds are never emitted. Unknown values render
/// as a placeholder instead of propagating NaN into the UI text.
pub fn format(minutes: f32, use_24h: bool) -> String {
    if is_unknown(minutes) {
        return "--:--".to_string();
    }

    let total = minutes.rem_euclid(MINUTES_PER_DAY).floor() as u32;
    let hour24 = total / 60;
    let minute = total % 60;

    if use_24h {
        return format!("{}:{:02}", hour24, minute);
    }

    let hour12 = match hour24 {
        0 => 12,
        1..=12 => hour24,
        _ => hour24 - 12,
    };
    let meridiem = if hour24 < 12 { "AM" } else { "PM" };
    format!("{}:{:02} {}", hour12, minute, meridiem)
}

/// Sample the local wall clock: whole minutes since midnight plus the
/// current second, the two inputs the countdown needs each tick.
pub fn now_minutes() -> (f32, u32) {
    let now = Local::now();
    let minutes = (now.hour() * 60 + now.minute()) as f32;
    (minutes, now.second())
}
