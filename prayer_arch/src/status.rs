//! Prayer status classification - past / current / future
//!
//! Pure functions over the day's six minute values and a current minute
//! value. For past dates the host substitutes a synthetic end-of-day value
//! (23:59) so everything classifies as past without a live clock; future
//! dates get 0:00 for the mirror effect.

use shared::{MINUTES_PER_DAY, PRAYER_COUNT};

/// Synthetic current time for viewing a date in the past (23:59).
pub const END_OF_DAY: f32 = 1439.0;

/// Synthetic current time for viewing a date in the future.
pub const START_OF_DAY: f32 = 0.0;

/// Status of one prayer slot relative to the current time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrayerStatus {
    Past,
    Current,
    Future,
}

/// The boundary that closes slot `i`'s window.
///
/// The last slot wraps toward tomorrow's first prayer but is capped at the
/// end-of-day sentinel: a past date substitutes 23:59 as its clock and must
/// render every slot past, so Isha's window may never reach that value.
fn next_boundary(times: &[f32; PRAYER_COUNT], i: usize) -> f32 {
    if i + 1 < PRAYER_COUNT {
        times[i + 1]
    } else {
        (times[0] + MINUTES_PER_DAY).min(END_OF_DAY)
    }
}

/// True iff slot `i` is the one whose window contains `current`.
///
/// NaN entries make every comparison false, so an unknown slot is simply
/// never current - no panic, no special casing.
pub fn is_current(times: &[f32; PRAYER_COUNT], i: usize, current: f32) -> bool {
    times[i] <= current && current < next_boundary(times, i)
}

/// True iff slot `i` lies behind the current time.
///
/// Any time at or after the last prayer marks every slot past, unless that
/// slot is still current; at the day's final minute the cap in
/// `next_boundary` closes Isha's window too, so all six slots read as past.
pub fn is_past(times: &[f32; PRAYER_COUNT], i: usize, current: f32) -> bool {
    if is_current(times, i, current) {
        return false;
    }
    if current >= times[PRAYER_COUNT - 1] {
        return true;
    }
    current > times[i]
}

/// Classify one slot.
pub fn classify(times: &[f32; PRAYER_COUNT], i: usize, current: f32) -> PrayerStatus {
    if is_current(times, i, current) {
        PrayerStatus::Current
    } else if is_past(times, i, current) {
        PrayerStatus::Past
    } else {
        PrayerStatus::Future
    }
}
