//! Prayer schedule data model
//!
//! A schedule is a read-only snapshot of one day's six prayer times for the
//! arch to render. The times arrive pre-computed as formatted strings from an
//! upstream calculator; this module parses them into minute values and never
//! re-sorts them (non-decreasing order is an upstream invariant).

use crate::clock_time;

/// Number of slots in a daily schedule.
pub const PRAYER_COUNT: usize = 6;

/// The six named slots of a prayer day, in chronological order.
///
/// Sunrise is not an obligatory prayer but participates in the
/// past/current/future classification like any other slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All slots in schedule order.
    pub const ALL: [Prayer; PRAYER_COUNT] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for Prayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One day's prayer times in minutes since midnight.
///
/// Slots that failed to parse hold the NaN sentinel; every consumer must
/// tolerate that without panicking.
#[derive(Debug, Clone, Copy)]
pub struct PrayerSchedule {
    pub minutes: [f32; PRAYER_COUNT],
}

impl PrayerSchedule {
    /// Build a schedule from six formatted time strings.
    ///
    /// Malformed strings degrade to unknown slots rather than failing the
    /// whole schedule.
    pub fn from_strings(times: &[&str; PRAYER_COUNT]) -> Self {
        let mut minutes = [clock_time::UNKNOWN_MINUTES; PRAYER_COUNT];
        for (slot, text) in minutes.iter_mut().zip(times.iter()) {
            *slot = clock_time::parse_or_unknown(text);
        }
        Self { minutes }
    }

    /// Earliest known time, or 0 when every slot is unknown.
    pub fn min_time(&self) -> f32 {
        let mut min = f32::INFINITY;
        for &m in &self.minutes {
            if !clock_time::is_unknown(m) && m < min {
                min = m;
            }
        }
        if min.is_finite() {
            min
        } else {
            0.0
        }
    }

    /// Latest known time, or 0 when every slot is unknown.
    pub fn max_time(&self) -> f32 {
        let mut max = f32::NEG_INFINITY;
        for &m in &self.minutes {
            if !clock_time::is_unknown(m) && m > max {
                max = m;
            }
        }
        if max.is_finite() {
            max
        } else {
            0.0
        }
    }

    /// True when every slot parsed successfully.
    pub fn is_fully_known(&self) -> bool {
        self.minutes.iter().all(|m| !clock_time::is_unknown(*m))
    }
}
