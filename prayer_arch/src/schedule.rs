//! Stand-in schedule provider
//!
//! The real app receives its six daily times from an external astronomical
//! calculator; the arch engine only ever sees the formatted-string contract.
//! This provider honors that contract with a deterministic table: fixed base
//! times plus a smooth seasonal drift by day of year, so neighboring dates
//! produce believably different schedules.

use chrono::{Datelike, NaiveDate};
use std::f32::consts::TAU;

use shared::{clock_time, PrayerSchedule, PRAYER_COUNT};

/// Base times in minutes since midnight (mid-season reference day).
const BASE_MINUTES: [f32; PRAYER_COUNT] = [300.0, 375.0, 750.0, 945.0, 1100.0, 1190.0];

/// Seasonal swing amplitude per slot, in minutes. Dawn and dusk move the
/// most; midday barely moves.
const SEASONAL_SWING: [f32; PRAYER_COUNT] = [-45.0, -50.0, 4.0, 25.0, 55.0, 60.0];

/// Produce the six formatted time strings for a date, exactly as an
/// upstream calculator would hand them over.
pub fn times_for(date: NaiveDate) -> [String; PRAYER_COUNT] {
    // Peak of the drift near the June solstice (day ~172)
    let phase = (date.ordinal() as f32 - 172.0) / 365.25 * TAU;
    let season = phase.cos();

    std::array::from_fn(|i| {
        let minutes = BASE_MINUTES[i] + SEASONAL_SWING[i] * season;
        clock_time::format(minutes, false)
    })
}

/// Parsed schedule snapshot for a date.
pub fn schedule_for(date: NaiveDate) -> PrayerSchedule {
    let strings = times_for(date);
    let refs: [&str; PRAYER_COUNT] = [
        &strings[0], &strings[1], &strings[2], &strings[3], &strings[4], &strings[5],
    ];
    PrayerSchedule::from_strings(&refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_parses_cleanly() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let schedule = schedule_for(date);
        assert!(schedule.is_fully_known());
    }

    #[test]
    fn test_schedule_is_ordered() {
        for ordinal in [1u32, 80, 172, 265, 355] {
            let date = NaiveDate::from_yo_opt(2026, ordinal).unwrap();
            let schedule = schedule_for(date);
            for pair in schedule.minutes.windows(2) {
                assert!(pair[0] <= pair[1], "unsorted on day {}", ordinal);
            }
        }
    }

    #[test]
    fn test_deterministic_per_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert_eq!(times_for(date), times_for(date));
    }

    #[test]
    fn test_seasonal_drift_moves_dawn() {
        let june = schedule_for(NaiveDate::from_ymd_opt(2026, 6, 21).unwrap());
        let december = schedule_for(NaiveDate::from_ymd_opt(2026, 12, 21).unwrap());
        // Fajr is earlier in summer than in winter
        assert!(june.minutes[0] < december.minutes[0]);
    }
}
