//! Countdown to the next prayer
//!
//! Recomputed at 1 Hz while the view is live (viewing today) and visible.
//! The engine re-reads the live/visible flags on every tick instead of
//! capturing them once, so a stale closure can never keep a dead timer
//! counting. Suspension freezes the last result rather than clearing it.

use std::time::{Duration, Instant};

use shared::{clock_time, Prayer, PrayerSchedule, MINUTES_PER_DAY};

/// Result of one countdown computation, always replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountdownResult {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// Which prayer the countdown targets
    pub prayer: Prayer,
    /// Target in minutes since midnight (may exceed 1440 after wraparound)
    pub target_minutes: f32,
}

impl CountdownResult {
    pub fn format(&self) -> String {
        format!("{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Pure countdown computation against an explicit clock sample.
///
/// `current_minutes` is whole minutes since midnight; `current_seconds` the
/// second within that minute. The next prayer is the first slot strictly
/// after the current minute; when none remains the countdown wraps to
/// tomorrow's Fajr. Unknown slots are skipped; an entirely unknown schedule
/// yields `None`.
pub fn compute_at(
    schedule: &PrayerSchedule,
    current_minutes: f32,
    current_seconds: u32,
) -> Option<CountdownResult> {
    let mut target: Option<(Prayer, f32)> = None;

    for (i, &m) in schedule.minutes.iter().enumerate() {
        if clock_time::is_unknown(m) {
            continue;
        }
        if m > current_minutes {
            target = Some((Prayer::ALL[i], m));
            break;
        }
    }

    if target.is_none() {
        // Past the last prayer: wrap to the first known slot tomorrow
        for (i, &m) in schedule.minutes.iter().enumerate() {
            if !clock_time::is_unknown(m) {
                target = Some((Prayer::ALL[i], m + MINUTES_PER_DAY));
                break;
            }
        }
    }

    let (prayer, target_minutes) = target?;

    let total_seconds =
        ((target_minutes - current_minutes) * 60.0).round() as i64 - current_seconds as i64;
    let total_seconds = total_seconds.max(0) as u32;

    Some(CountdownResult {
        hours: total_seconds / 3600,
        minutes: (total_seconds % 3600) / 60,
        seconds: total_seconds % 60,
        prayer,
        target_minutes,
    })
}

/// Drives the once-per-second recomputation loop.
pub struct CountdownEngine {
    result: Option<CountdownResult>,
    last_tick: Option<Instant>,
}

impl CountdownEngine {
    const TICK_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self {
            result: None,
            last_tick: None,
        }
    }

    /// Advance the engine. Returns true when the displayed result changed.
    ///
    /// Runs only while `live && visible`; the first tick after (re)entering
    /// that state computes immediately so the first displayed value is never
    /// stale-by-one-second. While suspended the last result stays frozen.
    pub fn tick(
        &mut self,
        now: Instant,
        live: bool,
        visible: bool,
        schedule: &PrayerSchedule,
    ) -> bool {
        if !(live && visible) {
            // Re-arm so the next live tick computes immediately
            self.last_tick = None;
            return false;
        }

        let due = match self.last_tick {
            None => true,
            Some(last) => now.duration_since(last) >= Self::TICK_INTERVAL,
        };
        if !due {
            return false;
        }
        self.last_tick = Some(now);

        let (current_minutes, current_seconds) = clock_time::now_minutes();
        let next = compute_at(schedule, current_minutes, current_seconds);
        let changed = next != self.result;
        self.result = next;
        changed
    }

    /// Last computed result, frozen while suspended.
    pub fn result(&self) -> Option<&CountdownResult> {
        self.result.as_ref()
    }

    /// Drop the frozen value, e.g. when the schedule itself changes.
    pub fn clear(&mut self) {
        self.result = None;
        self.last_tick = None;
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> PrayerSchedule {
        PrayerSchedule::from_strings(&[
            "5:00 AM", "6:15 AM", "12:30 PM", "3:45 PM", "6:20 PM", "7:50 PM",
        ])
    }

    #[test]
    fn test_wraparound_after_isha() {
        // 8:00:00 PM -> next is Fajr 5:00 AM tomorrow -> 9:00:00
        let result = compute_at(&sample_schedule(), 1200.0, 0).unwrap();
        assert_eq!(result.prayer, Prayer::Fajr);
        assert_eq!((result.hours, result.minutes, result.seconds), (9, 0, 0));
        assert_eq!(result.format(), "9:00:00");
    }

    #[test]
    fn test_thirty_seconds_before_fajr() {
        // 4:59:30 AM -> 0:00:30 to Fajr
        let result = compute_at(&sample_schedule(), 299.0, 30).unwrap();
        assert_eq!(result.prayer, Prayer::Fajr);
        assert_eq!((result.hours, result.minutes, result.seconds), (0, 0, 30));
    }

    #[test]
    fn test_midday_target() {
        // 1:00:00 PM -> next is Asr at 3:45 PM -> 2:45:00
        let result = compute_at(&sample_schedule(), 780.0, 0).unwrap();
        assert_eq!(result.prayer, Prayer::Asr);
        assert_eq!((result.hours, result.minutes, result.seconds), (2, 45, 0));
    }

    #[test]
    fn test_unknown_slots_skipped() {
        let mut schedule = sample_schedule();
        schedule.minutes[3] = f32::NAN;
        // 1:00 PM: Asr unknown, so the next known target is Maghrib 6:20 PM
        let result = compute_at(&schedule, 780.0, 0).unwrap();
        assert_eq!(result.prayer, Prayer::Maghrib);
    }

    #[test]
    fn test_fully_unknown_schedule() {
        let schedule = PrayerSchedule::from_strings(&["a", "b", "c", "d", "e", "f"]);
        assert!(compute_at(&schedule, 600.0, 0).is_none());
    }

    #[test]
    fn test_engine_suspension_freezes_result() {
        let mut engine = CountdownEngine::new();
        let schedule = sample_schedule();
        let t0 = Instant::now();

        // First live tick computes immediately
        engine.tick(t0, true, true, &schedule);
        let frozen = engine.result().copied();
        assert!(frozen.is_some());

        // Hidden ticks never recompute or clear
        engine.tick(t0 + Duration::from_secs(5), true, false, &schedule);
        assert_eq!(engine.result().copied(), frozen);

        // Static-mode ticks behave the same
        engine.tick(t0 + Duration::from_secs(6), false, true, &schedule);
        assert_eq!(engine.result().copied(), frozen);
    }

    #[test]
    fn test_engine_one_hertz_gate() {
        let mut engine = CountdownEngine::new();
        let schedule = sample_schedule();
        let t0 = Instant::now();

        engine.tick(t0, true, true, &schedule);
        // 200ms later: not due yet, result cannot change
        assert!(!engine.tick(t0 + Duration::from_millis(200), true, true, &schedule));
    }
}
