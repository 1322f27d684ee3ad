//! Shared building blocks for the Prayer Arch app
//!
//! Pure, UI-independent pieces: the time string codec, the daily prayer
//! schedule model, and TOML config persistence.

pub mod clock_time;
pub mod config;
pub mod schedule;

pub use clock_time::{
    format, is_unknown, now_minutes, parse, parse_or_unknown, MalformedTimeError, MINUTES_PER_DAY,
    UNKNOWN_MINUTES,
};
pub use config::{config_dir, config_path, load_config, save_config, ConfigError};
pub use schedule::{Prayer, PrayerSchedule, PRAYER_COUNT};
