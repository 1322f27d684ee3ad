//! Prayer Arch
//!
//! A prayer-times companion view: the day's six prayer times laid out on a
//! fixed arch, a live orb tracking the current time with an entrance
//! animation, a progress gradient chasing the orb, and a once-per-second
//! countdown to the next prayer with day-boundary wraparound.

mod animation;
mod countdown;
mod curve;
mod drawing;
mod schedule;
mod status;
mod ui;

use std::time::Instant;

use chrono::{Local, NaiveDate};
use nannou::prelude::*;
use nannou_egui::{self, Egui};
use serde::{Deserialize, Serialize};

use shared::{clock_time, PrayerSchedule};

use crate::animation::EntranceAnimator;
use crate::countdown::CountdownEngine;
use crate::curve::ArchLayout;

const APP_NAME: &str = "prayer_arch";
const CONTROL_PANEL_HEIGHT: f32 = 130.0;

fn main() {
    nannou::app(model).update(update).run();
}

/// Persisted configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    use_24h: bool,
    reduced_motion: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_24h: false,
            reduced_motion: false,
        }
    }
}

/// Application state
pub struct Model {
    /// The calendar date being viewed; distinct from "now"
    pub viewed_date: NaiveDate,
    /// Whether the viewed date is today (live mode)
    pub is_today: bool,
    /// Read-only schedule snapshot for the viewed date
    pub schedule: PrayerSchedule,
    /// Entrance/leave state machine and its channels
    pub animator: EntranceAnimator,
    /// 1 Hz countdown recomputation
    pub countdown: CountdownEngine,
    /// Host visibility flag (window focus); suspends the countdown
    pub visible: bool,

    /// Display preferences
    pub use_24h: bool,
    pub reduced_motion: bool,

    /// egui integration
    egui: Egui,
}

impl Model {
    /// Current minutes for classification and geometry.
    ///
    /// Live mode samples the wall clock with sub-minute precision; static
    /// mode substitutes a synthetic value so past dates render fully past
    /// and future dates fully future without a running clock.
    pub fn current_minutes(&self) -> f32 {
        if self.is_today {
            let (minutes, seconds) = clock_time::now_minutes();
            return minutes + seconds as f32 / 60.0;
        }
        if self.viewed_date < Local::now().date_naive() {
            status::END_OF_DAY
        } else {
            status::START_OF_DAY
        }
    }

    /// Switch the viewed date, rebuilding the schedule snapshot and firing
    /// the entrance/leave transition when today-ness changes.
    pub fn set_viewed_date(&mut self, date: NaiveDate, now: Instant) {
        if date == self.viewed_date {
            return;
        }

        let was_today = self.is_today;
        self.viewed_date = date;
        self.is_today = date == Local::now().date_naive();
        self.schedule = schedule::schedule_for(date);
        self.countdown.clear();

        if self.is_today && !was_today {
            self.animator.enter_today(now, self.reduced_motion);
        } else if !self.is_today && was_today {
            self.animator.leave_today(now);
        }
    }

    /// Jump to today, replaying the entrance even when already there.
    pub fn animate_to_today(&mut self, now: Instant) {
        let today = Local::now().date_naive();
        if self.viewed_date != today {
            self.set_viewed_date(today, now);
        } else {
            self.animator.enter_today(now, self.reduced_motion);
        }
    }

    /// Replay the entrance in place. No-op unless viewing today.
    pub fn replay_entrance(&mut self, now: Instant) {
        if self.is_today {
            self.animator.enter_today(now, self.reduced_motion);
        }
    }

    fn step_day(&mut self, days: i64, now: Instant) {
        if let Some(date) = self
            .viewed_date
            .checked_add_signed(chrono::Duration::days(days))
        {
            self.set_viewed_date(date, now);
        }
    }
}

fn save_config(model: &Model) {
    let config = Config {
        use_24h: model.use_24h,
        reduced_motion: model.reduced_motion,
    };
    if let Err(e) = shared::save_config(APP_NAME, &config) {
        eprintln!("Failed to save config: {}", e);
    }
}

fn model(app: &App) -> Model {
    app.set_exit_on_escape(false);

    let window_id = app
        .new_window()
        .title("Prayer Arch")
        .size(1000, 720)
        .min_size(640, 480)
        .view(view)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config: Config = shared::load_config(APP_NAME)
        .ok()
        .flatten()
        .unwrap_or_default();

    let today = Local::now().date_naive();
    let mut model = Model {
        viewed_date: today,
        is_today: true,
        schedule: schedule::schedule_for(today),
        animator: EntranceAnimator::new(),
        countdown: CountdownEngine::new(),
        visible: true,
        use_24h: config.use_24h,
        reduced_motion: config.reduced_motion,
        egui,
    };

    // First mount while viewing today counts as entering today
    model.animator.enter_today(Instant::now(), model.reduced_motion);

    model
}

fn update(_app: &App, model: &mut Model, update: Update) {
    let now = Instant::now();

    // Midnight rollover (or clock change) can end today-ness without a
    // navigation event; re-derive it every frame like any other edge
    let today = Local::now().date_naive();
    let is_today_now = model.viewed_date == today;
    if is_today_now != model.is_today {
        model.is_today = is_today_now;
        if is_today_now {
            model.animator.enter_today(now, model.reduced_motion);
        } else {
            model.animator.leave_today(now);
        }
    }

    model.animator.tick(now);
    model
        .countdown
        .tick(now, model.is_today, model.visible, &model.schedule);

    let current_minutes = model.current_minutes();

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let panel = ui::draw_control_panel(
        &ctx,
        model.viewed_date,
        model.is_today,
        &model.schedule,
        current_minutes,
        &mut model.use_24h,
        &mut model.reduced_motion,
    );

    drop(ctx);

    if panel.go_previous_day {
        model.step_day(-1, now);
    }
    if panel.go_next_day {
        model.step_day(1, now);
    }
    if panel.go_today {
        model.animate_to_today(now);
    }
    if panel.clock_format_changed || panel.reduced_motion_changed {
        save_config(model);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    let layout = ArchLayout::calculate(window_rect, CONTROL_PANEL_HEIGHT);

    draw.background().color(drawing::colors::BACKGROUND);

    drawing::draw_scene(&draw, &layout, model);

    // Title and viewed date
    draw.text("PRAYER ARCH")
        .x_y(0.0, window_rect.top() - 25.0)
        .color(drawing::colors::TEXT_PRIMARY)
        .font_size(18)
        .w(300.0);
    draw.text(&model.viewed_date.format("%A, %B %-d, %Y").to_string())
        .x_y(0.0, window_rect.top() - 48.0)
        .color(drawing::colors::TEXT_SECONDARY)
        .font_size(13)
        .w(360.0);

    draw.to_frame(app, &frame).unwrap();

    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    let now = Instant::now();

    match key {
        Key::Left => model.step_day(-1, now),
        Key::Right => model.step_day(1, now),

        // T - jump to today with entrance replay
        Key::T => model.animate_to_today(now),

        // R - replay the entrance in place (no-op away from today)
        Key::R => model.replay_entrance(now),

        _ => {}
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);

    // Visibility follows window focus; a backgrounded view freezes its
    // countdown instead of drifting
    if let nannou::winit::event::WindowEvent::Focused(focused) = event {
        model.visible = *focused;
    }
}
