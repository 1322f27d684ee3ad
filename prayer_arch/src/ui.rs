//! UI module for the Prayer Arch
//!
//! Bottom control panel with date navigation, the jump-to-today action,
//! the day's prayer list, and display preferences, using egui.

use chrono::NaiveDate;
use nannou_egui::egui;

use shared::{clock_time, Prayer, PrayerSchedule};

use crate::status::{self, PrayerStatus};

/// Result of control panel interactions
#[derive(Default)]
pub struct ControlPanelResult {
    /// Step the viewed date backward one day
    pub go_previous_day: bool,
    /// Step the viewed date forward one day
    pub go_next_day: bool,
    /// Jump to today (with entrance replay)
    pub go_today: bool,
    /// 24-hour toggle changed
    pub clock_format_changed: bool,
    /// Reduced motion toggle changed
    pub reduced_motion_changed: bool,
}

/// Draw the bottom control panel.
#[allow(clippy::too_many_arguments)]
pub fn draw_control_panel(
    ctx: &egui::Context,
    viewed_date: NaiveDate,
    is_today: bool,
    schedule: &PrayerSchedule,
    current_minutes: f32,
    use_24h: &mut bool,
    reduced_motion: &mut bool,
) -> ControlPanelResult {
    let mut result = ControlPanelResult::default();

    egui::TopBottomPanel::bottom("control_panel")
        .resizable(false)
        .min_height(110.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                // Left: date navigation
                ui.vertical(|ui| {
                    ui.heading("Date");

                    ui.horizontal(|ui| {
                        if ui
                            .button("◀")
                            .on_hover_text("Previous day. Keyboard: Left")
                            .clicked()
                        {
                            result.go_previous_day = true;
                        }

                        let label = viewed_date.format("%a, %b %-d %Y").to_string();
                        ui.label(egui::RichText::new(label).size(14.0));

                        if ui
                            .button("▶")
                            .on_hover_text("Next day. Keyboard: Right")
                            .clicked()
                        {
                            result.go_next_day = true;
                        }
                    });

                    let today_label = if is_today { "Replay (T)" } else { "Today (T)" };
                    if ui
                        .button(today_label)
                        .on_hover_text("Jump to today and replay the entrance. Keyboard: T")
                        .clicked()
                    {
                        result.go_today = true;
                    }
                });

                ui.separator();

                // Center: the day's schedule with live status
                ui.vertical(|ui| {
                    ui.heading("Schedule");
                    egui::Grid::new("schedule_grid")
                        .num_columns(3)
                        .spacing([18.0, 2.0])
                        .show(ui, |ui| {
                            for (i, prayer) in Prayer::ALL.iter().enumerate() {
                                let minutes = schedule.minutes[i];
                                let state =
                                    status::classify(&schedule.minutes, i, current_minutes);

                                ui.label(status_tint(
                                    egui::RichText::new(prayer.name()).size(12.0),
                                    state,
                                ));
                                ui.label(status_tint(
                                    egui::RichText::new(clock_time::format(minutes, *use_24h))
                                        .size(12.0),
                                    state,
                                ));
                                ui.label(
                                    egui::RichText::new(status_word(state))
                                        .size(10.0)
                                        .color(egui::Color32::from_rgb(110, 120, 140)),
                                );
                                ui.end_row();
                            }
                        });
                });

                ui.separator();

                // Right: display preferences
                ui.vertical(|ui| {
                    ui.heading("Display");

                    if ui.checkbox(use_24h, "24-hour clock").changed() {
                        result.clock_format_changed = true;
                    }
                    if ui.checkbox(reduced_motion, "Reduced motion").changed() {
                        result.reduced_motion_changed = true;
                    }
                });
            });

            ui.add_space(6.0);
        });

    result
}

fn status_word(state: PrayerStatus) -> &'static str {
    match state {
        PrayerStatus::Past => "past",
        PrayerStatus::Current => "now",
        PrayerStatus::Future => "ahead",
    }
}

fn status_tint(text: egui::RichText, state: PrayerStatus) -> egui::RichText {
    match state {
        PrayerStatus::Past => text.color(egui::Color32::from_rgb(200, 170, 110)),
        PrayerStatus::Current => text
            .color(egui::Color32::from_rgb(245, 210, 130))
            .strong(),
        PrayerStatus::Future => text.color(egui::Color32::from_rgb(150, 160, 185)),
    }
}
