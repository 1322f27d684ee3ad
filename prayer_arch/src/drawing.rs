//! Drawing module for the Prayer Arch
//!
//! Composes the curve model, classifier, and animator into the painted
//! scene: static arch, progress gradient chasing the orb, prayer markers
//! with fade windows, the orb and its gated glow, and the countdown /
//! away-day crossfade pair. Marker layout is kept pure so it can be
//! unit-tested without a window.

use nannou::prelude::*;

use shared::{clock_time, Prayer, PrayerSchedule, PRAYER_COUNT};

use crate::curve::{self, ArchLayout, DOT_END_RATIO, DOT_START_RATIO};
use crate::status::{self, PrayerStatus};
use crate::Model;

/// A marker within this angular tolerance of the live indicator is
/// suppressed so two dots never overlap.
pub const MARKER_EPSILON: f32 = 0.015;

/// Minutes on either side of a prayer's moment across which its marker's
/// styling ramps instead of snapping.
pub const FADE_WINDOW_MINUTES: f32 = 3.0;

/// Color palette for the arch theme
#[allow(dead_code)]
pub mod colors {
    use nannou::prelude::*;

    /// Night-sky background
    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 16,
        green: 20,
        blue: 32,
        standard: std::marker::PhantomData,
    };

    /// The unlit arch line
    pub const ARCH_LINE: Srgb<u8> = Srgb {
        red: 55,
        green: 62,
        blue: 84,
        standard: std::marker::PhantomData,
    };

    /// Progress gradient start (left edge)
    pub const PROGRESS_START: Srgb<u8> = Srgb {
        red: 120,
        green: 110,
        blue: 200,
        standard: std::marker::PhantomData,
    };

    /// Progress gradient end (at the orb)
    pub const PROGRESS_END: Srgb<u8> = Srgb {
        red: 235,
        green: 185,
        blue: 90,
        standard: std::marker::PhantomData,
    };

    /// Marker for a prayer already behind the indicator
    pub const MARKER_PAST: Srgb<u8> = Srgb {
        red: 200,
        green: 170,
        blue: 110,
        standard: std::marker::PhantomData,
    };

    /// Marker for a prayer still ahead
    pub const MARKER_FUTURE: Srgb<u8> = Srgb {
        red: 90,
        green: 100,
        blue: 130,
        standard: std::marker::PhantomData,
    };

    /// Ring around the currently active prayer's marker
    pub const MARKER_CURRENT_RING: Srgb<u8> = Srgb {
        red: 245,
        green: 210,
        blue: 130,
        standard: std::marker::PhantomData,
    };

    /// The orb itself
    pub const ORB: Srgb<u8> = Srgb {
        red: 250,
        green: 225,
        blue: 160,
        standard: std::marker::PhantomData,
    };

    /// Primary text
    pub const TEXT_PRIMARY: Srgb<u8> = Srgb {
        red: 222,
        green: 226,
        blue: 238,
        standard: std::marker::PhantomData,
    };

    /// Secondary text
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 140,
        green: 150,
        blue: 172,
        standard: std::marker::PhantomData,
    };
}

/// One laid-out prayer marker, ready to paint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerVisual {
    pub prayer: Prayer,
    pub t: f32,
    pub status: PrayerStatus,
    /// 0 = fully future styling, 1 = fully past styling; ramps linearly
    /// across the fade window as the indicator crosses the prayer's moment
    pub blend: f32,
}

/// Lay out the visible markers for one frame.
///
/// `suppression_t` is the clamped live-indicator parameter, or `None` when
/// the indicator is off-curve or not live - in that case nothing is
/// suppressed.
pub fn layout_markers(
    schedule: &PrayerSchedule,
    current_minutes: f32,
    suppression_t: Option<f32>,
) -> Vec<MarkerVisual> {
    let min_time = schedule.min_time();
    let max_time = schedule.max_time();

    let mut markers = Vec::with_capacity(PRAYER_COUNT);
    for (i, &minutes) in schedule.minutes.iter().enumerate() {
        let t = curve::position(minutes, min_time, max_time);

        if let Some(live_t) = suppression_t {
            if (t - live_t).abs() < MARKER_EPSILON {
                continue;
            }
        }

        let blend = if clock_time::is_unknown(minutes) {
            0.0
        } else {
            ((current_minutes - minutes + FADE_WINDOW_MINUTES) / (2.0 * FADE_WINDOW_MINUTES))
                .clamp(0.0, 1.0)
        };

        markers.push(MarkerVisual {
            prayer: Prayer::ALL[i],
            t,
            status: status::classify(&schedule.minutes, i, current_minutes),
            blend,
        });
    }
    markers
}

/// Clamped live-indicator parameter, or `None` when "now" sits off-curve
/// (before the first or after the last prayer).
pub fn suppression_parameter(now_t_unclamped: f32) -> Option<f32> {
    if (DOT_START_RATIO..=DOT_END_RATIO).contains(&now_t_unclamped) {
        Some(now_t_unclamped)
    } else {
        None
    }
}

/// Paint the whole arch scene.
pub fn draw_scene(draw: &Draw, layout: &ArchLayout, model: &Model) {
    let schedule = &model.schedule;
    let current_minutes = model.current_minutes();

    // Static arch across the full width
    draw.polyline()
        .weight(3.0)
        .points(layout.build_path(0.0, 1.0))
        .color(colors::ARCH_LINE);

    let now_t = curve::unclamped_position(current_minutes, schedule.min_time(), schedule.max_time());

    // Progress gradient and orb only make sense in live mode
    if model.is_today {
        let orb_t = model.animator.orb_t(now_t);
        draw_progress(draw, layout, orb_t);
    }

    // Markers
    let suppression = if model.is_today {
        suppression_parameter(now_t)
    } else {
        None
    };
    for marker in layout_markers(schedule, current_minutes, suppression) {
        draw_marker(draw, layout, &marker, model.use_24h, schedule);
    }

    if model.is_today {
        let orb_t = model.animator.orb_t(now_t);
        draw_orb(draw, layout, orb_t, model.animator.glow_alpha());
    }

    draw_center_text(draw, layout, model);
}

/// Gradient overlay from the left edge up to the orb, so the lit portion
/// visually chases the orb during the entrance instead of jumping to its
/// final length.
fn draw_progress(draw: &Draw, layout: &ArchLayout, orb_t: f32) {
    let end_t = orb_t.clamp(0.0, 1.0);
    if end_t <= 0.0 {
        return;
    }

    let path = layout.build_path(0.0, end_t);
    let count = path.len().max(2);
    let colored = path.into_iter().enumerate().map(|(i, p)| {
        let frac = i as f32 / (count - 1) as f32;
        let color = blend_srgb(colors::PROGRESS_START, colors::PROGRESS_END, frac);
        (p, color)
    });

    draw.polyline().weight(4.0).points_colored(colored);
}

fn draw_marker(
    draw: &Draw,
    layout: &ArchLayout,
    marker: &MarkerVisual,
    use_24h: bool,
    schedule: &PrayerSchedule,
) {
    let point = layout.point_on_curve(marker.t);
    let color = blend_srgb(colors::MARKER_FUTURE, colors::MARKER_PAST, marker.blend);

    draw.ellipse()
        .x_y(point.x, point.y)
        .radius(layout.marker_radius)
        .color(color);

    if marker.status == PrayerStatus::Current {
        draw.ellipse()
            .x_y(point.x, point.y)
            .radius(layout.marker_radius + 4.0)
            .no_fill()
            .stroke(colors::MARKER_CURRENT_RING)
            .stroke_weight(2.0);
    }

    // Name above, time below the dot
    let slot = marker.prayer as usize;
    draw.text(marker.prayer.name())
        .x_y(point.x, point.y + layout.marker_radius + 16.0)
        .color(colors::TEXT_PRIMARY)
        .font_size(13)
        .w(90.0);
    draw.text(&clock_time::format(schedule.minutes[slot], use_24h))
        .x_y(point.x, point.y - layout.marker_radius - 14.0)
        .color(colors::TEXT_SECONDARY)
        .font_size(11)
        .w(90.0);
}

fn draw_orb(draw: &Draw, layout: &ArchLayout, orb_t: f32, glow_alpha: f32) {
    let point = layout.point_on_curve(orb_t);

    // Glow halo, gated on entrance completion upstream
    if glow_alpha > 0.0 {
        for (scale, base_alpha) in [(3.2, 28.0), (2.2, 55.0), (1.5, 90.0)] {
            draw.ellipse()
                .x_y(point.x, point.y)
                .radius(layout.orb_radius * scale)
                .color(srgba(
                    colors::ORB.red,
                    colors::ORB.green,
                    colors::ORB.blue,
                    (base_alpha * glow_alpha) as u8,
                ));
        }
    }

    draw.ellipse()
        .x_y(point.x, point.y)
        .radius(layout.orb_radius)
        .color(colors::ORB);
}

/// The countdown block and the away-day hint share the space under the
/// arch peak; their opacities are the two sides of the crossfade channel.
fn draw_center_text(draw: &Draw, layout: &ArchLayout, model: &Model) {
    let cx = layout.left_x + 0.5 * layout.width;
    let cy = layout.base_y + 0.45 * layout.peak_rise;

    let countdown_alpha = model.animator.countdown_alpha();
    if countdown_alpha > 0.01 {
        if let Some(result) = model.countdown.result() {
            draw.text(&result.format())
                .x_y(cx, cy + 14.0)
                .color(text_with_alpha(colors::TEXT_PRIMARY, countdown_alpha))
                .font_size(30)
                .w(280.0);
            let target = clock_time::format(result.target_minutes, model.use_24h);
            draw.text(&format!("until {} · {}", result.prayer, target))
                .x_y(cx, cy - 16.0)
                .color(text_with_alpha(colors::TEXT_SECONDARY, countdown_alpha))
                .font_size(14)
                .w(280.0);
        }
    }

    let hint_alpha = model.animator.away_hint_alpha();
    if hint_alpha > 0.01 {
        draw.text("Viewing another day")
            .x_y(cx, cy + 10.0)
            .color(text_with_alpha(colors::TEXT_PRIMARY, hint_alpha))
            .font_size(18)
            .w(320.0);
        draw.text("Press T to jump to today")
            .x_y(cx, cy - 14.0)
            .color(text_with_alpha(colors::TEXT_SECONDARY, hint_alpha))
            .font_size(13)
            .w(320.0);
    }
}

fn text_with_alpha(color: Srgb<u8>, alpha: f32) -> Srgba<u8> {
    srgba(
        color.red,
        color.green,
        color.blue,
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

fn blend_srgb(a: Srgb<u8>, b: Srgb<u8>, t: f32) -> Srgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    Srgb::new(lerp(a.red, b.red), lerp(a.green, b.green), lerp(a.blue, b.blue))
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
    fn test_marker_suppression_near_indicator() {
        let schedule = sample_schedule();
        // Indicator exactly on Dhuhr's parameter
        let dhuhr_t = curve::position(750.0, schedule.min_time(), schedule.max_time());
        let markers = layout_markers(&schedule, 750.0, Some(dhuhr_t));
        assert_eq!(markers.len(), 5);
        assert!(markers.iter().all(|m| m.prayer != Prayer::Dhuhr));
    }

    #[test]
    fn test_no_suppression_without_live_indicator() {
        let schedule = sample_schedule();
        let markers = layout_markers(&schedule, status::END_OF_DAY, None);
        assert_eq!(markers.len(), 6);
    }

    #[test]
    fn test_suppression_parameter_off_curve() {
        // Before Fajr the unclamped parameter sits left of the dot band:
        // no suppression candidate
        assert_eq!(suppression_parameter(0.05), None);
        assert_eq!(suppression_parameter(0.95), None);
        assert_eq!(suppression_parameter(0.5), Some(0.5));
    }

    #[test]
    fn test_fade_window_blend() {
        let schedule = sample_schedule();
        // Dhuhr at 750: 3 minutes before, blend 0; 3 minutes after, blend 1
        let before = layout_markers(&schedule, 747.0, None);
        let dhuhr = before.iter().find(|m| m.prayer == Prayer::Dhuhr).unwrap();
        assert!(dhuhr.blend.abs() < 0.001);

        let after = layout_markers(&schedule, 753.0, None);
        let dhuhr = after.iter().find(|m| m.prayer == Prayer::Dhuhr).unwrap();
        assert!((dhuhr.blend - 1.0).abs() < 0.001);

        // Exactly at the moment: halfway through the ramp
        let at = layout_markers(&schedule, 750.0, None);
        let dhuhr = at.iter().find(|m| m.prayer == Prayer::Dhuhr).unwrap();
        assert!((dhuhr.blend - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_unknown_time_marker_at_fallback() {
        let mut schedule = sample_schedule();
        schedule.minutes[4] = f32::NAN;
        let markers = layout_markers(&schedule, 600.0, None);
        let maghrib = markers.iter().find(|m| m.prayer == Prayer::Maghrib).unwrap();
        assert_eq!(maghrib.t, DOT_START_RATIO);
        assert_eq!(maghrib.blend, 0.0);
    }

    #[test]
    fn test_past_date_markers_all_past() {
        let schedule = sample_schedule();
        let markers = layout_markers(&schedule, status::END_OF_DAY, None);
        assert!(markers.iter().all(|m| m.status == PrayerStatus::Past));
        assert!(markers.iter().all(|m| (m.blend - 1.0).abs() < 0.001));
    }
}
