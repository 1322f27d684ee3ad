//! Arch curve model - time-to-parameter mapping and curve geometry
//!
//! Maps minute values inside a visible day range onto a normalized parameter
//! `t` along the arch, then maps any `t` (including off-screen ones) to a 2-D
//! point. The curve shape is a fixed design constant: level endpoints with a
//! smoothstep-like peak at the center.

use nannou::prelude::*;

/// Prayer markers live in the inner 80% of the arch; the line itself spans
/// the full width.
pub const DOT_START_RATIO: f32 = 0.10;
pub const DOT_END_RATIO: f32 = 0.90;

/// Off-screen start parameter for the orb entrance.
pub const OFFSCREEN_T: f32 = -0.3;

/// Map a minute value into `[DOT_START_RATIO, DOT_END_RATIO]`.
///
/// Unknown (NaN) times land at the degenerate-range fallback position.
/// A degenerate range (`max_time == min_time`) uses a denominator floor of 1,
/// which also yields the fallback position instead of NaN.
pub fn position(minutes: f32, min_time: f32, max_time: f32) -> f32 {
    if minutes.is_nan() {
        return DOT_START_RATIO;
    }
    let clamped = minutes.clamp(min_time.min(max_time), max_time.max(min_time));
    let frac = (clamped - min_time) / (max_time - min_time).max(1.0);
    DOT_START_RATIO + frac * (DOT_END_RATIO - DOT_START_RATIO)
}

/// Same mapping without clamping the minute value first.
///
/// The live indicator uses this so that "now" can legitimately sit off-range
/// before the first or after the last prayer of the day.
pub fn unclamped_position(minutes: f32, min_time: f32, max_time: f32) -> f32 {
    if minutes.is_nan() {
        return DOT_START_RATIO;
    }
    let frac = (minutes - min_time) / (max_time - min_time).max(1.0);
    DOT_START_RATIO + frac * (DOT_END_RATIO - DOT_START_RATIO)
}

/// Layout of the arch within the window
#[derive(Debug, Clone)]
pub struct ArchLayout {
    /// X of the left edge of the arch (t = 0)
    pub left_x: f32,
    /// Full width of the arch in pixels
    pub width: f32,
    /// Y of both endpoints
    pub base_y: f32,
    /// Height of the peak above the baseline
    pub peak_rise: f32,
    /// Marker dot radius
    pub marker_radius: f32,
    /// Orb radius
    pub orb_radius: f32,
}

impl ArchLayout {
    /// Calculate layout from window dimensions, leaving room for the
    /// bottom control panel.
    pub fn calculate(window_rect: Rect, panel_height: f32) -> Self {
        let margin = 0.06 * window_rect.w();
        let width = window_rect.w() - 2.0 * margin;
        let available_height = window_rect.h() - panel_height;

        let base_y = window_rect.bottom() + panel_height + 0.22 * available_height;
        let peak_rise = 0.45 * available_height;

        let marker_radius = (0.011 * width).clamp(4.0, 9.0);
        let orb_radius = marker_radius * 1.6;

        Self {
            left_x: window_rect.left() + margin,
            width,
            base_y,
            peak_rise,
            marker_radius,
            orb_radius,
        }
    }

    /// Symmetric curve weight: 0 at the endpoints, 1 at `t = 0.5`.
    fn curve_weight(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        16.0 * t * t * (1.0 - t) * (1.0 - t)
    }

    /// Map a curve parameter to a point.
    ///
    /// `x` is unclamped so negative or >1 parameters place the point
    /// off-canvas (the entrance animation starts there). `y` uses the
    /// clamped parameter, so off-screen points keep the endpoint height
    /// instead of extrapolating the curve shape.
    pub fn point_on_curve(&self, t: f32) -> Point2 {
        let x = self.left_x + t * self.width;
        let y = self.base_y + self.peak_rise * Self::curve_weight(t);
        pt2(x, y)
    }

    /// Sample the curve between two parameters as an ordered polyline.
    ///
    /// At least 50 points regardless of span, more for longer spans, so a
    /// partial-progress overlay stays as smooth as the full arch.
    pub fn build_path(&self, from_t: f32, to_t: f32) -> Vec<Point2> {
        let span = (to_t - from_t).abs();
        let samples = ((span * 120.0).ceil() as usize).max(50);

        let mut points = Vec::with_capacity(samples + 1);
        for i in 0..=samples {
            let t = from_t + (to_t - from_t) * (i as f32 / samples as f32);
            points.push(self.point_on_curve(t));
        }
        points
    }
}
