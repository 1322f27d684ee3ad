//! Entrance animation - channels and the today/away state machine
//!
//! Three coupled channels drive the arch's entrance: the orb's progress along
//! its path, the glow halo opacity, and a crossfade between the countdown
//! block and the "viewing another day" affordance. A channel is an observable
//! scalar with instant set and timed eased transitions; starting a new
//! transition always cancels the in-flight one, so rapid date toggling is
//! last-trigger-wins by construction.

use std::time::{Duration, Instant};

use crate::curve::OFFSCREEN_T;

/// Easing laws used by the animation channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Easing {
    Linear,
    EaseOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

struct Transition {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

/// An observable animated scalar.
///
/// Holds a current value, supports instant set and a single timed transition
/// at a time, and delivers the live value to subscribers once per tick while
/// a transition runs.
pub struct AnimationChannel {
    value: f32,
    transition: Option<Transition>,
    observers: Vec<Box<dyn FnMut(f32)>>,
}

impl AnimationChannel {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            transition: None,
            observers: Vec::new(),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Instant set. Cancels any in-flight transition.
    pub fn set(&mut self, value: f32) {
        self.transition = None;
        if (value - self.value).abs() > f32::EPSILON {
            self.value = value;
            self.notify();
        }
    }

    /// Start a timed transition toward `target`, cancelling any in-flight
    /// one first so no two transitions ever race on the same channel.
    pub fn animate_to(&mut self, target: f32, duration: Duration, easing: Easing, now: Instant) {
        if duration.is_zero() {
            self.set(target);
            return;
        }
        self.transition = Some(Transition {
            from: self.value,
            to: target,
            started: now,
            duration,
            easing,
        });
    }

    /// Advance the active transition, if any. Returns true when the value
    /// moved this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(tr) = &self.transition else {
            return false;
        };

        let elapsed = now.duration_since(tr.started).as_secs_f32();
        let raw = elapsed / tr.duration.as_secs_f32();

        let next = if raw >= 1.0 {
            tr.to
        } else {
            let eased = tr.easing.apply(raw);
            tr.from + (tr.to - tr.from) * eased
        };
        if raw >= 1.0 {
            self.transition = None;
        }

        let moved = (next - self.value).abs() > f32::EPSILON;
        self.value = next;
        self.notify();
        moved
    }

    /// Subscribe to per-tick value updates.
    #[allow(dead_code)]
    pub fn subscribe<F: FnMut(f32) + 'static>(&mut self, f: F) {
        self.observers.push(Box::new(f));
    }

    fn notify(&mut self) {
        for obs in &mut self.observers {
            obs(self.value);
        }
    }
}

/// Entrance state machine state.
///
/// Both transition states collapse back to `Idle` once settled; there is no
/// persistent "entered" state distinct from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    EnteringToday,
    LeavingToday,
}

/// Drives the orb entrance, the glow reveal, and the countdown crossfade.
pub struct EntranceAnimator {
    state: AnimationState,
    /// Orb travel along its entrance path, 0 (off-screen) to 1 (live spot)
    pub entrance_progress: AnimationChannel,
    /// Glow halo opacity; visibility additionally gates on `entrance_complete`
    pub glow_opacity: AnimationChannel,
    /// Countdown block opacity; the away-day affordance renders at 1 - value
    pub crossfade: AnimationChannel,
    /// Set only after the parallel entrance group finishes. The glow must
    /// never render before this flags, even if the glow channel holds a
    /// transient non-zero value from a restarted animation.
    entrance_complete: bool,
}

impl EntranceAnimator {
    const ENTRANCE_DURATION: Duration = Duration::from_millis(1200);
    const CROSSFADE_DURATION: Duration = Duration::from_millis(350);
    const GLOW_DURATION: Duration = Duration::from_millis(450);

    /// Starts in the settled static pose; the host triggers the first
    /// entrance when it mounts viewing today.
    pub fn new() -> Self {
        Self {
            state: AnimationState::Idle,
            entrance_progress: AnimationChannel::new(1.0),
            glow_opacity: AnimationChannel::new(0.0),
            crossfade: AnimationChannel::new(0.0),
            entrance_complete: false,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[allow(dead_code)]
    pub fn entrance_complete(&self) -> bool {
        self.entrance_complete
    }

    /// Begin the entrance: orb from off-screen, countdown fading in, glow
    /// held back until the group completes.
    ///
    /// Also serves as the explicit replay trigger - calling it mid-flight
    /// resets and restarts from off-screen, cancelling in-flight transitions.
    /// With reduced motion everything snaps straight to the settled pose.
    pub fn enter_today(&mut self, now: Instant, reduced_motion: bool) {
        if reduced_motion {
            self.entrance_progress.set(1.0);
            self.crossfade.set(1.0);
            self.entrance_complete = true;
            self.glow_opacity.set(1.0);
            self.state = AnimationState::Idle;
            return;
        }

        self.state = AnimationState::EnteringToday;
        self.entrance_complete = false;
        self.entrance_progress.set(0.0);
        self.glow_opacity.set(0.0);
        self.crossfade
            .animate_to(1.0, Self::CROSSFADE_DURATION, Easing::EaseOut, now);
        self.entrance_progress
            .animate_to(1.0, Self::ENTRANCE_DURATION, Easing::EaseOut, now);
    }

    /// The viewed date stopped being today: crossfade to the away-day
    /// affordance, snap the orb pose. No animated orb motion while static.
    pub fn leave_today(&mut self, now: Instant) {
        self.state = AnimationState::LeavingToday;
        self.entrance_complete = false;
        self.crossfade
            .animate_to(0.0, Self::CROSSFADE_DURATION, Easing::EaseOut, now);
        self.entrance_progress.set(1.0);
        self.glow_opacity.set(0.0);
    }

    /// Advance all channels and the state machine. Returns true when
    /// anything moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut moved = false;
        moved |= self.entrance_progress.tick(now);
        moved |= self.glow_opacity.tick(now);
        moved |= self.crossfade.tick(now);

        match self.state {
            AnimationState::EnteringToday => {
                if !self.entrance_progress.is_animating() && !self.crossfade.is_animating() {
                    // Parallel group done: flag completion, then reveal the glow
                    self.entrance_complete = true;
                    self.glow_opacity
                        .animate_to(1.0, Self::GLOW_DURATION, Easing::EaseOut, now);
                    self.state = AnimationState::Idle;
                    moved = true;
                }
            }
            AnimationState::LeavingToday => {
                if !self.crossfade.is_animating() {
                    self.state = AnimationState::Idle;
                }
            }
            AnimationState::Idle => {}
        }

        moved
    }

    /// Orb parameter for this frame: off-screen start interpolated toward
    /// the live target as the entrance progresses.
    pub fn orb_t(&self, target_t: f32) -> f32 {
        let progress = self.entrance_progress.value();
        OFFSCREEN_T + (target_t - OFFSCREEN_T) * progress
    }

    /// Glow alpha, gated on the completion flag rather than the raw channel
    /// value.
    pub fn glow_alpha(&self) -> f32 {
        if self.entrance_complete {
            self.glow_opacity.value()
        } else {
            0.0
        }
    }

    /// Countdown block opacity.
    pub fn countdown_alpha(&self) -> f32 {
        self.crossfade.value()
    }

    /// Away-day affordance opacity, the other side of the crossfade pair.
    pub fn away_hint_alpha(&self) -> f32 {
        1.0 - self.crossfade.value()
    }
}

impl Default for EntranceAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn settle(animator: &mut EntranceAnimator, from: Instant) -> Instant {
        // Long enough for the entrance group plus the glow reveal
        let mid = from + Duration::from_millis(1500);
        animator.tick(mid);
        let end = mid + Duration::from_millis(600);
        animator.tick(end);
        end
    }

    #[test]
    fn test_channel_eased_transition() {
        let t0 = Instant::now();
        let mut ch = AnimationChannel::new(0.0);
        ch.animate_to(1.0, Duration::from_millis(1000), Easing::EaseOut, t0);

        ch.tick(t0 + Duration::from_millis(500));
        // Ease-out at half time: 1 - 0.25 = 0.75
        assert!((ch.value() - 0.75).abs() < 0.01);
        assert!(ch.is_animating());

        ch.tick(t0 + Duration::from_millis(1100));
        assert_eq!(ch.value(), 1.0);
        assert!(!ch.is_animating());
    }

    #[test]
    fn test_channel_set_cancels_transition() {
        let t0 = Instant::now();
        let mut ch = AnimationChannel::new(0.0);
        ch.animate_to(1.0, Duration::from_millis(1000), Easing::Linear, t0);
        ch.set(0.3);
        assert!(!ch.is_animating());
        // A later tick must not resume the cancelled transition
        assert!(!ch.tick(t0 + Duration::from_millis(2000)));
        assert!((ch.value() - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_channel_restart_replaces_transition() {
        let t0 = Instant::now();
        let mut ch = AnimationChannel::new(0.0);
        ch.animate_to(1.0, Duration::from_millis(1000), Easing::Linear, t0);
        ch.tick(t0 + Duration::from_millis(400));

        // Second animate_to cancels the first; progress restarts from the
        // current value toward the new target
        ch.animate_to(0.0, Duration::from_millis(1000), Easing::Linear, t0 + Duration::from_millis(400));
        ch.tick(t0 + Duration::from_millis(900));
        assert!(ch.value() < 0.4);
        assert!(ch.is_animating());
    }

    #[test]
    fn test_channel_subscription() {
        let t0 = Instant::now();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut ch = AnimationChannel::new(0.0);
        ch.subscribe(move |v| sink.borrow_mut().push(v));
        ch.animate_to(1.0, Duration::from_millis(100), Easing::Linear, t0);
        ch.tick(t0 + Duration::from_millis(50));
        ch.tick(t0 + Duration::from_millis(150));

        let values = seen.borrow();
        assert_eq!(values.len(), 2);
        assert!((values[0] - 0.5).abs() < 0.01);
        assert_eq!(values[1], 1.0);
    }

    #[test]
    fn test_entrance_sequence_and_glow_gating() {
        let t0 = Instant::now();
        let mut animator = EntranceAnimator::new();
        animator.enter_today(t0, false);

        assert_eq!(animator.state(), AnimationState::EnteringToday);
        assert_eq!(animator.entrance_progress.value(), 0.0);
        // Glow held back while entering, whatever the channel says
        animator.tick(t0 + Duration::from_millis(600));
        assert!(!animator.entrance_complete());
        assert_eq!(animator.glow_alpha(), 0.0);

        // After the group finishes the flag flips and the glow fades in
        animator.tick(t0 + Duration::from_millis(1300));
        assert!(animator.entrance_complete());
        assert_eq!(animator.entrance_progress.value(), 1.0);
        assert_eq!(animator.state(), AnimationState::Idle);

        animator.tick(t0 + Duration::from_millis(1900));
        assert_eq!(animator.glow_alpha(), 1.0);
        assert!((animator.countdown_alpha() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_double_entrance_is_idempotent() {
        let t0 = Instant::now();
        let mut animator = EntranceAnimator::new();
        animator.enter_today(t0, false);
        animator.tick(t0 + Duration::from_millis(600));
        let mid_progress = animator.entrance_progress.value();
        assert!(mid_progress > 0.5);

        // Replay mid-flight: restarts from off-screen, one transition per
        // channel (the second animate_to replaced the first)
        let t1 = t0 + Duration::from_millis(600);
        animator.enter_today(t1, false);
        animator.tick(t1 + Duration::from_millis(16));
        assert!(animator.entrance_progress.value() < 0.1);
        assert!(!animator.entrance_complete());

        // Settles exactly once
        settle(&mut animator, t1);
        assert_eq!(animator.entrance_progress.value(), 1.0);
        assert_eq!(animator.glow_alpha(), 1.0);
        assert_eq!(animator.state(), AnimationState::Idle);
    }

    #[test]
    fn test_leaving_today_snaps() {
        let t0 = Instant::now();
        let mut animator = EntranceAnimator::new();
        animator.enter_today(t0, false);
        let settled = settle(&mut animator, t0);

        animator.leave_today(settled);
        // Snapped, not transitioned
        assert_eq!(animator.entrance_progress.value(), 1.0);
        assert!(!animator.entrance_progress.is_animating());
        assert_eq!(animator.glow_alpha(), 0.0);
        assert!(!animator.glow_opacity.is_animating());
        assert_eq!(animator.state(), AnimationState::LeavingToday);

        // Crossfade settles back to the away-day side
        animator.tick(settled + Duration::from_millis(400));
        assert_eq!(animator.state(), AnimationState::Idle);
        assert!((animator.away_hint_alpha() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_reduced_motion_snaps_entrance() {
        let t0 = Instant::now();
        let mut animator = EntranceAnimator::new();
        animator.enter_today(t0, true);
        assert_eq!(animator.entrance_progress.value(), 1.0);
        assert_eq!(animator.glow_alpha(), 1.0);
        assert_eq!(animator.state(), AnimationState::Idle);
    }

    #[test]
    fn test_orb_interpolates_from_offscreen() {
        let mut animator = EntranceAnimator::new();
        animator.entrance_progress.set(0.0);
        assert!((animator.orb_t(0.5) - OFFSCREEN_T).abs() < 0.001);
        animator.entrance_progress.set(1.0);
        assert!((animator.orb_t(0.5) - 0.5).abs() < 0.001);
        animator.entrance_progress.set(0.5);
        let mid = OFFSCREEN_T + (0.5 - OFFSCREEN_T) * 0.5;
        assert!((animator.orb_t(0.5) - mid).abs() < 0.001);
    }
}
