//! Progress transition animation.
//!
//! An [`Animator`] drives a normalized time value from 0 to 1 over a fixed
//! duration, maps it through an interpolation curve and produces the progress
//! value to display on each frame. It is a small state machine:
//!
//! ```text
//!   Idle --start()--> Running --advance() reaches t = 1--> Idle
//! ```
//!
//! The animator does not schedule anything itself; the progress view advances
//! it once per frame message.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_progressview::animation::{Animator, ProgressAnimation};
//! use std::time::Duration;
//!
//! let mut animator = Animator::new(Duration::from_millis(100), ProgressAnimation::Decelerate);
//! animator.start(0.0, 80.0);
//! while animator.is_running() {
//!     animator.advance(Duration::from_millis(16));
//! }
//! assert_eq!(animator.value(), 80.0);
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Frames per second used when advancing animations.
pub const FPS: u32 = 60;
/// Default animation duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

/// Caller-supplied interpolation curve mapping `[0, 1]` onto `[0, 1]`.
///
/// The curve may overshoot (a bouncing curve for example); the final frame of
/// an animation is always pinned to the exact target regardless.
pub type InterpolatorFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Built-in interpolation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressAnimation {
    /// Starts slow and accelerates (`t²`).
    #[default]
    Normal,
    /// Bounces against the end a few times before settling on it.
    Bounce,
    /// Starts fast and decelerates (`1 - (1 - t)²`).
    Decelerate,
    /// Slow start and end, fast middle.
    AccelerateDecelerate,
}

impl ProgressAnimation {
    /// Maps normalized time `t` through the curve. `t` is clamped to `[0, 1]`.
    pub fn interpolate(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            ProgressAnimation::Normal => t * t,
            ProgressAnimation::Bounce => bounce_out(t),
            ProgressAnimation::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            ProgressAnimation::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }

    /// Index used by declarative attributes.
    pub fn value(self) -> u8 {
        match self {
            ProgressAnimation::Normal => 0,
            ProgressAnimation::Bounce => 1,
            ProgressAnimation::Decelerate => 2,
            ProgressAnimation::AccelerateDecelerate => 3,
        }
    }

    /// Inverse of [`ProgressAnimation::value`].
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(ProgressAnimation::Normal),
            1 => Some(ProgressAnimation::Bounce),
            2 => Some(ProgressAnimation::Decelerate),
            3 => Some(ProgressAnimation::AccelerateDecelerate),
            _ => None,
        }
    }
}

fn bounce(t: f64) -> f64 {
    t * t * 8.0
}

// Four parabolic arcs of decreasing height; reaches ~1.0 at t = 1.
fn bounce_out(t: f64) -> f64 {
    let t = t * 1.1226;
    if t < 0.3535 {
        bounce(t)
    } else if t < 0.7408 {
        bounce(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        bounce(t - 0.8526) + 0.9
    } else {
        bounce(t - 1.0435) + 0.95
    }
}

/// What a new animation does when it interrupts one that is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartMode {
    /// Continue from the value currently on screen.
    #[default]
    FromCurrent,
    /// Start over from the run's baseline value.
    FromStart,
}

/// Animator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// No animation in flight; [`Animator::value`] is stable.
    #[default]
    Idle,
    /// An animation is in flight.
    Running,
}

/// Time-based interpolation between two progress values.
#[derive(Clone)]
pub struct Animator {
    /// Length of one animation run.
    pub duration: Duration,
    /// Built-in curve, used when no custom interpolator is set.
    pub animation: ProgressAnimation,
    /// Overrides [`Animator::animation`] when set.
    pub interpolator: Option<InterpolatorFn>,
    /// Behaviour when a run is interrupted.
    pub restart_mode: RestartMode,

    state: AnimationState,
    from: f64,
    to: f64,
    elapsed: Duration,
    value: f64,
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("duration", &self.duration)
            .field("animation", &self.animation)
            .field("interpolator", &self.interpolator.as_ref().map(|_| "<fn>"))
            .field("restart_mode", &self.restart_mode)
            .field("state", &self.state)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("elapsed", &self.elapsed)
            .field("value", &self.value)
            .finish()
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, ProgressAnimation::default())
    }
}

impl Animator {
    /// Creates an idle animator showing zero.
    pub fn new(duration: Duration, animation: ProgressAnimation) -> Self {
        Self {
            duration,
            animation,
            interpolator: None,
            restart_mode: RestartMode::default(),
            state: AnimationState::Idle,
            from: 0.0,
            to: 0.0,
            elapsed: Duration::ZERO,
            value: 0.0,
        }
    }

    /// Duration of a single frame at [`FPS`].
    pub fn frame_interval() -> Duration {
        Duration::from_nanos(1_000_000_000 / FPS as u64)
    }

    /// Current state.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Whether an animation is in flight.
    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// Value to display right now.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value the current (or last) run ends at.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Value the current (or last) run started from.
    pub fn origin(&self) -> f64 {
        self.from
    }

    /// Normalized elapsed time of the current run, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.state == AnimationState::Idle {
            return 1.0;
        }
        let total = self.duration.as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / total).min(1.0)
    }

    /// Starts a run towards `to`.
    ///
    /// A fresh run starts at `baseline`. If a run is already in flight and the
    /// restart mode is [`RestartMode::FromCurrent`], the new run starts at the
    /// value currently displayed instead. Returns the starting value.
    pub fn start(&mut self, baseline: f64, to: f64) -> f64 {
        let from = if self.is_running() && self.restart_mode == RestartMode::FromCurrent {
            self.value
        } else {
            baseline
        };
        if self.is_running() {
            debug!(from, to, mode = ?self.restart_mode, "restarting progress animation");
        } else {
            let duration_ms = self.duration.as_millis() as u64;
            debug!(from, to, duration_ms, "starting progress animation");
        }

        self.from = from;
        self.to = to;
        self.value = from;
        self.elapsed = Duration::ZERO;
        self.state = AnimationState::Running;
        from
    }

    /// Advances the run by `dt` and returns the value to display.
    ///
    /// Reaching the end of the duration pins the value to the exact target and
    /// returns the animator to [`AnimationState::Idle`]. Advancing an idle
    /// animator is a no-op.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        if self.state == AnimationState::Idle {
            return self.value;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        let t = self.fraction();
        if t >= 1.0 {
            self.finish();
        } else {
            self.value = self.from + (self.to - self.from) * self.curve(t);
        }
        self.value
    }

    /// Ends the run immediately at its target.
    pub fn finish(&mut self) {
        if self.state == AnimationState::Running {
            debug!(target_value = self.to, "progress animation finished");
        }
        self.value = self.to;
        self.elapsed = self.duration;
        self.state = AnimationState::Idle;
    }

    /// Abandons the run, keeping whatever value is currently displayed.
    pub fn cancel(&mut self) {
        self.state = AnimationState::Idle;
    }

    /// Displays `value` without animating, cancelling any run in flight.
    pub fn jump_to(&mut self, value: f64) {
        self.from = value;
        self.to = value;
        self.value = value;
        self.elapsed = Duration::ZERO;
        self.state = AnimationState::Idle;
    }

    fn curve(&self, t: f64) -> f64 {
        match &self.interpolator {
            Some(interpolator) => interpolator(t),
            None => self.animation.interpolate(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(animator: &mut Animator) -> usize {
        let mut frames = 0;
        while animator.is_running() {
            animator.advance(Animator::frame_interval());
            frames += 1;
            assert!(frames < 10_000, "animation never finished");
        }
        frames
    }

    #[test]
    fn test_curves_hit_endpoints() {
        for curve in [
            ProgressAnimation::Normal,
            ProgressAnimation::Decelerate,
            ProgressAnimation::AccelerateDecelerate,
        ] {
            assert!(curve.interpolate(0.0).abs() < 1e-9, "{curve:?} at 0");
            assert!((curve.interpolate(1.0) - 1.0).abs() < 1e-9, "{curve:?} at 1");
        }
        assert!(ProgressAnimation::Bounce.interpolate(0.0).abs() < 1e-9);
        assert!((ProgressAnimation::Bounce.interpolate(1.0) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_curve_shapes() {
        // Accelerating curves lag behind linear time at the midpoint,
        // decelerating ones lead.
        assert!(ProgressAnimation::Normal.interpolate(0.5) < 0.5);
        assert!(ProgressAnimation::Decelerate.interpolate(0.5) > 0.5);
        assert!((ProgressAnimation::AccelerateDecelerate.interpolate(0.5) - 0.5).abs() < 1e-9);
        // Clamped input.
        assert_eq!(ProgressAnimation::Normal.interpolate(2.0), 1.0);
        assert_eq!(ProgressAnimation::Normal.interpolate(-1.0), 0.0);
    }

    #[test]
    fn test_animation_value_roundtrip() {
        for v in 0..4 {
            let animation = ProgressAnimation::from_value(v).unwrap();
            assert_eq!(animation.value(), v);
        }
        assert!(ProgressAnimation::from_value(4).is_none());
    }

    #[test]
    fn test_idle_running_idle() {
        let mut animator = Animator::new(Duration::from_millis(100), ProgressAnimation::Normal);
        assert_eq!(animator.state(), AnimationState::Idle);

        let from = animator.start(0.0, 50.0);
        assert_eq!(from, 0.0);
        assert_eq!(animator.state(), AnimationState::Running);

        let frames = run_to_end(&mut animator);
        assert_eq!(animator.state(), AnimationState::Idle);
        assert_eq!(animator.value(), 50.0);
        // Six 16.67ms frames fall just short of 100ms.
        assert_eq!(frames, 7);
    }

    #[test]
    fn test_terminates_exactly_at_target_for_every_curve() {
        for curve in [
            ProgressAnimation::Normal,
            ProgressAnimation::Bounce,
            ProgressAnimation::Decelerate,
            ProgressAnimation::AccelerateDecelerate,
        ] {
            let mut animator = Animator::new(Duration::from_millis(250), curve);
            animator.start(12.5, 73.3);
            run_to_end(&mut animator);
            assert_eq!(animator.value(), 73.3, "{curve:?}");

            // Further frames keep the final value.
            animator.advance(Animator::frame_interval());
            assert_eq!(animator.value(), 73.3);
        }
    }

    #[test]
    fn test_values_move_towards_target() {
        let mut animator = Animator::new(Duration::from_millis(500), ProgressAnimation::Decelerate);
        animator.start(0.0, 100.0);
        let mut last = animator.value();
        while animator.is_running() {
            let value = animator.advance(Animator::frame_interval());
            assert!(value >= last);
            assert!(value <= 100.0);
            last = value;
        }
    }

    #[test]
    fn test_decreasing_animation() {
        let mut animator = Animator::new(Duration::from_millis(200), ProgressAnimation::Normal);
        animator.start(80.0, 20.0);
        animator.advance(Animator::frame_interval());
        assert!(animator.value() < 80.0 && animator.value() > 20.0);
        run_to_end(&mut animator);
        assert_eq!(animator.value(), 20.0);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_frame() {
        let mut animator = Animator::new(Duration::ZERO, ProgressAnimation::Normal);
        animator.start(0.0, 42.0);
        assert_eq!(animator.fraction(), 1.0);
        animator.advance(Animator::frame_interval());
        assert!(!animator.is_running());
        assert_eq!(animator.value(), 42.0);
    }

    #[test]
    fn test_restart_from_current() {
        let mut animator = Animator::new(Duration::from_millis(1000), ProgressAnimation::Decelerate);
        animator.start(0.0, 100.0);
        for _ in 0..10 {
            animator.advance(Animator::frame_interval());
        }
        let midway = animator.value();
        assert!(midway > 0.0 && midway < 100.0);

        let from = animator.start(0.0, 50.0);
        assert_eq!(from, midway);
        assert_eq!(animator.value(), midway);
    }

    #[test]
    fn test_restart_from_start() {
        let mut animator = Animator::new(Duration::from_millis(1000), ProgressAnimation::Decelerate);
        animator.restart_mode = RestartMode::FromStart;
        animator.start(0.0, 100.0);
        for _ in 0..10 {
            animator.advance(Animator::frame_interval());
        }

        let from = animator.start(0.0, 50.0);
        assert_eq!(from, 0.0);
        assert_eq!(animator.value(), 0.0);
    }

    #[test]
    fn test_idle_start_uses_baseline_in_either_mode() {
        let mut animator = Animator::default();
        animator.jump_to(30.0);
        assert_eq!(animator.start(10.0, 60.0), 10.0);
    }

    #[test]
    fn test_custom_interpolator_overrides_curve() {
        let mut animator = Animator::new(Duration::from_millis(100), ProgressAnimation::Normal);
        animator.interpolator = Some(Arc::new(|_t| 0.5));
        animator.start(0.0, 10.0);
        animator.advance(Duration::from_millis(10));
        assert_eq!(animator.value(), 5.0);
        run_to_end(&mut animator);
        assert_eq!(animator.value(), 10.0);
    }

    #[test]
    fn test_cancel_and_jump() {
        let mut animator = Animator::new(Duration::from_millis(1000), ProgressAnimation::Normal);
        animator.start(0.0, 100.0);
        animator.advance(Duration::from_millis(500));
        let shown = animator.value();
        animator.cancel();
        assert!(!animator.is_running());
        assert_eq!(animator.value(), shown);

        animator.jump_to(64.0);
        assert_eq!(animator.value(), 64.0);
        assert_eq!(animator.target(), 64.0);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_debug_hides_closure() {
        let mut animator = Animator::default();
        animator.interpolator = Some(Arc::new(|t| t));
        let debug = format!("{animator:?}");
        assert!(debug.contains("<fn>"));
    }
}
