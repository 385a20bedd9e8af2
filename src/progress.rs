//! Bounded progress state.
//!
//! [`ProgressState`] holds the `min`/`max` range, the current progress and the
//! previously stored progress. Every write goes through [`ProgressState::set`],
//! which clamps the value into `[min, max]`.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_progressview::progress::ProgressState;
//!
//! let mut state = ProgressState::default(); // 0..=100
//! assert_eq!(state.set(150.0), 100.0);
//! assert_eq!(state.set(-3.0), 0.0);
//! assert!(!state.is_max());
//! ```

use tracing::warn;

/// Default lower bound of the progress range.
pub const DEFAULT_MIN: f64 = 0.0;
/// Default upper bound of the progress range.
pub const DEFAULT_MAX: f64 = 100.0;

/// Progress value bounded by a `[min, max]` range.
///
/// When "from previous" mode is on, each write remembers the value it replaced
/// so an animation can run from the old value to the new one. Turning the mode
/// on or off resets the remembered value to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    min: f64,
    max: f64,
    current: f64,
    previous: f64,
    from_previous: bool,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            current: DEFAULT_MIN,
            previous: 0.0,
            from_previous: false,
        }
    }
}

impl ProgressState {
    /// Creates a state spanning `[min, max]` with progress at `min`.
    ///
    /// Returns `None` when the range is empty, inverted or not finite.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if !valid_range(min, max) {
            return None;
        }
        Some(Self {
            min,
            max,
            current: min,
            ..Self::default()
        })
    }

    /// Lower bound of the range.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the range.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Current (target) progress.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Progress that was replaced by the latest write in "from previous" mode,
    /// zero otherwise.
    pub fn previous(&self) -> f64 {
        self.previous
    }

    /// Whether writes remember the value they replace.
    pub fn from_previous(&self) -> bool {
        self.from_previous
    }

    /// Switches "from previous" mode and resets the remembered value.
    pub fn set_from_previous(&mut self, enabled: bool) {
        self.from_previous = enabled;
        self.previous = 0.0;
    }

    /// Stores `clamp(value, min, max)` and returns the stored value.
    ///
    /// `NaN` is treated as `min`.
    pub fn set(&mut self, value: f64) -> f64 {
        if self.from_previous {
            self.previous = self.current;
        }
        self.current = self.clamp(value);
        self.current
    }

    /// Clamps `value` into the configured range without storing it.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() || value <= self.min {
            self.min
        } else if value >= self.max {
            self.max
        } else {
            value
        }
    }

    /// Moves the lower bound. Rejected (returning `false`) when it would not
    /// stay strictly below `max`. The current value is re-clamped.
    pub fn set_min(&mut self, min: f64) -> bool {
        if !valid_range(min, self.max) {
            warn!(min, max = self.max, "rejected progress minimum");
            return false;
        }
        self.min = min;
        self.current = self.clamp(self.current);
        true
    }

    /// Moves the upper bound. Rejected (returning `false`) when it would not
    /// stay strictly above `min`. The current value is re-clamped.
    pub fn set_max(&mut self, max: f64) -> bool {
        if !valid_range(self.min, max) {
            warn!(min = self.min, max, "rejected progress maximum");
            return false;
        }
        self.max = max;
        self.current = self.clamp(self.current);
        true
    }

    /// Whether progress has reached `max`.
    pub fn is_max(&self) -> bool {
        self.current == self.max
    }
}

fn valid_range(min: f64, max: f64) -> bool {
    min.is_finite() && max.is_finite() && min < max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        let state = ProgressState::default();
        assert_eq!(state.min(), 0.0);
        assert_eq!(state.max(), 100.0);
        assert_eq!(state.current(), 0.0);
        assert_eq!(state.previous(), 0.0);
        assert!(!state.from_previous());
    }

    #[test]
    fn test_set_clamps_into_range() {
        let mut state = ProgressState::new(10.0, 50.0).unwrap();
        for (input, expected) in [
            (-100.0, 10.0),
            (10.0, 10.0),
            (25.5, 25.5),
            (50.0, 50.0),
            (51.0, 50.0),
            (f64::INFINITY, 50.0),
            (f64::NEG_INFINITY, 10.0),
        ] {
            assert_eq!(state.set(input), expected, "input {input}");
            assert_eq!(state.current(), expected);
        }
    }

    #[test]
    fn test_nan_is_treated_as_min() {
        let mut state = ProgressState::default();
        state.set(40.0);
        assert_eq!(state.set(f64::NAN), 0.0);
    }

    #[test]
    fn test_invalid_ranges_are_rejected() {
        assert!(ProgressState::new(5.0, 5.0).is_none());
        assert!(ProgressState::new(6.0, 5.0).is_none());
        assert!(ProgressState::new(f64::NAN, 5.0).is_none());

        let mut state = ProgressState::default();
        assert!(!state.set_max(0.0));
        assert!(!state.set_min(100.0));
        assert_eq!(state.max(), 100.0);
        assert_eq!(state.min(), 0.0);
    }

    #[test]
    fn test_range_change_reclamps_current() {
        let mut state = ProgressState::default();
        state.set(80.0);
        assert!(state.set_max(60.0));
        assert_eq!(state.current(), 60.0);
        assert!(!state.set_min(70.0));
        assert!(state.set_min(20.0));
        assert_eq!(state.current(), 60.0);
    }

    #[test]
    fn test_previous_tracking_only_in_from_previous_mode() {
        let mut state = ProgressState::default();
        state.set(30.0);
        state.set(60.0);
        assert_eq!(state.previous(), 0.0);

        state.set_from_previous(true);
        assert_eq!(state.previous(), 0.0);
        state.set(70.0);
        assert_eq!(state.previous(), 60.0);
        state.set(90.0);
        assert_eq!(state.previous(), 70.0);

        // Reconfiguring resets the remembered value.
        state.set_from_previous(true);
        assert_eq!(state.previous(), 0.0);
    }

    #[test]
    fn test_is_max() {
        let mut state = ProgressState::default();
        assert!(!state.is_max());
        state.set(1000.0);
        assert!(state.is_max());
    }
}
