//! Progress-to-geometry mapping.
//!
//! Converts a progress value into the length of the filled region along the
//! active axis of the container.

/// Axis along which the progress bar fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Fills left to right; the extent is the container width.
    #[default]
    Horizontal,
    /// Fills bottom to top; the extent is the container height.
    Vertical,
}

impl Orientation {
    /// Whether this is [`Orientation::Vertical`].
    pub fn is_vertical(self) -> bool {
        self == Orientation::Vertical
    }

    /// Picks the extent of a `width` x `height` container along this axis.
    pub fn extent(self, width: usize, height: usize) -> usize {
        match self {
            Orientation::Horizontal => width,
            Orientation::Vertical => height,
        }
    }
}

/// Length of the filled region for `value` in a container of `extent` cells.
///
/// Computes `extent * (value / max)`, saturating at `extent` once
/// `value >= max` and always within `[0, extent]`.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressview::geometry::progress_size;
///
/// assert_eq!(progress_size(40.0, 100.0, 25.0), 10.0);
/// assert_eq!(progress_size(40.0, 100.0, 250.0), 40.0);
/// assert_eq!(progress_size(40.0, 100.0, -5.0), 0.0);
/// ```
pub fn progress_size(extent: f64, max: f64, value: f64) -> f64 {
    if extent <= 0.0 || max.is_nan() || value.is_nan() {
        return 0.0;
    }
    // Checked before the ratio so ranges ending at or below zero still fill.
    if value >= max {
        return extent;
    }
    ((extent / max) * value).clamp(0.0, extent)
}

/// Number of whole cells covered by a fill of `length`, capped at `extent`.
pub fn filled_cells(length: f64, extent: usize) -> usize {
    if length.is_nan() || length <= 0.0 {
        return 0;
    }
    (length.floor() as usize).min(extent)
}
