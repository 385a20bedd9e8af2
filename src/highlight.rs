//! Fill styling and the tap-toggled highlight stroke.
//!
//! [`Fill`] describes how the filled region is painted. [`Highlight`] is the
//! binary "selected" state flipped by taps; when on, a stroke is drawn around
//! the filled region at [`Highlight::alpha`] opacity, when off the stroke is
//! fully transparent.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_progressview::highlight::Highlight;
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let mut highlight = Highlight::default();
//! highlight.set_on_click(Box::new(move |on| sink.lock().unwrap().push(on)));
//! highlight.toggle();
//! highlight.toggle();
//!
//! assert!(!highlight.is_highlighting());
//! assert_eq!(*seen.lock().unwrap(), vec![true, false]);
//! ```

use std::fmt;

/// Default accent color used for the fill and the highlight stroke.
pub const DEFAULT_ACCENT: &str = "#7571F9";

/// Callback invoked with the new highlight state after each tap.
pub type OnProgressClick = Box<dyn FnMut(bool) + Send>;

/// Gradient endpoints for the filled region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    /// Color at the origin of the fill.
    pub start: String,
    /// Optional color at the middle of the fill.
    pub center: Option<String>,
    /// Color at the filled edge.
    pub end: String,
}

impl Gradient {
    /// Builds a gradient from optional stops. A gradient needs both a start
    /// and an end color; the center is optional.
    pub fn from_stops(
        start: Option<String>,
        center: Option<String>,
        end: Option<String>,
    ) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self { start, center, end }),
            _ => None,
        }
    }

    /// Color stops in order.
    pub fn stops(&self) -> Vec<&str> {
        let mut stops = vec![self.start.as_str()];
        if let Some(center) = &self.center {
            stops.push(center.as_str());
        }
        stops.push(self.end.as_str());
        stops
    }
}

/// Appearance of the filled region.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    /// Solid fill color, used when no gradient is set.
    pub color: String,
    /// Gradient spanning the filled region.
    pub gradient: Option<Gradient>,
    /// Opacity of the fill over the container background, in `[0, 1]`.
    pub alpha: f32,
}

impl Default for Fill {
    fn default() -> Self {
        Self {
            color: DEFAULT_ACCENT.to_string(),
            gradient: None,
            alpha: 1.0,
        }
    }
}

/// Toggleable highlight stroke drawn around the filled region.
pub struct Highlight {
    highlighting: bool,
    /// Stroke thickness in cells. Zero draws nothing, but taps still toggle.
    pub thickness: u16,
    /// Stroke color.
    pub color: String,
    /// Stroke opacity while highlighting, in `[0, 1]`.
    pub alpha: f32,
    on_click: Option<OnProgressClick>,
}

impl fmt::Debug for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Highlight")
            .field("highlighting", &self.highlighting)
            .field("thickness", &self.thickness)
            .field("color", &self.color)
            .field("alpha", &self.alpha)
            .field("on_click", &self.on_click.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            highlighting: false,
            thickness: 0,
            color: DEFAULT_ACCENT.to_string(),
            alpha: 1.0,
            on_click: None,
        }
    }
}

impl Highlight {
    /// Whether the highlight is currently on.
    pub fn is_highlighting(&self) -> bool {
        self.highlighting
    }

    /// Sets the state without notifying the callback.
    pub fn set_highlighting(&mut self, highlighting: bool) {
        self.highlighting = highlighting;
    }

    /// Registers the tap callback, replacing any previous one.
    pub fn set_on_click(&mut self, on_click: OnProgressClick) {
        self.on_click = Some(on_click);
    }

    /// Flips the state and notifies the callback with the new value.
    pub fn toggle(&mut self) -> bool {
        self.highlighting = !self.highlighting;
        if let Some(on_click) = self.on_click.as_mut() {
            on_click(self.highlighting);
        }
        self.highlighting
    }

    /// Opacity the stroke is drawn with right now.
    pub fn stroke_alpha(&self) -> f32 {
        if self.highlighting {
            self.alpha.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether a stroke is visible right now.
    pub fn stroke_visible(&self) -> bool {
        self.thickness > 0 && self.stroke_alpha() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_gradient_requires_both_ends() {
        assert!(Gradient::from_stops(Some("#000".into()), None, None).is_none());
        assert!(Gradient::from_stops(None, Some("#111".into()), Some("#fff".into())).is_none());

        let gradient =
            Gradient::from_stops(Some("#000".into()), None, Some("#fff".into())).unwrap();
        assert_eq!(gradient.stops(), vec!["#000", "#fff"]);

        let gradient = Gradient::from_stops(
            Some("#000".into()),
            Some("#888".into()),
            Some("#fff".into()),
        )
        .unwrap();
        assert_eq!(gradient.stops(), vec!["#000", "#888", "#fff"]);
    }

    #[test]
    fn test_default_fill() {
        let fill = Fill::default();
        assert_eq!(fill.color, DEFAULT_ACCENT);
        assert!(fill.gradient.is_none());
        assert_eq!(fill.alpha, 1.0);
    }

    #[test]
    fn test_toggle_twice_restores_state_and_alternates_callbacks() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);

        let mut highlight = Highlight {
            thickness: 1,
            alpha: 0.6,
            ..Highlight::default()
        };
        highlight.set_on_click(Box::new(move |on| sink.lock().unwrap().push(on)));

        let before = highlight.stroke_alpha();
        assert!(highlight.toggle());
        assert_eq!(highlight.stroke_alpha(), 0.6);
        assert!(highlight.stroke_visible());
        assert!(!highlight.toggle());

        assert_eq!(highlight.stroke_alpha(), before);
        assert_eq!(*calls.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_toggle_without_callback() {
        let mut highlight = Highlight::default();
        assert!(highlight.toggle());
        assert!(highlight.is_highlighting());
    }

    #[test]
    fn test_zero_thickness_is_invisible_but_toggles() {
        let mut highlight = Highlight::default();
        highlight.toggle();
        assert!(highlight.is_highlighting());
        assert_eq!(highlight.stroke_alpha(), 1.0);
        assert!(!highlight.stroke_visible());
    }

    #[test]
    fn test_set_highlighting_is_silent() {
        let calls = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&calls);
        let mut highlight = Highlight::default();
        highlight.set_on_click(Box::new(move |_| *sink.lock().unwrap() += 1));
        highlight.set_highlighting(true);
        assert!(highlight.is_highlighting());
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_alpha_is_clamped() {
        let mut highlight = Highlight {
            alpha: 3.0,
            ..Highlight::default()
        };
        highlight.set_highlighting(true);
        assert_eq!(highlight.stroke_alpha(), 1.0);
    }
}
