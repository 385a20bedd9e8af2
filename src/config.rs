//! Progress view configuration.
//!
//! [`Config`] is an explicit record of every configurable property, each one
//! optional so that unset fields keep the widget's defaults. [`Builder`] is a
//! fluent layer over it that can also attach callbacks and a custom
//! interpolation curve, which have no declarative form.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_progressview::config::Builder;
//! use bubbletea_progressview::geometry::Orientation;
//!
//! let view = Builder::new()
//!     .size(30, 1)
//!     .max(200.0)
//!     .progress(50.0)
//!     .orientation(Orientation::Horizontal)
//!     .label_text("50 / 200")
//!     .auto_animate(false)
//!     .build();
//!
//! assert_eq!(view.progress(), 50.0);
//! assert_eq!(view.layout().fill_length, 7.5);
//! ```
//!
//! ```rust
//! use bubbletea_progressview::config::Config;
//!
//! let config = Config::from_attributes(&[
//!     ("progressView_max", "10"),
//!     ("progressView_progress", "4"),
//!     ("progressView_labelText", "4/10"),
//! ]);
//! assert_eq!(config.max, Some(10.0));
//! assert_eq!(config.label_text.as_deref(), Some("4/10"));
//! ```

use crate::animation::{InterpolatorFn, ProgressAnimation, RestartMode};
use crate::attributes;
use crate::error::Result;
use crate::geometry::Orientation;
use crate::highlight::OnProgressClick;
use crate::label::{LabelConstraints, LabelGravity, TextForm, Typeface};
use crate::progressview::{OnProgressChange, ProgressView, ProgressViewKeyMap};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Every configurable property of a progress view. `None` keeps the default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    /// Container width in cells.
    pub width: Option<usize>,
    /// Container height in cells.
    pub height: Option<usize>,
    /// Fill axis.
    pub orientation: Option<Orientation>,
    /// Inset of the fill and highlight stroke inside the container, in cells.
    pub padding: Option<usize>,

    /// Lower bound of the progress range.
    pub min: Option<f64>,
    /// Upper bound of the progress range.
    pub max: Option<f64>,
    /// Initial progress.
    pub progress: Option<f64>,
    /// Animate from the previously stored progress instead of zero.
    pub progress_from_previous: Option<bool>,

    /// Animate on every progress write and on attach.
    pub auto_animate: Option<bool>,
    /// Length of one animation run.
    pub duration: Option<Duration>,
    /// Built-in interpolation curve.
    pub animation: Option<ProgressAnimation>,
    /// Behaviour when a progress write interrupts a running animation.
    pub restart_mode: Option<RestartMode>,

    /// Container background color.
    pub color_background: Option<String>,
    /// Container border color. Defaults to the background color.
    pub border_color: Option<String>,
    /// Container border width; any non-zero value draws a one-cell border.
    pub border_width: Option<u16>,
    /// Corner radius; a positive radius rounds the border corners.
    pub radius: Option<f32>,

    /// Solid fill color.
    pub color_progress: Option<String>,
    /// Gradient start color.
    pub color_gradient_start: Option<String>,
    /// Gradient center color.
    pub color_gradient_center: Option<String>,
    /// Gradient end color.
    pub color_gradient_end: Option<String>,
    /// Fill opacity over the background.
    pub progress_alpha: Option<f32>,

    /// Label text.
    pub label_text: Option<String>,
    /// Label text size.
    pub label_size: Option<f32>,
    /// Spacing between the label and the filled edge, in cells.
    pub label_space: Option<f64>,
    /// Label color while inside the fill.
    pub label_color_inner: Option<String>,
    /// Label color while outside the fill.
    pub label_color_outer: Option<String>,
    /// Label font style.
    pub label_typeface: Option<Typeface>,
    /// Label positioning mode.
    pub label_constraints: Option<LabelConstraints>,
    /// Label placement within the container for
    /// [`LabelConstraints::AlignContainer`].
    pub label_gravity: Option<LabelGravity>,

    /// Whether the highlight stroke can be drawn at all. `false` forces the
    /// stroke thickness to zero.
    pub highlight_enabled: Option<bool>,
    /// Initial highlight state.
    pub highlighted: Option<bool>,
    /// Highlight stroke thickness in cells.
    pub highlight_width: Option<u16>,
    /// Highlight stroke color.
    pub highlight_color: Option<String>,
    /// Highlight stroke opacity.
    pub highlight_alpha: Option<f32>,
}

impl Config {
    /// Reads a declarative attribute set, falling back to defaults (with a
    /// logged warning) for unknown names and malformed values.
    pub fn from_attributes(attributes: &[(&str, &str)]) -> Self {
        attributes::parse_lenient(attributes)
    }

    /// Reads a declarative attribute set, failing on the first unknown name or
    /// malformed value.
    pub fn try_from_attributes(attributes: &[(&str, &str)]) -> Result<Self> {
        attributes::parse_strict(attributes)
    }

    /// Builds a progress view from this configuration.
    pub fn build(self) -> ProgressView {
        ProgressView::from_config(self)
    }
}

/// Fluent builder producing a fully configured [`ProgressView`].
#[derive(Default)]
pub struct Builder {
    config: Config,
    interpolator: Option<InterpolatorFn>,
    on_progress_change: Option<OnProgressChange>,
    on_progress_click: Option<OnProgressClick>,
    key_map: Option<ProgressViewKeyMap>,
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("config", &self.config)
            .field("interpolator", &self.interpolator.as_ref().map(|_| "<fn>"))
            .field("on_progress_change", &self.on_progress_change.as_ref().map(|_| "<fn>"))
            .field("on_progress_click", &self.on_progress_click.as_ref().map(|_| "<fn>"))
            .field("key_map", &self.key_map)
            .finish()
    }
}

impl Builder {
    /// Starts from an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration collected so far.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Container size in cells.
    pub fn size(mut self, width: usize, height: usize) -> Self {
        self.config.width = Some(width);
        self.config.height = Some(height);
        self
    }

    /// Container height in cells.
    pub fn height(mut self, height: usize) -> Self {
        self.config.height = Some(height);
        self
    }

    /// Fill axis.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = Some(orientation);
        self
    }

    /// Inset of the fill inside the container, in cells.
    pub fn padding(mut self, padding: usize) -> Self {
        self.config.padding = Some(padding);
        self
    }

    /// Lower bound of the progress range.
    pub fn min(mut self, min: f64) -> Self {
        self.config.min = Some(min);
        self
    }

    /// Upper bound of the progress range.
    pub fn max(mut self, max: f64) -> Self {
        self.config.max = Some(max);
        self
    }

    /// Initial progress.
    pub fn progress(mut self, progress: f64) -> Self {
        self.config.progress = Some(progress);
        self
    }

    /// Animate from the previously stored progress instead of zero.
    pub fn progress_from_previous(mut self, enabled: bool) -> Self {
        self.config.progress_from_previous = Some(enabled);
        self
    }

    /// Animate on every progress write and on attach.
    pub fn auto_animate(mut self, enabled: bool) -> Self {
        self.config.auto_animate = Some(enabled);
        self
    }

    /// Length of one animation run.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.config.duration = Some(duration);
        self
    }

    /// Built-in interpolation curve.
    pub fn animation(mut self, animation: ProgressAnimation) -> Self {
        self.config.animation = Some(animation);
        self
    }

    /// Custom interpolation curve; overrides [`Builder::animation`].
    pub fn interpolator<F>(mut self, interpolator: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.interpolator = Some(Arc::new(interpolator));
        self
    }

    /// Behaviour when a progress write interrupts a running animation.
    pub fn restart_mode(mut self, mode: RestartMode) -> Self {
        self.config.restart_mode = Some(mode);
        self
    }

    /// Container background color.
    pub fn color_background(mut self, color: impl Into<String>) -> Self {
        self.config.color_background = Some(color.into());
        self
    }

    /// Container border color and width.
    pub fn border(mut self, color: impl Into<String>, width: u16) -> Self {
        self.config.border_color = Some(color.into());
        self.config.border_width = Some(width);
        self
    }

    /// Corner radius.
    pub fn radius(mut self, radius: f32) -> Self {
        self.config.radius = Some(radius);
        self
    }

    /// Solid fill color.
    pub fn progressbar_color(mut self, color: impl Into<String>) -> Self {
        self.config.color_progress = Some(color.into());
        self
    }

    /// Two-stop fill gradient.
    pub fn progressbar_gradient(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.config.color_gradient_start = Some(start.into());
        self.config.color_gradient_end = Some(end.into());
        self
    }

    /// Middle stop of the fill gradient.
    pub fn progressbar_gradient_center(mut self, center: impl Into<String>) -> Self {
        self.config.color_gradient_center = Some(center.into());
        self
    }

    /// Fill opacity over the background.
    pub fn progressbar_alpha(mut self, alpha: f32) -> Self {
        self.config.progress_alpha = Some(alpha);
        self
    }

    /// Label text.
    pub fn label_text(mut self, text: impl Into<String>) -> Self {
        self.config.label_text = Some(text.into());
        self
    }

    /// Label text size.
    pub fn label_size(mut self, size: f32) -> Self {
        self.config.label_size = Some(size);
        self
    }

    /// Spacing between the label and the filled edge.
    pub fn label_space(mut self, space: f64) -> Self {
        self.config.label_space = Some(space);
        self
    }

    /// Label color while inside the fill.
    pub fn label_color_inner(mut self, color: impl Into<String>) -> Self {
        self.config.label_color_inner = Some(color.into());
        self
    }

    /// Label color while outside the fill.
    pub fn label_color_outer(mut self, color: impl Into<String>) -> Self {
        self.config.label_color_outer = Some(color.into());
        self
    }

    /// Label font style.
    pub fn label_typeface(mut self, typeface: Typeface) -> Self {
        self.config.label_typeface = Some(typeface);
        self
    }

    /// Label text, size and typeface in one go.
    pub fn text_form(mut self, form: TextForm) -> Self {
        self.config.label_text = Some(form.text);
        self.config.label_size = Some(form.size);
        self.config.label_typeface = Some(form.typeface);
        self
    }

    /// Label positioning mode.
    pub fn label_constraints(mut self, constraints: LabelConstraints) -> Self {
        self.config.label_constraints = Some(constraints);
        self
    }

    /// Label placement within the container.
    pub fn label_gravity(mut self, gravity: LabelGravity) -> Self {
        self.config.label_gravity = Some(gravity);
        self
    }

    /// Initial highlight state.
    pub fn highlighting(mut self, highlighted: bool) -> Self {
        self.config.highlighted = Some(highlighted);
        self
    }

    /// Highlight stroke thickness.
    pub fn highlight_thickness(mut self, thickness: u16) -> Self {
        self.config.highlight_width = Some(thickness);
        self
    }

    /// Highlight stroke color.
    pub fn highlight_color(mut self, color: impl Into<String>) -> Self {
        self.config.highlight_color = Some(color.into());
        self
    }

    /// Highlight stroke opacity.
    pub fn highlight_alpha(mut self, alpha: f32) -> Self {
        self.config.highlight_alpha = Some(alpha);
        self
    }

    /// Callback fired with the clamped value after every progress write.
    pub fn on_progress_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        self.on_progress_change = Some(Box::new(callback));
        self
    }

    /// Callback fired with the new highlight state after every tap.
    pub fn on_progress_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.on_progress_click = Some(Box::new(callback));
        self
    }

    /// Key bindings used while focused.
    pub fn key_map(mut self, key_map: ProgressViewKeyMap) -> Self {
        self.key_map = Some(key_map);
        self
    }

    /// Builds the progress view.
    pub fn build(self) -> ProgressView {
        let mut view = ProgressView::from_config(self.config);
        if let Some(interpolator) = self.interpolator {
            view.set_interpolator(Some(interpolator));
        }
        if let Some(callback) = self.on_progress_change {
            view.set_on_progress_change(callback);
        }
        if let Some(callback) = self.on_progress_click {
            view.set_on_progress_click(callback);
        }
        if let Some(key_map) = self.key_map {
            view.key_map = key_map;
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_builder_collects_config() {
        let builder = Builder::new()
            .size(20, 2)
            .min(5.0)
            .max(50.0)
            .progress(25.0)
            .duration(Duration::from_millis(300))
            .animation(ProgressAnimation::Bounce)
            .label_text("25")
            .highlight_thickness(1);

        let config = builder.config();
        assert_eq!(config.width, Some(20));
        assert_eq!(config.height, Some(2));
        assert_eq!(config.min, Some(5.0));
        assert_eq!(config.max, Some(50.0));
        assert_eq!(config.progress, Some(25.0));
        assert_eq!(config.duration, Some(Duration::from_millis(300)));
        assert_eq!(config.animation, Some(ProgressAnimation::Bounce));
        assert_eq!(config.label_text.as_deref(), Some("25"));
        assert_eq!(config.highlight_width, Some(1));
        assert!(config.color_background.is_none());
    }

    #[test]
    fn test_builder_attaches_callbacks() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        let clicks = Arc::new(Mutex::new(Vec::new()));
        let click_sink = Arc::clone(&clicks);

        let mut view = Builder::new()
            .auto_animate(false)
            .on_progress_change(move |p| sink.lock().unwrap().push(p))
            .on_progress_click(move |on| click_sink.lock().unwrap().push(on))
            .build();

        let _ = view.set_progress(30.0);
        view.toggle_highlight();

        assert_eq!(*changes.lock().unwrap(), vec![30.0]);
        assert_eq!(*clicks.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_builder_interpolator_is_used() {
        let mut view = Builder::new()
            .duration(Duration::from_millis(1000))
            .interpolator(|_| 0.5)
            .build();
        let _ = view.set_progress(80.0);
        view.advance_frame();
        assert_eq!(view.displayed_progress(), 40.0);
    }

    #[test]
    fn test_config_build_matches_from_config() {
        let config = Config {
            max: Some(10.0),
            progress: Some(5.0),
            auto_animate: Some(false),
            ..Config::default()
        };
        let view = config.build();
        assert_eq!(view.max(), 10.0);
        assert_eq!(view.displayed_progress(), 5.0);
    }

    #[test]
    fn test_builder_text_form() {
        let form = TextForm::new("half")
            .with_size(18.0)
            .with_typeface(Typeface::Italic);
        let config = Builder::new().text_form(form).config().clone();
        assert_eq!(config.label_text.as_deref(), Some("half"));
        assert_eq!(config.label_size, Some(18.0));
        assert_eq!(config.label_typeface, Some(Typeface::Italic));
    }

    #[test]
    fn test_builder_debug_hides_closures() {
        let builder = Builder::new().on_progress_change(|_| {});
        assert!(format!("{builder:?}").contains("<fn>"));
    }
}
