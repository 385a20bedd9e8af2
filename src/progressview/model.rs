//! Progress view model definition and construction.

use crate::animation::Animator;
use crate::config::Config;
use crate::geometry::Orientation;
use crate::highlight::{Fill, Gradient, Highlight};
use crate::key::{self, KeyMap};
use crate::label::{
    LabelConstraints, LabelGravity, LabelPlacement, TextForm, DEFAULT_LABEL_SIZE,
    DEFAULT_LABEL_SPACE,
};
use crate::progress::ProgressState;
use crossterm::event::KeyCode;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::warn;

// Internal ID management for progress view instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

pub(super) const DEFAULT_WIDTH: usize = 40;
pub(super) const DEFAULT_HEIGHT: usize = 1;
pub(super) const DEFAULT_BACKGROUND: &str = "#FFFFFF";
pub(super) const DEFAULT_RADIUS: f32 = 5.0;
pub(super) const DEFAULT_LABEL_COLOR_INNER: &str = "#FFFFFF";
pub(super) const DEFAULT_LABEL_COLOR_OUTER: &str = "#000000";

/// Callback fired with the clamped value after every progress write.
pub type OnProgressChange = Box<dyn FnMut(f64) + Send>;

/// Message that advances a running progress animation by one frame.
///
/// Frame messages are produced by the commands returned from
/// [`ProgressView::set_progress`], [`ProgressView::progress_animate`] and
/// [`ProgressView::init`]. Each one carries the id of the view that scheduled
/// it and the generation tag of the animation run, so a view ignores frames
/// meant for other views, frames from a superseded run, and every frame after
/// it has been detached.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    pub(super) id: i64,
    pub(super) tag: i64,
}

/// Key bindings for the progress view.
#[derive(Debug, Clone)]
pub struct ProgressViewKeyMap {
    /// Toggles the highlight, the keyboard counterpart of a tap.
    /// Default keys: Enter, Space
    pub tap: key::Binding,
}

impl Default for ProgressViewKeyMap {
    fn default() -> Self {
        Self {
            tap: key::Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')])
                .with_help("enter/space", "highlight"),
        }
    }
}

impl KeyMap for ProgressViewKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.tap]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.tap]]
    }
}

/// Geometry of the current frame, recomputed after every state change.
///
/// Hosts that draw the widget themselves can read this instead of calling
/// [`ProgressView::view`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Size of the fill area along the fill axis, in cells: the container
    /// size less the padding on both ends.
    pub extent: usize,
    /// Progress value currently on screen (the animated value, not the target).
    pub displayed_progress: f64,
    /// Length of the filled region, in cells.
    pub fill_length: f64,
    /// Whole cells covered by the fill.
    pub filled_cells: usize,
    /// Label position and color; `None` when the label is empty.
    pub label: Option<LabelPlacement>,
    /// Opacity of the highlight stroke.
    pub stroke_alpha: f32,
}

/// Animated, labelled progress bar.
///
/// Every setter recomputes the [`Layout`] before returning, so the layout
/// always reflects the value currently on screen.
pub struct ProgressView {
    pub(super) id: i64,
    pub(super) tag: i64,
    pub(super) attached: bool,
    pub(super) focus: bool,

    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) orientation: Orientation,
    pub(super) padding: usize,

    pub(super) state: ProgressState,
    pub(super) animator: Animator,
    pub(super) auto_animate: bool,

    pub(super) background: String,
    pub(super) border_color: String,
    pub(super) border_width: u16,
    pub(super) radius: f32,
    pub(super) fill: Fill,
    pub(super) highlight: Highlight,

    pub(super) label: TextForm,
    pub(super) label_space: f64,
    pub(super) label_color_inner: String,
    pub(super) label_color_outer: String,
    pub(super) label_constraints: LabelConstraints,
    pub(super) label_gravity: LabelGravity,

    pub(super) on_progress_change: Option<OnProgressChange>,
    pub(super) layout: Layout,

    /// Key bindings honoured while focused.
    pub key_map: ProgressViewKeyMap,
}

impl fmt::Debug for ProgressView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressView")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("attached", &self.attached)
            .field("focus", &self.focus)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("orientation", &self.orientation)
            .field("padding", &self.padding)
            .field("state", &self.state)
            .field("animator", &self.animator)
            .field("auto_animate", &self.auto_animate)
            .field("fill", &self.fill)
            .field("highlight", &self.highlight)
            .field("label", &self.label)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl Default for ProgressView {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressView {
    /// Creates a progress view with default settings.
    ///
    /// # Default configuration
    ///
    /// - **Size**: 40 x 1 cells, horizontal, no padding
    /// - **Range**: 0 to 100, progress 0
    /// - **Animation**: auto-animate, 1000ms, accelerating curve
    /// - **Colors**: white container, `#7571F9` fill, white/black label
    /// - **Label**: empty, 1 cell of spacing, aligned to the progress
    /// - **Highlight**: off, zero thickness
    pub fn new() -> Self {
        let mut view = Self {
            id: next_id(),
            tag: 0,
            attached: true,
            focus: false,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            orientation: Orientation::Horizontal,
            padding: 0,
            state: ProgressState::default(),
            animator: Animator::default(),
            auto_animate: true,
            background: DEFAULT_BACKGROUND.to_string(),
            border_color: DEFAULT_BACKGROUND.to_string(),
            border_width: 0,
            radius: DEFAULT_RADIUS,
            fill: Fill::default(),
            highlight: Highlight::default(),
            label: TextForm::default(),
            label_space: DEFAULT_LABEL_SPACE,
            label_color_inner: DEFAULT_LABEL_COLOR_INNER.to_string(),
            label_color_outer: DEFAULT_LABEL_COLOR_OUTER.to_string(),
            label_constraints: LabelConstraints::default(),
            label_gravity: LabelGravity::default(),
            on_progress_change: None,
            layout: Layout {
                extent: DEFAULT_WIDTH,
                displayed_progress: 0.0,
                fill_length: 0.0,
                filled_cells: 0,
                label: None,
                stroke_alpha: 0.0,
            },
            key_map: ProgressViewKeyMap::default(),
        };
        view.relayout();
        view
    }

    /// Creates a progress view from an explicit configuration.
    ///
    /// The initial progress is stored without firing the change callback.
    /// With auto-animate on, the fill starts empty and animates once
    /// [`ProgressView::init`] is called; otherwise it shows the progress
    /// immediately.
    pub fn from_config(config: Config) -> Self {
        let mut view = Self::new();

        if let Some(width) = config.width {
            view.width = width;
        }
        if let Some(height) = config.height {
            view.height = height;
        }
        if let Some(orientation) = config.orientation {
            view.orientation = orientation;
        }
        if let Some(padding) = config.padding {
            view.padding = padding;
        }

        let min = config.min.unwrap_or(view.state.min());
        let max = config.max.unwrap_or(view.state.max());
        match ProgressState::new(min, max) {
            Some(state) => view.state = state,
            None => warn!(min, max, "invalid progress range, keeping defaults"),
        }
        if let Some(from_previous) = config.progress_from_previous {
            view.state.set_from_previous(from_previous);
        }
        if let Some(progress) = config.progress {
            view.state.set(progress);
        }

        if let Some(auto_animate) = config.auto_animate {
            view.auto_animate = auto_animate;
        }
        if let Some(duration) = config.duration {
            view.animator.duration = duration;
        }
        if let Some(animation) = config.animation {
            view.animator.animation = animation;
        }
        if let Some(mode) = config.restart_mode {
            view.animator.restart_mode = mode;
        }

        if let Some(background) = config.color_background {
            view.border_color = background.clone();
            view.background = background;
        }
        if let Some(border_color) = config.border_color {
            view.border_color = border_color;
        }
        if let Some(border_width) = config.border_width {
            view.border_width = border_width;
        }
        if let Some(radius) = config.radius {
            view.radius = radius;
        }

        if let Some(color) = config.color_progress {
            view.fill.color = color;
        }
        view.fill.gradient = Gradient::from_stops(
            config.color_gradient_start,
            config.color_gradient_center,
            config.color_gradient_end,
        );
        if let Some(alpha) = config.progress_alpha {
            view.fill.alpha = alpha.clamp(0.0, 1.0);
        }

        view.label = TextForm {
            text: config.label_text.unwrap_or_default(),
            size: config.label_size.unwrap_or(DEFAULT_LABEL_SIZE),
            typeface: config.label_typeface.unwrap_or_default(),
        };
        if let Some(space) = config.label_space {
            view.label_space = space;
        }
        if let Some(color) = config.label_color_inner {
            view.label_color_inner = color;
        }
        if let Some(color) = config.label_color_outer {
            view.label_color_outer = color;
        }
        if let Some(constraints) = config.label_constraints {
            view.label_constraints = constraints;
        }
        if let Some(gravity) = config.label_gravity {
            view.label_gravity = gravity;
        }

        if let Some(thickness) = config.highlight_width {
            view.highlight.thickness = thickness;
        }
        if config.highlight_enabled == Some(false) {
            view.highlight.thickness = 0;
        }
        if let Some(color) = config.highlight_color {
            view.highlight.color = color;
        }
        if let Some(alpha) = config.highlight_alpha {
            view.highlight.alpha = alpha.clamp(0.0, 1.0);
        }
        if let Some(highlighted) = config.highlighted {
            view.highlight.set_highlighting(highlighted);
        }

        if !view.auto_animate {
            view.animator.jump_to(view.state.current());
        }
        view.relayout();
        view
    }

    /// Unique id of this view; frame messages for other ids are ignored.
    pub fn id(&self) -> i64 {
        self.id
    }
}
