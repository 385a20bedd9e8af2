//! Progress view operations: progress writes, animation, styling and the
//! bubbletea-rs message loop.

use super::model::{FrameMsg, Layout, OnProgressChange, ProgressView};
use crate::animation::{Animator, InterpolatorFn, ProgressAnimation, RestartMode};
use crate::config::Config;
use crate::geometry::{filled_cells, progress_size, Orientation};
use crate::highlight::{Gradient, OnProgressClick};
use crate::label::{
    place_in_container, place_label, LabelConstraints, LabelGravity, TextForm, Typeface,
};
use crate::Component;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use std::time::Duration;
use tracing::{debug, trace};

impl ProgressView {
    /// Creates a progress view from declarative `name = value` attributes.
    ///
    /// Malformed values and unknown names are logged and skipped, see
    /// [`Config::from_attributes`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_progressview::progressview::ProgressView;
    ///
    /// let view = ProgressView::from_attributes(&[
    ///     ("max", "50"),
    ///     ("progress", "20"),
    ///     ("autoAnimate", "false"),
    ///     ("labelText", "20/50"),
    /// ]);
    /// assert_eq!(view.progress(), 20.0);
    /// assert_eq!(view.displayed_progress(), 20.0);
    /// ```
    pub fn from_attributes(attributes: &[(&str, &str)]) -> Self {
        Config::from_attributes(attributes).build()
    }

    // ---- progress ------------------------------------------------------

    /// Target progress, always within `[min, max]`.
    pub fn progress(&self) -> f64 {
        self.state.current()
    }

    /// Lower bound of the progress range.
    pub fn min(&self) -> f64 {
        self.state.min()
    }

    /// Upper bound of the progress range.
    pub fn max(&self) -> f64 {
        self.state.max()
    }

    /// Whether progress has reached the maximum.
    pub fn is_progressed_max(&self) -> bool {
        self.state.is_max()
    }

    /// Sets the progress, clamped into `[min, max]`.
    ///
    /// The change callback is fired with the clamped value. With auto-animate
    /// on, the fill animates towards the new value and the returned command
    /// must be handed to the bubbletea-rs runtime to drive it. Otherwise the
    /// display snaps to the new value and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_progressview::progressview::ProgressView;
    ///
    /// let mut view = ProgressView::new();
    /// let _cmd = view.set_progress(140.0);
    /// assert_eq!(view.progress(), 100.0);
    /// assert!(view.is_progressed_max());
    /// ```
    pub fn set_progress(&mut self, progress: f64) -> Option<Cmd> {
        let value = self.state.set(progress);
        if let Some(callback) = self.on_progress_change.as_mut() {
            callback(value);
        }

        if self.auto_animate && self.attached {
            Some(self.progress_animate())
        } else {
            self.animator.jump_to(value);
            self.relayout();
            None
        }
    }

    /// Adds `delta` to the progress. See [`ProgressView::set_progress`].
    pub fn incr_progress(&mut self, delta: f64) -> Option<Cmd> {
        self.set_progress(self.progress() + delta)
    }

    /// Subtracts `delta` from the progress. See [`ProgressView::set_progress`].
    pub fn decr_progress(&mut self, delta: f64) -> Option<Cmd> {
        self.set_progress(self.progress() - delta)
    }

    /// Moves the lower bound; rejected when it would not stay below `max`.
    ///
    /// The progress is re-clamped without firing the change callback. A
    /// running animation is retargeted; an idle display is clamped in place.
    pub fn set_min(&mut self, min: f64) -> bool {
        let accepted = self.state.set_min(min);
        if accepted {
            self.retarget();
        }
        accepted
    }

    /// Moves the upper bound; rejected when it would not stay above `min`.
    ///
    /// Same re-clamping rules as [`ProgressView::set_min`].
    pub fn set_max(&mut self, max: f64) -> bool {
        let accepted = self.state.set_max(max);
        if accepted {
            self.retarget();
        }
        accepted
    }

    /// Whether animations start from the previously stored progress instead
    /// of zero. Switching resets the remembered value.
    pub fn set_progress_from_previous(&mut self, enabled: bool) {
        self.state.set_from_previous(enabled);
    }

    /// Whether [`ProgressView::set_progress_from_previous`] is on.
    pub fn progress_from_previous(&self) -> bool {
        self.state.from_previous()
    }

    fn retarget(&mut self) {
        let target = self.state.current();
        if self.animator.is_running() {
            let baseline = self.baseline();
            self.animator.start(baseline, target);
        } else {
            let shown = self.state.clamp(self.animator.value());
            if shown != self.animator.value() {
                self.animator.jump_to(shown);
            }
        }
        self.relayout();
    }

    fn baseline(&self) -> f64 {
        if self.state.from_previous() {
            self.state.previous()
        } else {
            0.0
        }
    }

    // ---- animation -----------------------------------------------------

    /// Attaches the view and, with auto-animate on, starts animating from
    /// the baseline to the current progress.
    ///
    /// Call this once when the view is first shown; the returned command
    /// drives the animation.
    pub fn init(&mut self) -> Option<Cmd> {
        self.attached = true;
        if self.auto_animate {
            Some(self.progress_animate())
        } else {
            self.animator.jump_to(self.state.current());
            self.relayout();
            None
        }
    }

    /// Starts an animation towards the current progress.
    ///
    /// A fresh run starts from the previous progress when "from previous"
    /// mode is on, zero otherwise. Interrupting a run follows the configured
    /// [`RestartMode`]. Frames from the superseded run are ignored.
    pub fn progress_animate(&mut self) -> Cmd {
        let baseline = self.baseline();
        self.animator.start(baseline, self.state.current());
        self.tag += 1;
        self.attached = true;
        self.relayout();
        self.next_frame()
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Progress value currently on screen.
    pub fn displayed_progress(&self) -> f64 {
        self.animator.value()
    }

    /// Advances a running animation by one frame without going through the
    /// message loop. Returns whether the animation is still running.
    pub fn advance_frame(&mut self) -> bool {
        if !self.animator.is_running() {
            return false;
        }
        let value = self.animator.advance(Animator::frame_interval());
        trace!(id = self.id, value, "progress frame");
        self.relayout();
        self.animator.is_running()
    }

    /// Stops animating and ignores every frame still in flight.
    ///
    /// The display keeps its current value. The next progress write, or
    /// [`ProgressView::init`], attaches the view again.
    pub fn detach(&mut self) {
        self.tag += 1;
        self.animator.cancel();
        self.attached = false;
        debug!(id = self.id, "progress view detached");
        self.relayout();
    }

    /// Whether the view is attached and accepting frames.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Animation length.
    pub fn set_duration(&mut self, duration: Duration) {
        self.animator.duration = duration;
    }

    /// Animation length.
    pub fn duration(&self) -> Duration {
        self.animator.duration
    }

    /// Built-in interpolation curve.
    pub fn set_animation(&mut self, animation: ProgressAnimation) {
        self.animator.animation = animation;
    }

    /// Custom interpolation curve; overrides the built-in curve when set.
    pub fn set_interpolator(&mut self, interpolator: Option<InterpolatorFn>) {
        self.animator.interpolator = interpolator;
    }

    /// Behaviour when a new animation interrupts a running one.
    pub fn set_restart_mode(&mut self, mode: RestartMode) {
        self.animator.restart_mode = mode;
    }

    /// Whether progress writes animate.
    pub fn set_auto_animate(&mut self, enabled: bool) {
        self.auto_animate = enabled;
    }

    /// Whether progress writes animate.
    pub fn auto_animate(&self) -> bool {
        self.auto_animate
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(Animator::frame_interval(), move |_| {
            Box::new(FrameMsg { id, tag }) as Msg
        })
    }

    // ---- highlight and callbacks ---------------------------------------

    /// Flips the highlight and fires the click callback with the new state.
    pub fn toggle_highlight(&mut self) -> bool {
        let highlighting = self.highlight.toggle();
        debug!(id = self.id, highlighting, "highlight toggled");
        self.relayout();
        highlighting
    }

    /// Whether the highlight is on.
    pub fn is_highlighting(&self) -> bool {
        self.highlight.is_highlighting()
    }

    /// Registers the progress change callback, replacing any previous one.
    pub fn set_on_progress_change(&mut self, callback: OnProgressChange) {
        self.on_progress_change = Some(callback);
    }

    /// Registers the highlight click callback, replacing any previous one.
    pub fn set_on_progress_click(&mut self, callback: OnProgressClick) {
        self.highlight.set_on_click(callback);
    }

    /// Stroke thickness in cells; zero hides the stroke.
    pub fn set_highlight_thickness(&mut self, thickness: u16) {
        self.highlight.thickness = thickness;
        self.relayout();
    }

    /// Stroke color.
    pub fn set_highlight_color(&mut self, color: impl Into<String>) {
        self.highlight.color = color.into();
        self.relayout();
    }

    /// Stroke opacity while highlighting, clamped to `[0, 1]`.
    pub fn set_highlight_alpha(&mut self, alpha: f32) {
        self.highlight.alpha = alpha.clamp(0.0, 1.0);
        self.relayout();
    }

    // ---- geometry and styling ------------------------------------------

    /// Container size in cells.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.relayout();
    }

    /// Container width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Container height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Inset of the fill and highlight stroke inside the container, in cells.
    pub fn set_padding(&mut self, padding: usize) {
        self.padding = padding;
        self.relayout();
    }

    /// Inset of the fill inside the container, in cells.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Fill axis.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.relayout();
    }

    /// Fill axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Container background color.
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background = color.into();
        self.relayout();
    }

    /// Border color and width; a zero width draws no border.
    pub fn set_border(&mut self, color: impl Into<String>, width: u16) {
        self.border_color = color.into();
        self.border_width = width;
        self.relayout();
    }

    /// Corner radius; any positive radius draws a rounded border.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
        self.relayout();
    }

    /// Solid fill color. Clears any gradient.
    pub fn set_progress_color(&mut self, color: impl Into<String>) {
        self.fill.color = color.into();
        self.fill.gradient = None;
        self.relayout();
    }

    /// Gradient across the filled region; `None` falls back to the solid color.
    pub fn set_progress_gradient(&mut self, gradient: Option<Gradient>) {
        self.fill.gradient = gradient;
        self.relayout();
    }

    /// Fill opacity over the background, clamped to `[0, 1]`.
    pub fn set_progress_alpha(&mut self, alpha: f32) {
        self.fill.alpha = alpha.clamp(0.0, 1.0);
        self.relayout();
    }

    // ---- label ---------------------------------------------------------

    /// Label text; an empty string hides the label.
    pub fn set_label_text(&mut self, text: impl Into<String>) {
        self.label.text = text.into();
        self.relayout();
    }

    /// Label text.
    pub fn label_text(&self) -> &str {
        &self.label.text
    }

    /// Replaces the label text, size and typeface at once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_progressview::label::{TextForm, Typeface};
    /// use bubbletea_progressview::progressview::ProgressView;
    ///
    /// let mut view = ProgressView::new();
    /// view.apply_text_form(TextForm::new("75%").with_typeface(Typeface::Bold));
    /// assert_eq!(view.label_text(), "75%");
    /// assert!(view.text_form().typeface.is_bold());
    /// ```
    pub fn apply_text_form(&mut self, form: TextForm) {
        self.label = form;
        self.relayout();
    }

    /// Label text, size and typeface.
    pub fn text_form(&self) -> &TextForm {
        &self.label
    }

    /// Label text size.
    pub fn set_label_size(&mut self, size: f32) {
        self.label.size = size;
        self.relayout();
    }

    /// Label font style.
    pub fn set_label_typeface(&mut self, typeface: Typeface) {
        self.label.typeface = typeface;
        self.relayout();
    }

    /// Cells between the label and the filled edge.
    pub fn set_label_space(&mut self, space: f64) {
        self.label_space = space.max(0.0);
        self.relayout();
    }

    /// Label color while inside the filled region.
    pub fn set_label_color_inner(&mut self, color: impl Into<String>) {
        self.label_color_inner = color.into();
        self.relayout();
    }

    /// Label color while outside the filled region.
    pub fn set_label_color_outer(&mut self, color: impl Into<String>) {
        self.label_color_outer = color.into();
        self.relayout();
    }

    /// Whether the label follows the fill or stays put in the container.
    pub fn set_label_constraints(&mut self, constraints: LabelConstraints) {
        self.label_constraints = constraints;
        self.relayout();
    }

    /// Label position within the container for
    /// [`LabelConstraints::AlignContainer`].
    pub fn set_label_gravity(&mut self, gravity: LabelGravity) {
        self.label_gravity = gravity;
        self.relayout();
    }

    // ---- layout --------------------------------------------------------

    /// Geometry of the current frame.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub(super) fn relayout(&mut self) {
        let extent = self
            .orientation
            .extent(self.width, self.height)
            .saturating_sub(2 * self.padding);
        let displayed = self.animator.value();
        let fill_length = progress_size(extent as f64, self.state.max(), displayed);

        let label_extent = self.label.extent(self.orientation);
        let label = if label_extent == 0 {
            None
        } else {
            let inner = self.label_color_inner.as_str();
            let outer = self.label_color_outer.as_str();
            Some(match self.label_constraints {
                LabelConstraints::AlignProgress => {
                    place_label(label_extent as f64, self.label_space, fill_length, inner, outer)
                }
                LabelConstraints::AlignContainer => place_in_container(
                    label_extent as f64,
                    extent as f64,
                    self.label_gravity,
                    fill_length,
                    inner,
                    outer,
                ),
            })
        };

        self.layout = Layout {
            extent,
            displayed_progress: displayed,
            fill_length,
            filled_cells: filled_cells(fill_length, extent),
            label,
            stroke_alpha: self.highlight.stroke_alpha(),
        };
    }

    // ---- message loop --------------------------------------------------

    /// Processes frame and key messages.
    ///
    /// Frame messages advance the animation and schedule the next frame while
    /// it runs; frames addressed to another view, to a superseded run or to a
    /// detached view are ignored. While focused, a key matching the tap
    /// binding toggles the highlight.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(frame_msg) = msg.downcast_ref::<FrameMsg>() {
            if frame_msg.id != self.id || frame_msg.tag != self.tag || !self.attached {
                return None;
            }
            if !self.advance_frame() {
                return None;
            }
            return Some(self.next_frame());
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.focus && self.key_map.tap.matches(key_msg) {
                self.toggle_highlight();
            }
        }

        None
    }
}

impl Component for ProgressView {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl BubbleTeaModel for ProgressView {
    fn init() -> (Self, Option<Cmd>) {
        let mut view = ProgressView::new();
        let cmd = view.init();
        (view, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
