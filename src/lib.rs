#![warn(missing_docs)]

//! # bubbletea-progressview
//!
//! An animated, labelled progress bar component for terminal applications
//! built with [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! A [`ProgressView`] is a rectangular container whose fill grows in
//! proportion to a bounded progress value. Changing the progress animates the
//! fill through an interpolation curve; on every frame the label is moved
//! inside the filled region when it fits, and just past the filled edge when
//! it does not, switching between an inner and an outer color. A tap (a key
//! press while focused, or a direct call) toggles a highlight stroke around
//! the fill and notifies a callback.
//!
//! The component follows the Elm Architecture used by bubbletea-rs: it has
//! `init()`, `update()` and `view()` methods and returns commands that drive
//! its animation.
//!
//! ## Features
//!
//! - **Clamped progress** within a configurable `[min, max]` range
//! - **Animated transitions** with built-in or custom interpolation curves
//! - **Adaptive label** placed inside or outside the fill on every frame
//! - **Highlight toggle** with a click callback
//! - **Horizontal or vertical** filling, solid or gradient fills
//! - **Declarative attributes** and a fluent [`Builder`]
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_progressview::prelude::*;
//! use bubbletea_rs::{Cmd, KeyMsg, Model, Msg};
//! use crossterm::event::KeyCode;
//!
//! struct App {
//!     progress: ProgressView,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut progress = Builder::new()
//!             .size(40, 1)
//!             .label_text("0%")
//!             .animation(ProgressAnimation::Decelerate)
//!             .build();
//!         progress.focus();
//!         let cmd = progress.init();
//!         (Self { progress }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(key) = msg.downcast_ref::<KeyMsg>() {
//!             if key.key == KeyCode::Right {
//!                 let cmd = self.progress.incr_progress(10.0);
//!                 let label = format!("{:.0}%", self.progress.progress());
//!                 self.progress.set_label_text(label);
//!                 return cmd;
//!             }
//!         }
//!         self.progress.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.progress.view()
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`progress`] | Bounded progress state |
//! | [`geometry`] | Progress to fill length mapping |
//! | [`animation`] | Interpolation curves and the frame animator |
//! | [`label`] | Label text and placement |
//! | [`highlight`] | Fill styling and the highlight toggle |
//! | [`config`] | `Config` and the fluent `Builder` |
//! | [`attributes`] | Declarative attribute parsing |
//! | [`progressview`] | The component itself |

pub mod animation;
pub mod attributes;
pub mod config;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod key;
pub mod label;
pub mod progress;
pub mod progressview;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused [`ProgressView`] reacts to its tap key binding; a blurred one
/// ignores key messages but keeps animating.
///
/// ## Examples
///
/// ```rust
/// use bubbletea_progressview::prelude::*;
///
/// let mut view = ProgressView::new();
/// assert!(!view.focused());
///
/// view.focus();
/// assert!(view.focused());
///
/// view.blur();
/// assert!(!view.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// # Returns
    ///
    /// An optional command to be executed by the bubbletea runtime.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use animation::{Animator, InterpolatorFn, ProgressAnimation, RestartMode};
pub use config::{Builder, Config};
pub use error::AttributeError;
pub use geometry::Orientation;
pub use highlight::{Fill, Gradient, Highlight, OnProgressClick};
pub use key::{Binding, KeyMap};
pub use label::{LabelConstraints, LabelGravity, LabelPlacement, LabelSide, TextForm, Typeface};
pub use progress::ProgressState;
pub use progressview::{FrameMsg, Layout, OnProgressChange, ProgressView, ProgressViewKeyMap};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_progressview::prelude::*;
///
/// let view = Builder::new().size(20, 1).build();
/// assert_eq!(view.orientation(), Orientation::Horizontal);
/// ```
pub mod prelude {
    pub use crate::Component;
    pub use crate::{
        Binding, Builder, Config, Gradient, KeyMap, LabelConstraints, LabelGravity, Layout,
        Orientation, ProgressAnimation, ProgressView, ProgressViewKeyMap, RestartMode, Typeface,
    };
}
