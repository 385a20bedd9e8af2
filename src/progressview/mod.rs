//! Animated, labelled progress bar component for bubbletea-rs applications.
//!
//! A [`ProgressView`] is a rectangular container whose fill grows along a
//! configurable axis. Progress changes are animated through an interpolation
//! curve; on every frame the fill is resized and the label is re-placed inside
//! or just outside the filled region. Pressing the tap binding while focused
//! toggles a highlight stroke around the fill.
//!
//! # Basic usage
//!
//! ```rust
//! use bubbletea_progressview::progressview::ProgressView;
//!
//! let mut view = ProgressView::new();
//! view.set_size(40, 1);
//! view.set_label_text("loading");
//!
//! // Returns a frame command that drives the animation.
//! let cmd = view.set_progress(65.0);
//! assert!(cmd.is_some());
//! assert_eq!(view.progress(), 65.0);
//! ```
//!
//! # bubbletea-rs integration
//!
//! ```rust
//! use bubbletea_progressview::config::Builder;
//! use bubbletea_progressview::progressview::ProgressView;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     progress: ProgressView,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut progress = Builder::new()
//!             .size(50, 1)
//!             .progress(30.0)
//!             .on_progress_change(|p| eprintln!("progress: {p}"))
//!             .build();
//!         let cmd = progress.init();
//!         (Self { progress }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         // Forward frame and key messages to the progress view.
//!         self.progress.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.progress.view()
//!     }
//! }
//! ```

mod methods;
mod model;
mod view;

pub use model::{FrameMsg, Layout, OnProgressChange, ProgressView, ProgressViewKeyMap};
