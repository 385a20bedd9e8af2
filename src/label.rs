//! Label text and placement relative to the filled region.
//!
//! The label sits inside the filled region, anchored to its trailing edge,
//! whenever it fits with room to spare; otherwise it sits just past the
//! filled edge. The decision is re-evaluated on every animation frame.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_progressview::label::{place_label, LabelSide};
//!
//! // A 5-cell label with 1 cell of spacing fits inside a 10-cell fill...
//! let placement = place_label(5.0, 1.0, 10.0, "#FFFFFF", "#000000");
//! assert_eq!(placement.side, LabelSide::Inside);
//! assert_eq!(placement.offset, 4.0);
//!
//! // ...but not inside a 6-cell one.
//! let placement = place_label(5.0, 1.0, 6.0, "#FFFFFF", "#000000");
//! assert_eq!(placement.side, LabelSide::Outside);
//! assert_eq!(placement.offset, 7.0);
//! ```

use crate::geometry::Orientation;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Default spacing between the label and the filled edge, in cells.
pub const DEFAULT_LABEL_SPACE: f64 = 1.0;
/// Default label text size. Carried for hosts that render the layout
/// themselves; terminal cells have a fixed size.
pub const DEFAULT_LABEL_SIZE: f32 = 12.0;

/// Font style of the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Typeface {
    /// Regular text.
    #[default]
    Normal,
    /// Bold text.
    Bold,
    /// Italic text.
    Italic,
    /// Bold and italic text.
    BoldItalic,
}

impl Typeface {
    /// Whether the typeface is bold.
    pub fn is_bold(self) -> bool {
        matches!(self, Typeface::Bold | Typeface::BoldItalic)
    }

    /// Whether the typeface is italic.
    pub fn is_italic(self) -> bool {
        matches!(self, Typeface::Italic | Typeface::BoldItalic)
    }
}

/// How the label position is constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelConstraints {
    /// Follow the filled edge (inside or just outside it).
    #[default]
    AlignProgress,
    /// Stay put within the container according to [`LabelGravity`].
    AlignContainer,
}

/// Placement of the label along the container when it is aligned to the
/// container rather than the progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelGravity {
    /// At the origin of the fill axis.
    Start,
    /// Centered.
    #[default]
    Center,
    /// At the far end of the fill axis.
    End,
}

/// Text attributes of the label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextForm {
    /// Label text.
    pub text: String,
    /// Text size for hosts that scale text.
    pub size: f32,
    /// Font style.
    pub typeface: Typeface,
}

impl Default for TextForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            size: DEFAULT_LABEL_SIZE,
            typeface: Typeface::Normal,
        }
    }
}

impl TextForm {
    /// Creates a text form with the given text and default attributes.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the text size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Sets the typeface.
    pub fn with_typeface(mut self, typeface: Typeface) -> Self {
        self.typeface = typeface;
        self
    }

    /// Display width of the text in terminal cells.
    pub fn width(&self) -> usize {
        self.text.width()
    }

    /// Extent of the label along the fill axis: its width when the bar fills
    /// horizontally, one row when it fills vertically. Empty labels take no
    /// room.
    pub fn extent(&self, orientation: Orientation) -> usize {
        if self.text.is_empty() {
            return 0;
        }
        match orientation {
            Orientation::Horizontal => self.width(),
            Orientation::Vertical => 1,
        }
    }
}

/// Which side of the filled edge the label ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    /// Within the filled region, drawn with the inner color.
    Inside,
    /// Beyond the filled edge, drawn with the outer color.
    Outside,
}

/// Result of positioning the label for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    /// Offset of the label's leading edge from the origin of the fill axis.
    pub offset: f64,
    /// Side of the filled edge.
    pub side: LabelSide,
    /// Color to draw the label with.
    pub color: String,
}

/// Positions a label of `extent` cells against a fill of `filled` cells.
///
/// The label goes inside only when `extent + spacing < filled`; equality puts
/// it outside.
pub fn place_label(
    extent: f64,
    spacing: f64,
    filled: f64,
    inner_color: &str,
    outer_color: &str,
) -> LabelPlacement {
    if extent + spacing < filled {
        LabelPlacement {
            offset: filled - extent - spacing,
            side: LabelSide::Inside,
            color: inner_color.to_string(),
        }
    } else {
        LabelPlacement {
            offset: filled + spacing,
            side: LabelSide::Outside,
            color: outer_color.to_string(),
        }
    }
}

/// Positions a label of `extent` cells inside a container of `container`
/// cells according to `gravity`, ignoring the fill position.
///
/// The label counts as inside when it lies wholly within the first `filled`
/// cells.
pub fn place_in_container(
    extent: f64,
    container: f64,
    gravity: LabelGravity,
    filled: f64,
    inner_color: &str,
    outer_color: &str,
) -> LabelPlacement {
    let free = (container - extent).max(0.0);
    let offset = match gravity {
        LabelGravity::Start => 0.0,
        LabelGravity::Center => (free / 2.0).floor(),
        LabelGravity::End => free,
    };
    let inside = extent > 0.0 && offset + extent <= filled;
    LabelPlacement {
        offset,
        side: if inside {
            LabelSide::Inside
        } else {
            LabelSide::Outside
        },
        color: if inside { inner_color } else { outer_color }.to_string(),
    }
}

/// Cuts `text` down to at most `max_width` display cells without splitting a
/// grapheme cluster.
pub fn clip_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > max_width {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }
    out
}
