//! Terminal rendering of the progress view.

use super::model::ProgressView;
use crate::geometry::Orientation;
use crate::label::{clip_to_width, LabelPlacement};
use lipgloss_extras::lipgloss::blending::blend_1d;
use lipgloss_extras::lipgloss::{self, Color, Style};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

// Steps used to approximate an opacity when blending two colors.
const ALPHA_STEPS: usize = 101;

#[derive(Clone)]
struct Cell {
    background: Color,
    text: String,
    foreground: Option<Color>,
    bold: bool,
    italic: bool,
}

impl Cell {
    fn blank(background: &Color) -> Self {
        Self {
            background: background.clone(),
            text: " ".to_string(),
            foreground: None,
            bold: false,
            italic: false,
        }
    }

    fn render(&self) -> String {
        // Trailing half of a wide grapheme.
        if self.text.is_empty() {
            return String::new();
        }
        let mut style = Style::new().background(self.background.clone());
        if let Some(foreground) = &self.foreground {
            style = style.foreground(foreground.clone());
        }
        if self.bold {
            style = style.bold(true);
        }
        if self.italic {
            style = style.italic(true);
        }
        style.render(&self.text)
    }
}

/// Blends `over` onto `base` at `alpha` opacity.
fn mix(base: &Color, over: &Color, alpha: f32) -> Color {
    if alpha >= 1.0 {
        return over.clone();
    }
    if alpha <= 0.0 {
        return base.clone();
    }
    let steps = blend_1d(ALPHA_STEPS, vec![base.clone(), over.clone()]);
    let idx = (f64::from(alpha) * (ALPHA_STEPS - 1) as f64).round() as usize;
    steps.get(idx).cloned().unwrap_or_else(|| over.clone())
}

impl ProgressView {
    /// Renders the progress bar at its currently displayed value.
    ///
    /// The container is drawn as `width` x `height` background cells. The
    /// filled region is painted with the fill color or gradient, the
    /// highlight stroke is laid over its edge while highlighting, and the
    /// label is drawn on top with its inner or outer color. A border is
    /// added around the container when the border width is positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_progressview::config::Builder;
    ///
    /// let view = Builder::new()
    ///     .size(20, 1)
    ///     .progress(50.0)
    ///     .auto_animate(false)
    ///     .build();
    ///
    /// let rendered = view.view();
    /// assert_eq!(rendered.lines().count(), 1);
    /// ```
    pub fn view(&self) -> String {
        if self.width == 0 || self.height == 0 {
            return String::new();
        }

        let background = Color::from(self.background.as_str());
        let mut grid = vec![vec![Cell::blank(&background); self.width]; self.height];

        self.paint_fill(&mut grid, &background);
        self.paint_stroke(&mut grid);
        if let Some(placement) = &self.layout.label {
            self.paint_label(&mut grid, placement);
        }

        let body = grid
            .iter()
            .map(|row| row.iter().map(Cell::render).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");

        if self.border_width == 0 {
            return body;
        }
        let border = if self.radius > 0.0 {
            lipgloss::rounded_border()
        } else {
            lipgloss::normal_border()
        };
        Style::new()
            .border_style(border)
            .border_top(true)
            .border_bottom(true)
            .border_left(true)
            .border_right(true)
            .border_foreground(Color::from(self.border_color.as_str()))
            .render(&body)
    }

    /// Rows and columns covered by the filled region, inside the padding.
    fn fill_rect(&self) -> Option<(Range<usize>, Range<usize>)> {
        let n = self.layout.filled_cells;
        let p = self.padding;
        if n == 0 {
            return None;
        }
        let (rows, cols) = match self.orientation {
            Orientation::Horizontal => (p..self.height.saturating_sub(p), p..p + n),
            Orientation::Vertical => {
                let bottom = self.height.saturating_sub(p);
                (bottom.saturating_sub(n)..bottom, p..self.width.saturating_sub(p))
            }
        };
        if rows.is_empty() || cols.is_empty() {
            return None;
        }
        Some((rows, cols))
    }

    /// Position of a filled cell along the fill axis, counted from the origin.
    fn axis_index(&self, row: usize, col: usize) -> usize {
        match self.orientation {
            Orientation::Horizontal => col - self.padding,
            Orientation::Vertical => self.height - self.padding - 1 - row,
        }
    }

    fn fill_colors(&self, background: &Color) -> Vec<Color> {
        let n = self.layout.filled_cells;
        let colors = match &self.fill.gradient {
            Some(gradient) => {
                let stops = gradient.stops().into_iter().map(Color::from).collect();
                blend_1d(n.max(2), stops)
            }
            None => vec![Color::from(self.fill.color.as_str()); n],
        };
        colors
            .iter()
            .map(|color| mix(background, color, self.fill.alpha))
            .collect()
    }

    fn paint_fill(&self, grid: &mut [Vec<Cell>], background: &Color) {
        let Some((rows, cols)) = self.fill_rect() else {
            return;
        };
        let colors = self.fill_colors(background);
        for row in rows {
            for col in cols.clone() {
                let idx = self.axis_index(row, col).min(colors.len().saturating_sub(1));
                if let Some(color) = colors.get(idx) {
                    grid[row][col].background = color.clone();
                }
            }
        }
    }

    fn paint_stroke(&self, grid: &mut [Vec<Cell>]) {
        if !self.highlight.stroke_visible() {
            return;
        }
        let Some((rows, cols)) = self.fill_rect() else {
            return;
        };
        let thickness = usize::from(self.highlight.thickness);
        let stroke = Color::from(self.highlight.color.as_str());
        let alpha = self.layout.stroke_alpha;

        for row in rows.clone() {
            for col in cols.clone() {
                let edge = (row - rows.start)
                    .min(rows.end - 1 - row)
                    .min(col - cols.start)
                    .min(cols.end - 1 - col);
                if edge < thickness {
                    let cell = &mut grid[row][col];
                    cell.background = mix(&cell.background, &stroke, alpha);
                }
            }
        }
    }

    fn paint_label(&self, grid: &mut [Vec<Cell>], placement: &LabelPlacement) {
        if placement.offset < 0.0 {
            return;
        }
        let offset = placement.offset.floor() as usize;
        let p = self.padding;
        let (row, start, text) = match self.orientation {
            Orientation::Horizontal => {
                let start = p + offset;
                let right = self.width.saturating_sub(p);
                if start >= right {
                    return;
                }
                let text = clip_to_width(&self.label.text, right - start);
                (self.height / 2, start, text)
            }
            Orientation::Vertical => {
                let inner_width = self.width.saturating_sub(2 * p);
                if offset >= self.layout.extent || inner_width == 0 {
                    return;
                }
                let text = clip_to_width(&self.label.text, inner_width);
                let start = p + (inner_width - text.width()) / 2;
                (self.height - p - 1 - offset, start, text)
            }
        };

        let foreground = Color::from(placement.color.as_str());
        let typeface = self.label.typeface;
        let mut col = start;
        for grapheme in text.graphemes(true) {
            let w = grapheme.width();
            if w == 0 {
                continue;
            }
            for (i, cell) in grid[row].iter_mut().skip(col).take(w).enumerate() {
                cell.text = if i == 0 {
                    grapheme.to_string()
                } else {
                    String::new()
                };
                cell.foreground = Some(foreground.clone());
                cell.bold = typeface.is_bold();
                cell.italic = typeface.is_italic();
            }
            col += w;
        }
    }
}
