//! Score heatmaps.
//!
//! Rows are drawn in reverse label order so a symmetric matrix reads along
//! the anti-diagonal. With triangular masking the redundant half and the
//! self-similarity diagonal are blanked, leaving a staircase that holds
//! each pair once, and the then-empty last row and column are dropped.

use sponge_api::ScoreMatrix;
use tracing::debug;

use crate::color::{hex, Gradient, VIOLET};
use crate::figure::{escape, title, Figure};

pub const DEFAULT_TITLE: &str = "Heatmap";

const CELL: f64 = 28.0;
const MARGIN_LEFT: f64 = 140.0;
const MARGIN_TOP: f64 = 150.0;
const LEGEND_GAP: f64 = 24.0;
const LEGEND_WIDTH: f64 = 16.0;
const LEGEND_STEPS: usize = 32;

/// The cells a heatmap shows; `None` is a blank cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    /// Top to bottom.
    pub row_labels: Vec<String>,
    /// Left to right.
    pub col_labels: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl HeatmapGrid {
    /// Lay out `scores` for display, optionally masking the upper triangle.
    /// Only square matrices are masked; others are drawn in full.
    pub fn from_scores(scores: &ScoreMatrix, triangular: bool) -> Self {
        let n_rows = scores.n_rows();
        let mut cells: Vec<Vec<Option<f64>>> = scores
            .values
            .iter()
            .rev()
            .map(|row| row.iter().copied().map(Some).collect())
            .collect();
        let mut row_labels: Vec<String> = (0..n_rows).rev().map(|i| scores.row_label(i)).collect();
        let mut col_labels = scores.labels.clone();

        if triangular && !scores.is_square() {
            debug!(rows = n_rows, cols = scores.n_cols(), "Not masking a non-square score matrix");
        }
        if triangular && scores.is_square() && n_rows > 0 {
            // upper triangle a <= b, seen through the row reversal as (b, n-1-a)
            for a in 0..n_rows {
                for b in a..n_rows {
                    let col = n_rows - 1 - a;
                    if let Some(cell) = cells[b].get_mut(col) {
                        *cell = None;
                    }
                }
            }
            cells.pop();
            row_labels.pop();
            col_labels.pop();
            for row in &mut cells {
                row.truncate(col_labels.len());
            }
        }

        Self {
            row_labels,
            col_labels,
            cells,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.cells.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_labels.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Smallest and largest visible value, ignoring NaN.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .filter_map(|c| *c)
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Mask (by default) and render a score matrix.
pub fn plot_heatmap(scores: &ScoreMatrix, title: &str, triangular: bool) -> Figure {
    render_heatmap(&HeatmapGrid::from_scores(scores, triangular), title)
}

pub fn render_heatmap(grid: &HeatmapGrid, title_text: &str) -> Figure {
    render_heatmap_with(grid, title_text, &VIOLET)
}

pub fn render_heatmap_with(grid: &HeatmapGrid, title_text: &str, gradient: &Gradient) -> Figure {
    let (min, max) = grid.value_range().unwrap_or((0.0, 1.0));
    let grid_w = grid.n_cols() as f64 * CELL;
    let grid_h = grid.n_rows() as f64 * CELL;
    let legend_x = MARGIN_LEFT + grid_w + LEGEND_GAP;
    let width = (legend_x + LEGEND_WIDTH + 70.0).ceil() as u32;
    let height = (MARGIN_TOP + grid_h.max(LEGEND_STEPS as f64 * 4.0) + 30.0).ceil() as u32;
    debug!(rows = grid.n_rows(), cols = grid.n_cols(), min, max, "Rendering heatmap");

    let mut body = title(title_text, width);

    let mut cells = String::new();
    for (r, row) in grid.cells.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let Some(v) = value.filter(|v| !v.is_nan()) else {
                continue;
            };
            cells.push_str(&format!(
                r##"<rect x="{:.1}" y="{:.1}" width="{}" height="{}" fill="{}"><title>{} / {}: {}</title></rect>
"##,
                MARGIN_LEFT + c as f64 * CELL,
                MARGIN_TOP + r as f64 * CELL,
                CELL,
                CELL,
                hex(gradient.map(v, min, max)),
                escape(grid.row_labels.get(r).map_or("", String::as_str)),
                escape(grid.col_labels.get(c).map_or("", String::as_str)),
                v
            ));
        }
    }
    body.push_str(&cells);

    // column labels on top, rotated for readability
    let mut x_labels = String::new();
    for (c, label) in grid.col_labels.iter().enumerate() {
        let x = MARGIN_LEFT + (c as f64 + 0.5) * CELL;
        let y = MARGIN_TOP - 6.0;
        x_labels.push_str(&format!(
            r##"<text x="{x:.1}" y="{y:.1}" font-size="11" text-anchor="start" transform="rotate(-45 {x:.1} {y:.1})">{}</text>
"##,
            escape(label),
            x = x,
            y = y
        ));
    }
    body.push_str(&x_labels);

    let mut y_labels = String::new();
    for (r, label) in grid.row_labels.iter().enumerate() {
        y_labels.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end" dominant-baseline="middle">{}</text>
"##,
            MARGIN_LEFT - 6.0,
            MARGIN_TOP + (r as f64 + 0.5) * CELL,
            escape(label)
        ));
    }
    body.push_str(&y_labels);

    body.push_str(&legend(legend_x, gradient, min, max));
    Figure::new(width, height, &body)
}

/// Vertical color bar, max at the top.
fn legend(x: f64, gradient: &Gradient, min: f64, max: f64) -> String {
    let step_h = 4.0;
    let mut out = String::new();
    for i in 0..LEGEND_STEPS {
        let t = 1.0 - i as f64 / (LEGEND_STEPS - 1) as f64;
        out.push_str(&format!(
            r##"<rect x="{:.1}" y="{:.1}" width="{}" height="{}" fill="{}"/>
"##,
            x,
            MARGIN_TOP + i as f64 * step_h,
            LEGEND_WIDTH,
            step_h,
            gradient.hex(t)
        ));
    }
    let bottom = MARGIN_TOP + LEGEND_STEPS as f64 * step_h;
    out.push_str(&format!(
        r##"<text x="{lx:.1}" y="{top:.1}" font-size="10" dominant-baseline="middle">{max:.3}</text>
<text x="{lx:.1}" y="{bottom:.1}" font-size="10" dominant-baseline="middle">{min:.3}</text>
"##,
        lx = x + LEGEND_WIDTH + 4.0,
        top = MARGIN_TOP,
        bottom = bottom,
        max = max,
        min = min
    ));
    out
}
