use sponge_api::DistanceTable;
use tracing::debug;

use crate::figure::{escape, title, Figure};

pub const DEFAULT_TITLE: &str = "MDS plot";

/// Labels sit this many data units above their point.
pub const LABEL_OFFSET: f64 = 0.5;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const MARGIN: f64 = 56.0;
const POINT_RADIUS: f64 = 3.5;

/// Linear data-to-pixel mapping for one axis.
#[derive(Debug, Clone, Copy)]
struct Axis {
    min: f64,
    max: f64,
    from: f64,
    to: f64,
}

impl Axis {
    fn new(values: impl Iterator<Item = f64>, from: f64, to: f64) -> Self {
        let (mut min, mut max) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if min > max {
            min = 0.0;
            max = 1.0;
        }
        if max - min < f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }
        let pad = (max - min) * 0.05;
        Self {
            min: min - pad,
            max: max + pad,
            from,
            to,
        }
    }

    fn scale(&self, v: f64) -> f64 {
        self.from + (v - self.min) / (self.max - self.min) * (self.to - self.from)
    }
}

/// Scatter plot of MDS coordinates with each point annotated by its label.
pub fn render_mds(distances: &DistanceTable, title_text: &str) -> Figure {
    let x_axis = Axis::new(distances.xs(), MARGIN, WIDTH as f64 - MARGIN);
    // annotations must fit inside the plot area too
    let y_axis = Axis::new(
        distances.ys().chain(distances.ys().map(|y| y + LABEL_OFFSET)),
        HEIGHT as f64 - MARGIN,
        MARGIN,
    );
    debug!(points = distances.len(), "Rendering MDS plot");

    let mut body = title(title_text, WIDTH);
    body.push_str(&format!(
        r##"<rect x="{m:.1}" y="{m:.1}" width="{w:.1}" height="{h:.1}" fill="none" stroke="#444444"/>
"##,
        m = MARGIN,
        w = WIDTH as f64 - 2.0 * MARGIN,
        h = HEIGHT as f64 - 2.0 * MARGIN
    ));

    let mut points = String::new();
    let mut labels = String::new();
    for point in &distances.points {
        if !point.x.is_finite() || !point.y.is_finite() {
            continue;
        }
        let cx = x_axis.scale(point.x);
        points.push_str(&format!(
            r##"<circle cx="{:.1}" cy="{:.1}" r="{}" fill="#1F77B4"/>
"##,
            cx,
            y_axis.scale(point.y),
            POINT_RADIUS
        ));
        labels.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" font-size="7" text-anchor="middle">{}</text>
"##,
            cx,
            y_axis.scale(point.y + LABEL_OFFSET),
            escape(&point.label)
        ));
    }
    body.push_str(&points);
    body.push_str(&labels);

    body.push_str(&axis_ticks(&x_axis, &y_axis));
    Figure::new(WIDTH, HEIGHT, &body)
}

fn axis_ticks(x_axis: &Axis, y_axis: &Axis) -> String {
    let mut out = String::new();
    let bottom = HEIGHT as f64 - MARGIN;
    for v in [x_axis.min, (x_axis.min + x_axis.max) / 2.0, x_axis.max] {
        out.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" font-size="10" text-anchor="middle">{:.2}</text>
"##,
            x_axis.scale(v),
            bottom + 16.0,
            v
        ));
    }
    for v in [y_axis.min, (y_axis.min + y_axis.max) / 2.0, y_axis.max] {
        out.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" font-size="10" text-anchor="end" dominant-baseline="middle">{:.2}</text>
"##,
            MARGIN - 6.0,
            y_axis.scale(v),
            v
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_maps_extent_into_range() {
        let axis = Axis::new([0.0, 10.0].into_iter(), 0.0, 100.0);
        assert!(axis.scale(0.0) > 0.0);
        assert!(axis.scale(10.0) < 100.0);
        assert!((axis.scale(5.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_flat_and_empty() {
        let flat = Axis::new([3.0, 3.0].into_iter(), 0.0, 100.0);
        assert!((flat.scale(3.0) - 50.0).abs() < 1e-9);

        let empty = Axis::new(std::iter::empty(), 0.0, 100.0);
        assert!(empty.scale(0.5).is_finite());
    }

    #[test]
    fn test_inverted_pixel_axis() {
        let axis = Axis::new([0.0, 1.0].into_iter(), 400.0, 50.0);
        assert!(axis.scale(1.0) < axis.scale(0.0));
    }
}
