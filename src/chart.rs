use thiserror::Error;

use crate::layout::ChartLayout;
use crate::ticks::{Axis, axis_ticks, format_tick};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
    /// Pixel coordinate of the tick along its own axis.
    pub pixel: f64,
    /// Where the label text is centred.
    pub anchor: Point,
}

/// Declarative chart geometry, ready for any renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub segments: Vec<Segment>,
    pub axis_lines: Vec<Segment>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub min: Point,
    pub max: Point,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("no data")]
    NoData,
    #[error("series lengths differ: {xs} x values, {ys} y values")]
    LengthMismatch { xs: usize, ys: usize },
}

/// Pairs up defined values and orders them by x, then y.
///
/// The line is drawn in value order rather than match order, so two matches
/// far apart in time but with equal x sit next to each other. This keeps the
/// trend readable instead of zig-zagging back and forth along the x axis.
pub fn valid_pairs(xs: &[f64], ys: &[f64]) -> Vec<Point> {
    let mut pairs: Vec<Point> = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .map(|(x, y)| Point::new(*x, *y))
        .collect();
    pairs.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pairs
}

/// Componentwise (min, max) over `points`, or `None` when empty.
pub fn data_range(points: &[Point]) -> Option<(Point, Point)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Maps a data point into the plot area. Y is flipped so `max.y` lands on
/// the top edge. An axis with no spread puts every point on its midline.
pub fn transform(point: Point, min: Point, max: Point, layout: &ChartLayout) -> Point {
    Point::new(
        scale(point.x - min.x, max.x - min.x, layout.width) + layout.origin_x,
        scale(max.y - point.y, max.y - min.y, layout.height) + layout.origin_y,
    )
}

fn scale(offset: f64, span: f64, size: f64) -> f64 {
    if span > 0.0 && span.is_finite() {
        offset / span * size
    } else {
        size / 2.0
    }
}

pub fn build_chart(xs: &[f64], ys: &[f64], layout: &ChartLayout) -> Result<Chart, ChartError> {
    if xs.len() != ys.len() {
        return Err(ChartError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }

    let pairs = valid_pairs(xs, ys);
    let (min, max) = data_range(&pairs).ok_or(ChartError::NoData)?;
    tracing::debug!(
        points = pairs.len(),
        dropped = xs.len() - pairs.len(),
        "building chart"
    );
    if min.x == max.x || min.y == max.y {
        tracing::debug!(?min, ?max, "degenerate chart range");
    }

    let series_stroke = Stroke {
        color: layout.line_color.clone(),
        width: layout.line_width,
    };
    let projected: Vec<Point> = pairs
        .iter()
        .map(|p| transform(*p, min, max, layout))
        .collect();
    let segments = projected
        .windows(2)
        .map(|w| Segment {
            from: w[0],
            to: w[1],
            stroke: series_stroke.clone(),
        })
        .collect();

    let (canvas_width, canvas_height) = layout.canvas_size();
    Ok(Chart {
        segments,
        axis_lines: axis_lines(layout),
        x_ticks: x_ticks(min, max, layout),
        y_ticks: y_ticks(min, max, layout),
        min,
        max,
        canvas_width,
        canvas_height,
    })
}

fn axis_lines(layout: &ChartLayout) -> Vec<Segment> {
    let stroke = Stroke {
        color: layout.axis_color.clone(),
        width: layout.axis_width,
    };
    let left = layout.origin_x;
    let right = layout.origin_x + layout.width;
    let top = layout.origin_y;
    let bottom = layout.origin_y + layout.height;
    vec![
        Segment {
            from: Point::new(left, bottom),
            to: Point::new(right, bottom),
            stroke: stroke.clone(),
        },
        Segment {
            from: Point::new(left, top),
            to: Point::new(left, bottom),
            stroke,
        },
    ]
}

fn x_ticks(min: Point, max: Point, layout: &ChartLayout) -> Vec<Tick> {
    let label_y = layout.origin_y + layout.height + layout.label_offset;
    axis_ticks(min.x, max.x, Axis::X)
        .into_iter()
        .map(|value| {
            let pixel = transform(Point::new(value, min.y), min, max, layout).x;
            Tick {
                value,
                label: format_tick(value),
                pixel,
                anchor: Point::new(pixel, label_y),
            }
        })
        .collect()
}

fn y_ticks(min: Point, max: Point, layout: &ChartLayout) -> Vec<Tick> {
    let label_x = layout.origin_x - layout.label_offset;
    axis_ticks(min.y, max.y, Axis::Y)
        .into_iter()
        .map(|value| {
            let pixel = transform(Point::new(min.x, value), min, max, layout).y;
            Tick {
                value,
                label: format_tick(value),
                pixel,
                anchor: Point::new(label_x, pixel),
            }
        })
        .collect()
}
