//! Stroke smoothing: turns a recorded polyline into a cardinal-spline path.
//!
//! Each interior vertex gets a pair of control points placed along the line
//! through its neighbours, split in proportion to the adjacent segment
//! lengths. The first and last segments are quadratic curves, the rest are
//! cubic. The path passes through every recorded point.
//!
//! Kept free of `web_sys` so the geometry can be tested natively; the renderer
//! replays the segments onto a `CanvasRenderingContext2d`.

#[cfg(test)]
#[path = "smooth_test.rs"]
mod smooth_test;

use crate::transform::Point;

/// One drawing command of a smoothed path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// A single-point stroke; drawn as a filled disc.
    Dot(Point),
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
}

/// Build the path for `points` with the given spline `tension` (0 or less = straight lines).
#[must_use]
pub fn smooth_path(points: &[Point], tension: f64) -> Vec<PathSegment> {
    match points {
        [] => Vec::new(),
        [only] => vec![PathSegment::Dot(*only)],
        [first, rest @ ..] if points.len() == 2 || tension <= 0.0 => {
            let mut path = Vec::with_capacity(points.len());
            path.push(PathSegment::MoveTo(*first));
            path.extend(rest.iter().map(|p| PathSegment::LineTo(*p)));
            path
        }
        _ => spline(points, tension),
    }
}

/// Control points `(before, after)` for vertex `p1` with neighbours `p0` and `p2`.
#[must_use]
pub fn control_points(p0: Point, p1: Point, p2: Point, tension: f64) -> (Point, Point) {
    let d01 = (p1.x - p0.x).hypot(p1.y - p0.y);
    let d12 = (p2.x - p1.x).hypot(p2.y - p1.y);
    let total = d01 + d12;
    if total <= f64::EPSILON {
        return (p1, p1);
    }
    let fa = tension * d01 / total;
    let fb = tension * d12 / total;
    let dx = p2.x - p0.x;
    let dy = p2.y - p0.y;
    (
        Point::new(p1.x - fa * dx, p1.y - fa * dy),
        Point::new(p1.x + fb * dx, p1.y + fb * dy),
    )
}

fn spline(points: &[Point], tension: f64) -> Vec<PathSegment> {
    let controls: Vec<(Point, Point)> = points
        .windows(3)
        .map(|w| control_points(w[0], w[1], w[2], tension))
        .collect();
    let last = points.len() - 1;

    let mut path = Vec::with_capacity(points.len());
    path.push(PathSegment::MoveTo(points[0]));
    path.push(PathSegment::QuadTo { ctrl: controls[0].0, to: points[1] });
    for i in 1..controls.len() {
        path.push(PathSegment::CubicTo {
            ctrl1: controls[i - 1].1,
            ctrl2: controls[i].0,
            to: points[i + 1],
        });
    }
    path.push(PathSegment::QuadTo { ctrl: controls[controls.len() - 1].1, to: points[last] });
    path
}
