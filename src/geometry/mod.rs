//! Planar geometry on image-space lines.
//!
//! Lines are kept in unit-normal implicit form `a·x + b·y + c = 0` with
//! `a² + b² = 1`, so `|a·x + b·y + c|` is the true Euclidean distance of a
//! point to the line. Everything else in the crate (VP fitting, candidate
//! merging, VP-line re-anchoring) builds on these primitives.

mod line;
mod point;
mod rect;

pub use line::Line;
pub use point::Point;
pub use rect::Rect;

use crate::error::GeometryError;

/// Numerical tolerance for degenerate constructions and near-singular 2×2
/// systems.
pub const EPS: f64 = 1e-9;

/// Builds the unit-normal line through two points.
pub fn make_line(p1: Point, p2: Point) -> Result<Line, GeometryError> {
    Line::through(p1, p2)
}

/// Intersection of two lines, `None` when parallel within [`EPS`].
pub fn intersect(l1: &Line, l2: &Line) -> Option<Point> {
    l1.intersect(l2)
}

/// Euclidean distance from `point` to `line`.
pub fn point_to_line_distance(point: &Point, line: &Line) -> f64 {
    line.distance(point)
}

/// Clips `line` to `rect`, returning two distinct boundary points.
pub fn clip_to_rect(line: &Line, rect: &Rect) -> Option<(Point, Point)> {
    line.clip_to_rect(rect)
}
