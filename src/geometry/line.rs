use super::{Point, Rect, EPS};
use crate::error::GeometryError;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Defining endpoints only; the normal form is rebuilt on deserialization so
/// the unit-normal invariant cannot be bypassed.
#[derive(Deserialize)]
struct LineEndpoints {
    p1: Point,
    p2: Point,
}

impl TryFrom<LineEndpoints> for Line {
    type Error = GeometryError;

    fn try_from(raw: LineEndpoints) -> Result<Self, Self::Error> {
        Line::through(raw.p1, raw.p2)
    }
}

/// Infinite line `a·x + b·y + c = 0` with `a² + b² = 1`, together with the
/// two points it was built from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineEndpoints")]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
    p1: Point,
    p2: Point,
}

impl Line {
    /// Line through `p1` and `p2`.
    ///
    /// Fails with [`GeometryError::DegenerateLine`] when the points coincide
    /// within `1e-9`.
    pub fn through(p1: Point, p2: Point) -> Result<Self, GeometryError> {
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;
        let a = -dy;
        let b = dx;
        let c = dy * p1.x - dx * p1.y;
        let n = (a * a + b * b).sqrt();
        if !(n >= EPS) {
            return Err(GeometryError::DegenerateLine);
        }
        Ok(Self {
            a: a / n,
            b: b / n,
            c: c / n,
            p1,
            p2,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    /// Homogeneous line coordinates `(a, b, c)`.
    pub fn coefficients(&self) -> Vector3<f64> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Unit tangent pointing from `p1` towards `p2`.
    pub fn direction(&self) -> [f64; 2] {
        [self.b, -self.a]
    }

    /// Direction of `p1 → p2` in degrees, `atan2` range.
    pub fn angle_deg(&self) -> f64 {
        crate::angle::segment_angle_deg(self.p1.into(), self.p2.into())
    }

    /// Distance between the defining endpoints.
    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    /// Signed Euclidean distance; positive on the side the normal points to.
    pub fn signed_distance(&self, p: &Point) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }

    /// Euclidean distance from `p` to the line.
    pub fn distance(&self, p: &Point) -> f64 {
        self.signed_distance(p).abs()
    }

    /// Intersection point, or `None` when the lines are parallel within
    /// `1e-9`. Near-parallel lines meet far away but the result is not
    /// numerically reliable and is rejected.
    pub fn intersect(&self, other: &Line) -> Option<Point> {
        let h = self.coefficients().cross(&other.coefficients());
        if h[2].abs() < EPS {
            return None;
        }
        Some(Point::new(h[0] / h[2], h[1] / h[2]))
    }

    /// Portion of the line visible inside `rect`, as two distinct boundary
    /// points, or `None` if the line misses the rectangle.
    pub fn clip_to_rect(&self, rect: &Rect) -> Option<(Point, Point)> {
        let mut pts: Vec<Point> = Vec::with_capacity(4);

        if self.b.abs() > EPS {
            for x in [rect.left, rect.right] {
                let y = -(self.a * x + self.c) / self.b;
                if y >= rect.top && y <= rect.bottom {
                    pts.push(Point::new(x, y));
                }
            }
        }
        if self.a.abs() > EPS {
            for y in [rect.top, rect.bottom] {
                let x = -(self.b * y + self.c) / self.a;
                if x >= rect.left && x <= rect.right {
                    pts.push(Point::new(x, y));
                }
            }
        }

        let mut unique: Vec<Point> = Vec::with_capacity(2);
        for p in pts {
            let dup = unique
                .iter()
                .any(|q| (p.x - q.x).abs() < 1.0 && (p.y - q.y).abs() < 1.0);
            if !dup {
                unique.push(p);
            }
            if unique.len() == 2 {
                return Some((unique[0], unique[1]));
            }
        }
        None
    }
}
