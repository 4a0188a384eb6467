use crate::angle::segment_angle_deg;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Line segment reported by the external edge/Hough detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    pub p1: Point,
    pub p2: Point,
    /// Direction `p1 → p2` in degrees, `atan2` range.
    pub angle_deg: f64,
    /// Length in pixels.
    pub length: f64,
}

impl RawSegment {
    /// Segment with angle and length derived from its endpoints.
    pub fn from_endpoints(p1: Point, p2: Point) -> Self {
        Self {
            p1,
            p2,
            angle_deg: segment_angle_deg(p1.into(), p2.into()),
            length: p1.distance(&p2),
        }
    }

    /// Mean of the two endpoint Y coordinates.
    pub fn mean_y(&self) -> f64 {
        (self.p1.y + self.p2.y) * 0.5
    }
}
