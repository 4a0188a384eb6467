//! Synthetic detector output for a perspective view of pitch lines.

use offside_vp::detection::RawSegment;
use offside_vp::geometry::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const IMAGE_W: f64 = 1280.0;
pub const IMAGE_H: f64 = 720.0;

/// A far side VP, typical for a camera looking along the touchline.
pub const SIDE_VP: Point = Point::new(3200.0, 120.0);

/// Point at `x` on the line through `vp` and `(0, y0)`.
pub fn point_on_ray(vp: Point, y0: f64, x: f64) -> Point {
    let t = x / vp.x;
    Point::new(x, y0 + (vp.y - y0) * t)
}

/// One segment per pitch line, spanning `x0..x1`. Each line passes through
/// `vp` and crosses the left image edge at the given height.
pub fn pitch_segments(vp: Point, left_edge_ys: &[f64], x0: f64, x1: f64) -> Vec<RawSegment> {
    left_edge_ys
        .iter()
        .map(|&y0| RawSegment::from_endpoints(point_on_ray(vp, y0, x0), point_on_ray(vp, y0, x1)))
        .collect()
}

/// Segments the reducer should discard: steep edges (goal posts, players)
/// and short fragments.
pub fn clutter_segments() -> Vec<RawSegment> {
    vec![
        RawSegment::from_endpoints(Point::new(200.0, 100.0), Point::new(210.0, 400.0)),
        RawSegment::from_endpoints(Point::new(900.0, 650.0), Point::new(980.0, 300.0)),
        RawSegment::from_endpoints(Point::new(400.0, 50.0), Point::new(440.0, 52.0)),
        RawSegment::from_endpoints(Point::new(700.0, 600.0), Point::new(760.0, 604.0)),
    ]
}

/// Seeded Gaussian noise source for perturbation tests.
pub struct Jitter {
    rng: StdRng,
}

impl Jitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Standard normal sample (Box-Muller).
    pub fn gaussian(&mut self) -> f64 {
        let u1 = 1.0 - self.rng.random::<f64>();
        let u2 = self.rng.random::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    pub fn perturb(&mut self, p: Point, sigma: f64) -> Point {
        let dx = sigma * self.gaussian();
        let dy = sigma * self.gaussian();
        p.offset(dx, dy)
    }
}
