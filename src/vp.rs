//! Vanishing-point estimation from reference lines.
//!
//! With exactly two lines the VP is their intersection. With three or more,
//! the VP is the point minimizing `Σ (a_i·x + b_i·y + c_i)²`. Because every
//! line is unit-normalized the residuals are true point-to-line distances,
//! so this is the closed-form 2×2 linear least-squares solution of
//!
//! ```text
//! | Σa²  Σab | |x|   | -Σac |
//! | Σab  Σb² | |y| = | -Σbc |
//! ```
//!
//! There is no iteration and no incremental update: callers re-run the fit on
//! the full reference set whenever it changes.

use crate::error::VpError;
use crate::geometry::{Line, Point, EPS};
use log::debug;
use serde::Serialize;

/// How the estimate was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMethod {
    /// Exact intersection of two lines.
    Intersection,
    /// Least squares over three or more lines.
    LeastSquares,
}

/// Vanishing point together with its fit residuals.
#[derive(Clone, Debug, Serialize)]
pub struct VpEstimate {
    pub point: Point,
    pub method: FitMethod,
    /// Distance from `point` to each input line, in input order.
    pub residuals: Vec<f64>,
    pub rms_residual: f64,
}

impl VpEstimate {
    fn new(point: Point, method: FitMethod, lines: &[&Line]) -> Self {
        let residuals: Vec<f64> = lines.iter().map(|l| l.distance(&point)).collect();
        let rms_residual = if residuals.is_empty() {
            0.0
        } else {
            (residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64).sqrt()
        };
        Self {
            point,
            method,
            residuals,
            rms_residual,
        }
    }
}

/// Best-fit vanishing point, or `None` when the lines cannot define one.
pub fn best_fit(lines: &[Line]) -> Option<Point> {
    estimate(lines).ok().map(|e| e.point)
}

/// Estimates the vanishing point of a set of reference lines.
pub fn estimate<'a, I>(lines: I) -> Result<VpEstimate, VpError>
where
    I: IntoIterator<Item = &'a Line>,
{
    let lines: Vec<&Line> = lines.into_iter().collect();
    match lines.len() {
        n if n < 2 => {
            debug!("VP: insufficient reference lines ({} < 2)", n);
            Err(VpError::InsufficientEvidence(n))
        }
        2 => {
            let point = lines[0].intersect(lines[1]).ok_or_else(|| {
                debug!("VP: the two reference lines are parallel");
                VpError::NoIntersection
            })?;
            Ok(VpEstimate::new(point, FitMethod::Intersection, &lines))
        }
        _ => {
            let point = solve_normal_equations(&lines)?;
            let est = VpEstimate::new(point, FitMethod::LeastSquares, &lines);
            debug!(
                "VP: least squares over {} lines -> ({:.2}, {:.2}) rms={:.3}",
                lines.len(),
                point.x,
                point.y,
                est.rms_residual
            );
            Ok(est)
        }
    }
}

fn solve_normal_equations(lines: &[&Line]) -> Result<Point, VpError> {
    let mut s_aa = 0.0f64;
    let mut s_ab = 0.0f64;
    let mut s_bb = 0.0f64;
    let mut s_ac = 0.0f64;
    let mut s_bc = 0.0f64;
    for l in lines {
        let (a, b, c) = (l.a(), l.b(), l.c());
        s_aa += a * a;
        s_ab += a * b;
        s_bb += b * b;
        s_ac += a * c;
        s_bc += b * c;
    }
    let det = s_aa * s_bb - s_ab * s_ab;
    if det.abs() < EPS {
        debug!(
            "VP: normal matrix singular over {} lines (det={:.3e})",
            lines.len(),
            det
        );
        return Err(VpError::SingularSystem);
    }
    let x = (s_ab * s_bc - s_bb * s_ac) / det;
    let y = (s_ab * s_ac - s_aa * s_bc) / det;
    Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::through(Point::new(x1, y1), Point::new(x2, y2)).unwrap()
    }

    fn approx_point(p: Point, x: f64, y: f64) -> bool {
        (p.x - x).abs() < 1e-6 && (p.y - y).abs() < 1e-6
    }

    #[test]
    fn fewer_than_two_lines_is_insufficient() {
        assert_eq!(best_fit(&[]), None);
        let one = [line(0.0, 0.0, 10.0, 0.0)];
        assert_eq!(best_fit(&one), None);
        assert!(matches!(
            estimate(&one),
            Err(VpError::InsufficientEvidence(1))
        ));
    }

    #[test]
    fn two_axes_meet_at_origin() {
        let lines = [line(0.0, 0.0, 10.0, 0.0), line(0.0, 0.0, 0.0, 10.0)];
        let est = estimate(&lines).unwrap();
        assert_eq!(est.method, FitMethod::Intersection);
        assert!(approx_point(est.point, 0.0, 0.0));
    }

    #[test]
    fn two_parallel_lines_have_no_vp() {
        let lines = [line(0.0, 0.0, 10.0, 0.0), line(0.0, 4.0, 10.0, 4.0)];
        assert!(matches!(estimate(&lines), Err(VpError::NoIntersection)));
    }

    #[test]
    fn three_concurrent_lines_recover_common_point() {
        let lines = [
            line(0.0, 0.0, 100.0, 50.0),
            line(0.0, 100.0, 100.0, 50.0),
            line(200.0, 0.0, 100.0, 50.0),
        ];
        let est = estimate(&lines).unwrap();
        assert_eq!(est.method, FitMethod::LeastSquares);
        assert!(approx_point(est.point, 100.0, 50.0));
        assert!(est.rms_residual < 1e-6);
        assert_eq!(est.residuals.len(), 3);
    }

    #[test]
    fn all_parallel_lines_are_singular() {
        let lines = [
            line(0.0, 0.0, 10.0, 0.0),
            line(0.0, 5.0, 10.0, 5.0),
            line(0.0, 9.0, 10.0, 9.0),
        ];
        assert!(matches!(estimate(&lines), Err(VpError::SingularSystem)));
    }

    #[test]
    fn inconsistent_lines_spread_residuals() {
        // Triangle of lines: no common point, the fit sits inside.
        let lines = [
            line(0.0, 0.0, 100.0, 0.0),
            line(0.0, 0.0, 50.0, 100.0),
            line(100.0, 0.0, 50.0, 100.0),
        ];
        let est = estimate(&lines).unwrap();
        assert!(est.point.x > 0.0 && est.point.x < 100.0);
        assert!(est.point.y > 0.0 && est.point.y < 100.0);
        assert!(est.residuals.iter().all(|r| *r > 0.0));
    }
}
