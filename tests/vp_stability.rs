mod common;

use common::synthetic_segments::Jitter;
use offside_vp::geometry::{make_line, Line, Point};
use offside_vp::vp::{best_fit, estimate, FitMethod};

const TRUE_VP: Point = Point::new(100.0, 50.0);
const HALF_SPAN: f64 = 300.0;

/// Endpoints of three lines crossing at `TRUE_VP`, at 0°, 60° and 120°.
fn concurrent_endpoints() -> Vec<(Point, Point)> {
    [0.0f64, 60.0, 120.0]
        .iter()
        .map(|deg| {
            let (s, c) = deg.to_radians().sin_cos();
            (
                TRUE_VP.offset(-HALF_SPAN * c, -HALF_SPAN * s),
                TRUE_VP.offset(HALF_SPAN * c, HALF_SPAN * s),
            )
        })
        .collect()
}

fn exact_lines() -> Vec<Line> {
    concurrent_endpoints()
        .into_iter()
        .map(|(p1, p2)| make_line(p1, p2).unwrap())
        .collect()
}

/// The exact lines plus one perturbed copy of each.
fn with_perturbed_copies(jitter: &mut Jitter, sigma: f64) -> Vec<Line> {
    let mut lines = exact_lines();
    for (p1, p2) in concurrent_endpoints() {
        let q1 = jitter.perturb(p1, sigma);
        let q2 = jitter.perturb(p2, sigma);
        lines.push(make_line(q1, q2).unwrap());
    }
    lines
}

fn mean_shift(seed: u64, sigma: f64, trials: usize) -> (f64, f64) {
    let mut jitter = Jitter::new(seed);
    let mut sum = 0.0;
    let mut max = 0.0f64;
    for _ in 0..trials {
        let vp = best_fit(&with_perturbed_copies(&mut jitter, sigma)).expect("well conditioned");
        let shift = vp.distance(&TRUE_VP);
        sum += shift;
        max = max.max(shift);
    }
    (sum / trials as f64, max)
}

#[test]
fn exact_concurrent_lines_recover_vp() {
    let est = estimate(&exact_lines()).unwrap();
    assert_eq!(est.method, FitMethod::LeastSquares);
    assert!(est.point.distance(&TRUE_VP) < 1e-6);
    assert!(est.residuals.iter().all(|r| *r < 1e-6));
}

#[test]
fn perturbation_shift_is_bounded_by_noise_level() {
    for &sigma in &[0.1, 0.5, 1.0, 2.0] {
        let (_, max) = mean_shift(42, sigma, 200);
        assert!(
            max < 10.0 * sigma,
            "sigma={sigma}: max shift {max:.4} exceeds bound"
        );
    }
}

#[test]
fn perturbation_shift_grows_with_noise_level() {
    let (small, _) = mean_shift(7, 0.2, 300);
    let (large, _) = mean_shift(7, 2.0, 300);
    assert!(small > 0.0);
    assert!(
        large > 3.0 * small,
        "mean shift should scale with sigma: {small:.4} vs {large:.4}"
    );
}

#[test]
fn vanishing_perturbation_leaves_vp_in_place() {
    let (_, max) = mean_shift(3, 1e-7, 20);
    assert!(max < 1e-5);
}
