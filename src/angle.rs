//! Angle utilities shared by the reducer and the scene model.
//!
//! Segment angles are carried in degrees in the `atan2` range (-180, 180],
//! matching what the upstream detector reports.

/// Direction of the segment `p0 → p1` in degrees, `atan2` range.
#[inline]
pub fn segment_angle_deg(p0: [f64; 2], p1: [f64; 2]) -> f64 {
    (p1[1] - p0[1]).atan2(p1[0] - p0[0]).to_degrees()
}

/// Deviation from horizontal in degrees, in [0, 90]. Directions 0° and 180°
/// are both perfectly horizontal.
#[inline]
pub fn horizontal_deviation_deg(angle_deg: f64) -> f64 {
    let abs = angle_deg.abs();
    abs.min(180.0 - abs).max(0.0)
}

/// Returns true if a direction lies within `tolerance_deg` of horizontal.
#[inline]
pub fn is_near_horizontal(angle_deg: f64, tolerance_deg: f64) -> bool {
    let abs = angle_deg.abs();
    abs <= tolerance_deg || abs >= 180.0 - tolerance_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn segment_angle_follows_atan2() {
        assert!(approx_eq(segment_angle_deg([0.0, 0.0], [10.0, 0.0]), 0.0));
        assert!(approx_eq(segment_angle_deg([10.0, 0.0], [0.0, 0.0]), 180.0));
        assert!(approx_eq(segment_angle_deg([0.0, 0.0], [0.0, 5.0]), 90.0));
        assert!(approx_eq(segment_angle_deg([0.0, 0.0], [5.0, -5.0]), -45.0));
    }

    #[test]
    fn horizontal_deviation_folds_reversed_segments() {
        assert!(approx_eq(horizontal_deviation_deg(0.0), 0.0));
        assert!(approx_eq(horizontal_deviation_deg(180.0), 0.0));
        assert!(approx_eq(horizontal_deviation_deg(-175.0), 5.0));
        assert!(approx_eq(horizontal_deviation_deg(12.5), 12.5));
        assert!(approx_eq(horizontal_deviation_deg(90.0), 90.0));
    }

    #[test]
    fn near_horizontal_is_inclusive_at_tolerance() {
        assert!(is_near_horizontal(20.0, 20.0));
        assert!(is_near_horizontal(-160.0, 20.0));
        assert!(!is_near_horizontal(20.5, 20.0));
        assert!(!is_near_horizontal(-90.0, 20.0));
    }
}
