//! Confidence scoring and selection of candidate lines.
//!
//! `confidence = w_len · min(length / L_sat, 1) + w_ang · (1 - deviation / tol)`
//! where `deviation` is the angle to horizontal. With the default 0.4/0.6
//! split angular precision dominates length.

use super::{CandidateLine, DetectionParams, RawSegment};
use crate::angle::horizontal_deviation_deg;
use serde::Serialize;
use std::cmp::Ordering;

/// Length component in [0, 1], saturating at `length_saturation_px`.
pub fn length_score(length: f64, params: &DetectionParams) -> f64 {
    if params.length_saturation_px <= 0.0 {
        return 1.0;
    }
    (length / params.length_saturation_px).clamp(0.0, 1.0)
}

/// Angle component: 1 for perfectly horizontal, 0 at the tolerance edge.
pub fn angle_score(angle_deg: f64, params: &DetectionParams) -> f64 {
    let tol = params.angle_tolerance_deg.max(f64::EPSILON);
    (1.0 - horizontal_deviation_deg(angle_deg) / tol).clamp(0.0, 1.0)
}

/// Weighted confidence of a raw segment.
pub fn score_segment(seg: &RawSegment, params: &DetectionParams) -> f64 {
    let conf = params.length_weight * length_score(seg.length, params)
        + params.angle_weight * angle_score(seg.angle_deg, params);
    conf.clamp(0.0, 1.0)
}

/// Sorts candidates by descending confidence. Stable: equal confidences keep
/// their clustering order.
pub fn rank(candidates: &mut [CandidateLine]) {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
}

/// Keeps candidates at or above `min_confidence`, preserving order.
pub fn filter_by_confidence(
    mut candidates: Vec<CandidateLine>,
    min_confidence: f64,
) -> Vec<CandidateLine> {
    candidates.retain(|c| c.confidence >= min_confidence);
    candidates
}

/// The `n` most confident candidates. Ranking an already ranked sequence is
/// a single linear pass, so this is cheap on reducer output.
pub fn top_n(mut candidates: Vec<CandidateLine>, n: usize) -> Vec<CandidateLine> {
    rank(&mut candidates);
    candidates.truncate(n);
    candidates
}

/// Confidence floor followed by the top-N cap, as configured in `params`.
pub fn select(candidates: Vec<CandidateLine>, params: &DetectionParams) -> Vec<CandidateLine> {
    top_n(
        filter_by_confidence(candidates, params.min_confidence),
        params.top_n,
    )
}

/// Mean confidence, 0 for an empty set.
pub fn average_confidence(candidates: &[CandidateLine]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    candidates.iter().map(|c| c.confidence).sum::<f64>() / candidates.len() as f64
}

/// Rounded percentage, e.g. `"87%"`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round() as i64)
}

/// Coarse bucket shown next to a suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceLevel::High
        } else if confidence >= 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}
