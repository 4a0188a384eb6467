//! Reduction of raw detector segments to ranked candidate lines.
//!
//! Pipeline
//! - Prefilter: drop segments steeper than `angle_tolerance_deg`, shorter
//!   than `min_segment_length_px`, or with coincident endpoints.
//! - Scoring: `0.4·lengthScore + 0.6·angleScore` (see [`confidence`]).
//! - Bundling: greedy first-match grouping by angle and mean Y against each
//!   group's seed; multi-member groups collapse to one horizontal
//!   representative carrying the best member confidence (see [`bundling`]).
//! - Ranking: stable sort by descending confidence.
//!
//! Selection (`min_confidence` floor, `top_n` cap) is a separate step in
//! [`select`] so callers can show the full ranked list as well.

pub mod bundling;
mod candidate;
pub mod confidence;
mod params;
mod segment;
pub mod source;

pub use bundling::{bundle_segments, ScoredSegment};
pub use candidate::{CandidateLine, CandidateStatus};
pub use confidence::{
    average_confidence, filter_by_confidence, format_confidence, rank, score_segment, select,
    top_n, ConfidenceLevel,
};
pub use params::DetectionParams;
pub use segment::RawSegment;
pub use source::{DetectionOutcome, DetectorHandle, PrecomputedSegments, SegmentSource};

use crate::angle::is_near_horizontal;
use crate::diagnostics::ReductionReport;
use crate::geometry::Line;
use log::debug;
use std::time::Instant;

/// Ranked, de-duplicated candidates for `segments`.
pub fn reduce(segments: &[RawSegment], params: &DetectionParams) -> Vec<CandidateLine> {
    reduce_with_report(segments, params).0
}

/// Same as [`reduce`], also returning per-stage counts and timings.
pub fn reduce_with_report(
    segments: &[RawSegment],
    params: &DetectionParams,
) -> (Vec<CandidateLine>, ReductionReport) {
    let t0 = Instant::now();
    let mut report = ReductionReport::new(segments.len());

    let t_filter = Instant::now();
    let mut scored: Vec<ScoredSegment> = Vec::with_capacity(segments.len());
    for seg in segments {
        if !is_near_horizontal(seg.angle_deg, params.angle_tolerance_deg) {
            report.rejected_angle += 1;
            continue;
        }
        if seg.length < params.min_segment_length_px {
            report.rejected_length += 1;
            continue;
        }
        let Ok(line) = Line::through(seg.p1, seg.p2) else {
            report.rejected_degenerate += 1;
            continue;
        };
        scored.push(ScoredSegment {
            segment: *seg,
            line,
            confidence: score_segment(seg, params),
        });
    }
    report.scored = scored.len();
    report
        .timing
        .push("prefilter", t_filter.elapsed().as_secs_f64() * 1000.0);

    let t_bundle = Instant::now();
    let mut candidates = bundle_segments(&scored, params);
    report.groups = candidates.len();
    report.merged_groups = candidates.iter().filter(|c| c.members > 1).count();
    report
        .timing
        .push("bundling", t_bundle.elapsed().as_secs_f64() * 1000.0);

    rank(&mut candidates);
    report.candidates = candidates.len();
    report.timing.total_ms = t0.elapsed().as_secs_f64() * 1000.0;

    debug!(
        "REDUCE: input={} rejected(angle={}, length={}, degenerate={}) groups={} merged={} candidates={} elapsed_ms={:.3}",
        report.input,
        report.rejected_angle,
        report.rejected_length,
        report.rejected_degenerate,
        report.groups,
        report.merged_groups,
        report.candidates,
        report.timing.total_ms
    );
    (candidates, report)
}
