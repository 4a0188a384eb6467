//! Greedy grouping of near-duplicate segments into single candidates.
//!
//! Segments are visited in input order. Each unconsumed segment seeds a group
//! and pulls in every later unconsumed segment within `cluster_angle_deg` of
//! the seed's angle and `cluster_vertical_px` of the seed's mean Y. Angles
//! are compared as reported, so a segment and its reversed copy (178° vs
//! -178°) stay apart. This is first-match, consume-once and order dependent;
//! input order is the tie-break.

use super::{CandidateLine, CandidateStatus, DetectionParams, RawSegment};
use crate::geometry::{Line, Point};
use log::debug;

/// Raw segment that passed the prefilter, with its line and confidence.
#[derive(Clone, Copy, Debug)]
pub struct ScoredSegment {
    pub segment: RawSegment,
    pub line: Line,
    pub confidence: f64,
}

impl ScoredSegment {
    fn into_candidate(self) -> CandidateLine {
        CandidateLine {
            line: self.line,
            confidence: self.confidence,
            length: self.segment.length,
            angle_deg: self.segment.angle_deg,
            status: CandidateStatus::Pending,
            members: 1,
        }
    }
}

/// Groups segment indices; every index lands in exactly one group and groups
/// appear in the order of their seeds.
pub fn cluster_segments(segs: &[ScoredSegment], params: &DetectionParams) -> Vec<Vec<usize>> {
    let mut used = vec![false; segs.len()];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for i in 0..segs.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let seed = &segs[i].segment;
        let mut group = vec![i];
        for j in (i + 1)..segs.len() {
            if used[j] {
                continue;
            }
            let other = &segs[j].segment;
            let angle_diff = (seed.angle_deg - other.angle_deg).abs();
            let y_diff = (seed.mean_y() - other.mean_y()).abs();
            if angle_diff < params.cluster_angle_deg && y_diff < params.cluster_vertical_px {
                group.push(j);
                used[j] = true;
            }
        }
        groups.push(group);
    }
    groups
}

/// Collapses a group into one candidate. Singletons pass through unchanged;
/// larger groups become the horizontal span `(minX, meanY)–(maxX, meanY)`
/// carrying the best member confidence.
pub fn merge_group(segs: &[ScoredSegment], group: &[usize]) -> Option<CandidateLine> {
    match group {
        [] => None,
        [only] => Some(segs[*only].into_candidate()),
        _ => {
            let mut min_x = f64::INFINITY;
            let mut max_x = f64::NEG_INFINITY;
            let mut sum_y = 0.0f64;
            let mut best = group[0];
            for &idx in group {
                let s = &segs[idx];
                min_x = min_x.min(s.segment.p1.x).min(s.segment.p2.x);
                max_x = max_x.max(s.segment.p1.x).max(s.segment.p2.x);
                sum_y += s.segment.p1.y + s.segment.p2.y;
                if s.confidence > segs[best].confidence {
                    best = idx;
                }
            }
            let mean_y = sum_y / (2 * group.len()) as f64;
            let p1 = Point::new(min_x, mean_y);
            let p2 = Point::new(max_x, mean_y);
            let confidence = segs[best].confidence;
            match Line::through(p1, p2) {
                Ok(line) => Some(CandidateLine {
                    line,
                    confidence,
                    length: line.length(),
                    angle_deg: line.angle_deg(),
                    status: CandidateStatus::Pending,
                    members: group.len(),
                }),
                Err(_) => {
                    debug!(
                        "BUNDLE: merged span of {} segments is degenerate at x={:.1}, keeping best member",
                        group.len(),
                        min_x
                    );
                    let mut cand = segs[best].into_candidate();
                    cand.members = group.len();
                    Some(cand)
                }
            }
        }
    }
}

/// Clusters and merges in one pass, returning candidates in seed order.
pub fn bundle_segments(segs: &[ScoredSegment], params: &DetectionParams) -> Vec<CandidateLine> {
    cluster_segments(segs, params)
        .iter()
        .filter_map(|group| merge_group(segs, group))
        .collect()
}
