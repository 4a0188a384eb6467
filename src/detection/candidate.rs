use crate::geometry::Line;
use serde::Serialize;

/// Whether a candidate is still awaiting a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Pending,
    Accepted,
}

/// Confidence-scored line suggestion produced by the reducer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateLine {
    pub line: Line,
    /// Heuristic score in [0, 1].
    pub confidence: f64,
    /// Length in pixels of the (possibly merged) representative.
    pub length: f64,
    /// Direction of the representative in degrees, `atan2` range.
    pub angle_deg: f64,
    pub status: CandidateStatus,
    /// Number of raw segments folded into this candidate.
    pub members: usize,
}

impl CandidateLine {
    pub fn is_pending(&self) -> bool {
        self.status == CandidateStatus::Pending
    }
}
