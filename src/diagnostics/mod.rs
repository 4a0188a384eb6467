//! Serializable reports for tools and UI collaborators.
//!
//! - [`ReductionReport`]: how many raw segments each reducer stage kept or
//!   rejected, with timings.
//! - [`SceneReport`]: the current scene as plain data (VP, mode, line sets).

mod timing;

pub use timing::{StageTiming, TimingBreakdown};

use crate::detection::CandidateLine;
use crate::geometry::{Line, Point};
use crate::scene::{LineId, VpMode};
use crate::vp::VpEstimate;
use serde::Serialize;

/// Per-stage counts of one reducer run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReductionReport {
    pub input: usize,
    pub rejected_angle: usize,
    pub rejected_length: usize,
    pub rejected_degenerate: usize,
    pub scored: usize,
    pub groups: usize,
    /// Groups with more than one member.
    pub merged_groups: usize,
    pub candidates: usize,
    pub timing: TimingBreakdown,
}

impl ReductionReport {
    pub fn new(input: usize) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLineReport {
    pub id: LineId,
    pub kind: &'static str,
    pub line: Line,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Point>,
}

/// Snapshot of a scene for display or export.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneReport {
    pub vanishing_point: Option<Point>,
    pub vp_mode: VpMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vp_inside_image: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<VpEstimate>,
    pub reference_count: usize,
    pub vp_line_count: usize,
    pub lines: Vec<SceneLineReport>,
}

/// Output of the demo tool: detection plus the resulting scene.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub reduction: ReductionReport,
    pub suggestions: Vec<CandidateLine>,
    pub average_confidence: f64,
    pub scene: SceneReport,
}
