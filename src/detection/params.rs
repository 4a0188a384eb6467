//! Parameters for candidate-line reduction.
//!
//! Defaults reproduce the pitch-line heuristics: near-horizontal segments of
//! at least 80 px, scored 40/60 on length and angular precision, clustered
//! within 5° and 30 px, and trimmed to the six best above 0.5 confidence.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Minimum accepted segment length in pixels.
    pub min_segment_length_px: f64,
    /// Maximum gap bridged by the upstream detector when joining collinear
    /// runs. Not used by the reducer; forwarded to the segment source.
    pub max_merge_gap_px: f64,
    /// Largest deviation from horizontal (degrees) still considered a
    /// pitch line.
    pub angle_tolerance_deg: f64,
    /// Segments closer than this to a group seed's angle may join it.
    pub cluster_angle_deg: f64,
    /// Segments whose mean endpoint Y is within this many pixels of the
    /// seed's may join it.
    pub cluster_vertical_px: f64,
    /// Weight of the length score in the confidence.
    pub length_weight: f64,
    /// Weight of the angle score in the confidence.
    pub angle_weight: f64,
    /// Length at which the length score saturates.
    pub length_saturation_px: f64,
    /// Candidates below this confidence are not offered for acceptance.
    pub min_confidence: f64,
    /// Maximum number of candidates offered for acceptance.
    pub top_n: usize,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            min_segment_length_px: 80.0,
            max_merge_gap_px: 15.0,
            angle_tolerance_deg: 20.0,
            cluster_angle_deg: 5.0,
            cluster_vertical_px: 30.0,
            length_weight: 0.4,
            angle_weight: 0.6,
            length_saturation_px: 400.0,
            min_confidence: 0.5,
            top_n: 6,
        }
    }
}
