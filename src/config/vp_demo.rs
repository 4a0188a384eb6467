use crate::detection::{DetectionParams, RawSegment};
use crate::geometry::Point;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Endpoints as `[[x1, y1], [x2, y2]]`.
pub type EndpointPair = [[f64; 2]; 2];

#[derive(Debug, Deserialize)]
pub struct VpDemoConfig {
    /// Image whose dimensions bound the scene. Overridden by `image_size`.
    #[serde(default)]
    pub input_image: Option<PathBuf>,
    /// `[width, height]` in pixels.
    #[serde(default)]
    pub image_size: Option<[f64; 2]>,
    /// Raw detector output fed to the reducer.
    #[serde(default)]
    pub segments: Vec<EndpointPair>,
    /// Hand-drawn reference lines added before detection.
    #[serde(default)]
    pub reference_lines: Vec<EndpointPair>,
    #[serde(default)]
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub detection: DetectionParams,
    pub output: VpDemoOutputConfig,
}

/// One player marked by a body point and a foot (ground level) point.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PlayerConfig {
    pub body: [f64; 2],
    pub foot: [f64; 2],
}

#[derive(Debug, Deserialize)]
pub struct VpDemoOutputConfig {
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
}

impl VpDemoConfig {
    pub fn raw_segments(&self) -> Vec<RawSegment> {
        self.segments
            .iter()
            .map(|[p1, p2]| RawSegment::from_endpoints(Point::from(*p1), Point::from(*p2)))
            .collect()
    }

    pub fn reference_endpoints(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.reference_lines
            .iter()
            .map(|[p1, p2]| (Point::from(*p1), Point::from(*p2)))
    }
}

pub fn load_config(path: &Path) -> Result<VpDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<VpDemoConfig, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"{ "output": { "report_json": "out/report.json" } }"#).unwrap();
        assert!(cfg.segments.is_empty());
        assert!(cfg.input_image.is_none());
        assert_eq!(cfg.detection, DetectionParams::default());
        assert_eq!(cfg.output.report_json, PathBuf::from("out/report.json"));
    }

    #[test]
    fn parses_segments_and_partial_params() {
        let cfg = parse_config(
            r#"{
                "image_size": [1280, 720],
                "segments": [[[0, 500], [400, 480]]],
                "reference_lines": [[[10, 700], [600, 300]]],
                "players": [{ "body": [300, 200], "foot": [310, 420] }],
                "detection": { "top_n": 3 },
                "output": { "report_json": "r.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.image_size, Some([1280.0, 720.0]));
        assert_eq!(cfg.detection.top_n, 3);
        assert_eq!(cfg.detection.min_confidence, 0.5);
        let segs = cfg.raw_segments();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].p2, Point::new(400.0, 480.0));
        assert_eq!(cfg.reference_endpoints().count(), 1);
        assert_eq!(cfg.players[0].foot, [310.0, 420.0]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/vp.json")).unwrap_err();
        assert!(err.contains("/nonexistent/vp.json"));
    }
}
