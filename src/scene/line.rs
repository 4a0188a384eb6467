use crate::geometry::{Line, Point};
use serde::Serialize;
use std::fmt;

/// Stable identifier of a line within one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a reference line came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum ReferenceOrigin {
    Drawn,
    /// Accepted detector candidate; the confidence is kept for display only.
    Detected { confidence: f64 },
}

/// Role of a line in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LineKind {
    /// Ground-plane line used as vanishing-point evidence.
    Reference { origin: ReferenceOrigin },
    /// Line from the vanishing point, rebuilt whenever the VP moves. With an
    /// anchor it always passes through that point.
    VanishingLine { anchor: Option<Point> },
    /// Vertical body→ground projection. Never VP evidence.
    Plumb,
}

impl LineKind {
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Reference { .. } => "reference",
            LineKind::VanishingLine { .. } => "vanishing",
            LineKind::Plumb => "plumb",
        }
    }
}

/// A line accepted into the scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SceneLine {
    pub id: LineId,
    pub kind: LineKind,
    pub line: Line,
}

impl SceneLine {
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, LineKind::Reference { .. })
    }

    pub fn is_vanishing(&self) -> bool {
        matches!(self.kind, LineKind::VanishingLine { .. })
    }

    pub fn is_plumb(&self) -> bool {
        matches!(self.kind, LineKind::Plumb)
    }

    /// Detector confidence, for reference lines that came from a candidate.
    pub fn confidence(&self) -> Option<f64> {
        match self.kind {
            LineKind::Reference {
                origin: ReferenceOrigin::Detected { confidence },
            } => Some(confidence),
            _ => None,
        }
    }

    pub fn anchor(&self) -> Option<Point> {
        match self.kind {
            LineKind::VanishingLine { anchor } => anchor,
            _ => None,
        }
    }
}
