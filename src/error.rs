//! Error taxonomy.
//!
//! None of these are fatal: every failure leaves the caller in a well-defined
//! state (no line added, no VP yet) and the editing session continues.

use crate::scene::LineId;
use thiserror::Error;

/// Failures of the primitive line operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// The two defining points coincide (within 1e-9).
    #[error("degenerate line: defining points coincide")]
    DegenerateLine,
    /// The lines are parallel or too close to parallel to intersect reliably.
    #[error("lines are parallel within numerical tolerance")]
    NoIntersection,
}

/// Failures of vanishing-point estimation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VpError {
    /// Fewer than two reference lines.
    #[error("need at least 2 reference lines, got {0}")]
    InsufficientEvidence(usize),
    /// Exactly two lines were given and they are parallel.
    #[error("the two reference lines do not intersect")]
    NoIntersection,
    /// The least-squares normal equations are singular.
    #[error("normal equations are singular (all lines parallel)")]
    SingularSystem,
}

/// Failures of scene edits.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The points given for a new line coincide; nothing was added.
    #[error("degenerate line: defining points coincide")]
    DegenerateLine,
    /// The operation needs a vanishing point and none is set.
    #[error("no vanishing point available")]
    NoVanishingPoint,
    /// No line in the scene carries this id.
    #[error("no line with id {0}")]
    UnknownLine(LineId),
    /// The undo stack is empty.
    #[error("nothing to undo")]
    NothingToUndo,
    /// The redo stack is empty, or a new edit cleared it.
    #[error("nothing to redo")]
    NothingToRedo,
}

impl From<GeometryError> for SceneError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::DegenerateLine => SceneError::DegenerateLine,
            GeometryError::NoIntersection => SceneError::NoVanishingPoint,
        }
    }
}

/// Failure of the external segment detector. Reported once, with no partial
/// results.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// The detector backend could not be initialized.
    #[error("detector unavailable: {0}")]
    Unavailable(String),
    /// The detector ran but failed.
    #[error("detection failed: {0}")]
    Failed(String),
}
