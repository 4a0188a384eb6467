#![doc = include_str!("../README.md")]

// Public modules (stable surface)
pub mod detection;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod scene;
pub mod vp;

// Support modules used by the tools.
pub mod angle;
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Geometry primitives.
pub use crate::geometry::{Line, Point, Rect};

// Detection reducer and its entry points.
pub use crate::detection::{
    reduce, reduce_with_report, CandidateLine, DetectionParams, DetectorHandle, RawSegment,
    SegmentSource,
};

// Scene model.
pub use crate::scene::{LineId, Scene, VpMode, VpState};

// Errors.
pub use crate::error::{DetectionError, GeometryError, SceneError, VpError};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use offside_vp::prelude::*;
///
/// let mut scene = Scene::with_image_size(1280.0, 720.0);
/// scene.add_reference_line(Point::new(0.0, 700.0), Point::new(640.0, -100.0)).unwrap();
/// scene.add_reference_line(Point::new(1280.0, 700.0), Point::new(640.0, -100.0)).unwrap();
/// let vp = scene.vanishing_point().unwrap();
/// assert!((vp.x - 640.0).abs() < 1e-6);
/// ```
pub mod prelude {
    pub use crate::detection::{reduce, CandidateLine, DetectionParams, RawSegment};
    pub use crate::geometry::{Line, Point, Rect};
    pub use crate::scene::Scene;
}
