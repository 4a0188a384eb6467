//! Boundary to the external segment detector.
//!
//! The detector (edge detection plus probabilistic Hough) lives outside this
//! crate. It is reached through an explicitly owned [`DetectorHandle`] whose
//! backend is initialized lazily, at most once, behind a `OnceCell` gate.
//! `run` takes `&mut self`, so one handle can never have two detections in
//! flight; discarding stale results is the caller's job.

use super::{reduce_with_report, select, CandidateLine, DetectionParams, RawSegment};
use crate::diagnostics::ReductionReport;
use crate::error::DetectionError;
use log::debug;
use std::cell::OnceCell;

/// Supplier of raw segments for the current image.
pub trait SegmentSource {
    /// One-time backend setup. Called by [`DetectorHandle`] before the first
    /// detection and again only if a previous attempt failed.
    fn initialize(&mut self) -> Result<(), DetectionError> {
        Ok(())
    }

    /// Produces near-horizontal raw segments. `params` carries the length,
    /// gap and angle knobs the detector is expected to honour.
    fn detect(&mut self, params: &DetectionParams) -> Result<Vec<RawSegment>, DetectionError>;
}

/// Source that replays a fixed list of segments, e.g. loaded from disk.
#[derive(Clone, Debug, Default)]
pub struct PrecomputedSegments {
    segments: Vec<RawSegment>,
}

impl PrecomputedSegments {
    pub fn new(segments: Vec<RawSegment>) -> Self {
        Self { segments }
    }
}

impl SegmentSource for PrecomputedSegments {
    fn detect(&mut self, _params: &DetectionParams) -> Result<Vec<RawSegment>, DetectionError> {
        Ok(self.segments.clone())
    }
}

/// Result of one detection run.
#[derive(Clone, Debug)]
pub struct DetectionOutcome {
    /// Every reduced candidate, ranked.
    pub candidates: Vec<CandidateLine>,
    /// Candidates passing the confidence floor, capped at `top_n`.
    pub suggestions: Vec<CandidateLine>,
    pub report: ReductionReport,
}

/// Owned handle around a segment source.
pub struct DetectorHandle<S> {
    source: S,
    params: DetectionParams,
    ready: OnceCell<()>,
}

impl<S: SegmentSource> DetectorHandle<S> {
    pub fn new(source: S, params: DetectionParams) -> Self {
        Self {
            source,
            params,
            ready: OnceCell::new(),
        }
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    pub fn set_params(&mut self, params: DetectionParams) {
        self.params = params;
    }

    pub fn is_initialized(&self) -> bool {
        self.ready.get().is_some()
    }

    /// Initializes the backend once. A failed attempt leaves the gate closed
    /// so the next call retries.
    pub fn initialize(&mut self) -> Result<(), DetectionError> {
        if self.is_initialized() {
            return Ok(());
        }
        self.source.initialize()?;
        let _ = self.ready.set(());
        debug!("DETECT: segment source initialized");
        Ok(())
    }

    /// Fetches segments and reduces them to ranked candidates. Detector
    /// failure is reported as a single error with no partial results.
    pub fn run(&mut self) -> Result<DetectionOutcome, DetectionError> {
        self.initialize()?;
        let raw = self.source.detect(&self.params)?;
        let (candidates, report) = reduce_with_report(&raw, &self.params);
        let suggestions = select(candidates.clone(), &self.params);
        debug!(
            "DETECT: raw={} candidates={} suggestions={}",
            raw.len(),
            candidates.len(),
            suggestions.len()
        );
        Ok(DetectionOutcome {
            candidates,
            suggestions,
            report,
        })
    }

    pub fn into_source(self) -> S {
        self.source
    }
}
