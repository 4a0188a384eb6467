//! Editable scene: accepted lines, the vanishing point and edit history.
//!
//! VP state machine
//! - `None → Computed`: the reference set reaches two usable lines.
//! - `Computed → Manual`: explicit override ([`Scene::set_manual_vp`],
//!   [`Scene::nudge_vp`] or a drag).
//! - `Manual → Computed`: explicit [`Scene::recalculate_vp`].
//! - Reference add/remove while not manual re-runs the estimator from the
//!   full reference set, possibly falling back to `None`.
//!
//! Whenever the VP point changes, every VP-line is rebuilt from the new VP
//! through its anchor: the stored source point if it has one, otherwise the
//! end of its visible span (clipped to the image) farther from the VP.
//!
//! Every mutation runs as one transaction of invertible edits so undo and
//! redo restore lines and VP state exactly.

mod history;
mod line;

pub use line::{LineId, LineKind, ReferenceOrigin, SceneLine};

use crate::detection::{CandidateLine, CandidateStatus};
use crate::diagnostics::{SceneLineReport, SceneReport};
use crate::error::SceneError;
use crate::geometry::{Line, Point, Rect};
use crate::vp::{self, VpEstimate};
use history::{Edit, History, Transaction};
use log::debug;
use serde::Serialize;

/// Current vanishing point and how it was obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum VpState {
    #[default]
    None,
    Computed(Point),
    Manual(Point),
}

impl VpState {
    pub fn point(&self) -> Option<Point> {
        match self {
            VpState::None => None,
            VpState::Computed(p) | VpState::Manual(p) => Some(*p),
        }
    }

    pub fn mode(&self) -> VpMode {
        match self {
            VpState::None => VpMode::None,
            VpState::Computed(_) => VpMode::Computed,
            VpState::Manual(_) => VpMode::Manual,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VpMode {
    None,
    Computed,
    Manual,
}

/// Lines created by one player projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerProjection {
    pub plumb: LineId,
    /// Offside line from the VP through the ground point, if a VP exists.
    pub vp_line: Option<LineId>,
    /// The body point projected vertically onto the ground level.
    pub ground: Point,
}

/// Mutable working state of one transaction. Every change goes through here
/// so it is logged as an invertible edit.
struct Txn<'a> {
    lines: &'a mut Vec<SceneLine>,
    vp: &'a mut VpState,
    next_id: &'a mut u64,
    image: Option<Rect>,
    edits: Transaction,
}

impl Txn<'_> {
    fn push(&mut self, edit: Edit) {
        edit.apply(self.lines, self.vp);
        self.edits.push(edit);
    }

    fn insert(&mut self, kind: LineKind, line: Line) -> LineId {
        let id = LineId(*self.next_id);
        *self.next_id += 1;
        let index = self.lines.len();
        self.push(Edit::Insert {
            index,
            line: SceneLine { id, kind, line },
        });
        id
    }

    fn remove(&mut self, index: usize) -> SceneLine {
        let line = self.lines[index];
        self.push(Edit::Remove { index, line });
        line
    }

    fn replace_geometry(&mut self, index: usize, line: Line) {
        let before = self.lines[index];
        if before.line == line {
            return;
        }
        let after = SceneLine { line, ..before };
        self.push(Edit::Replace {
            index,
            before,
            after,
        });
    }

    /// Sets the VP state, re-anchoring VP-lines if the point moved.
    fn set_vp(&mut self, state: VpState) {
        let before = *self.vp;
        if before == state {
            return;
        }
        self.push(Edit::Vp {
            before,
            after: state,
        });
        if let Some(p) = state.point() {
            if before.point() != Some(p) {
                self.reanchor_vp_lines(p);
            }
        }
    }

    /// Recomputes the VP from scratch unless it is manual.
    fn refresh_vp(&mut self) {
        if matches!(self.vp, VpState::Manual(_)) {
            return;
        }
        let references = self.lines.iter().filter(|l| l.is_reference());
        let next = match vp::estimate(references.map(|l| &l.line)) {
            Ok(est) => VpState::Computed(est.point),
            Err(err) => {
                debug!("SCENE: no vanishing point ({err})");
                VpState::None
            }
        };
        self.set_vp(next);
    }

    fn reanchor_vp_lines(&mut self, vp: Point) {
        for index in 0..self.lines.len() {
            let current = self.lines[index];
            let LineKind::VanishingLine { anchor } = current.kind else {
                continue;
            };
            let anchor = anchor.unwrap_or_else(|| far_anchor(&current.line, &vp, self.image));
            match Line::through(vp, anchor) {
                Ok(line) => self.replace_geometry(index, line),
                Err(_) => debug!(
                    "SCENE: VP-line {} anchor coincides with the VP, keeping previous geometry",
                    current.id
                ),
            }
        }
    }

    fn rollback(self) {
        for edit in self.edits.iter().rev() {
            edit.revert(self.lines, self.vp);
        }
    }
}

/// End of the line's visible span farther from `vp`; `p2` if the line does
/// not cross the image or no image size is known.
fn far_anchor(line: &Line, vp: &Point, image: Option<Rect>) -> Point {
    match image.and_then(|rect| line.clip_to_rect(&rect)) {
        Some((s0, s1)) => {
            if s0.distance_sq(vp) > s1.distance_sq(vp) {
                s0
            } else {
                s1
            }
        }
        None => line.p2(),
    }
}

/// Lines, vanishing point and history of one editing session.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    lines: Vec<SceneLine>,
    vp: VpState,
    image: Option<Rect>,
    history: History,
    next_id: u64,
    drag: Option<Transaction>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_size(width: f64, height: f64) -> Self {
        Self {
            image: Some(Rect::from_size(width, height)),
            ..Self::default()
        }
    }

    /// Sets the image bounds used to re-anchor VP-lines without a source
    /// point. Not an undoable edit.
    pub fn set_image_size(&mut self, width: f64, height: f64) {
        self.image = Some(Rect::from_size(width, height));
    }

    pub fn image_rect(&self) -> Option<Rect> {
        self.image
    }

    // --- Queries -----------------------------------------------------------

    /// All lines in insertion order.
    pub fn lines(&self) -> &[SceneLine] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&SceneLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn reference_lines(&self) -> impl Iterator<Item = &SceneLine> {
        self.lines.iter().filter(|l| l.is_reference())
    }

    pub fn vp_lines(&self) -> impl Iterator<Item = &SceneLine> {
        self.lines.iter().filter(|l| l.is_vanishing())
    }

    pub fn plumb_lines(&self) -> impl Iterator<Item = &SceneLine> {
        self.lines.iter().filter(|l| l.is_plumb())
    }

    pub fn vp_state(&self) -> VpState {
        self.vp
    }

    pub fn vanishing_point(&self) -> Option<Point> {
        self.vp.point()
    }

    pub fn is_vp_manual(&self) -> bool {
        matches!(self.vp, VpState::Manual(_))
    }

    /// Least-squares estimate over the current reference lines, regardless
    /// of whether the VP is manual.
    pub fn estimate(&self) -> Option<VpEstimate> {
        vp::estimate(self.reference_lines().map(|l| &l.line)).ok()
    }

    /// Whether the VP falls inside the image. `None` without a VP or image.
    pub fn vp_inside_image(&self) -> Option<bool> {
        let vp = self.vanishing_point()?;
        Some(self.image?.contains(&vp))
    }

    /// First line (in insertion order) within `tolerance` pixels of `p`.
    pub fn line_at(&self, p: Point, tolerance: f64) -> Option<LineId> {
        self.lines
            .iter()
            .find(|l| l.line.distance(&p) < tolerance)
            .map(|l| l.id)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.drag.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Edits -------------------------------------------------------------

    fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut Txn<'_>) -> Result<T, SceneError>,
    ) -> Result<T, SceneError> {
        self.end_vp_drag();
        let mut txn = Txn {
            lines: &mut self.lines,
            vp: &mut self.vp,
            next_id: &mut self.next_id,
            image: self.image,
            edits: Vec::new(),
        };
        match f(&mut txn) {
            Ok(value) => {
                let edits = txn.edits;
                self.history.record(edits);
                Ok(value)
            }
            Err(err) => {
                txn.rollback();
                Err(err)
            }
        }
    }

    /// Hand-drawn reference line through two points.
    pub fn add_reference_line(&mut self, p1: Point, p2: Point) -> Result<LineId, SceneError> {
        let line = Line::through(p1, p2)?;
        self.transact(|txn| {
            let id = txn.insert(
                LineKind::Reference {
                    origin: ReferenceOrigin::Drawn,
                },
                line,
            );
            txn.refresh_vp();
            Ok(id)
        })
    }

    /// Promotes pending candidates to reference lines in one undoable step and
    /// marks them accepted. Already accepted candidates are skipped, so a
    /// suggestion list can be offered again without duplicating lines. Undo
    /// removes the lines but leaves the caller's candidate statuses alone.
    pub fn accept_candidates(&mut self, candidates: &mut [CandidateLine]) -> Vec<LineId> {
        let mut pending: Vec<&mut CandidateLine> =
            candidates.iter_mut().filter(|c| c.is_pending()).collect();
        if pending.is_empty() {
            return Vec::new();
        }
        let result = self.transact(|txn| {
            let ids: Vec<LineId> = pending
                .iter()
                .map(|c| {
                    txn.insert(
                        LineKind::Reference {
                            origin: ReferenceOrigin::Detected {
                                confidence: c.confidence,
                            },
                        },
                        c.line,
                    )
                })
                .collect();
            txn.refresh_vp();
            Ok(ids)
        });
        let ids = result.unwrap_or_default();
        for cand in pending.iter_mut().take(ids.len()) {
            cand.status = CandidateStatus::Accepted;
        }
        debug!("SCENE: accepted {} candidates, vp={:?}", ids.len(), self.vp);
        ids
    }

    /// VP-line from the current VP through `through`.
    pub fn add_vp_line(&mut self, through: Point) -> Result<LineId, SceneError> {
        let vp = self.vanishing_point().ok_or(SceneError::NoVanishingPoint)?;
        let line = Line::through(vp, through)?;
        self.transact(|txn| {
            Ok(txn.insert(
                LineKind::VanishingLine {
                    anchor: Some(through),
                },
                line,
            ))
        })
    }

    /// VP-line without a stored source point; on VP changes it is re-anchored
    /// at the far end of its visible span.
    pub fn add_unanchored_vp_line(&mut self, line: Line) -> Result<LineId, SceneError> {
        self.transact(|txn| Ok(txn.insert(LineKind::VanishingLine { anchor: None }, line)))
    }

    /// Projects `body` vertically to the ground level of `foot` and, if a VP
    /// exists, draws the offside line from the VP through the ground point.
    pub fn add_player_projection(
        &mut self,
        body: Point,
        foot: Point,
    ) -> Result<PlayerProjection, SceneError> {
        let ground = Point::new(body.x, foot.y);
        let plumb_line = Line::through(body, ground)?;
        let vp_line = self
            .vanishing_point()
            .and_then(|vp| Line::through(vp, ground).ok());
        self.transact(|txn| {
            let plumb = txn.insert(LineKind::Plumb, plumb_line);
            let vp_line = vp_line.map(|line| {
                txn.insert(
                    LineKind::VanishingLine {
                        anchor: Some(ground),
                    },
                    line,
                )
            });
            Ok(PlayerProjection {
                plumb,
                vp_line,
                ground,
            })
        })
    }

    /// Removes a line; removing a reference line refreshes the VP.
    pub fn remove_line(&mut self, id: LineId) -> Result<SceneLine, SceneError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or(SceneError::UnknownLine(id))?;
        self.transact(|txn| {
            let removed = txn.remove(index);
            if removed.is_reference() {
                txn.refresh_vp();
            }
            Ok(removed)
        })
    }

    /// Overrides the VP. It stays put through reference edits until
    /// [`Scene::recalculate_vp`].
    pub fn set_manual_vp(&mut self, p: Point) {
        let _ = self.transact(|txn| {
            txn.set_vp(VpState::Manual(p));
            Ok(())
        });
    }

    /// Moves the VP by `(dx, dy)`, switching it to manual.
    pub fn nudge_vp(&mut self, dx: f64, dy: f64) -> Result<Point, SceneError> {
        let vp = self.vanishing_point().ok_or(SceneError::NoVanishingPoint)?;
        let p = vp.offset(dx, dy);
        self.set_manual_vp(p);
        Ok(p)
    }

    /// Moves the VP as part of an ongoing drag. All moves until
    /// [`Scene::end_vp_drag`] (or the next edit) undo as one step.
    pub fn drag_vp_to(&mut self, p: Point) {
        let mut txn = Txn {
            lines: &mut self.lines,
            vp: &mut self.vp,
            next_id: &mut self.next_id,
            image: self.image,
            edits: self.drag.take().unwrap_or_default(),
        };
        txn.set_vp(VpState::Manual(p));
        self.drag = Some(txn.edits);
    }

    pub fn end_vp_drag(&mut self) {
        if let Some(edits) = self.drag.take() {
            self.history.record(edits);
        }
    }

    /// Clears a manual override and recomputes the VP from the references.
    pub fn recalculate_vp(&mut self) -> Option<Point> {
        let _ = self.transact(|txn| {
            if let VpState::Manual(p) = *txn.vp {
                // Drop the override but keep the point until the estimate
                // replaces it, so VP-lines only move if the VP does.
                txn.set_vp(VpState::Computed(p));
            }
            txn.refresh_vp();
            Ok(())
        });
        self.vanishing_point()
    }

    pub fn undo(&mut self) -> Result<(), SceneError> {
        self.end_vp_drag();
        if self.history.undo(&mut self.lines, &mut self.vp) {
            Ok(())
        } else {
            Err(SceneError::NothingToUndo)
        }
    }

    pub fn redo(&mut self) -> Result<(), SceneError> {
        self.end_vp_drag();
        if self.history.redo(&mut self.lines, &mut self.vp) {
            Ok(())
        } else {
            Err(SceneError::NothingToRedo)
        }
    }

    /// Starts over for a new image. With `keep_lines` the lines, VP and
    /// history carry over unchanged.
    pub fn reset(&mut self, keep_lines: bool) {
        self.end_vp_drag();
        if keep_lines {
            return;
        }
        self.lines.clear();
        self.vp = VpState::None;
        self.history.clear();
    }

    // --- Reporting ---------------------------------------------------------

    pub fn report(&self) -> SceneReport {
        SceneReport {
            vanishing_point: self.vanishing_point(),
            vp_mode: self.vp.mode(),
            vp_inside_image: self.vp_inside_image(),
            estimate: self.estimate(),
            reference_count: self.reference_lines().count(),
            vp_line_count: self.vp_lines().count(),
            lines: self
                .lines
                .iter()
                .map(|l| SceneLineReport {
                    id: l.id,
                    kind: l.kind.label(),
                    line: l.line,
                    confidence: l.confidence(),
                    anchor: l.anchor(),
                })
                .collect(),
        }
    }
}
