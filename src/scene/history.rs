//! Undo/redo as a log of invertible edits.
//!
//! Each scene operation records the primitive edits it performed as one
//! transaction. Undo reverts a transaction's edits in reverse order, redo
//! re-applies them in order; nothing is re-serialized.

use super::{SceneLine, VpState};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Edit {
    Insert {
        index: usize,
        line: SceneLine,
    },
    Remove {
        index: usize,
        line: SceneLine,
    },
    Replace {
        index: usize,
        before: SceneLine,
        after: SceneLine,
    },
    Vp {
        before: VpState,
        after: VpState,
    },
}

impl Edit {
    pub(crate) fn apply(&self, lines: &mut Vec<SceneLine>, vp: &mut VpState) {
        match self {
            Edit::Insert { index, line } => lines.insert(*index, *line),
            Edit::Remove { index, .. } => {
                lines.remove(*index);
            }
            Edit::Replace { index, after, .. } => lines[*index] = *after,
            Edit::Vp { after, .. } => *vp = *after,
        }
    }

    pub(crate) fn revert(&self, lines: &mut Vec<SceneLine>, vp: &mut VpState) {
        match self {
            Edit::Insert { index, .. } => {
                lines.remove(*index);
            }
            Edit::Remove { index, line } => lines.insert(*index, *line),
            Edit::Replace { index, before, .. } => lines[*index] = *before,
            Edit::Vp { before, .. } => *vp = *before,
        }
    }
}

pub(crate) type Transaction = Vec<Edit>;

#[derive(Clone, Debug, Default)]
pub(crate) struct History {
    undo: Vec<Transaction>,
    redo: Vec<Transaction>,
}

impl History {
    /// Records a finished transaction. Empty transactions are dropped and do
    /// not invalidate the redo stack.
    pub(crate) fn record(&mut self, tx: Transaction) {
        if tx.is_empty() {
            return;
        }
        self.undo.push(tx);
        self.redo.clear();
    }

    pub(crate) fn undo(&mut self, lines: &mut Vec<SceneLine>, vp: &mut VpState) -> bool {
        let Some(tx) = self.undo.pop() else {
            return false;
        };
        for edit in tx.iter().rev() {
            edit.revert(lines, vp);
        }
        self.redo.push(tx);
        true
    }

    pub(crate) fn redo(&mut self, lines: &mut Vec<SceneLine>, vp: &mut VpState) -> bool {
        let Some(tx) = self.redo.pop() else {
            return false;
        };
        for edit in &tx {
            edit.apply(lines, vp);
        }
        self.undo.push(tx);
        true
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
