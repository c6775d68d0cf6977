use serde::{Deserialize, Serialize};

use crate::address::cell_address;

/// A cell position on the active sheet (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&cell_address(self.row, self.col))
    }
}

/// In-progress, uncommitted text for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub pos: CellPos,
    pub pending: String,
}

/// Selection/edit state. Being a single enum, there is never more than one
/// edit session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Selected(CellPos),
    Editing(EditSession),
}

/// Edit produced by a successful commit, to be written by the owner of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedEdit {
    pub pos: CellPos,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no cell is being edited")]
    NoActiveEditSession,
}

/// The selection/editing state machine.
///
/// It knows nothing about cell contents: `begin_edit` takes the seed text and
/// `commit` hands the final text back to the caller.
#[derive(Debug, Clone, Default)]
pub struct EditController {
    state: EditState,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// The selected cell, including the cell being edited.
    pub fn selection(&self) -> Option<CellPos> {
        match &self.state {
            EditState::Idle => None,
            EditState::Selected(pos) => Some(*pos),
            EditState::Editing(session) => Some(session.pos),
        }
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            EditState::Editing(session) => Some(session),
            _ => None,
        }
    }

    /// Select a cell. An in-flight edit is discarded, not committed.
    pub fn select(&mut self, pos: CellPos) {
        self.state = EditState::Selected(pos);
    }

    /// Enter edit mode on `pos` with `seed` as the initial text.
    ///
    /// Editing the cell that is already being edited keeps the pending text.
    /// Any other state selects `pos` first, dropping a session on another cell.
    pub fn begin_edit(&mut self, pos: CellPos, seed: impl Into<String>) {
        if let EditState::Editing(session) = &self.state {
            if session.pos == pos {
                return;
            }
        }
        self.state = EditState::Editing(EditSession {
            pos,
            pending: seed.into(),
        });
    }

    pub fn update_text(&mut self, text: impl Into<String>) -> Result<(), EditError> {
        match &mut self.state {
            EditState::Editing(session) => {
                session.pending = text.into();
                Ok(())
            }
            _ => Err(EditError::NoActiveEditSession),
        }
    }

    /// Finish the session and return what should be written. Back to `Selected`.
    pub fn commit(&mut self) -> Result<CommittedEdit, EditError> {
        match std::mem::take(&mut self.state) {
            EditState::Editing(session) => {
                self.state = EditState::Selected(session.pos);
                Ok(CommittedEdit {
                    pos: session.pos,
                    text: session.pending,
                })
            }
            other => {
                self.state = other;
                Err(EditError::NoActiveEditSession)
            }
        }
    }

    /// Drop the pending text. Back to `Selected`.
    pub fn cancel(&mut self) -> Result<CellPos, EditError> {
        match &self.state {
            EditState::Editing(session) => {
                let pos = session.pos;
                self.state = EditState::Selected(pos);
                Ok(pos)
            }
            _ => Err(EditError::NoActiveEditSession),
        }
    }

    /// Back to `Idle`, dropping selection and any session.
    pub fn clear(&mut self) {
        self.state = EditState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col)
    }

    #[test]
    fn test_starts_idle() {
        let ctl = EditController::new();
        assert_eq!(ctl.state(), &EditState::Idle);
        assert_eq!(ctl.selection(), None);
        assert!(ctl.session().is_none());
    }

    #[test]
    fn test_select_then_edit_then_commit() {
        let mut ctl = EditController::new();
        ctl.select(pos(2, 3));
        ctl.begin_edit(pos(2, 3), "old");
        assert_eq!(ctl.session().map(|s| s.pending.as_str()), Some("old"));

        ctl.update_text("42").unwrap();
        let edit = ctl.commit().unwrap();
        assert_eq!(edit, CommittedEdit { pos: pos(2, 3), text: "42".into() });
        assert_eq!(ctl.state(), &EditState::Selected(pos(2, 3)));
    }

    #[test]
    fn test_cancel_returns_to_selected() {
        let mut ctl = EditController::new();
        ctl.select(pos(0, 0));
        ctl.begin_edit(pos(0, 0), "");
        ctl.update_text("draft").unwrap();
        assert_eq!(ctl.cancel(), Ok(pos(0, 0)));
        assert_eq!(ctl.state(), &EditState::Selected(pos(0, 0)));
    }

    #[test]
    fn test_select_discards_session() {
        let mut ctl = EditController::new();
        ctl.begin_edit(pos(0, 0), "a");
        ctl.update_text("changed").unwrap();
        ctl.select(pos(5, 5));
        assert_eq!(ctl.state(), &EditState::Selected(pos(5, 5)));
        assert_eq!(ctl.commit(), Err(EditError::NoActiveEditSession));
    }

    #[test]
    fn test_single_session_when_editing_another_cell() {
        let mut ctl = EditController::new();
        ctl.begin_edit(pos(0, 0), "first");
        ctl.begin_edit(pos(1, 1), "second");

        let session = ctl.session().unwrap();
        assert_eq!(session.pos, pos(1, 1));
        assert_eq!(session.pending, "second");
        assert_eq!(ctl.selection(), Some(pos(1, 1)));
    }

    #[test]
    fn test_begin_edit_same_cell_keeps_pending_text() {
        let mut ctl = EditController::new();
        ctl.begin_edit(pos(0, 0), "seed");
        ctl.update_text("typed").unwrap();
        ctl.begin_edit(pos(0, 0), "seed");
        assert_eq!(ctl.session().unwrap().pending, "typed");
    }

    #[test]
    fn test_operations_outside_editing_fail() {
        let mut ctl = EditController::new();
        assert_eq!(ctl.update_text("x"), Err(EditError::NoActiveEditSession));
        assert_eq!(ctl.cancel(), Err(EditError::NoActiveEditSession));

        ctl.select(pos(1, 0));
        assert_eq!(ctl.commit(), Err(EditError::NoActiveEditSession));
        // A failed commit leaves the selection alone
        assert_eq!(ctl.state(), &EditState::Selected(pos(1, 0)));
    }

    #[test]
    fn test_clear() {
        let mut ctl = EditController::new();
        ctl.begin_edit(pos(3, 3), "x");
        ctl.clear();
        assert_eq!(ctl.state(), &EditState::Idle);
    }

    #[test]
    fn test_cell_pos_display() {
        assert_eq!(pos(0, 0).to_string(), "A1");
        assert_eq!(pos(9, 26).to_string(), "AA10");
    }
}
