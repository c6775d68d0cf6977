use gridpad_core::{CellPos, EditError};

use crate::sheet::SheetId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown sheet: {0}")]
    UnknownSheet(SheetId),
    #[error("no cell is being edited")]
    NoActiveEditSession,
    #[error("edit session is on {found}, not {expected}")]
    EditTargetMismatch { expected: CellPos, found: CellPos },
}

impl From<EditError> for EngineError {
    fn from(e: EditError) -> Self {
        match e {
            EditError::NoActiveEditSession => EngineError::NoActiveEditSession,
        }
    }
}
