pub mod address;
pub mod selection;

pub use address::{cell_address, col_index, col_label, parse_cell_address};
pub use selection::{CellPos, CommittedEdit, EditController, EditError, EditSession, EditState};
