pub mod cell;
pub mod error;
pub mod events;
pub mod grid;
pub mod import;
pub mod sheet;
pub mod workbook;

pub use cell::{Cell, Scalar};
pub use error::EngineError;
pub use grid::SheetGrid;
pub use import::{ParsedFile, ParsedTable};
pub use sheet::{Sheet, SheetId};
pub use workbook::Workbook;
