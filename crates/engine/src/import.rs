//! Turning parsed files into sheets.
//!
//! Parsers (see `gridpad-io`) produce [`ParsedFile`]s; this module converts
//! their tables into named grids. Appending them is the workbook's job.

use serde::{Deserialize, Serialize};

use crate::cell::Scalar;
use crate::grid::SheetGrid;

/// One named table of raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTable {
    pub name: String,
    pub rows: Vec<Vec<Scalar>>,
}

impl ParsedTable {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Scalar>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// Output of a file parser: the uploaded file's name and its tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedFile {
    pub source_name: String,
    pub tables: Vec<ParsedTable>,
}

impl ParsedFile {
    pub fn new(source_name: impl Into<String>, tables: Vec<ParsedTable>) -> Self {
        Self {
            source_name: source_name.into(),
            tables,
        }
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

/// A sheet-to-be: derived name plus grid.
#[derive(Debug, Clone)]
pub struct ImportedSheet {
    pub name: String,
    pub grid: SheetGrid,
}

/// Sheet name for a table: `{source}-{table}`.
pub fn imported_sheet_name(source_name: &str, table_name: &str) -> String {
    format!("{}-{}", source_name, table_name)
}

/// Convert every table of every file, in file-then-table order.
///
/// Each scalar becomes a `{ value }` cell; no formula, no style.
pub fn merge_files(files: Vec<ParsedFile>) -> Vec<ImportedSheet> {
    files
        .into_iter()
        .flat_map(|file| {
            let source_name = file.source_name;
            file.tables.into_iter().map(move |table| ImportedSheet {
                name: imported_sheet_name(&source_name, &table.name),
                grid: SheetGrid::from_scalars(table.rows),
            })
        })
        .collect()
}
