//! A sheet's cell matrix.
//!
//! `SheetGrid` is an immutable value: `write` returns a new grid that shares
//! every untouched row with the original (`Arc` identity). Presentation
//! layers detect changes with [`SheetGrid::same_as`] instead of comparing
//! contents.

use std::sync::Arc;

use crate::cell::{Cell, Scalar, EMPTY_CELL};

/// Rows a read view always exposes, regardless of stored extent.
pub const MIN_ROWS: usize = 50;
/// Columns a read view always exposes, regardless of stored extent.
pub const MIN_COLS: usize = 26;

pub type Row = Arc<Vec<Cell>>;

#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    rows: Arc<Vec<Row>>,
}

impl SheetGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self {
            rows: Arc::new(rows.into_iter().map(Arc::new).collect()),
        }
    }

    /// Build a grid from raw values, one `{ value }` cell per scalar.
    pub fn from_scalars(rows: Vec<Vec<Scalar>>) -> Self {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Cell::new).collect())
                .collect(),
        )
    }

    /// Number of stored rows
    pub fn stored_rows(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest stored row
    pub fn stored_cols(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Cell at a position; unset positions read as the empty cell. Never grows storage.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Return a new grid with `cell` at `(row, col)`.
    ///
    /// Only the row list and the written row are reallocated. Storage grows to
    /// exactly what the write needs; rows added in between are empty.
    pub fn write(&self, row: usize, col: usize, cell: Cell) -> SheetGrid {
        let mut rows: Vec<Row> = Vec::with_capacity(self.rows.len().max(row + 1));
        rows.extend(self.rows.iter().cloned());
        while rows.len() <= row {
            rows.push(Arc::new(Vec::new()));
        }

        let mut cells: Vec<Cell> = rows[row].as_ref().clone();
        if cells.len() <= col {
            cells.resize_with(col + 1, Cell::default);
        }
        cells[col] = cell;
        rows[row] = Arc::new(cells);

        SheetGrid { rows: Arc::new(rows) }
    }

    /// Identity comparison: false after any write.
    pub fn same_as(&self, other: &SheetGrid) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
    }

    /// True if both grids hold the very same allocation for `row`.
    pub fn shares_row(&self, other: &SheetGrid, row: usize) -> bool {
        match (self.rows.get(row), other.rows.get(row)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Read view padded to at least `MIN_ROWS` x `MIN_COLS`.
    pub fn padded(&self) -> GridView<'_> {
        self.view(MIN_ROWS, MIN_COLS)
    }

    pub fn view(&self, min_rows: usize, min_cols: usize) -> GridView<'_> {
        GridView {
            grid: self,
            rows: self.stored_rows().max(min_rows),
            cols: self.stored_cols().max(min_cols),
        }
    }

    /// Stored values, ragged as stored.
    pub fn to_scalars(&self) -> Vec<Vec<Scalar>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|c| c.value.clone()).collect())
            .collect()
    }
}

/// Rectangular, read-only window over a grid; out-of-extent cells are empty.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a SheetGrid,
    rows: usize,
    cols: usize,
}

impl<'a> GridView<'a> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> &'a Cell {
        self.grid.cell(row, col)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &'a Cell)> + 'a {
        let grid = self.grid;
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| (r, c, grid.cell(r, c))))
    }
}
