use gridpad_core::{CellPos, EditController, EditSession, EditState};

use crate::cell::{Cell, Scalar};
use crate::error::EngineError;
use crate::events::{
    ActiveSheetChangedEvent, CellUpdatedEvent, EventCollector, SheetAddedEvent,
    SheetsImportedEvent, WorkbookEvent,
};
use crate::import::{merge_files, ParsedFile};
use crate::sheet::{Sheet, SheetId};

/// The ordered set of sheets, the active-sheet pointer, and the single
/// selection/edit state scoped to the active sheet.
///
/// Invariants: never empty; `active_sheet` always indexes a sheet; sheet ids
/// are never reused; sheets are never reordered.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    active_sheet: usize,
    /// Next ID to assign to a new sheet. Monotonically increasing, never reused.
    next_sheet_id: u64,
    editor: EditController,
    events: EventCollector,
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbook {
    /// Create a new workbook with one blank sheet: id `1`, name `Sheet1`.
    pub fn new() -> Self {
        Self {
            sheets: vec![Sheet::new(SheetId(1), "Sheet1")],
            active_sheet: 0,
            next_sheet_id: 2,
            editor: EditController::new(),
            events: EventCollector::new(),
        }
    }

    fn generate_sheet_id(&mut self) -> SheetId {
        let id = SheetId(self.next_sheet_id);
        self.next_sheet_id += 1;
        id
    }

    // =========================================================================
    // Sheets
    // =========================================================================

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet_by_id(&self, id: SheetId) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id == id)
    }

    pub fn idx_for_sheet_id(&self, id: SheetId) -> Option<usize> {
        self.sheets.iter().position(|s| s.id == id)
    }

    pub fn active_sheet(&self) -> &Sheet {
        &self.sheets[self.active_sheet]
    }

    pub fn active_sheet_id(&self) -> SheetId {
        self.sheets[self.active_sheet].id
    }

    /// Append a blank sheet and make it active.
    ///
    /// Default name is `Sheet{N+1}` for N existing sheets. Names are not
    /// required to be unique.
    pub fn add_sheet(&mut self, name: Option<&str>) -> SheetId {
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("Sheet{}", self.sheets.len() + 1),
        };
        let id = self.generate_sheet_id();
        self.sheets.push(Sheet::new(id, name.clone()));
        self.events
            .push(WorkbookEvent::SheetAdded(SheetAddedEvent { sheet: id, name }));
        self.switch_to(self.sheets.len() - 1);
        id
    }

    /// Activate a sheet by id. Moving to another sheet clears the selection.
    pub fn set_active(&mut self, id: SheetId) -> Result<(), EngineError> {
        let index = self
            .idx_for_sheet_id(id)
            .ok_or(EngineError::UnknownSheet(id))?;
        self.switch_to(index);
        Ok(())
    }

    fn switch_to(&mut self, index: usize) {
        if index == self.active_sheet {
            return;
        }
        let previous = self.active_sheet_id();
        self.active_sheet = index;
        // Selection and edit session belong to the sheet being left
        self.editor.clear();
        self.events
            .push(WorkbookEvent::ActiveSheetChanged(ActiveSheetChangedEvent {
                sheet: self.active_sheet_id(),
                previous,
            }));
    }

    /// Append one sheet per table of every file, in file-then-table order.
    ///
    /// The active sheet is left alone.
    pub fn import_merge(&mut self, files: Vec<ParsedFile>) -> Vec<SheetId> {
        let mut ids = Vec::new();
        for imported in merge_files(files) {
            let id = self.generate_sheet_id();
            self.sheets
                .push(Sheet::with_grid(id, imported.name, imported.grid));
            ids.push(id);
        }
        if !ids.is_empty() {
            self.events
                .push(WorkbookEvent::SheetsImported(SheetsImportedEvent {
                    sheets: ids.clone(),
                }));
        }
        ids
    }

    // =========================================================================
    // Selection and editing (active sheet)
    // =========================================================================

    pub fn edit_state(&self) -> &EditState {
        self.editor.state()
    }

    pub fn selection(&self) -> Option<CellPos> {
        self.editor.selection()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.editor.session()
    }

    /// Cell on the active sheet.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.active_sheet().grid.cell(row, col)
    }

    /// Select a cell, discarding any uncommitted edit.
    pub fn select(&mut self, row: usize, col: usize) {
        self.editor.select(CellPos::new(row, col));
    }

    /// Start editing a cell, seeded from its formula or else its value.
    pub fn begin_edit(&mut self, row: usize, col: usize) {
        let seed = self.cell(row, col).edit_text();
        self.editor.begin_edit(CellPos::new(row, col), seed);
    }

    pub fn update_edit_text(&mut self, text: impl Into<String>) -> Result<(), EngineError> {
        Ok(self.editor.update_text(text)?)
    }

    /// Write the pending text to the active sheet; returns the written position.
    ///
    /// The cell is replaced by `{ value: Text(pending) }`: no numeric coercion,
    /// and any previous formula or style is dropped.
    pub fn commit_edit(&mut self) -> Result<CellPos, EngineError> {
        let edit = self.editor.commit()?;
        let sheet = &mut self.sheets[self.active_sheet];
        sheet.grid = sheet
            .grid
            .write(edit.pos.row, edit.pos.col, Cell::new(Scalar::Text(edit.text)));
        self.events
            .push(WorkbookEvent::CellUpdated(CellUpdatedEvent {
                sheet: sheet.id,
                pos: edit.pos,
            }));
        Ok(edit.pos)
    }

    pub fn cancel_edit(&mut self) -> Result<CellPos, EngineError> {
        Ok(self.editor.cancel()?)
    }

    /// Commit `text` into the cell currently being edited at `(row, col)`.
    pub fn commit_cell_edit(
        &mut self,
        row: usize,
        col: usize,
        text: impl Into<String>,
    ) -> Result<CellPos, EngineError> {
        let expected = CellPos::new(row, col);
        let found = self
            .editor
            .session()
            .map(|s| s.pos)
            .ok_or(EngineError::NoActiveEditSession)?;
        if found != expected {
            return Err(EngineError::EditTargetMismatch { expected, found });
        }
        self.editor.update_text(text)?;
        self.commit_edit()
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn events(&self) -> &[WorkbookEvent] {
        self.events.events()
    }

    /// Hand over queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<WorkbookEvent> {
        self.events.drain()
    }
}
