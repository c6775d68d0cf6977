//! Change events recorded by the workbook.
//!
//! The workbook queues one event per successful mutation; the owner drains
//! them (see `Workbook::take_events`) to drive notifications and re-renders.

use gridpad_core::CellPos;

use crate::sheet::SheetId;

#[derive(Debug, Clone, PartialEq)]
pub enum WorkbookEvent {
    /// A committed edit replaced a cell.
    CellUpdated(CellUpdatedEvent),
    /// A blank sheet was appended.
    SheetAdded(SheetAddedEvent),
    /// The active sheet pointer moved.
    ActiveSheetChanged(ActiveSheetChangedEvent),
    /// An import batch appended sheets. Never emitted for an empty batch.
    SheetsImported(SheetsImportedEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellUpdatedEvent {
    pub sheet: SheetId,
    pub pos: CellPos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetAddedEvent {
    pub sheet: SheetId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSheetChangedEvent {
    pub sheet: SheetId,
    pub previous: SheetId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetsImportedEvent {
    /// New sheets in append order.
    pub sheets: Vec<SheetId>,
}

/// Ordered event queue.
#[derive(Debug, Clone, Default)]
pub struct EventCollector {
    events: Vec<WorkbookEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: WorkbookEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[WorkbookEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<WorkbookEvent> {
        std::mem::take(&mut self.events)
    }
}
