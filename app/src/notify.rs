//! User-facing notices (the toasts of the editor).

use serde::Serialize;

use gridpad_engine::events::WorkbookEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn cell_updated(address: &str) -> Self {
        Self::info("Cell updated", format!("Cell {} updated.", address))
    }

    pub fn sheet_added(name: &str) -> Self {
        Self::info("New sheet added", format!("Created {}", name))
    }

    pub fn files_uploaded(count: usize) -> Self {
        Self::info("Files uploaded", format!("Processing {} file(s)...", count))
    }

    pub fn file_loaded(file: &str) -> Self {
        Self::info(
            "File processed successfully",
            format!("{} has been loaded.", file),
        )
    }

    pub fn unsupported_file(file: &str) -> Self {
        Self::destructive(
            "Unsupported file type",
            format!(
                "File {} is not supported. Please use Excel (.xlsx, .xls) or CSV files.",
                file
            ),
        )
    }

    pub fn file_failed(file: &str) -> Self {
        Self::destructive(
            "Error processing file",
            format!("Failed to process {}. Please check the file format.", file),
        )
    }

    pub fn data_imported(sheet_count: usize) -> Self {
        Self::info(
            "Data imported successfully",
            format!("Added {} new sheet(s).", sheet_count),
        )
    }

    /// Notice for a workbook change, if the change is user-visible.
    pub fn for_event(event: &WorkbookEvent) -> Option<Self> {
        match event {
            WorkbookEvent::CellUpdated(e) => Some(Self::cell_updated(&e.pos.to_string())),
            WorkbookEvent::SheetAdded(e) => Some(Self::sheet_added(&e.name)),
            WorkbookEvent::SheetsImported(e) => Some(Self::data_imported(e.sheets.len())),
            WorkbookEvent::ActiveSheetChanged(_) => None,
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = match self.severity {
            Severity::Info => "info",
            Severity::Destructive => "error",
        };
        write!(f, "[{}] {}: {}", marker, self.title, self.description)
    }
}
