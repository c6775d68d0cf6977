use std::path::Path;

use crate::IngestError;

/// Recognized upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Tsv,
    Xlsx,
    Xls,
}

impl FileKind {
    /// Every kind the upload surface accepts.
    pub const ALL: [FileKind; 4] = [FileKind::Csv, FileKind::Tsv, FileKind::Xlsx, FileKind::Xls];

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Csv => ".csv",
            FileKind::Tsv => ".tsv",
            FileKind::Xlsx => ".xlsx",
            FileKind::Xls => ".xls",
        }
    }

    /// Classify by file-name suffix. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| name.ends_with(kind.extension()))
    }

    pub fn is_delimited(&self) -> bool {
        matches!(self, FileKind::Csv | FileKind::Tsv)
    }

    /// Field delimiter for delimited kinds.
    pub fn delimiter(&self) -> u8 {
        match self {
            FileKind::Tsv => b'\t',
            _ => b',',
        }
    }
}

/// A file handed to the upload surface: its name and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, naming it after the path's final component.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
            file: name.clone(),
            source,
        })?;
        Ok(Self { name, bytes })
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_name(&self.name)
    }
}
