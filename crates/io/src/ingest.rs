//! Batch ingestion of uploaded files.
//!
//! Each file is classified, parsed, and reported on its own; one bad file
//! never stops the rest of the batch.

use std::path::PathBuf;

use gridpad_engine::ParsedFile;

use crate::binary::BinaryReader;
use crate::delimited::parse_delimited;
use crate::upload::UploadedFile;
use crate::IngestError;

/// Per-file result, in upload order.
#[derive(Debug)]
pub enum FileOutcome {
    Loaded { file: String, tables: usize },
    Failed(IngestError),
}

impl FileOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            FileOutcome::Loaded { file, .. } => file,
            FileOutcome::Failed(err) => err.file_name(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FileOutcome::Loaded { .. })
    }
}

/// Result of ingesting a batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Successfully parsed files, in upload order.
    pub parsed: Vec<ParsedFile>,
    pub outcomes: Vec<FileOutcome>,
}

impl IngestReport {
    pub fn failures(&self) -> impl Iterator<Item = &IngestError> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Failed(err) => Some(err),
            FileOutcome::Loaded { .. } => None,
        })
    }

    pub fn loaded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }
}

/// Classify and parse one file.
pub fn ingest_file(
    file: &UploadedFile,
    binary: &dyn BinaryReader,
) -> Result<ParsedFile, IngestError> {
    match file.kind() {
        Some(kind) if kind.is_delimited() => parse_delimited(&file.bytes, &file.name),
        Some(_) => binary.parse(&file.bytes, &file.name),
        None => Err(IngestError::UnsupportedFileType(file.name.clone())),
    }
}

/// Ingest every file independently.
pub fn ingest_batch(files: &[UploadedFile], binary: &dyn BinaryReader) -> IngestReport {
    let mut report = IngestReport::default();
    for file in files {
        report.record(&file.name, ingest_file(file, binary));
    }
    report
}

/// Read and ingest files from disk. Unreadable paths fail on their own.
pub fn ingest_paths(paths: &[PathBuf], binary: &dyn BinaryReader) -> IngestReport {
    let mut report = IngestReport::default();
    for path in paths {
        let result = UploadedFile::from_path(path).and_then(|file| ingest_file(&file, binary));
        report.record(&path.display().to_string(), result);
    }
    report
}

impl IngestReport {
    fn record(&mut self, name: &str, result: Result<ParsedFile, IngestError>) {
        match result {
            Ok(parsed) => {
                log::debug!("ingested {} ({} table(s))", name, parsed.table_count());
                self.outcomes.push(FileOutcome::Loaded {
                    file: parsed.source_name.clone(),
                    tables: parsed.table_count(),
                });
                self.parsed.push(parsed);
            }
            Err(err) => {
                log::warn!("skipping upload: {}", err);
                self.outcomes.push(FileOutcome::Failed(err));
            }
        }
    }
}
