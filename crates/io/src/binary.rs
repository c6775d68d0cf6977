use gridpad_engine::ParsedFile;

use crate::IngestError;

/// Decoder for binary spreadsheet uploads (`.xlsx`, `.xls`).
///
/// A real decoder returns one table per worksheet, named after the worksheet.
pub trait BinaryReader: Send + Sync {
    fn parse(&self, bytes: &[u8], file_name: &str) -> Result<ParsedFile, IngestError>;
}

/// Stand-in reader that rejects every binary spreadsheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderBinaryReader;

impl BinaryReader for PlaceholderBinaryReader {
    fn parse(&self, _bytes: &[u8], file_name: &str) -> Result<ParsedFile, IngestError> {
        Err(IngestError::ParseFailure {
            file: file_name.to_string(),
            reason: "binary spreadsheet decoding is not available".to_string(),
        })
    }
}
