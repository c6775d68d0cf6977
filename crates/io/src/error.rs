use thiserror::Error;

/// Why a single uploaded file did not produce tables.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file {0} is not a supported spreadsheet type")]
    UnsupportedFileType(String),

    #[error("failed to parse {file}: {reason}")]
    ParseFailure { file: String, reason: String },

    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Name of the file the error belongs to.
    pub fn file_name(&self) -> &str {
        match self {
            IngestError::UnsupportedFileType(file) => file,
            IngestError::ParseFailure { file, .. } => file,
            IngestError::Io { file, .. } => file,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, IngestError::UnsupportedFileType(_))
    }
}
