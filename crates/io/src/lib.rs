// File I/O operations

pub mod binary;
pub mod delimited;
pub mod error;
pub mod ingest;
pub mod upload;

pub use binary::{BinaryReader, PlaceholderBinaryReader};
pub use delimited::{coerce_field, parse_delimited};
pub use error::IngestError;
pub use ingest::{ingest_batch, ingest_file, ingest_paths, FileOutcome, IngestReport};
pub use upload::{FileKind, UploadedFile};
