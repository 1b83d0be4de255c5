//! Tabular I/O collaborators for the transfer engine.
//!
//! The engine consumes `RawTable` values and emits `TransferReport`
//! structures; everything file-shaped lives here: CSV byte streams in,
//! sample templates and downloadable report renderings out.

pub mod export;
pub mod reader;
pub mod template;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The byte stream is not parseable as delimited text.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no header line at all.
    #[error("input file is empty")]
    EmptyFile,
}

/// Result type alias for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;
