//! CSV byte stream → `RawTable`.
//!
//! Handles the file-level concerns the engine deliberately does not:
//! character decoding (UTF-8 with a lossy fallback for legacy exports) and
//! delimiter sniffing (comma and semicolon variants of the same schema are
//! one format family, distinguished by the header line).

use std::borrow::Cow;
use std::collections::HashMap;

use retailflow_engine::normalizer::{RawRow, RawTable};

use crate::{IngestError, IngestResult};

/// Delimited-text family of the upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    Comma,
    Semicolon,
}

impl TableFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            TableFormat::Comma => b',',
            TableFormat::Semicolon => b';',
        }
    }
}

/// Sniff the delimiter from the header line. Spreadsheet exports in several
/// locales use `;`; everything else is treated as comma-separated.
pub fn detect_format(content: &str) -> TableFormat {
    let header_line = content.lines().next().unwrap_or("");
    if header_line.contains(';') {
        TableFormat::Semicolon
    } else {
        TableFormat::Comma
    }
}

/// Decode an uploaded byte stream as UTF-8, replacing invalid sequences
/// rather than failing; legacy single-byte exports still yield usable
/// ASCII column names and numbers.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Parse an uploaded CSV byte stream into a raw table.
///
/// Header names and field values are trimmed; ragged rows are tolerated
/// (missing trailing fields surface as absent keys, which the engine's
/// normalizer treats as empty). Returns `EmptyFile` when there is not even
/// a header line.
pub fn read_table(bytes: &[u8]) -> IngestResult<RawTable> {
    let content = decode(bytes);
    if content.trim().is_empty() {
        return Err(IngestError::EmptyFile);
    }
    let format = detect_format(&content);

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows: Vec<RawRow> = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let row: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}
