//! Row normalizer: raw tabular input → typed records.
//!
//! Accepts an externally-parsed table (the ingestion collaborator owns file
//! formats and encodings) and produces the clean record set the rest of the
//! engine runs on. The schema check runs once, against the header list,
//! before any row is touched. Per row: names and values are trimmed, unit
//! counts parse leniently (unparseable or missing → 0, negatives clamp to
//! 0), and rows without a store name are dropped.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::types::InventoryRecord;

/// Column names, exact after trimming.
pub const COL_STORE: &str = "store_name";
pub const COL_PRODUCT_CODE: &str = "product_code";
pub const COL_PRODUCT_NAME: &str = "product_name";
pub const COL_COLOR: &str = "color";
pub const COL_SIZE: &str = "size";
pub const COL_UNITS_SOLD: &str = "units_sold";
pub const COL_UNITS_IN_STOCK: &str = "units_in_stock";

/// Columns that must be present in the header set.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_STORE,
    COL_PRODUCT_CODE,
    COL_PRODUCT_NAME,
    COL_UNITS_SOLD,
    COL_UNITS_IN_STOCK,
];

/// One raw row: trimmed header name → raw string value.
pub type RawRow = HashMap<String, String>;

/// Externally-parsed tabular input.
#[derive(Clone, Debug, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Output of a successful normalization pass.
#[derive(Clone, Debug)]
pub struct NormalizedData {
    pub records: Vec<InventoryRecord>,
    /// Store names deduplicated in order of first appearance.
    pub stores: Vec<String>,
    /// Rows discarded for having no store name.
    pub dropped_rows: usize,
}

/// Normalize a raw table into the clean record set.
///
/// Fails with `Schema` naming every missing required column, or with
/// `EmptyInput` when no row survives cleaning.
pub fn normalize(table: &RawTable) -> EngineResult<NormalizedData> {
    let headers: Vec<&str> = table.headers.iter().map(|h| h.trim()).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.contains(required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::Schema { missing });
    }

    let mut records = Vec::with_capacity(table.rows.len());
    let mut stores: Vec<String> = Vec::new();
    let mut dropped_rows = 0;

    for row in &table.rows {
        let store = field(row, COL_STORE);
        if store.is_empty() {
            dropped_rows += 1;
            continue;
        }

        let record = InventoryRecord {
            store: store.to_string(),
            product_code: field(row, COL_PRODUCT_CODE).to_string(),
            product_name: field(row, COL_PRODUCT_NAME).to_string(),
            color: field(row, COL_COLOR).to_string(),
            size: field(row, COL_SIZE).to_string(),
            units_sold: parse_units(field(row, COL_UNITS_SOLD)),
            units_in_stock: parse_units(field(row, COL_UNITS_IN_STOCK)),
        };

        if !stores.iter().any(|s| s == &record.store) {
            stores.push(record.store.clone());
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(EngineError::EmptyInput);
    }

    Ok(NormalizedData {
        records,
        stores,
        dropped_rows,
    })
}

/// Look up a column value, tolerating untrimmed keys in the raw row.
fn field<'a>(row: &'a RawRow, column: &str) -> &'a str {
    if let Some(value) = row.get(column) {
        return value.trim();
    }
    row.iter()
        .find(|(key, _)| key.trim() == column)
        .map(|(_, value)| value.trim())
        .unwrap_or("")
}

/// Parse a unit count: lenient on garbage, clamped to ≥0, truncated to
/// whole units.
fn parse_units(raw: &str) -> u64 {
    let value: f64 = raw.trim().parse().unwrap_or(0.0);
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value as u64
}
