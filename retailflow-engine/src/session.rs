//! Explicit analysis session.
//!
//! Holds at most one dataset snapshot and the most recent report. Loading a
//! new dataset replaces the snapshot and invalidates the previous report.
//! The session is an ordinary owned value with no interior locking; hosts
//! that share one session across concurrent requests must serialize access
//! to it (the HTTP layer wraps it in an async mutex).

use std::sync::Arc;

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::evaluator::evaluate_variant;
use crate::normalizer::{normalize, RawTable};
use crate::report::{assemble, TransferReport};
use crate::store_metrics::{compute_store_metrics, StoreMetrics};
use crate::types::InventoryRecord;
use crate::variant::group_by_variant;

/// What a successful load tells the caller about the new snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub store_count: usize,
    pub stores: Vec<String>,
    /// Header list of the uploaded table, trimmed.
    pub columns: Vec<String>,
    pub dropped_rows: usize,
}

/// One dataset snapshot plus the most recent analysis over it.
#[derive(Clone, Debug, Default)]
pub struct TransferSession {
    records: Vec<InventoryRecord>,
    stores: Vec<String>,
    columns: Vec<String>,
    last_report: Option<Arc<TransferReport>>,
}

impl TransferSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        !self.records.is_empty()
    }

    /// Replace the snapshot with a freshly normalized dataset. Any previous
    /// report no longer describes the current data and is dropped.
    pub fn load(&mut self, table: &RawTable) -> EngineResult<DatasetSummary> {
        let data = normalize(table)?;

        self.records = data.records;
        self.stores = data.stores;
        self.columns = table.headers.iter().map(|h| h.trim().to_string()).collect();
        self.last_report = None;

        Ok(DatasetSummary {
            record_count: self.records.len(),
            store_count: self.stores.len(),
            stores: self.stores.clone(),
            columns: self.columns.clone(),
            dropped_rows: data.dropped_rows,
        })
    }

    /// Per-store metrics for the current snapshot, recomputed on demand.
    pub fn store_metrics(&self) -> EngineResult<Vec<StoreMetrics>> {
        if !self.is_loaded() {
            return Err(EngineError::EmptyInput);
        }
        Ok(compute_store_metrics(&self.records, &self.stores))
    }

    /// Run the full pipeline over the current snapshot and retain the
    /// report. `top` truncates the recommendation list for presentation.
    pub fn analyze(&mut self, top: Option<usize>) -> EngineResult<Arc<TransferReport>> {
        if !self.is_loaded() {
            return Err(EngineError::EmptyInput);
        }

        let metrics = compute_store_metrics(&self.records, &self.stores);
        let groups = group_by_variant(&self.records);
        let variant_count = groups.len();

        let outcomes: Vec<_> = groups
            .iter()
            .filter_map(evaluate_variant)
            .collect();
        let multi_store = groups.iter().filter(|g| g.is_transfer_candidate()).count();

        let report = Arc::new(assemble(
            outcomes,
            metrics,
            self.records.len(),
            variant_count,
            multi_store,
            top,
        ));
        self.last_report = Some(Arc::clone(&report));
        Ok(report)
    }

    /// The most recent report, if an analysis has completed since the last
    /// load.
    pub fn last_report(&self) -> EngineResult<Arc<TransferReport>> {
        self.last_report
            .as_ref()
            .map(Arc::clone)
            .ok_or(EngineError::NotYetAnalyzed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{RawRow, REQUIRED_COLUMNS};

    fn raw_row(store: &str, name: &str, sold: &str, stock: &str) -> RawRow {
        [
            ("store_name", store),
            ("product_code", "P-1001"),
            ("product_name", name),
            ("color", "White"),
            ("size", "M"),
            ("units_sold", sold),
            ("units_in_stock", stock),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn sample_table() -> RawTable {
        RawTable {
            headers: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: vec![
                raw_row("Harbor District", "Oxford Shirt", "8", "40"),
                raw_row("Midtown Central", "Oxford Shirt", "15", "25"),
            ],
        }
    }

    #[test]
    fn report_before_analysis_is_an_error() {
        let mut session = TransferSession::new();
        assert_eq!(session.last_report().unwrap_err(), EngineError::NotYetAnalyzed);
        session.load(&sample_table()).unwrap();
        assert_eq!(session.last_report().unwrap_err(), EngineError::NotYetAnalyzed);
    }

    #[test]
    fn analyze_without_dataset_is_empty_input() {
        let mut session = TransferSession::new();
        assert_eq!(session.analyze(None).unwrap_err(), EngineError::EmptyInput);
        assert_eq!(session.store_metrics().unwrap_err(), EngineError::EmptyInput);
    }

    #[test]
    fn load_then_analyze_produces_a_retained_report() {
        let mut session = TransferSession::new();
        let summary = session.load(&sample_table()).unwrap();
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.store_count, 2);

        let report = session.analyze(None).unwrap();
        assert_eq!(report.summary.total_recommendations, 1);
        assert_eq!(report.recommendations[0].quantity, 5);

        let again = session.last_report().unwrap();
        assert_eq!(again.summary.total_recommendations, 1);
    }

    #[test]
    fn reload_invalidates_previous_report() {
        let mut session = TransferSession::new();
        session.load(&sample_table()).unwrap();
        session.analyze(None).unwrap();

        session.load(&sample_table()).unwrap();
        assert_eq!(session.last_report().unwrap_err(), EngineError::NotYetAnalyzed);
    }

    #[test]
    fn reanalysis_of_unchanged_snapshot_is_identical() {
        let mut session = TransferSession::new();
        session.load(&sample_table()).unwrap();
        let first = serde_json::to_string(&*session.analyze(None).unwrap()).unwrap();
        let second = serde_json::to_string(&*session.analyze(None).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
