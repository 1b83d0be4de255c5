//! Per-store summary metrics.
//!
//! A pure function of the record set, recomputed on demand rather than
//! incrementally maintained, so it is always consistent with the current
//! snapshot.

use serde::Serialize;

use crate::types::{sell_through_rate, to_rounded_pct, InventoryRecord};

/// Aggregate position of one store across all of its records.
#[derive(Clone, Debug, Serialize)]
pub struct StoreMetrics {
    pub store: String,
    pub total_sold: u64,
    pub total_stock: u64,
    /// Sell-through rate as a percent, one decimal place.
    pub sell_through_pct: f64,
    /// Number of records contributing to this store.
    pub record_count: usize,
    /// Stock minus sold; negative when the store sells past its inventory.
    pub excess_stock: i64,
}

/// Compute metrics for each store, in the given store order.
pub fn compute_store_metrics(
    records: &[InventoryRecord],
    stores: &[String],
) -> Vec<StoreMetrics> {
    stores
        .iter()
        .map(|store| {
            let mut total_sold = 0u64;
            let mut total_stock = 0u64;
            let mut record_count = 0usize;
            for record in records.iter().filter(|r| &r.store == store) {
                total_sold += record.units_sold;
                total_stock += record.units_in_stock;
                record_count += 1;
            }
            StoreMetrics {
                store: store.clone(),
                total_sold,
                total_stock,
                sell_through_pct: to_rounded_pct(sell_through_rate(total_sold, total_stock)),
                record_count,
                excess_stock: total_stock as i64 - total_sold as i64,
            }
        })
        .collect()
}
