//! Variant grouper: records → per-(variant, store) aggregates.
//!
//! Grouping is deterministic: variants come out in first-encountered order
//! and store entries within a variant keep their first-encountered order,
//! so downstream sorting is reproducible run to run.

use std::collections::HashMap;

use crate::types::{sell_through_rate, InventoryRecord, VariantKey};

/// Aggregated position of one variant at one store.
///
/// Descriptive fields come from the first contributing record; grouping
/// must not mix descriptive metadata across records of the same variant.
#[derive(Clone, Debug)]
pub struct VariantStoreEntry {
    pub store: String,
    pub product_name: String,
    pub color: String,
    pub size: String,
    pub product_code: String,
    pub units_sold: u64,
    pub units_in_stock: u64,
}

impl VariantStoreEntry {
    /// Sell-through rate for this variant at this store, as a fraction.
    pub fn sell_through(&self) -> f64 {
        sell_through_rate(self.units_sold, self.units_in_stock)
    }
}

/// One variant with its per-store entries.
#[derive(Clone, Debug)]
pub struct VariantGroup {
    pub key: VariantKey,
    pub stores: Vec<VariantStoreEntry>,
}

impl VariantGroup {
    /// Transfer needs at least one possible sender and receiver.
    pub fn is_transfer_candidate(&self) -> bool {
        self.stores.len() >= 2
    }
}

/// Group records into per-(variant, store) aggregates.
pub fn group_by_variant(records: &[InventoryRecord]) -> Vec<VariantGroup> {
    let mut groups: Vec<VariantGroup> = Vec::new();
    let mut group_index: HashMap<VariantKey, usize> = HashMap::new();

    for record in records {
        let key = record.variant_key();
        let gi = match group_index.get(&key) {
            Some(&gi) => gi,
            None => {
                groups.push(VariantGroup {
                    key: key.clone(),
                    stores: Vec::new(),
                });
                group_index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };

        let group = &mut groups[gi];
        match group.stores.iter_mut().find(|e| e.store == record.store) {
            Some(entry) => {
                entry.units_sold += record.units_sold;
                entry.units_in_stock += record.units_in_stock;
            }
            None => group.stores.push(VariantStoreEntry {
                store: record.store.clone(),
                product_name: record.product_name.clone(),
                color: record.color.clone(),
                size: record.size.clone(),
                product_code: record.product_code.clone(),
                units_sold: record.units_sold,
                units_in_stock: record.units_in_stock,
            }),
        }
    }

    groups
}
