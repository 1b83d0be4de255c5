use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// One cleaned inventory row: a product position at a single store.
///
/// Produced by the normalizer; `units_sold` and `units_in_stock` are already
/// clamped to ≥0 and the store name is guaranteed non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InventoryRecord {
    pub store: String,
    pub product_code: String,
    pub product_name: String,
    pub color: String,
    pub size: String,
    pub units_sold: u64,
    pub units_in_stock: u64,
}

impl InventoryRecord {
    pub fn variant_key(&self) -> VariantKey {
        VariantKey::new(&self.product_name, &self.color, &self.size)
    }
}

/// Product identity across stores: uppercased, trimmed concatenation of
/// product name, color and size. Two records with equal keys are the same
/// sellable variant regardless of store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct VariantKey(String);

impl VariantKey {
    pub fn new(product_name: &str, color: &str, size: &str) -> Self {
        let joined = format!("{} {} {}", product_name, color, size);
        VariantKey(joined.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Sell-through rate
// ---------------------------------------------------------------------------

/// Sell-through rate: sold / (sold + stock), as a fraction in [0, 1].
/// Defined as exactly 0 when both are 0.
pub fn sell_through_rate(units_sold: u64, units_in_stock: u64) -> f64 {
    let total = units_sold + units_in_stock;
    if total == 0 {
        return 0.0;
    }
    units_sold as f64 / total as f64
}

/// Convert a fractional rate to a percentage rounded to one decimal place,
/// half away from zero. All percentages in engine outputs go through this
/// so repeated runs on identical input produce identical values.
pub fn to_rounded_pct(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Which bound produced the final transfer quantity.
///
/// Precedence on numeric ties: share cap, then keep-back floor, then flat
/// cap, then theoretical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampRule {
    /// At most 40% of the sender's stock may move in one transfer.
    StockShareCap,
    /// At least 2 units must remain at the sender.
    KeepBackFloor,
    /// Hard cap of 5 units per transfer.
    FlatUnitCap,
    /// The unclamped STR-gap quantity was already the tightest bound.
    Theoretical,
}

impl fmt::Display for ClampRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClampRule::StockShareCap => write!(f, "40% stock share cap"),
            ClampRule::KeepBackFloor => write!(f, "leave-2 floor"),
            ClampRule::FlatUnitCap => write!(f, "flat 5-unit cap"),
            ClampRule::Theoretical => write!(f, "theoretical"),
        }
    }
}

/// Stock pressure at the receiving store, labeled from its STR percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    High,
    Normal,
    Low,
    Critical,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::High => write!(f, "high"),
            StockStatus::Normal => write!(f, "normal"),
            StockStatus::Low => write!(f, "low"),
            StockStatus::Critical => write!(f, "critical"),
        }
    }
}

/// One emitted transfer suggestion.
#[derive(Clone, Debug, Serialize)]
pub struct TransferRecommendation {
    pub product_name: String,
    pub color: String,
    pub size: String,
    pub product_code: String,
    pub from_store: String,
    pub to_store: String,
    /// Units to move, always in [1, sender stock].
    pub quantity: u64,
    pub sender_sold: u64,
    pub sender_stock: u64,
    pub sender_str_pct: f64,
    pub receiver_sold: u64,
    pub receiver_stock: u64,
    pub receiver_str_pct: f64,
    pub str_gap_pct: f64,
    /// Unclamped gap × sender-stock quantity, for audit.
    pub theoretical_quantity: f64,
    pub binding_rule: ClampRule,
    pub receiver_stock_status: StockStatus,
    /// How many stores carry this variant.
    pub store_count: usize,
}

/// A variant that was evaluated but produced no recommendation.
#[derive(Clone, Debug, Serialize)]
pub struct RejectedVariant {
    pub product_name: String,
    pub color: String,
    pub size: String,
    pub product_code: String,
    pub store_count: usize,
    /// Mean STR percent across all stores carrying the variant.
    pub avg_str_pct: f64,
    /// Max − min STR percent across those stores.
    pub str_spread_pct: f64,
    pub reason: String,
}
