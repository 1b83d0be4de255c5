//! Transfer evaluator: one decision per multi-store variant.
//!
//! For each variant carried by at least two stores, the store with the
//! lowest sell-through rate is the candidate sender and the store with the
//! highest is the candidate receiver. Only the extremes are considered;
//! this is greedy pairwise matching, not a global assignment. An eligible
//! pair yields a transfer quantity bounded by four clamp rules; an
//! ineligible pair yields a rejection carrying the triggering reason.

use std::cmp::Ordering;

use crate::types::{
    to_rounded_pct, ClampRule, RejectedVariant, StockStatus, TransferRecommendation,
};
use crate::variant::{VariantGroup, VariantStoreEntry};

// ---------------------------------------------------------------------------
// Decision thresholds
// ---------------------------------------------------------------------------

/// Minimum STR gap (fraction) between receiver and sender.
const MIN_STR_GAP: f64 = 0.15;
/// Minimum sender stock for a transfer to be worth the handling.
const MIN_SENDER_STOCK: u64 = 3;
/// Share of sender stock that may leave in a single transfer.
const MAX_STOCK_SHARE: f64 = 0.40;
/// Units that must stay behind at the sender.
const KEEP_BACK_UNITS: u64 = 2;
/// Hard cap on units moved per recommendation.
const FLAT_UNIT_CAP: f64 = 5.0;

/// Receiver STR percent thresholds for the stock-status label.
const STATUS_HIGH_PCT: f64 = 80.0;
const STATUS_NORMAL_PCT: f64 = 50.0;
const STATUS_LOW_PCT: f64 = 20.0;

/// Rejection reason texts, surfaced verbatim to callers.
const REASON_SALES: &str = "receiver sales \u{2264} sender sales";
const REASON_STOCK: &str = "sender stock insufficient (< 3)";
const REASON_GAP: &str = "STR gap insufficient (< 15%)";

/// Outcome of evaluating one multi-store variant.
#[derive(Clone, Debug)]
pub enum VariantOutcome {
    Recommended(TransferRecommendation),
    Rejected(RejectedVariant),
}

/// Evaluate one variant group. Returns `None` for variants in fewer than
/// two stores; those are excluded before evaluation, producing neither a
/// recommendation nor a rejection.
pub fn evaluate_variant(group: &VariantGroup) -> Option<VariantOutcome> {
    if !group.is_transfer_candidate() {
        return None;
    }

    // Stable ascending sort by STR keeps first-encountered store order on
    // ties, so sender/receiver selection is reproducible.
    let mut entries: Vec<&VariantStoreEntry> = group.stores.iter().collect();
    entries.sort_by(|a, b| {
        a.sell_through()
            .partial_cmp(&b.sell_through())
            .unwrap_or(Ordering::Equal)
    });

    let sender = entries[0];
    let receiver = entries[entries.len() - 1];
    let sender_str = sender.sell_through();
    let receiver_str = receiver.sell_through();
    let gap = receiver_str - sender_str;

    // --- Eligibility gate ---
    // Each check names its own rejection reason; the first failure wins.
    if receiver.units_sold <= sender.units_sold {
        return Some(VariantOutcome::Rejected(reject(group, &entries, REASON_SALES)));
    }
    if sender.units_in_stock < MIN_SENDER_STOCK {
        return Some(VariantOutcome::Rejected(reject(group, &entries, REASON_STOCK)));
    }
    if gap < MIN_STR_GAP {
        return Some(VariantOutcome::Rejected(reject(group, &entries, REASON_GAP)));
    }

    // --- Transfer quantity ---
    // The theoretical move is the STR gap applied to the sender's stock,
    // then bounded by three caps. Ties on the binding rule resolve in the
    // order checked below: share cap, keep-back floor, flat cap.
    let sender_stock = sender.units_in_stock as f64;
    let theoretical = gap * sender_stock;
    let share_cap = sender_stock * MAX_STOCK_SHARE;
    let keep_back_cap = sender_stock - KEEP_BACK_UNITS as f64;
    let raw = theoretical
        .min(share_cap)
        .min(keep_back_cap)
        .min(FLAT_UNIT_CAP);

    let binding_rule = if share_cap == raw {
        ClampRule::StockShareCap
    } else if keep_back_cap == raw {
        ClampRule::KeepBackFloor
    } else if FLAT_UNIT_CAP == raw {
        ClampRule::FlatUnitCap
    } else {
        ClampRule::Theoretical
    };

    // Final quantity is a whole unit count in [1, sender stock].
    let quantity = raw.min(sender_stock).max(1.0).floor() as u64;

    let receiver_str_pct = to_rounded_pct(receiver_str);
    Some(VariantOutcome::Recommended(TransferRecommendation {
        product_name: sender.product_name.clone(),
        color: sender.color.clone(),
        size: sender.size.clone(),
        product_code: sender.product_code.clone(),
        from_store: sender.store.clone(),
        to_store: receiver.store.clone(),
        quantity,
        sender_sold: sender.units_sold,
        sender_stock: sender.units_in_stock,
        sender_str_pct: to_rounded_pct(sender_str),
        receiver_sold: receiver.units_sold,
        receiver_stock: receiver.units_in_stock,
        receiver_str_pct,
        str_gap_pct: to_rounded_pct(gap),
        theoretical_quantity: (theoretical * 100.0).round() / 100.0,
        binding_rule,
        receiver_stock_status: stock_status(receiver_str_pct),
        store_count: group.stores.len(),
    }))
}

/// Label the receiving store's stock pressure from its STR percent.
fn stock_status(str_pct: f64) -> StockStatus {
    if str_pct >= STATUS_HIGH_PCT {
        StockStatus::High
    } else if str_pct >= STATUS_NORMAL_PCT {
        StockStatus::Normal
    } else if str_pct >= STATUS_LOW_PCT {
        StockStatus::Low
    } else {
        StockStatus::Critical
    }
}

/// Build a rejection with spread and mean STR across every store carrying
/// the variant, not just the extremes.
fn reject(
    group: &VariantGroup,
    sorted_entries: &[&VariantStoreEntry],
    reason: &str,
) -> RejectedVariant {
    let rates: Vec<f64> = sorted_entries.iter().map(|e| e.sell_through()).collect();
    let mean = rates.iter().sum::<f64>() / rates.len() as f64;
    // Entries arrive sorted ascending by STR.
    let spread = rates[rates.len() - 1] - rates[0];

    let first = &group.stores[0];
    RejectedVariant {
        product_name: first.product_name.clone(),
        color: first.color.clone(),
        size: first.size.clone(),
        product_code: first.product_code.clone(),
        store_count: group.stores.len(),
        avg_str_pct: to_rounded_pct(mean),
        str_spread_pct: to_rounded_pct(spread),
        reason: reason.to_string(),
    }
}
