//! Result assembler: evaluator outcomes → final report.
//!
//! Recommendations sort descending by STR gap with a stable sort, so equal
//! gaps keep their discovery order and re-running analysis on an unchanged
//! snapshot reproduces the report exactly. Truncation is presentational
//! only; the summary always carries untruncated totals.

use std::cmp::Ordering;

use serde::Serialize;

use crate::evaluator::VariantOutcome;
use crate::store_metrics::StoreMetrics;
use crate::types::{RejectedVariant, TransferRecommendation};

/// Headline counts for the whole analysis pass.
#[derive(Clone, Debug, Serialize)]
pub struct ReportSummary {
    pub record_count: usize,
    pub store_count: usize,
    /// Distinct variants seen in the dataset.
    pub variant_count: usize,
    /// Variants carried by at least two stores, hence evaluated.
    pub multi_store_variant_count: usize,
    pub total_recommendations: usize,
    pub total_rejections: usize,
    /// Length of the (possibly truncated) recommendation list below.
    pub shown_recommendations: usize,
}

/// The packaged output of one analysis pass.
#[derive(Clone, Debug, Serialize)]
pub struct TransferReport {
    pub summary: ReportSummary,
    pub recommendations: Vec<TransferRecommendation>,
    pub rejections: Vec<RejectedVariant>,
    pub store_metrics: Vec<StoreMetrics>,
}

/// Sort, truncate and package evaluator outcomes.
///
/// `top` limits the recommendation list only; rejections always ship in
/// full so callers can audit every evaluated variant.
pub fn assemble(
    outcomes: Vec<VariantOutcome>,
    store_metrics: Vec<StoreMetrics>,
    record_count: usize,
    variant_count: usize,
    multi_store_variant_count: usize,
    top: Option<usize>,
) -> TransferReport {
    let mut recommendations: Vec<TransferRecommendation> = Vec::new();
    let mut rejections: Vec<RejectedVariant> = Vec::new();
    for outcome in outcomes {
        match outcome {
            VariantOutcome::Recommended(rec) => recommendations.push(rec),
            VariantOutcome::Rejected(rej) => rejections.push(rej),
        }
    }

    // Stable: ties keep discovery order.
    recommendations.sort_by(|a, b| {
        b.str_gap_pct
            .partial_cmp(&a.str_gap_pct)
            .unwrap_or(Ordering::Equal)
    });

    let total_recommendations = recommendations.len();
    if let Some(limit) = top {
        recommendations.truncate(limit);
    }

    TransferReport {
        summary: ReportSummary {
            record_count,
            store_count: store_metrics.len(),
            variant_count,
            multi_store_variant_count,
            total_recommendations,
            total_rejections: rejections.len(),
            shown_recommendations: recommendations.len(),
        },
        recommendations,
        rejections,
        store_metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClampRule, StockStatus};

    fn rec(name: &str, gap_pct: f64) -> VariantOutcome {
        VariantOutcome::Recommended(TransferRecommendation {
            product_name: name.into(),
            color: "White".into(),
            size: "M".into(),
            product_code: "P-1001".into(),
            from_store: "Harbor District".into(),
            to_store: "Midtown Central".into(),
            quantity: 1,
            sender_sold: 0,
            sender_stock: 3,
            sender_str_pct: 0.0,
            receiver_sold: 5,
            receiver_stock: 5,
            receiver_str_pct: gap_pct,
            str_gap_pct: gap_pct,
            theoretical_quantity: 1.0,
            binding_rule: ClampRule::Theoretical,
            receiver_stock_status: StockStatus::Normal,
            store_count: 2,
        })
    }

    #[test]
    fn recommendations_sort_descending_by_gap() {
        let report = assemble(
            vec![rec("A", 16.0), rec("B", 35.0), rec("C", 20.8)],
            Vec::new(),
            3,
            3,
            3,
            None,
        );
        let names: Vec<&str> = report
            .recommendations
            .iter()
            .map(|r| r.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn equal_gaps_keep_discovery_order() {
        let report = assemble(
            vec![rec("First", 20.0), rec("Second", 20.0), rec("Third", 20.0)],
            Vec::new(),
            3,
            3,
            3,
            None,
        );
        let names: Vec<&str> = report
            .recommendations
            .iter()
            .map(|r| r.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn truncation_keeps_untruncated_totals() {
        let report = assemble(
            vec![rec("A", 16.0), rec("B", 35.0), rec("C", 20.8)],
            Vec::new(),
            3,
            3,
            3,
            Some(2),
        );
        assert_eq!(report.recommendations.len(), 2);
        assert_eq!(report.summary.shown_recommendations, 2);
        assert_eq!(report.summary.total_recommendations, 3);
        // Truncation keeps the top of the sorted list.
        assert_eq!(report.recommendations[0].product_name, "B");
        assert_eq!(report.recommendations[1].product_name, "C");
    }
}
