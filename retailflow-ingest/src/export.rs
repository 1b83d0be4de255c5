//! Report → downloadable CSV.
//!
//! One labeled section per logical table: recommendations, rejections,
//! store metrics. Internal field names translate to display labels here,
//! never in the engine.

use retailflow_engine::TransferReport;

/// File name offered for the export download.
pub const EXPORT_FILE_NAME: &str = "transfer_report.csv";

const RECOMMENDATION_LABELS: [&str; 15] = [
    "Product",
    "Color",
    "Size",
    "Code",
    "From Store",
    "To Store",
    "Units",
    "Sender Sold",
    "Sender Stock",
    "Sender STR %",
    "Receiver Sold",
    "Receiver Stock",
    "Receiver STR %",
    "STR Gap %",
    "Receiver Stock Status",
];

const REJECTION_LABELS: [&str; 7] = [
    "Product",
    "Color",
    "Size",
    "Code",
    "Stores",
    "Avg STR %",
    "Reason",
];

const STORE_LABELS: [&str; 6] = [
    "Store",
    "Total Sold",
    "Total Stock",
    "STR %",
    "Records",
    "Excess Stock",
];

/// Render the full report as sectioned CSV text.
pub fn render_report_csv(report: &TransferReport) -> String {
    let mut out = String::new();

    section(&mut out, "Transfer Recommendations", &RECOMMENDATION_LABELS, {
        report
            .recommendations
            .iter()
            .map(|r| {
                vec![
                    r.product_name.clone(),
                    r.color.clone(),
                    r.size.clone(),
                    r.product_code.clone(),
                    r.from_store.clone(),
                    r.to_store.clone(),
                    r.quantity.to_string(),
                    r.sender_sold.to_string(),
                    r.sender_stock.to_string(),
                    format!("{:.1}", r.sender_str_pct),
                    r.receiver_sold.to_string(),
                    r.receiver_stock.to_string(),
                    format!("{:.1}", r.receiver_str_pct),
                    format!("{:.1}", r.str_gap_pct),
                    r.receiver_stock_status.to_string(),
                ]
            })
            .collect()
    });

    section(&mut out, "Rejected Variants", &REJECTION_LABELS, {
        report
            .rejections
            .iter()
            .map(|r| {
                vec![
                    r.product_name.clone(),
                    r.color.clone(),
                    r.size.clone(),
                    r.product_code.clone(),
                    r.store_count.to_string(),
                    format!("{:.1}", r.avg_str_pct),
                    r.reason.clone(),
                ]
            })
            .collect()
    });

    section(&mut out, "Store Metrics", &STORE_LABELS, {
        report
            .store_metrics
            .iter()
            .map(|m| {
                vec![
                    m.store.clone(),
                    m.total_sold.to_string(),
                    m.total_stock.to_string(),
                    format!("{:.1}", m.sell_through_pct),
                    m.record_count.to_string(),
                    m.excess_stock.to_string(),
                ]
            })
            .collect()
    });

    out
}

/// Append one labeled table. Field quoting is delegated to the csv writer.
fn section(out: &mut String, title: &str, labels: &[&str], rows: Vec<Vec<String>>) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str("# ");
    out.push_str(title);
    out.push('\n');

    let mut writer = csv::Writer::from_writer(Vec::new());
    // Writer errors only surface on I/O failure, which a Vec sink cannot
    // produce; flush() makes that explicit before unwrapping the buffer.
    let _ = writer.write_record(labels);
    for row in rows {
        let _ = writer.write_record(&row);
    }
    let _ = writer.flush();
    let buffer = writer.into_inner().unwrap_or_default();
    out.push_str(&String::from_utf8_lossy(&buffer));
}
