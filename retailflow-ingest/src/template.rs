//! Sample upload template.
//!
//! A minimal dataset demonstrating the required schema, served by the
//! template endpoint so users can see exactly which columns an upload
//! needs. The two Oxford Shirt rows intentionally diverge enough to
//! produce a transfer recommendation when uploaded as-is.

/// File name offered for the template download.
pub const TEMPLATE_FILE_NAME: &str = "transfer_template.csv";

const TEMPLATE_ROWS: [[&str; 7]; 4] = [
    [
        "store_name",
        "product_code",
        "product_name",
        "color",
        "size",
        "units_sold",
        "units_in_stock",
    ],
    ["Harbor District", "P-1001", "Oxford Shirt", "White", "M", "15", "25"],
    ["Midtown Central", "P-1001", "Oxford Shirt", "White", "M", "8", "40"],
    ["Lakeside Plaza", "P-2002", "Straight Pant", "Black", "L", "12", "18"],
];

/// Render the sample CSV.
pub fn template_csv() -> String {
    let mut out = String::new();
    for row in TEMPLATE_ROWS {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
