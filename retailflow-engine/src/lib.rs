//! Inventory rebalancing recommendation engine.
//!
//! Takes per-store, per-product sales and inventory records and recommends
//! unit transfers between stores to equalize sell-through performance.
//! The pipeline is a pure, synchronous batch computation:
//!
//! 1. `normalizer` cleans raw tabular rows into typed records
//! 2. `store_metrics` computes per-store summary metrics
//! 3. `variant` groups records by product identity across stores
//! 4. `evaluator` picks send/receive store pairs and clamps quantities
//! 5. `report` sorts, truncates and packages the results
//!
//! `session` ties the stages together behind an explicit dataset handle.
//! The crate has no transport or file-format dependency; collaborators feed
//! it already-parsed rows and consume the structured report.

pub mod error;
pub mod evaluator;
pub mod normalizer;
pub mod report;
pub mod session;
pub mod store_metrics;
pub mod types;
pub mod variant;

pub use error::{EngineError, EngineResult};
pub use report::TransferReport;
pub use session::TransferSession;
