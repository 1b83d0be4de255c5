//! Engine error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A required column is absent from the uploaded header set.
    /// Fatal to the whole upload; raised before any row is processed.
    #[error("missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// No usable rows survived cleaning, or no dataset has been loaded.
    #[error("no usable rows in the current dataset")]
    EmptyInput,

    /// A report or export was requested before any successful analysis.
    #[error("no analysis has been run yet")]
    NotYetAnalyzed,
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
