//! Bulk update error types.

use thiserror::Error;

/// Errors that can occur when applying a bulk update.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BulkUpdateError {
    /// No ledgers were selected.
    #[error("No ledgers selected")]
    EmptySelection,

    /// No field is uniform and no manual value was supplied.
    #[error("Nothing to apply: no uniform field and no manual value")]
    NothingToApply,
}

impl From<BulkUpdateError> for ledgerlens_shared::AppError {
    fn from(err: BulkUpdateError) -> Self {
        Self::BusinessRule(err.to_string())
    }
}
