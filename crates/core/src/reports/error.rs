//! Report error types.

use thiserror::Error;

use super::notes::StatementType;

/// Errors that can occur during report generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Balance Sheet and P&L note ranges overlap.
    #[error("Note ranges overlap: Balance Sheet {bs_start}-{bs_end}, P&L {pl_start}-{pl_end}")]
    OverlappingRanges {
        /// First Balance Sheet note.
        bs_start: u32,
        /// Last Balance Sheet note.
        bs_end: u32,
        /// First P&L note.
        pl_start: u32,
        /// Last P&L note.
        pl_end: u32,
    },

    /// The contingent liabilities note falls inside a statement range.
    #[error("Contingent liabilities note {note} collides with the {statement} range")]
    ContingentSlotCollision {
        /// Contingent note number.
        note: u32,
        /// Range it collides with.
        statement: StatementType,
    },

    /// A starting note of zero was configured.
    #[error("{0} notes must start at 1 or higher")]
    ZeroStartingNote(StatementType),
}

impl From<ReportError> for ledgerlens_shared::AppError {
    fn from(err: ReportError) -> Self {
        Self::Configuration(err.to_string())
    }
}
