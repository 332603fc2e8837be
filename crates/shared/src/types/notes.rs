//! Note numbering configuration.

use serde::{Deserialize, Serialize};

/// Engagement-scoped note numbering configuration.
///
/// Balance Sheet and P&L notes each occupy a contiguous range of note
/// numbers. Contingent liabilities optionally take one extra slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteNumberConfig {
    /// First Balance Sheet note number.
    pub bs_starting_note: u32,
    /// Number of Balance Sheet note slots.
    pub bs_note_count: u32,
    /// First P&L note number.
    pub pl_starting_note: u32,
    /// Number of P&L note slots.
    pub pl_note_count: u32,
    /// Whether a contingent liabilities note is rendered.
    pub include_contingent_liabilities: bool,
    /// Explicit contingent liabilities note number. Zero means unset.
    pub contingent_liability_note_no: Option<u32>,
}

impl Default for NoteNumberConfig {
    fn default() -> Self {
        // Notes 1 and 2 are reserved for corporate information and accounting policies.
        Self {
            bs_starting_note: 3,
            bs_note_count: 20,
            pl_starting_note: 23,
            pl_note_count: 15,
            include_contingent_liabilities: false,
            contingent_liability_note_no: None,
        }
    }
}
