//! Report types.

use std::collections::BTreeMap;

use ledgerlens_shared::types::{CompositeKey, Constitution};
use rust_decimal::Decimal;
use serde::Serialize;

use super::notes::NoteNumberRange;
use super::structure::LineSection;
use crate::classification::Statement;

/// Statement a row's amount falls into for uncategorised totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Balance Sheet.
    BalanceSheet,
    /// Statement of Profit and Loss.
    ProfitAndLoss,
    /// H1 missing or unrecognised.
    Unassigned,
}

impl From<Option<Statement>> for Section {
    fn from(statement: Option<Statement>) -> Self {
        match statement {
            Some(Statement::BalanceSheet) => Self::BalanceSheet,
            Some(Statement::ProfitAndLoss) => Self::ProfitAndLoss,
            None => Self::Unassigned,
        }
    }
}

/// Per-bucket totals for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    /// Sum per bucket key.
    pub buckets: BTreeMap<String, Decimal>,
    /// Sum of rows that reached no bucket, per section.
    pub uncategorised: BTreeMap<Section, Decimal>,
    /// Keys of rows that reached no bucket.
    pub uncategorised_rows: Vec<CompositeKey>,
}

impl Aggregation {
    /// Total of a bucket, zero when absent.
    #[must_use]
    pub fn get(&self, bucket: &str) -> Decimal {
        self.buckets.get(bucket).copied().unwrap_or_default()
    }

    /// Uncategorised total of a section, zero when absent.
    #[must_use]
    pub fn uncategorised_in(&self, section: Section) -> Decimal {
        self.uncategorised
            .get(&section)
            .copied()
            .unwrap_or_default()
    }

    /// True when any section has a non-zero uncategorised total.
    #[must_use]
    pub fn has_uncategorised_balance(&self) -> bool {
        self.uncategorised.values().any(|total| !total.is_zero())
    }
}

/// Aggregations for the current and prior period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodAggregates {
    /// Current period.
    pub current: Aggregation,
    /// Prior period.
    pub previous: Aggregation,
}

/// One presented line of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    /// Stable technical code.
    pub technical_code: String,
    /// Display label for the entity type.
    pub label: String,
    /// Section within the statement.
    pub section: LineSection,
    /// Assigned note number, when one was available.
    pub note_number: Option<u32>,
    /// Current period amount in presentation sign.
    pub current: Decimal,
    /// Prior period amount in presentation sign.
    pub previous: Decimal,
}

/// Section subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionTotal {
    /// Section.
    pub section: LineSection,
    /// Current period total.
    pub current: Decimal,
    /// Prior period total.
    pub previous: Decimal,
}

/// A rendered Balance Sheet or Statement of Profit and Loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementReport {
    /// Statement.
    pub statement: Statement,
    /// Lines with a value in either period.
    pub lines: Vec<ReportLine>,
    /// Section subtotals.
    pub totals: Vec<SectionTotal>,
    /// Current period amount that reached no line.
    pub uncategorised_current: Decimal,
    /// Prior period amount that reached no line.
    pub uncategorised_previous: Decimal,
}

/// Both statements plus the note configuration used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialStatements {
    /// Entity constitution.
    pub constitution: Constitution,
    /// Whether Schedule III applies.
    pub schedule_iii: bool,
    /// Balance Sheet.
    pub balance_sheet: StatementReport,
    /// Statement of Profit and Loss.
    pub profit_and_loss: StatementReport,
    /// Note ranges in use.
    pub note_ranges: NoteNumberRange,
    /// Contingent liabilities note number, when included.
    pub contingent_liabilities_note: Option<u32>,
    /// Current period amount with no H1.
    pub unassigned_current: Decimal,
    /// Prior period amount with no H1.
    pub unassigned_previous: Decimal,
}
