//! Statement line structure.
//!
//! The ordered Schedule III line items of both statements. Each line knows
//! which H3 note groups roll into it; that mapping is the default bucket
//! function of the aggregator.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::classification::rules::normalize_group;
use crate::classification::{LedgerRow, RowStatus, Statement};

/// Section of a statement a line sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSection {
    /// Shareholders' / owners' funds.
    Equity,
    /// Non-current liabilities.
    NonCurrentLiabilities,
    /// Current liabilities.
    CurrentLiabilities,
    /// Non-current assets.
    NonCurrentAssets,
    /// Current assets.
    CurrentAssets,
    /// Revenue and other income.
    Revenue,
    /// Expenses.
    Expenses,
}

impl LineSection {
    /// Whether the section carries debit balances.
    #[must_use]
    pub const fn is_debit_natured(self) -> bool {
        matches!(
            self,
            Self::NonCurrentAssets | Self::CurrentAssets | Self::Expenses
        )
    }

    /// Converts a signed ledger total (negative = debit) to the amount shown.
    ///
    /// Debit-natured sections flip the sign so a normal balance prints
    /// positive.
    #[must_use]
    pub fn present(self, amount: Decimal) -> Decimal {
        if self.is_debit_natured() { -amount } else { amount }
    }
}

/// One line item of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementLine {
    /// Stable technical code, also the bucket key.
    pub technical_code: &'static str,
    /// Statement the line belongs to.
    pub statement: Statement,
    /// Section within the statement.
    pub section: LineSection,
    /// H3 note groups that roll into this line.
    pub note_groups: Vec<&'static str>,
}

impl StatementLine {
    fn new(
        technical_code: &'static str,
        statement: Statement,
        section: LineSection,
        note_groups: &[&'static str],
    ) -> Self {
        Self {
            technical_code,
            statement,
            section,
            note_groups: note_groups.to_vec(),
        }
    }

    /// True when the note group rolls into this line, ignoring case and
    /// spacing.
    #[must_use]
    pub fn accepts(&self, note_group: &str) -> bool {
        let wanted = normalize_group(note_group);
        self.note_groups
            .iter()
            .any(|alias| normalize_group(alias) == wanted)
    }
}

/// Ordered line items of both statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementStructure {
    lines: Vec<StatementLine>,
}

impl Default for StatementStructure {
    fn default() -> Self {
        Self::schedule_iii()
    }
}

impl StatementStructure {
    /// Builds a structure from explicit lines.
    #[must_use]
    pub const fn new(lines: Vec<StatementLine>) -> Self {
        Self { lines }
    }

    /// Schedule III layout for both statements.
    #[must_use]
    pub fn schedule_iii() -> Self {
        use LineSection::{
            CurrentAssets, CurrentLiabilities, Equity, Expenses, NonCurrentAssets,
            NonCurrentLiabilities, Revenue,
        };
        use Statement::{BalanceSheet as Bs, ProfitAndLoss as Pl};

        Self::new(vec![
            StatementLine::new(
                "SHARE_CAPITAL",
                Bs,
                Equity,
                &["Share capital", "Partners capital accounts", "Capital account"],
            ),
            StatementLine::new("CURRENT_ACCOUNT", Bs, Equity, &["Partners current accounts"]),
            StatementLine::new("RESERVES_SURPLUS", Bs, Equity, &["Reserves and surplus"]),
            StatementLine::new(
                "LONG_TERM_BORROWINGS",
                Bs,
                NonCurrentLiabilities,
                &["Long-term borrowings", "Long term borrowings"],
            ),
            StatementLine::new(
                "DEFERRED_TAX_LIABILITIES",
                Bs,
                NonCurrentLiabilities,
                &["Deferred tax liabilities (net)", "Deferred tax liabilities"],
            ),
            StatementLine::new(
                "LONG_TERM_PROVISIONS",
                Bs,
                NonCurrentLiabilities,
                &["Long-term provisions", "Long term provisions"],
            ),
            StatementLine::new(
                "SHORT_TERM_BORROWINGS",
                Bs,
                CurrentLiabilities,
                &["Short term borrowings", "Short-term borrowings"],
            ),
            StatementLine::new("TRADE_PAYABLES", Bs, CurrentLiabilities, &["Trade payables"]),
            StatementLine::new(
                "OTHER_CURRENT_LIABILITIES",
                Bs,
                CurrentLiabilities,
                &["Other current liabilities"],
            ),
            StatementLine::new(
                "SHORT_TERM_PROVISIONS",
                Bs,
                CurrentLiabilities,
                &["Short-term provisions", "Short term provisions"],
            ),
            StatementLine::new(
                "FIXED_ASSETS",
                Bs,
                NonCurrentAssets,
                &["Property, Plant and Equipment", "Fixed assets"],
            ),
            StatementLine::new("INTANGIBLE_ASSETS", Bs, NonCurrentAssets, &["Intangible assets"]),
            StatementLine::new(
                "NON_CURRENT_INVESTMENTS",
                Bs,
                NonCurrentAssets,
                &["Non-current investments"],
            ),
            StatementLine::new("CURRENT_INVESTMENTS", Bs, CurrentAssets, &["Current investments"]),
            StatementLine::new("INVENTORIES", Bs, CurrentAssets, &["Inventories"]),
            StatementLine::new("TRADE_RECEIVABLES", Bs, CurrentAssets, &["Trade receivables"]),
            StatementLine::new(
                "CASH_BANK",
                Bs,
                CurrentAssets,
                &["Cash and cash equivalents", "Cash and bank balances"],
            ),
            StatementLine::new(
                "SHORT_TERM_LOANS_ADVANCES",
                Bs,
                CurrentAssets,
                &["Short term loans and advances", "Short-term loans and advances"],
            ),
            StatementLine::new("OTHER_CURRENT_ASSETS", Bs, CurrentAssets, &["Other current assets"]),
            StatementLine::new("REVENUE_OPERATIONS", Pl, Revenue, &["Revenue from operations"]),
            StatementLine::new("OTHER_INCOME", Pl, Revenue, &["Other income"]),
            StatementLine::new("COST_MATERIALS", Pl, Expenses, &["Cost of materials consumed"]),
            StatementLine::new(
                "PURCHASES_STOCK_TRADE",
                Pl,
                Expenses,
                &["Purchases of stock-in-trade"],
            ),
            StatementLine::new(
                "CHANGES_INVENTORIES",
                Pl,
                Expenses,
                &[
                    "Changes in inventories of finished goods, work-in-progress and stock-in-trade",
                    "Changes in inventories",
                ],
            ),
            StatementLine::new("EMPLOYEE_BENEFITS", Pl, Expenses, &["Employee benefits expense"]),
            StatementLine::new("FINANCE_COSTS", Pl, Expenses, &["Finance costs"]),
            StatementLine::new(
                "DEPRECIATION_AMORTIZATION",
                Pl,
                Expenses,
                &[
                    "Depreciation and amortisation expense",
                    "Depreciation and amortization expense",
                ],
            ),
            StatementLine::new("OTHER_EXPENSES", Pl, Expenses, &["Other expenses"]),
            StatementLine::new("TAX_EXPENSE", Pl, Expenses, &["Tax expense"]),
        ])
    }

    /// Every line, Balance Sheet first.
    #[must_use]
    pub fn lines(&self) -> &[StatementLine] {
        &self.lines
    }

    /// Lines of one statement in presentation order.
    pub fn lines_for(&self, statement: Statement) -> impl Iterator<Item = &StatementLine> {
        self.lines
            .iter()
            .filter(move |line| line.statement == statement)
    }

    /// Line a mapped row rolls into.
    ///
    /// Matches the row's H3 against line aliases. When the row's H1 names a
    /// statement, only lines of that statement are considered.
    #[must_use]
    pub fn line_for_row(&self, row: &LedgerRow) -> Option<&StatementLine> {
        if row.status != RowStatus::Mapped {
            return None;
        }
        let note_group = row.h3.as_deref()?;
        let statement = row.h1.as_deref().and_then(Statement::parse);
        self.lines.iter().find(|line| {
            statement.is_none_or(|wanted| wanted == line.statement) && line.accepts(note_group)
        })
    }

    /// Bucket key of a row: the technical code of its line.
    #[must_use]
    pub fn bucket_of(&self, row: &LedgerRow) -> Option<String> {
        self.line_for_row(row)
            .map(|line| line.technical_code.to_string())
    }
}
