//! Classification domain types.

use std::collections::HashMap;

use ledgerlens_shared::types::CompositeKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Financial statement a ledger rolls up into (H1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Statement {
    /// Balance Sheet.
    #[serde(rename = "Balance Sheet")]
    BalanceSheet,
    /// Statement of Profit and Loss.
    #[serde(rename = "P&L Account")]
    ProfitAndLoss,
}

impl Statement {
    /// Display string stored in the H1 field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::ProfitAndLoss => "P&L Account",
        }
    }

    /// Parses an H1 value. Accepts the legacy "Profit and Loss" spelling.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "balance sheet" => Some(Self::BalanceSheet),
            "p&l account" | "profit and loss" | "profit & loss" => Some(Self::ProfitAndLoss),
            _ => None,
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of the statement a face group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aile {
    /// Asset side of the Balance Sheet.
    Asset,
    /// Liability side of the Balance Sheet (includes equity).
    Liability,
    /// Income in the P&L.
    Income,
    /// Expense in the P&L.
    Expense,
}

/// Face group (H2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaceGroup {
    /// Current assets.
    #[serde(rename = "Current Assets")]
    CurrentAssets,
    /// Non-current assets.
    #[serde(rename = "Non-Current Assets")]
    NonCurrentAssets,
    /// Current liabilities.
    #[serde(rename = "Current Liabilities")]
    CurrentLiabilities,
    /// Non-current liabilities.
    #[serde(rename = "Non-Current Liabilities")]
    NonCurrentLiabilities,
    /// Equity / owners' funds.
    Equity,
    /// Income.
    Income,
    /// Expenses.
    Expenses,
}

impl FaceGroup {
    /// Every face group.
    pub const ALL: [Self; 7] = [
        Self::CurrentAssets,
        Self::NonCurrentAssets,
        Self::CurrentLiabilities,
        Self::NonCurrentLiabilities,
        Self::Equity,
        Self::Income,
        Self::Expenses,
    ];

    /// Display string stored in the H2 field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentAssets => "Current Assets",
            Self::NonCurrentAssets => "Non-Current Assets",
            Self::CurrentLiabilities => "Current Liabilities",
            Self::NonCurrentLiabilities => "Non-Current Liabilities",
            Self::Equity => "Equity",
            Self::Income => "Income",
            Self::Expenses => "Expenses",
        }
    }

    /// Parses an H2 value, ignoring case, hyphens and spacing.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let compact: String = value
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase();
        Self::ALL.into_iter().find(|group| {
            let candidate: String = group
                .as_str()
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_lowercase();
            candidate == compact
        })
    }

    /// Statement side of this face group.
    #[must_use]
    pub const fn aile(self) -> Aile {
        match self {
            Self::CurrentAssets | Self::NonCurrentAssets => Aile::Asset,
            Self::CurrentLiabilities | Self::NonCurrentLiabilities | Self::Equity => {
                Aile::Liability
            }
            Self::Income => Aile::Income,
            Self::Expenses => Aile::Expense,
        }
    }

    /// Statement this face group is presented in.
    #[must_use]
    pub const fn statement(self) -> Statement {
        match self.aile() {
            Aile::Asset | Aile::Liability => Statement::BalanceSheet,
            Aile::Income | Aile::Expense => Statement::ProfitAndLoss,
        }
    }
}

impl std::fmt::Display for FaceGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the statement (H1) from a face group (H2) value.
///
/// Returns `None` for values that are not a known face group.
#[must_use]
pub fn derive_h1(h2: &str) -> Option<Statement> {
    FaceGroup::parse(h2).map(FaceGroup::statement)
}

/// Natural balance direction of an account category.
///
/// Sign convention of imported balances: negative = debit, positive = credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NaturalBalance {
    /// Debit-natured (assets, expenses).
    Debit,
    /// Credit-natured (liabilities, equity, income).
    Credit,
}

impl NaturalBalance {
    /// Whether a closing balance runs against this natural direction.
    ///
    /// Zero is never abnormal.
    #[must_use]
    pub fn is_abnormal(self, closing_balance: Decimal) -> bool {
        match self {
            Self::Debit => closing_balance > Decimal::ZERO,
            Self::Credit => closing_balance < Decimal::ZERO,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

/// Classification status of a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowStatus {
    /// H1 and H2 are both set.
    Mapped,
    /// Nothing resolved.
    #[default]
    Unmapped,
    /// Partially resolved; needs user input.
    Error,
}

/// Origin of the current classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoFlag {
    /// Set by the automated classifier or a user rule.
    Yes,
    /// Set by a person (saved mapping or bulk update).
    Manual,
}

/// Amount column of a trial balance row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    /// Opening balance.
    Opening,
    /// Period debits.
    Debit,
    /// Period credits.
    Credit,
    /// Closing balance.
    #[default]
    Closing,
}

/// A resolved 5-level classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h1: Option<String>,
    /// Face group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h2: Option<String>,
    /// Note group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h3: Option<String>,
    /// Sub-note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h4: Option<String>,
    /// Reserved detail level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h5: Option<String>,
    /// Why balance logic moved this ledger, if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reclassification_reason: Option<String>,
}

impl Classification {
    /// Builds a classification under a face group, deriving H1.
    #[must_use]
    pub fn under(face_group: FaceGroup, note_group: &str, sub_note: Option<&str>) -> Self {
        Self {
            h1: Some(face_group.statement().as_str().to_string()),
            h2: Some(face_group.as_str().to_string()),
            h3: non_blank(note_group).map(str::to_string),
            h4: sub_note.and_then(non_blank).map(str::to_string),
            h5: None,
            reclassification_reason: None,
        }
    }

    /// True when no level is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.h1, &self.h2, &self.h3, &self.h4, &self.h5]
            .into_iter()
            .all(|level| is_blank(level.as_deref()))
    }
}

/// One trial-balance account for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Ledger name.
    pub ledger_name: String,
    /// Source system's group name.
    pub primary_group: String,
    /// Immediate parent group.
    #[serde(default)]
    pub parent_group: Option<String>,
    /// Opening balance (negative = debit).
    #[serde(default)]
    pub opening_balance: Decimal,
    /// Period debits.
    #[serde(default)]
    pub debit: Decimal,
    /// Period credits.
    #[serde(default)]
    pub credit: Decimal,
    /// Closing balance (negative = debit).
    #[serde(default)]
    pub closing_balance: Decimal,
    /// Statement.
    #[serde(default)]
    pub h1: Option<String>,
    /// Face group.
    #[serde(default)]
    pub h2: Option<String>,
    /// Note group.
    #[serde(default)]
    pub h3: Option<String>,
    /// Sub-note.
    #[serde(default)]
    pub h4: Option<String>,
    /// Reserved detail level.
    #[serde(default)]
    pub h5: Option<String>,
    /// Classification status.
    #[serde(default)]
    pub status: RowStatus,
    /// Persisted identity; generated from name and group when absent.
    #[serde(default)]
    pub composite_key: Option<CompositeKey>,
    /// Free-text audit notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Origin of the classification.
    #[serde(default)]
    pub auto: Option<AutoFlag>,
    /// Why the classification was set.
    #[serde(default)]
    pub auto_reason: Option<String>,
    /// Balance logic explanation.
    #[serde(default)]
    pub reclassification_reason: Option<String>,
}

impl LedgerRow {
    /// Creates an unclassified row.
    #[must_use]
    pub fn new(ledger_name: &str, primary_group: &str, closing_balance: Decimal) -> Self {
        Self {
            ledger_name: ledger_name.to_string(),
            primary_group: primary_group.to_string(),
            closing_balance,
            ..Self::default()
        }
    }

    /// Sets the parent group.
    #[must_use]
    pub fn with_parent(mut self, parent_group: &str) -> Self {
        self.parent_group = Some(parent_group.to_string());
        self
    }

    /// Stable identity used to join saved manual classifications.
    #[must_use]
    pub fn key(&self) -> CompositeKey {
        self.composite_key
            .clone()
            .unwrap_or_else(|| CompositeKey::new(&self.ledger_name, &self.primary_group))
    }

    /// Reads one amount column.
    #[must_use]
    pub const fn amount(&self, field: AmountField) -> Decimal {
        match field {
            AmountField::Opening => self.opening_balance,
            AmountField::Debit => self.debit,
            AmountField::Credit => self.credit,
            AmountField::Closing => self.closing_balance,
        }
    }

    /// Current classification fields.
    #[must_use]
    pub fn classification(&self) -> Classification {
        Classification {
            h1: self.h1.clone(),
            h2: self.h2.clone(),
            h3: self.h3.clone(),
            h4: self.h4.clone(),
            h5: self.h5.clone(),
            reclassification_reason: self.reclassification_reason.clone(),
        }
    }

    /// Replaces every classification level and refreshes the status.
    pub fn apply_classification(&mut self, classification: Classification) {
        self.h1 = classification.h1;
        self.h2 = classification.h2;
        self.h3 = classification.h3;
        self.h4 = classification.h4;
        self.h5 = classification.h5;
        self.reclassification_reason = classification.reclassification_reason;
        self.refresh_status();
    }

    /// Recomputes `status` from H1 and H2.
    pub fn refresh_status(&mut self) {
        let has_h1 = !is_blank(self.h1.as_deref());
        let has_h2 = !is_blank(self.h2.as_deref());
        self.status = match (has_h1, has_h2) {
            (true, true) => RowStatus::Mapped,
            (false, false) => RowStatus::Unmapped,
            _ => RowStatus::Error,
        };
    }

    /// Appends a line to `notes` unless it is already present.
    pub fn append_note(&mut self, note: &str) {
        match &mut self.notes {
            Some(existing) if existing.lines().any(|line| line == note) => {}
            Some(existing) if !existing.is_empty() => {
                existing.push('\n');
                existing.push_str(note);
            }
            _ => self.notes = Some(note.to_string()),
        }
    }
}

/// Saved manual classifications keyed by composite key.
///
/// Writes are last-writer-wins per key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedMappings(HashMap<CompositeKey, Classification>);

impl SavedMappings {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the saved classification for a key.
    #[must_use]
    pub fn get(&self, key: &CompositeKey) -> Option<&Classification> {
        self.0.get(key)
    }

    /// Records a classification, replacing any previous one for the key.
    pub fn record(&mut self, key: CompositeKey, classification: Classification) {
        self.0.insert(key, classification);
    }

    /// Number of saved mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over saved mappings.
    pub fn iter(&self) -> impl Iterator<Item = (&CompositeKey, &Classification)> {
        self.0.iter()
    }
}

impl FromIterator<(CompositeKey, Classification)> for SavedMappings {
    fn from_iter<I: IntoIterator<Item = (CompositeKey, Classification)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// True for `None`, empty or whitespace-only values.
#[must_use]
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("Current Assets", Statement::BalanceSheet, Aile::Asset)]
    #[case("Non-Current Assets", Statement::BalanceSheet, Aile::Asset)]
    #[case("Current Liabilities", Statement::BalanceSheet, Aile::Liability)]
    #[case("non current liabilities", Statement::BalanceSheet, Aile::Liability)]
    #[case("EQUITY", Statement::BalanceSheet, Aile::Liability)]
    #[case("Income", Statement::ProfitAndLoss, Aile::Income)]
    #[case("Expenses", Statement::ProfitAndLoss, Aile::Expense)]
    fn test_face_group_derivation(
        #[case] h2: &str,
        #[case] statement: Statement,
        #[case] aile: Aile,
    ) {
        let group = FaceGroup::parse(h2).unwrap();
        assert_eq!(group.aile(), aile);
        assert_eq!(derive_h1(h2), Some(statement));
    }

    #[test]
    fn test_derive_h1_unknown() {
        assert_eq!(derive_h1("Assets and stuff"), None);
        assert_eq!(derive_h1(""), None);
    }

    #[test]
    fn test_statement_parse() {
        assert_eq!(Statement::parse("P&L Account"), Some(Statement::ProfitAndLoss));
        assert_eq!(Statement::parse("Profit and Loss"), Some(Statement::ProfitAndLoss));
        assert_eq!(Statement::parse(" balance sheet "), Some(Statement::BalanceSheet));
        assert_eq!(Statement::parse("Asset"), None);
    }

    #[test]
    fn test_abnormal_balance_direction() {
        assert!(NaturalBalance::Debit.is_abnormal(dec!(0.01)));
        assert!(!NaturalBalance::Debit.is_abnormal(dec!(-0.01)));
        assert!(NaturalBalance::Credit.is_abnormal(dec!(-0.01)));
        assert!(!NaturalBalance::Credit.is_abnormal(dec!(0.01)));
        assert!(!NaturalBalance::Debit.is_abnormal(Decimal::ZERO));
        assert!(!NaturalBalance::Credit.is_abnormal(Decimal::ZERO));
    }

    #[test]
    fn test_status_refresh() {
        let mut row = LedgerRow::new("Cash", "Cash-in-Hand", dec!(-100));
        row.refresh_status();
        assert_eq!(row.status, RowStatus::Unmapped);

        row.h2 = Some("Current Assets".into());
        row.refresh_status();
        assert_eq!(row.status, RowStatus::Error);

        row.h1 = Some("Balance Sheet".into());
        row.refresh_status();
        assert_eq!(row.status, RowStatus::Mapped);

        row.h1 = Some("   ".into());
        row.refresh_status();
        assert_eq!(row.status, RowStatus::Error);
    }

    #[test]
    fn test_append_note_is_deduplicated() {
        let mut row = LedgerRow::new("Cash", "Cash-in-Hand", Decimal::ZERO);
        row.append_note("first");
        row.append_note("second");
        row.append_note("first");
        assert_eq!(row.notes.as_deref(), Some("first\nsecond"));
    }

    #[test]
    fn test_key_prefers_persisted_value() {
        let mut row = LedgerRow::new("Cash", "Cash-in-Hand", Decimal::ZERO);
        assert_eq!(row.key().as_str(), "Cash|Cash-in-Hand");
        row.composite_key = Some(CompositeKey::from("legacy-key".to_string()));
        assert_eq!(row.key().as_str(), "legacy-key");
    }

    #[test]
    fn test_saved_mappings_last_writer_wins() {
        let key = CompositeKey::new("HDFC", "Bank Accounts");
        let mut saved = SavedMappings::new();
        saved.record(
            key.clone(),
            Classification::under(FaceGroup::CurrentAssets, "Cash and cash equivalents", None),
        );
        saved.record(
            key.clone(),
            Classification::under(FaceGroup::CurrentLiabilities, "Short-term borrowings", None),
        );
        assert_eq!(saved.len(), 1);
        assert_eq!(
            saved.get(&key).unwrap().h3.as_deref(),
            Some("Short-term borrowings")
        );
    }

    #[test]
    fn test_row_deserializes_with_defaults() {
        let row: LedgerRow = serde_json::from_str(
            r#"{"ledger_name":"Cash","primary_group":"Cash-in-Hand","closing_balance":"-250.50"}"#,
        )
        .unwrap();
        assert_eq!(row.closing_balance, dec!(-250.50));
        assert_eq!(row.status, RowStatus::Unmapped);
        assert!(row.h1.is_none());
    }
}
