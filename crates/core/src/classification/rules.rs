//! Group mapping rule table.
//!
//! Maps a source-system ledger group (e.g. "Bank Accounts") onto the face
//! group, note group and sub-note of the financial statements, with optional
//! sign-dependent reclassification.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::error::RuleTableError;
use super::keywords::{KeywordRule, standard_expense_keywords};
use super::types::{FaceGroup, NaturalBalance};

/// Target classification used when a balance runs against its natural side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLogic {
    /// Natural balance direction of the source group.
    pub natural_balance: NaturalBalance,
    /// Face group for abnormal balances.
    pub reclassify_face_group: FaceGroup,
    /// Note group for abnormal balances.
    pub reclassify_note_group: String,
    /// Sub-note for abnormal balances.
    pub reclassify_sub_note: Option<String>,
}

/// One row of the group mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    /// Source ledger group pattern.
    pub source_group: String,
    /// Face group (H2).
    pub face_group: FaceGroup,
    /// Note group (H3).
    pub note_group: String,
    /// Sub-note (H4).
    pub sub_note: Option<String>,
    /// Sign-dependent reclassification, when the group has one.
    pub balance_logic: Option<BalanceLogic>,
}

impl MappingRule {
    fn new(source_group: &str, face_group: FaceGroup, note_group: &str, sub_note: &str) -> Self {
        Self {
            source_group: source_group.to_string(),
            face_group,
            note_group: note_group.to_string(),
            sub_note: (!sub_note.is_empty()).then(|| sub_note.to_string()),
            balance_logic: None,
        }
    }

    fn reclassify(
        mut self,
        natural_balance: NaturalBalance,
        face_group: FaceGroup,
        note_group: &str,
        sub_note: &str,
    ) -> Self {
        self.balance_logic = Some(BalanceLogic {
            natural_balance,
            reclassify_face_group: face_group,
            reclassify_note_group: note_group.to_string(),
            reclassify_sub_note: (!sub_note.is_empty()).then(|| sub_note.to_string()),
        });
        self
    }
}

/// Loose wire shape of a mapping rule as found in external JSON tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRuleRecord {
    /// Source ledger group pattern.
    #[serde(alias = "tallyGroup", alias = "source_group")]
    pub source_group: String,
    /// Face group.
    #[serde(alias = "face_group")]
    pub face_group: String,
    /// Note group.
    #[serde(default, alias = "note_group")]
    pub note_group: String,
    /// Sub-note.
    #[serde(default, alias = "sub_note")]
    pub sub_note: Option<String>,
    /// Whether balance logic applies.
    #[serde(default, alias = "has_balance_logic")]
    pub has_balance_logic: bool,
    /// Natural balance direction.
    #[serde(default, alias = "natural_balance")]
    pub natural_balance: Option<NaturalBalance>,
    /// Reclassify face group.
    #[serde(default, alias = "reclassify_face_group")]
    pub reclassify_face_group: Option<String>,
    /// Reclassify note group.
    #[serde(default, alias = "reclassify_note_group")]
    pub reclassify_note_group: Option<String>,
    /// Reclassify sub-note.
    #[serde(default, alias = "reclassify_sub_note")]
    pub reclassify_sub_note: Option<String>,
}

impl TryFrom<MappingRuleRecord> for MappingRule {
    type Error = RuleTableError;

    fn try_from(record: MappingRuleRecord) -> Result<Self, Self::Error> {
        let source_group = record.source_group.trim().to_string();
        let face_group =
            FaceGroup::parse(&record.face_group).ok_or_else(|| RuleTableError::UnknownFaceGroup {
                source_group: source_group.clone(),
                face_group: record.face_group.clone(),
            })?;

        let balance_logic = if record.has_balance_logic {
            let (Some(natural_balance), Some(face), Some(note)) = (
                record.natural_balance,
                record.reclassify_face_group.as_deref(),
                record.reclassify_note_group.as_deref(),
            ) else {
                return Err(RuleTableError::MissingReclassification(source_group));
            };
            if note.trim().is_empty() {
                return Err(RuleTableError::MissingReclassification(source_group));
            }
            let reclassify_face_group =
                FaceGroup::parse(face).ok_or_else(|| RuleTableError::UnknownFaceGroup {
                    source_group: source_group.clone(),
                    face_group: face.to_string(),
                })?;
            Some(BalanceLogic {
                natural_balance,
                reclassify_face_group,
                reclassify_note_group: note.trim().to_string(),
                reclassify_sub_note: record.reclassify_sub_note.filter(|s| !s.trim().is_empty()),
            })
        } else {
            None
        };

        Ok(Self {
            source_group,
            face_group,
            note_group: record.note_group.trim().to_string(),
            sub_note: record.sub_note.filter(|s| !s.trim().is_empty()),
            balance_logic,
        })
    }
}

/// Immutable rule tables injected into the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    mapping_rules: Vec<MappingRule>,
    expense_keywords: Vec<KeywordRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleTable {
    /// Builds a table from validated parts.
    #[must_use]
    pub fn new(mapping_rules: Vec<MappingRule>, expense_keywords: Vec<KeywordRule>) -> Self {
        Self {
            mapping_rules,
            expense_keywords,
        }
    }

    /// Built-in tables for Tally-style trial balances.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_mapping_rules(), standard_expense_keywords())
    }

    /// Validates external records and builds a table with the built-in keyword rules.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid record, or when two records share a
    /// normalized source group.
    pub fn from_records(records: Vec<MappingRuleRecord>) -> Result<Self, RuleTableError> {
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            if record.source_group.trim().is_empty() {
                return Err(RuleTableError::EmptyPattern { index });
            }
            let rule = MappingRule::try_from(record)?;
            if !seen.insert(normalize_group(&rule.source_group)) {
                return Err(RuleTableError::DuplicatePattern(rule.source_group));
            }
            rules.push(rule);
        }

        Ok(Self::new(rules, standard_expense_keywords()))
    }

    /// Parses a JSON array of mapping records.
    ///
    /// # Errors
    ///
    /// Returns [`RuleTableError::Parse`] for malformed JSON and the validation
    /// errors of [`RuleTable::from_records`].
    pub fn from_json(json: &str) -> Result<Self, RuleTableError> {
        let records: Vec<MappingRuleRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Mapping rules in evaluation order.
    #[must_use]
    pub fn mapping_rules(&self) -> &[MappingRule] {
        &self.mapping_rules
    }

    /// Expense keyword rules in evaluation order.
    #[must_use]
    pub fn expense_keywords(&self) -> &[KeywordRule] {
        &self.expense_keywords
    }

    /// Finds the rule for a ledger group.
    ///
    /// Exact match on the normalized name wins; otherwise the first rule
    /// where either name contains the other.
    #[must_use]
    pub fn find_matching_rule(&self, group: &str) -> Option<&MappingRule> {
        let needle = normalize_group(group);
        if needle.is_empty() {
            return None;
        }

        self.mapping_rules
            .iter()
            .find(|rule| normalize_group(&rule.source_group) == needle)
            .or_else(|| {
                self.mapping_rules.iter().find(|rule| {
                    let pattern = normalize_group(&rule.source_group);
                    !pattern.is_empty() && (needle.contains(&pattern) || pattern.contains(&needle))
                })
            })
    }

    /// Distinct face groups the table can produce, including reclassify targets.
    #[must_use]
    pub fn face_groups(&self) -> Vec<FaceGroup> {
        let mut groups = BTreeSet::new();
        for rule in &self.mapping_rules {
            groups.insert(rule.face_group);
            if let Some(logic) = &rule.balance_logic {
                groups.insert(logic.reclassify_face_group);
            }
        }
        groups.into_iter().collect()
    }

    /// Sorted note groups under a face group.
    #[must_use]
    pub fn note_groups_for(&self, face_group: FaceGroup) -> Vec<&str> {
        let groups: BTreeSet<&str> = self
            .mapping_rules
            .iter()
            .filter(|rule| rule.face_group == face_group)
            .map(|rule| rule.note_group.as_str())
            .filter(|note| !note.is_empty())
            .collect();
        groups.into_iter().collect()
    }

    /// Sorted sub-notes under a note group.
    #[must_use]
    pub fn sub_notes_for(&self, note_group: &str) -> Vec<&str> {
        let subs: BTreeSet<&str> = self
            .mapping_rules
            .iter()
            .filter(|rule| rule.note_group.eq_ignore_ascii_case(note_group))
            .filter_map(|rule| rule.sub_note.as_deref())
            .collect();
        subs.into_iter().collect()
    }
}

/// Lowercases, trims and collapses inner whitespace.
#[must_use]
pub fn normalize_group(group: &str) -> String {
    group
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[allow(clippy::too_many_lines)]
fn standard_mapping_rules() -> Vec<MappingRule> {
    use FaceGroup::{
        CurrentAssets, CurrentLiabilities, Equity, Expenses, Income, NonCurrentAssets,
        NonCurrentLiabilities,
    };
    use NaturalBalance::{Credit, Debit};

    const CASH: &str = "Cash and cash equivalents";
    const BANK_BALANCE: &str = "Balances with banks in current accounts";
    const ST_BORROWINGS: &str = "Short term borrowings";
    const BANK_LOAN: &str = "Secured Loans repayable on demand from banks";
    const PPE: &str = "Property, Plant and Equipment";
    const INTANGIBLES: &str = "Intangible assets";
    const NC_INVESTMENTS: &str = "Non-current investments";
    const LT_BORROWINGS: &str = "Long-term borrowings";
    const OCL: &str = "Other current liabilities";
    const OCA: &str = "Other current assets";
    const ST_PROVISIONS: &str = "Short-term provisions";
    const SHARE_CAPITAL: &str = "Share capital";
    const RESERVES: &str = "Reserves and surplus";
    const REVENUE: &str = "Revenue from operations";
    const OTHER_INCOME: &str = "Other income";
    const MATERIALS: &str = "Cost of materials consumed";
    const EMPLOYEE: &str = "Employee benefits expense";
    const OTHER_EXPENSES: &str = "Other expenses";
    const FINANCE: &str = "Finance costs";
    const DEPRECIATION: &str = "Depreciation and amortisation expense";

    vec![
        // Current assets
        MappingRule::new("Bank Accounts", CurrentAssets, CASH, BANK_BALANCE).reclassify(
            Debit,
            CurrentLiabilities,
            ST_BORROWINGS,
            BANK_LOAN,
        ),
        MappingRule::new("Bank OCC A/c", CurrentLiabilities, ST_BORROWINGS, BANK_LOAN).reclassify(
            Credit,
            CurrentAssets,
            CASH,
            BANK_BALANCE,
        ),
        MappingRule::new("Bank OD A/c", CurrentLiabilities, ST_BORROWINGS, BANK_LOAN).reclassify(
            Credit,
            CurrentAssets,
            CASH,
            BANK_BALANCE,
        ),
        MappingRule::new("Cash-in-Hand", CurrentAssets, CASH, "Cash on hand"),
        MappingRule::new("Deposits (Asset)", CurrentAssets, OCA, "Security deposits"),
        MappingRule::new(
            "Loans & Advances (Asset)",
            CurrentAssets,
            "Short term loans and advances",
            "",
        ),
        MappingRule::new("Stock-in-Hand", CurrentAssets, "Inventories", "Raw materials"),
        MappingRule::new(
            "Sundry Debtors",
            CurrentAssets,
            "Trade receivables",
            "Unsecured, considered good",
        )
        .reclassify(Debit, CurrentLiabilities, OCL, "Advance from customers"),
        MappingRule::new(
            "Sundry Creditors",
            CurrentLiabilities,
            "Trade payables",
            "Total outstanding dues of creditors other than micro and small enterprises",
        )
        .reclassify(Credit, CurrentAssets, OCA, "Advance to suppliers"),
        // Fixed assets
        MappingRule::new("Fixed Assets", NonCurrentAssets, PPE, ""),
        MappingRule::new("Computers", NonCurrentAssets, PPE, "Computers and IT equipment"),
        MappingRule::new("Furniture & Fixtures", NonCurrentAssets, PPE, "Furniture and fixtures"),
        MappingRule::new("Plant & Machinery", NonCurrentAssets, PPE, "Plant and machinery"),
        MappingRule::new("Building", NonCurrentAssets, PPE, "Buildings"),
        MappingRule::new("Land", NonCurrentAssets, PPE, "Freehold land"),
        MappingRule::new("Vehicles", NonCurrentAssets, PPE, "Vehicles"),
        MappingRule::new("Office Equipment", NonCurrentAssets, PPE, "Office equipment"),
        MappingRule::new("Intangible Assets", NonCurrentAssets, INTANGIBLES, ""),
        MappingRule::new("Goodwill", NonCurrentAssets, INTANGIBLES, "Goodwill"),
        MappingRule::new(
            "Patents & Trademarks",
            NonCurrentAssets,
            INTANGIBLES,
            "Patents and trademarks",
        ),
        // Investments
        MappingRule::new("Investments", NonCurrentAssets, NC_INVESTMENTS, ""),
        MappingRule::new(
            "Investment in Shares",
            NonCurrentAssets,
            NC_INVESTMENTS,
            "Investment in equity instruments",
        ),
        MappingRule::new(
            "Investment in Debentures",
            NonCurrentAssets,
            NC_INVESTMENTS,
            "Investment in debentures or bonds",
        ),
        MappingRule::new(
            "Investment in Mutual Funds",
            CurrentAssets,
            "Current investments",
            "Investment in mutual funds",
        ),
        // Non-current liabilities
        MappingRule::new("Secured Loans", NonCurrentLiabilities, LT_BORROWINGS, "Term loans from banks"),
        MappingRule::new("Unsecured Loans", NonCurrentLiabilities, LT_BORROWINGS, "Unsecured loans"),
        MappingRule::new("Loans (Liability)", NonCurrentLiabilities, LT_BORROWINGS, ""),
        MappingRule::new("Long Term Provisions", NonCurrentLiabilities, "Long-term provisions", ""),
        MappingRule::new(
            "Deferred Tax Liability",
            NonCurrentLiabilities,
            "Deferred tax liabilities (net)",
            "",
        ),
        // Current liabilities
        MappingRule::new("Current Liabilities", CurrentLiabilities, OCL, ""),
        MappingRule::new("Duties & Taxes", CurrentLiabilities, OCL, "Statutory dues payable")
            .reclassify(Credit, CurrentAssets, OCA, "Balances with government authorities"),
        MappingRule::new("Provisions", CurrentLiabilities, ST_PROVISIONS, ""),
        MappingRule::new("Short Term Provisions", CurrentLiabilities, ST_PROVISIONS, ""),
        // Equity
        MappingRule::new("Capital Account", Equity, SHARE_CAPITAL, "Equity share capital"),
        MappingRule::new("Share Capital", Equity, SHARE_CAPITAL, "Equity share capital"),
        MappingRule::new("Reserves & Surplus", Equity, RESERVES, ""),
        MappingRule::new("General Reserve", Equity, RESERVES, "General reserve"),
        MappingRule::new("Profit & Loss A/c", Equity, RESERVES, "Surplus (Profit and Loss Account)"),
        MappingRule::new("Retained Earnings", Equity, RESERVES, "Retained earnings"),
        MappingRule::new("Partners Capital", Equity, "Partners capital accounts", ""),
        MappingRule::new("Partners Current A/c", Equity, "Partners current accounts", "").reclassify(
            Credit,
            CurrentAssets,
            "Short term loans and advances",
            "Loans to partners",
        ),
        // Income
        MappingRule::new("Sales Accounts", Income, REVENUE, "Sale of products"),
        MappingRule::new("Revenue", Income, REVENUE, ""),
        MappingRule::new("Direct Incomes", Income, REVENUE, "Sale of services"),
        MappingRule::new("Indirect Incomes", Income, OTHER_INCOME, ""),
        MappingRule::new("Interest Income", Income, OTHER_INCOME, "Interest income"),
        MappingRule::new("Dividend Income", Income, OTHER_INCOME, "Dividend income"),
        MappingRule::new("Rent Received", Income, OTHER_INCOME, "Rental income"),
        MappingRule::new("Commission Received", Income, OTHER_INCOME, "Commission income"),
        // Cost of materials
        MappingRule::new("Purchase Accounts", Expenses, MATERIALS, "Purchases of stock-in-trade"),
        MappingRule::new("Direct Expenses", Expenses, MATERIALS, ""),
        MappingRule::new("Manufacturing Expenses", Expenses, MATERIALS, "Manufacturing expenses"),
        // Employee benefits
        MappingRule::new("Indirect Expenses", Expenses, OTHER_EXPENSES, ""),
        MappingRule::new("Salaries & Wages", Expenses, EMPLOYEE, "Salaries and wages"),
        MappingRule::new("Staff Welfare", Expenses, EMPLOYEE, "Staff welfare expenses"),
        MappingRule::new("Bonus", Expenses, EMPLOYEE, "Bonus"),
        MappingRule::new("Gratuity", Expenses, EMPLOYEE, "Contribution to gratuity"),
        MappingRule::new("PF Contribution", Expenses, EMPLOYEE, "Contribution to provident fund"),
        MappingRule::new("ESI Contribution", Expenses, EMPLOYEE, "Contribution to ESI"),
        // Other expenses
        MappingRule::new("Administrative Expenses", Expenses, OTHER_EXPENSES, "Administrative expenses"),
        MappingRule::new("Rent Paid", Expenses, OTHER_EXPENSES, "Rent"),
        MappingRule::new("Interest Paid", Expenses, FINANCE, "Interest expense"),
        MappingRule::new("Bank Charges", Expenses, FINANCE, "Bank charges"),
        MappingRule::new("Depreciation", Expenses, DEPRECIATION, "Depreciation on tangible assets"),
        MappingRule::new("Amortisation", Expenses, DEPRECIATION, "Amortisation of intangible assets"),
        MappingRule::new("Income Tax", Expenses, "Tax expense", "Current tax"),
    ]
}
