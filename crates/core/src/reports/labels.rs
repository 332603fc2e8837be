//! Entity-type display labels.
//!
//! Statement lines are identified by stable technical codes. Companies see
//! Schedule III wording, non-corporate entities (LLPs, firms, trusts...) see
//! their own, and some lines do not apply to one of the two sets at all.

use ledgerlens_shared::types::{Constitution, LabelSet};
use serde::Serialize;

use crate::classification::Statement;

/// Label text marking a line as not applicable to a label set.
pub const NOT_APPLICABLE: &str = "N/A";

/// Labels of one technical code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelMapping {
    /// Stable technical code.
    pub technical_code: &'static str,
    /// Label for companies.
    pub corporate_label: &'static str,
    /// Label for non-corporate entities.
    pub nce_label: &'static str,
    /// Display order within its statement.
    pub display_order: u32,
}

impl LabelMapping {
    const fn new(
        technical_code: &'static str,
        corporate_label: &'static str,
        nce_label: &'static str,
        display_order: u32,
    ) -> Self {
        Self {
            technical_code,
            corporate_label,
            nce_label,
            display_order,
        }
    }

    /// Label text for a label set.
    #[must_use]
    pub const fn label_for(&self, set: LabelSet) -> &'static str {
        match set {
            LabelSet::Corporate => self.corporate_label,
            LabelSet::Nce => self.nce_label,
        }
    }
}

/// Result of a label lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLabel<'a> {
    /// Text to render.
    Label(&'a str),
    /// The line does not exist for this entity type.
    NotApplicable,
}

impl<'a> DisplayLabel<'a> {
    /// Rendered text; `"N/A"` when not applicable.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Label(label) => label,
            Self::NotApplicable => NOT_APPLICABLE,
        }
    }
}

/// Balance Sheet and P&L label tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCatalog {
    balance_sheet: Vec<LabelMapping>,
    profit_and_loss: Vec<LabelMapping>,
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl LabelCatalog {
    /// Built-in corporate / NCE labels.
    #[must_use]
    pub fn standard() -> Self {
        let balance_sheet = vec![
            LabelMapping::new("EQUITY_HEAD", "Shareholders' Funds", "Owners' Fund", 1),
            LabelMapping::new("SHARE_CAPITAL", "Share Capital", "Capital Account", 2),
            LabelMapping::new(
                "EQUITY_SHARE_CAPITAL",
                "Equity Share Capital",
                "Proprietor's Capital / Partners' Capital",
                3,
            ),
            LabelMapping::new("PREFERENCE_SHARE_CAPITAL", "Preference Share Capital", NOT_APPLICABLE, 4),
            LabelMapping::new("RESERVES_SURPLUS", "Reserves and Surplus", "Reserves and Surplus", 5),
            LabelMapping::new("CAPITAL_RESERVE", "Capital Reserve", "Capital Reserve", 6),
            LabelMapping::new("SECURITIES_PREMIUM", "Securities Premium", NOT_APPLICABLE, 7),
            LabelMapping::new("GENERAL_RESERVE", "General Reserve", "General Reserve", 8),
            LabelMapping::new("RETAINED_EARNINGS", "Surplus (P&L Account)", "Surplus (P&L Account)", 9),
            LabelMapping::new("CURRENT_ACCOUNT", NOT_APPLICABLE, "Current Accounts", 10),
            LabelMapping::new("DRAWINGS", NOT_APPLICABLE, "Less: Drawings", 11),
            LabelMapping::new("NON_CURRENT_LIABILITIES", "Non-Current Liabilities", "Non-Current Liabilities", 20),
            LabelMapping::new("CURRENT_LIABILITIES", "Current Liabilities", "Current Liabilities", 21),
            LabelMapping::new("LONG_TERM_BORROWINGS", "Long-term Borrowings", "Long-term Borrowings", 22),
            LabelMapping::new("SHORT_TERM_BORROWINGS", "Short-term Borrowings", "Short-term Borrowings", 23),
            LabelMapping::new("TRADE_PAYABLES", "Trade Payables", "Trade Payables", 24),
            LabelMapping::new(
                "DEFERRED_TAX_LIABILITIES",
                "Deferred Tax Liabilities (Net)",
                "Deferred Tax Liabilities (Net)",
                25,
            ),
            LabelMapping::new("LONG_TERM_PROVISIONS", "Long-term Provisions", "Long-term Provisions", 26),
            LabelMapping::new(
                "OTHER_CURRENT_LIABILITIES",
                "Other Current Liabilities",
                "Other Current Liabilities",
                27,
            ),
            LabelMapping::new("SHORT_TERM_PROVISIONS", "Short-term Provisions", "Short-term Provisions", 28),
            LabelMapping::new("NON_CURRENT_ASSETS", "Non-Current Assets", "Non-Current Assets", 30),
            LabelMapping::new("CURRENT_ASSETS", "Current Assets", "Current Assets", 31),
            LabelMapping::new("FIXED_ASSETS", "Property, Plant and Equipment", "Fixed Assets", 32),
            LabelMapping::new("INTANGIBLE_ASSETS", "Intangible Assets", "Intangible Assets", 33),
            LabelMapping::new("TRADE_RECEIVABLES", "Trade Receivables", "Trade Receivables", 34),
            LabelMapping::new("CASH_BANK", "Cash and Cash Equivalents", "Cash and Bank Balances", 35),
            LabelMapping::new("NON_CURRENT_INVESTMENTS", "Non-current Investments", "Investments", 36),
            LabelMapping::new("CURRENT_INVESTMENTS", "Current Investments", "Current Investments", 37),
            LabelMapping::new("INVENTORIES", "Inventories", "Inventories", 38),
            LabelMapping::new(
                "SHORT_TERM_LOANS_ADVANCES",
                "Short-term Loans and Advances",
                "Loans and Advances",
                39,
            ),
            LabelMapping::new("OTHER_CURRENT_ASSETS", "Other Current Assets", "Other Current Assets", 40),
        ];

        let profit_and_loss = vec![
            LabelMapping::new("REVENUE_OPERATIONS", "Revenue from Operations", "Revenue from Operations", 1),
            LabelMapping::new("OTHER_INCOME", "Other Income", "Other Income", 2),
            LabelMapping::new("COST_MATERIALS", "Cost of Materials Consumed", "Cost of Materials Consumed", 10),
            LabelMapping::new(
                "PURCHASES_STOCK_TRADE",
                "Purchases of Stock-in-Trade",
                "Purchases of Stock-in-Trade",
                11,
            ),
            LabelMapping::new(
                "CHANGES_INVENTORIES",
                "Changes in Inventories of FG, WIP and Stock-in-Trade",
                "Changes in Inventories",
                12,
            ),
            LabelMapping::new("EMPLOYEE_BENEFITS", "Employee Benefits Expense", "Employee Benefits Expense", 13),
            LabelMapping::new("FINANCE_COSTS", "Finance Costs", "Finance Costs", 14),
            LabelMapping::new(
                "DEPRECIATION_AMORTIZATION",
                "Depreciation and Amortisation Expense",
                "Depreciation and Amortisation Expense",
                15,
            ),
            LabelMapping::new("OTHER_EXPENSES", "Other Expenses", "Other Expenses", 16),
            LabelMapping::new("TAX_EXPENSE", "Tax Expense", "Tax Expense", 17),
        ];

        Self {
            balance_sheet,
            profit_and_loss,
        }
    }

    /// Label table of a statement.
    #[must_use]
    pub fn mappings(&self, statement: Statement) -> &[LabelMapping] {
        match statement {
            Statement::BalanceSheet => &self.balance_sheet,
            Statement::ProfitAndLoss => &self.profit_and_loss,
        }
    }

    /// Looks up a technical code.
    #[must_use]
    pub fn find(&self, technical_code: &str, statement: Statement) -> Option<&LabelMapping> {
        self.mappings(statement)
            .iter()
            .find(|mapping| mapping.technical_code == technical_code)
    }

    /// Label of a technical code for an entity.
    ///
    /// Unknown codes render as the code itself.
    #[must_use]
    pub fn display_label<'a>(
        &self,
        technical_code: &'a str,
        constitution: Constitution,
        statement: Statement,
    ) -> DisplayLabel<'a> {
        match self.find(technical_code, statement) {
            None => DisplayLabel::Label(technical_code),
            Some(mapping) => match mapping.label_for(constitution.label_set()) {
                NOT_APPLICABLE => DisplayLabel::NotApplicable,
                label => DisplayLabel::Label(label),
            },
        }
    }

    /// Keeps only the items whose label applies to the entity.
    #[must_use]
    pub fn filter_by_entity_type<T, F>(
        &self,
        items: Vec<T>,
        constitution: Constitution,
        statement: Statement,
        code_of: F,
    ) -> Vec<T>
    where
        F: Fn(&T) -> &str,
    {
        items
            .into_iter()
            .filter(|item| {
                self.display_label(code_of(item), constitution, statement)
                    != DisplayLabel::NotApplicable
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("FIXED_ASSETS", Constitution::Company, "Property, Plant and Equipment")]
    #[case("FIXED_ASSETS", Constitution::Partnership, "Fixed Assets")]
    #[case("CASH_BANK", Constitution::Company, "Cash and Cash Equivalents")]
    #[case("CASH_BANK", Constitution::Trust, "Cash and Bank Balances")]
    #[case("EQUITY_HEAD", Constitution::Llp, "Owners' Fund")]
    #[case("UNKNOWN_CODE", Constitution::Company, "UNKNOWN_CODE")]
    fn test_display_label(
        #[case] code: &str,
        #[case] constitution: Constitution,
        #[case] expected: &str,
    ) {
        let catalog = LabelCatalog::standard();
        assert_eq!(
            catalog
                .display_label(code, constitution, Statement::BalanceSheet)
                .as_str(),
            expected
        );
    }

    #[test]
    fn test_not_applicable_labels() {
        let catalog = LabelCatalog::standard();
        assert_eq!(
            catalog.display_label("SECURITIES_PREMIUM", Constitution::Society, Statement::BalanceSheet),
            DisplayLabel::NotApplicable
        );
        assert_eq!(
            catalog.display_label("DRAWINGS", Constitution::Company, Statement::BalanceSheet),
            DisplayLabel::NotApplicable
        );
    }

    #[test]
    fn test_statement_scopes_lookup() {
        let catalog = LabelCatalog::standard();
        // P&L codes are not found in the Balance Sheet table.
        assert_eq!(
            catalog
                .display_label("FINANCE_COSTS", Constitution::Company, Statement::BalanceSheet)
                .as_str(),
            "FINANCE_COSTS"
        );
        assert_eq!(
            catalog
                .display_label("FINANCE_COSTS", Constitution::Company, Statement::ProfitAndLoss)
                .as_str(),
            "Finance Costs"
        );
    }

    #[test]
    fn test_filter_by_entity_type() {
        let catalog = LabelCatalog::standard();
        let codes = vec!["SHARE_CAPITAL", "PREFERENCE_SHARE_CAPITAL", "CURRENT_ACCOUNT"];

        let company = catalog.filter_by_entity_type(
            codes.clone(),
            Constitution::Company,
            Statement::BalanceSheet,
            |c| *c,
        );
        assert_eq!(company, vec!["SHARE_CAPITAL", "PREFERENCE_SHARE_CAPITAL"]);

        let firm = catalog.filter_by_entity_type(
            codes,
            Constitution::Partnership,
            Statement::BalanceSheet,
            |c| *c,
        );
        assert_eq!(firm, vec!["SHARE_CAPITAL", "CURRENT_ACCOUNT"]);
    }

    #[test]
    fn test_technical_codes_are_unique_per_statement() {
        let catalog = LabelCatalog::standard();
        for statement in [Statement::BalanceSheet, Statement::ProfitAndLoss] {
            let mut codes: Vec<_> = catalog.mappings(statement).iter().map(|m| m.technical_code).collect();
            let total = codes.len();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), total);
        }
    }
}
