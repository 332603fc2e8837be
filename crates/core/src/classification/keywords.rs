//! Ordered keyword table for expense ledgers.
//!
//! Rules are evaluated top to bottom and the first rule whose keywords match
//! the ledger name (and whose exclusions do not) wins. Keywords of three
//! characters or fewer only match whole words (or their plural), so "pf"
//! does not fire inside "profit" while "fee" still fires for "Filing Fees".

use serde::{Deserialize, Serialize};

/// Note group used by the generic expense keywords.
pub const OTHER_EXPENSES: &str = "Other expenses";

/// Sub-note used when no keyword matches.
pub const FALLBACK_SUB_NOTE: &str = "Others";

/// Note group forced for depreciation ledgers.
pub const DEPRECIATION_NOTE_GROUP: &str = "Depreciation and amortisation expense";

/// Sub-note forced for depreciation ledgers.
pub const DEPRECIATION_SUB_NOTE: &str = "Depreciation on tangible assets";

/// One keyword → note group / sub-note mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Short rule name used in logs.
    pub name: String,
    /// Any of these keywords triggers the rule.
    pub keywords: Vec<String>,
    /// Any of these keywords suppresses the rule.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Note group (H3) assigned on match.
    pub note_group: String,
    /// Sub-note (H4) assigned on match.
    pub sub_note: String,
}

impl KeywordRule {
    fn new(name: &str, keywords: &[&str], note_group: &str, sub_note: &str) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            exclude: Vec::new(),
            note_group: note_group.to_string(),
            sub_note: sub_note.to_string(),
        }
    }

    fn excluding(mut self, exclude: &[&str]) -> Self {
        self.exclude = exclude.iter().map(|k| (*k).to_string()).collect();
        self
    }

    /// Whether this rule fires for a ledger name.
    #[must_use]
    pub fn matches(&self, ledger_name: &str) -> bool {
        let haystack = ledger_name.to_lowercase();
        let words = words(&haystack);
        let hit = |keyword: &String| keyword_matches(&haystack, &words, keyword);

        self.keywords.iter().any(hit) && !self.exclude.iter().any(hit)
    }
}

/// Result of a keyword lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch<'a> {
    /// Note group (H3).
    pub note_group: &'a str,
    /// Sub-note (H4).
    pub sub_note: &'a str,
}

/// Finds the first matching rule, falling back to `Other expenses / Others`.
#[must_use]
pub fn match_expense<'a>(rules: &'a [KeywordRule], ledger_name: &str) -> KeywordMatch<'a> {
    rules
        .iter()
        .find(|rule| rule.matches(ledger_name))
        .map_or(
            KeywordMatch {
                note_group: OTHER_EXPENSES,
                sub_note: FALLBACK_SUB_NOTE,
            },
            |rule| KeywordMatch {
                note_group: &rule.note_group,
                sub_note: &rule.sub_note,
            },
        )
}

/// The built-in expense keyword table.
///
/// Priority rules come first, followed by the generic "Other expenses"
/// sub-notes.
#[must_use]
pub fn standard_expense_keywords() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            "Audit Fee",
            &["audit fee", "auditor fee", "auditors fee", "statutory audit"],
            OTHER_EXPENSES,
            "Audit Fee",
        ),
        KeywordRule::new(
            "Bad Debts",
            &["bad debt", "doubtful debt", "written off"],
            OTHER_EXPENSES,
            "Bad debts written off",
        )
        .excluding(&["provision"]),
        KeywordRule::new(
            "Depreciation",
            &["depreciation", "amortisation", "amortization", "dep.", "depn"],
            DEPRECIATION_NOTE_GROUP,
            DEPRECIATION_SUB_NOTE,
        ),
        KeywordRule::new(
            "Power and Fuel",
            &[
                "electric", "generator", "fuel", "diesel", "petrol", "power", "energy", "gas",
            ],
            OTHER_EXPENSES,
            "Power and Fuel",
        ),
        KeywordRule::new(
            "Finance Costs",
            &["interest", "int", "int.", "finance charge"],
            "Finance costs",
            "Interest expense on borrowings",
        ),
        KeywordRule::new(
            "Legal and Professional",
            &[
                "legal", "professional", "consultan", "fee", "fees", "ca", "advocate", "lawyer",
            ],
            OTHER_EXPENSES,
            "Legal and Professional Fees",
        )
        .excluding(&["audit fee", "auditor"]),
        KeywordRule::new(
            "Provident Fund",
            &["pf", "epf", "p.f.", "e.p.f", "provident fund"],
            "Employee benefits expense",
            "Contribution to Provident Fund",
        ),
        KeywordRule::new("Rent", &["rent", "rental", "lease"], OTHER_EXPENSES, "Rent"),
        KeywordRule::new(
            "Rates and Taxes",
            &["tax", "rate", "cess", "municipal", "property tax", "gst", "tds"],
            OTHER_EXPENSES,
            "Rates and Taxes",
        ),
        KeywordRule::new(
            "Repairs",
            &["repair", "maintenance", "maint", "amc"],
            OTHER_EXPENSES,
            "Repairs and Maintenance - Others",
        ),
        KeywordRule::new(
            "Insurance",
            &["insurance", "premium", "lic"],
            OTHER_EXPENSES,
            "Insurance",
        ),
        KeywordRule::new(
            "Telephone",
            &[
                "telephone", "phone", "mobile", "internet", "broadband", "data", "telecom",
            ],
            OTHER_EXPENSES,
            "Telephone and Internet",
        ),
        KeywordRule::new(
            "Printing",
            &["printing", "stationery", "stationary", "paper"],
            OTHER_EXPENSES,
            "Printing and Stationery",
        ),
        KeywordRule::new(
            "Travelling",
            &[
                "travel",
                "travelling",
                "conveyance",
                "taxi",
                "transport",
                "vehicle",
                "cab",
            ],
            OTHER_EXPENSES,
            "Travelling and Conveyance",
        ),
        KeywordRule::new(
            "Bank Charges",
            &["bank charge", "banking", "bank fee"],
            OTHER_EXPENSES,
            "Bank Charges",
        ),
        KeywordRule::new(
            "Advertisement",
            &["advertis", "marketing", "promotion", "publicity"],
            OTHER_EXPENSES,
            "Advertisement and Publicity",
        ),
        KeywordRule::new(
            "Commission",
            &["commission", "brokerage"],
            OTHER_EXPENSES,
            "Commission and Brokerage",
        ),
        KeywordRule::new(
            "CSR",
            &["csr", "corporate social"],
            OTHER_EXPENSES,
            "Corporate Social Responsibility",
        ),
        KeywordRule::new(
            "Donations",
            &["donation", "charity"],
            OTHER_EXPENSES,
            "Donations",
        ),
        KeywordRule::new(
            "Miscellaneous",
            &["misc", "miscellaneous", "sundry", "general expense"],
            OTHER_EXPENSES,
            "Miscellaneous Expenses",
        ),
    ]
}

fn words(haystack: &str) -> Vec<&str> {
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

fn keyword_matches(haystack: &str, words: &[&str], keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return false;
    }
    if keyword.len() <= 3 && keyword.chars().all(char::is_alphanumeric) {
        return words
            .iter()
            .any(|w| *w == keyword || w.strip_suffix('s') == Some(keyword.as_str()));
    }
    haystack.contains(&keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Office Rent Paid", "Other expenses", "Rent")]
    #[case("Factory Lease Rentals", "Other expenses", "Rent")]
    #[case("Vehicle Insurance Premium", "Other expenses", "Insurance")]
    #[case("LIC Premium", "Other expenses", "Insurance")]
    #[case("Statutory Audit Fees", "Other expenses", "Audit Fee")]
    #[case("Professional Fees", "Other expenses", "Legal and Professional Fees")]
    #[case("Bad Debts Written Off", "Other expenses", "Bad debts written off")]
    #[case("Interest on OD", "Finance costs", "Interest expense on borrowings")]
    #[case("Employer PF Contribution", "Employee benefits expense", "Contribution to Provident Fund")]
    #[case("Electricity Charges", "Other expenses", "Power and Fuel")]
    #[case("Sundry Expenses", "Other expenses", "Miscellaneous Expenses")]
    #[case("Staff Tea", "Other expenses", "Others")]
    #[case("Property Taxes", "Other expenses", "Rates and Taxes")]
    #[case("ROC Filing Fees", "Other expenses", "Legal and Professional Fees")]
    #[case("Membership Fees", "Other expenses", "Legal and Professional Fees")]
    #[case("Mobile Data Charges", "Other expenses", "Telephone and Internet")]
    #[case("Foreign Travelling", "Other expenses", "Travelling and Conveyance")]
    fn test_match_expense(#[case] ledger: &str, #[case] note: &str, #[case] sub_note: &str) {
        let rules = standard_expense_keywords();
        let found = match_expense(&rules, ledger);
        assert_eq!(found.note_group, note);
        assert_eq!(found.sub_note, sub_note);
    }

    #[test]
    fn test_exclusion_skips_rule() {
        let rules = standard_expense_keywords();
        let found = match_expense(&rules, "Provision for Doubtful Debts");
        assert_ne!(found.sub_note, "Bad debts written off");
    }

    #[test]
    fn test_short_keywords_need_whole_words() {
        let rules = standard_expense_keywords();
        // "pf" inside "profit" and "int" inside "printing" must not fire.
        assert_eq!(match_expense(&rules, "Profit Share").sub_note, "Others");
        // Plurals of short keywords still count as whole words.
        assert_eq!(
            match_expense(&rules, "Municipal Rates and GSTs").sub_note,
            "Rates and Taxes"
        );
        assert_eq!(
            match_expense(&rules, "Printing Charges").sub_note,
            "Printing and Stationery"
        );
    }

    #[test]
    fn test_empty_name_falls_back() {
        let rules = standard_expense_keywords();
        let found = match_expense(&rules, "");
        assert_eq!(found.note_group, OTHER_EXPENSES);
        assert_eq!(found.sub_note, FALLBACK_SUB_NOTE);
    }
}
