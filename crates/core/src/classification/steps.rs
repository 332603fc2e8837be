//! Classification priority chain.
//!
//! Each step either resolves a row or defers to the next one. The classifier
//! runs them in order and stops at the first resolution:
//!
//! 1. [`SavedMappingStep`]: a manual classification saved for the composite key
//! 2. [`SpecialCaseStep`]: hard-coded receivables and indirect-expense handling
//! 3. [`BalanceLogicStep`]: abnormal balances of groups with balance logic
//! 4. [`DefaultTableStep`]: the group mapping table

use serde::Serialize;

use super::keywords::{self, DEPRECIATION_NOTE_GROUP, DEPRECIATION_SUB_NOTE};
use super::rules::{RuleTable, normalize_group};
use super::types::{Classification, FaceGroup, LedgerRow, SavedMappings};

const RECEIVABLE_GROUPS: [&str; 3] = ["sundry debtors", "debtors", "trade receivables"];
const INDIRECT_EXPENSES: &str = "indirect expenses";

/// Everything a step may look at when resolving one row.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationContext<'a> {
    /// Row being classified.
    pub row: &'a LedgerRow,
    /// Saved manual classifications.
    pub saved: &'a SavedMappings,
    /// Rule tables.
    pub rules: &'a RuleTable,
}

/// Which step produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// A saved manual mapping.
    SavedMapping,
    /// A hard-coded special case.
    SpecialCase,
    /// A mapping rule's abnormal-balance target.
    BalanceLogic,
    /// A mapping rule's normal target.
    DefaultTable,
}

/// A successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The classification.
    pub classification: Classification,
    /// Step that produced it.
    pub source: ResolutionSource,
}

/// One link of the priority chain.
pub trait ClassificationStep: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Resolves the row, or returns `None` to defer to the next step.
    fn resolve(&self, ctx: &ClassificationContext<'_>) -> Option<Resolution>;
}

/// Returns a saved manual mapping verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct SavedMappingStep;

impl ClassificationStep for SavedMappingStep {
    fn name(&self) -> &'static str {
        "saved_mapping"
    }

    fn resolve(&self, ctx: &ClassificationContext<'_>) -> Option<Resolution> {
        ctx.saved.get(&ctx.row.key()).map(|saved| Resolution {
            classification: saved.clone(),
            source: ResolutionSource::SavedMapping,
        })
    }
}

/// Receivables and indirect expenses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialCaseStep;

impl ClassificationStep for SpecialCaseStep {
    fn name(&self) -> &'static str {
        "special_case"
    }

    fn resolve(&self, ctx: &ClassificationContext<'_>) -> Option<Resolution> {
        let group = normalize_group(&ctx.row.primary_group);

        let classification = if RECEIVABLE_GROUPS.contains(&group.as_str()) {
            Classification::under(
                FaceGroup::CurrentAssets,
                "Trade receivables",
                Some("Unsecured, considered good"),
            )
        } else if group == INDIRECT_EXPENSES {
            if ctx.row.ledger_name.to_lowercase().contains("depreciation") {
                Classification::under(
                    FaceGroup::Expenses,
                    DEPRECIATION_NOTE_GROUP,
                    Some(DEPRECIATION_SUB_NOTE),
                )
            } else {
                let found =
                    keywords::match_expense(ctx.rules.expense_keywords(), &ctx.row.ledger_name);
                Classification::under(FaceGroup::Expenses, found.note_group, Some(found.sub_note))
            }
        } else {
            return None;
        };

        Some(Resolution {
            classification,
            source: ResolutionSource::SpecialCase,
        })
    }
}

/// Moves abnormal balances to the rule's reclassify target.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceLogicStep;

impl ClassificationStep for BalanceLogicStep {
    fn name(&self) -> &'static str {
        "balance_logic"
    }

    fn resolve(&self, ctx: &ClassificationContext<'_>) -> Option<Resolution> {
        let rule = ctx.rules.find_matching_rule(&ctx.row.primary_group)?;
        let logic = rule.balance_logic.as_ref()?;
        let closing = ctx.row.closing_balance;
        if !logic.natural_balance.is_abnormal(closing) {
            return None;
        }

        let mut classification = Classification::under(
            logic.reclassify_face_group,
            &logic.reclassify_note_group,
            logic.reclassify_sub_note.as_deref(),
        );
        classification.reclassification_reason = Some(format!(
            "Abnormal {} balance reclassified from {} to {} (natural {} balance, closing {})",
            logic.natural_balance.opposite().as_str(),
            rule.face_group,
            logic.reclassify_face_group,
            logic.natural_balance.as_str(),
            closing.abs().normalize(),
        ));

        Some(Resolution {
            classification,
            source: ResolutionSource::BalanceLogic,
        })
    }
}

/// Plain mapping-table lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTableStep;

impl ClassificationStep for DefaultTableStep {
    fn name(&self) -> &'static str {
        "default_table"
    }

    fn resolve(&self, ctx: &ClassificationContext<'_>) -> Option<Resolution> {
        let rule = ctx.rules.find_matching_rule(&ctx.row.primary_group)?;
        Some(Resolution {
            classification: Classification::under(
                rule.face_group,
                &rule.note_group,
                rule.sub_note.as_deref(),
            ),
            source: ResolutionSource::DefaultTable,
        })
    }
}

/// The standard chain in priority order.
#[must_use]
pub fn default_chain() -> Vec<Box<dyn ClassificationStep>> {
    vec![
        Box::new(SavedMappingStep),
        Box::new(SpecialCaseStep),
        Box::new(BalanceLogicStep),
        Box::new(DefaultTableStep),
    ]
}
