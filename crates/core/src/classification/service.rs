//! Ledger classification service.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use super::rules::RuleTable;
use super::steps::{
    ClassificationContext, ClassificationStep, Resolution, ResolutionSource, default_chain,
};
use super::types::{AutoFlag, Classification, LedgerRow, RowStatus, SavedMappings};
use super::user_rules::{ClassificationRule, apply_user_rules};

/// Resolves ledger rows to a 5-level classification.
pub struct Classifier {
    rules: Arc<RuleTable>,
    chain: Vec<Box<dyn ClassificationStep>>,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("rules", &self.rules.mapping_rules().len())
            .field(
                "chain",
                &self.chain.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Arc::new(RuleTable::standard()))
    }
}

impl Classifier {
    /// Creates a classifier running the standard priority chain.
    #[must_use]
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self::with_chain(rules, default_chain())
    }

    /// Creates a classifier with a custom chain.
    #[must_use]
    pub fn with_chain(rules: Arc<RuleTable>, chain: Vec<Box<dyn ClassificationStep>>) -> Self {
        Self { rules, chain }
    }

    /// Rule tables in use.
    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Runs the chain and reports which step resolved the row.
    #[must_use]
    pub fn resolve(&self, row: &LedgerRow, saved: &SavedMappings) -> Option<Resolution> {
        let ctx = ClassificationContext {
            row,
            saved,
            rules: &self.rules,
        };
        self.chain.iter().find_map(|step| {
            let resolution = step.resolve(&ctx)?;
            tracing::trace!(ledger = %row.ledger_name, step = step.name(), "Row resolved");
            Some(resolution)
        })
    }

    /// Classifies one row. Unresolved rows get an empty classification.
    #[must_use]
    pub fn classify(&self, row: &LedgerRow, saved: &SavedMappings) -> Classification {
        self.resolve(row, saved)
            .map(|resolution| resolution.classification)
            .unwrap_or_default()
    }

    /// Classifies every row and returns the updated copies.
    ///
    /// User rules only fill rows left without H2 and H3.
    #[must_use]
    pub fn classify_all(
        &self,
        rows: &[LedgerRow],
        saved: &SavedMappings,
        user_rules: &[ClassificationRule],
    ) -> Vec<LedgerRow> {
        tracing::debug!(rows = rows.len(), user_rules = user_rules.len(), "Classifying rows");

        let classified: Vec<LedgerRow> = rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                if row.composite_key.is_none() {
                    row.composite_key = Some(row.key());
                }
                match self.resolve(&row, saved) {
                    Some(resolution) => {
                        row.auto = Some(match resolution.source {
                            ResolutionSource::SavedMapping => AutoFlag::Manual,
                            _ => AutoFlag::Yes,
                        });
                        row.apply_classification(resolution.classification);
                    }
                    None => row.apply_classification(Classification::default()),
                }
                apply_user_rules(&mut row, user_rules);
                if row.status != RowStatus::Mapped {
                    tracing::warn!(
                        ledger = %row.ledger_name,
                        group = %row.primary_group,
                        status = ?row.status,
                        "Ledger needs manual classification"
                    );
                }
                row
            })
            .collect();

        let mapped = classified
            .iter()
            .filter(|row| row.status == RowStatus::Mapped)
            .count();
        tracing::info!(
            total = classified.len(),
            mapped,
            unmapped = classified.len() - mapped,
            "Classification complete"
        );

        classified
    }

    /// Lists rows moved by balance logic.
    #[must_use]
    pub fn reclassification_summary(&self, rows: &[LedgerRow]) -> ReclassificationSummary {
        let entries: Vec<ReclassificationEntry> = rows
            .iter()
            .filter_map(|row| {
                let reason = row.reclassification_reason.clone()?;
                let original_note_group = self
                    .rules
                    .find_matching_rule(&row.primary_group)
                    .map(|rule| rule.note_group.clone());
                Some(ReclassificationEntry {
                    ledger_name: row.ledger_name.clone(),
                    original_note_group,
                    new_note_group: row.h3.clone(),
                    reason,
                    amount: row.closing_balance,
                })
            })
            .collect();

        ReclassificationSummary {
            count: entries.len(),
            entries,
        }
    }
}

/// Rows reclassified by balance logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReclassificationSummary {
    /// Number of reclassified rows.
    pub count: usize,
    /// One entry per reclassified row.
    pub entries: Vec<ReclassificationEntry>,
}

/// One reclassified row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReclassificationEntry {
    /// Ledger name.
    pub ledger_name: String,
    /// Note group the group normally maps to.
    pub original_note_group: Option<String>,
    /// Note group after reclassification.
    pub new_note_group: Option<String>,
    /// Reason text.
    pub reason: String,
    /// Closing balance.
    pub amount: Decimal,
}
