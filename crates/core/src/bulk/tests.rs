//! Property-based tests for bulk module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::BulkUpdateError;
use super::service::{BULK_REASON, BulkUpdateService};
use super::types::{BulkUpdatePayload, ClassificationField};
use super::uniformity::detect_uniform_value;
use crate::classification::{AutoFlag, LedgerRow, RowStatus, SavedMappings};

fn row(h1: Option<&str>, h2: Option<&str>, h3: Option<&str>) -> LedgerRow {
    let mut row = LedgerRow::new("Ledger", "Group", Decimal::ZERO);
    row.h1 = h1.map(str::to_string);
    row.h2 = h2.map(str::to_string);
    row.h3 = h3.map(str::to_string);
    row
}

fn numbered(rows: Vec<LedgerRow>) -> Vec<LedgerRow> {
    rows.into_iter()
        .enumerate()
        .map(|(i, mut r)| {
            r.ledger_name = format!("Ledger {i}");
            r
        })
        .collect()
}

proptest! {
    /// Property: Case and spacing never break uniformity
    /// Variants of one value in different case and padding are uniform.
    #[test]
    fn test_case_variants_are_uniform(
        variants in prop::collection::vec(
            prop::sample::select(vec!["Asset", " asset ", "ASSET", "asset"]),
            1..10,
        ),
    ) {
        let rows: Vec<LedgerRow> = variants.iter().map(|v| row(Some(*v), None, None)).collect();
        let result = detect_uniform_value(&rows, ClassificationField::H1);
        prop_assert!(result.is_uniform);
        prop_assert_eq!(result.count, rows.len());
        prop_assert_eq!(result.missing_count, 0);
    }

    /// Property: H3 strictness
    /// One missing H3 among otherwise identical values blocks H3 pre-fill.
    #[test]
    fn test_h3_requires_every_row(agreeing in 1usize..10) {
        let mut rows: Vec<LedgerRow> = (0..agreeing)
            .map(|_| row(Some("Balance Sheet"), Some("Current Assets"), Some("Inventories")))
            .collect();
        rows.push(row(Some("Balance Sheet"), Some("Current Assets"), None));

        let result = BulkUpdateService::calculate_auto_population(&rows);
        prop_assert!(!result.h3.is_uniform);
        prop_assert!(result.h3.value.is_none());
        prop_assert!(!result.h3.should_enable);
        prop_assert!(result.h1.is_uniform);
        prop_assert!(result.h2.is_uniform);
    }

    /// Property: H2 gating
    /// H2 is never reported uniform while H1 is mixed.
    #[test]
    fn test_h2_requires_uniform_h1(n in 2usize..10) {
        let rows: Vec<LedgerRow> = (0..n)
            .map(|i| {
                let h1 = if i % 2 == 0 { "Balance Sheet" } else { "P&L Account" };
                row(Some(h1), Some("Current Assets"), None)
            })
            .collect();
        let result = BulkUpdateService::calculate_auto_population(&rows);
        prop_assert!(!result.h1.is_uniform);
        prop_assert!(!result.h2.is_uniform);
        prop_assert!(result.h2.value.is_none());
        prop_assert!(!result.apply_enabled);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_uniform_h1_mixed_h2_scenario() {
        let rows = vec![
            row(Some("Asset"), Some("Current Assets"), None),
            row(Some("Asset"), Some("Non-Current Assets"), None),
            row(Some("Asset"), Some("Current Assets"), None),
        ];
        let result = BulkUpdateService::calculate_auto_population(&rows);

        assert!(result.h1.is_uniform);
        assert_eq!(result.h1.value.as_deref(), Some("Asset"));
        assert!(!result.h2.is_uniform);
        assert!(result.h2.value.is_none());
        assert!(result.apply_enabled);
        assert_eq!(
            result.summary,
            "✓ H1 uniform (3/3) | ✗ H2 mixed or H1 not uniform | • H3 needs manual selection (3 missing)"
        );
    }

    #[test]
    fn test_fully_uniform_selection() {
        let rows = vec![
            row(Some("Balance Sheet"), Some("Current Assets"), Some("Inventories")),
            row(Some("balance sheet"), Some("current assets"), Some("INVENTORIES")),
        ];
        let result = BulkUpdateService::calculate_auto_population(&rows);
        assert!(result.h3.is_uniform);
        assert_eq!(result.h3.value.as_deref(), Some("Inventories"));
        assert_eq!(
            result.summary,
            "✓ H1 uniform (2/2) | ✓ H2 uniform (2/2) | ✓ H3 uniform (2/2)"
        );
    }

    #[test]
    fn test_empty_selection_disables_apply() {
        let result = BulkUpdateService::calculate_auto_population(&[]);
        assert!(!result.apply_enabled);
        assert_eq!(result.summary, "Select 1 or more ledgers to enable bulk update");
    }

    #[test]
    fn test_prepare_payload_marks_manual() {
        let payload = BulkUpdateService::prepare_payload(Some("Balance Sheet"), Some("  "), None);
        assert_eq!(payload.h1.as_deref(), Some("Balance Sheet"));
        assert!(payload.h2.is_none());
        assert_eq!(payload.auto, Some(AutoFlag::Manual));
        assert_eq!(payload.auto_reason.as_deref(), Some(BULK_REASON));

        let empty = BulkUpdateService::prepare_payload(None, Some(""), None);
        assert!(empty.is_empty());
        assert!(empty.auto.is_none());
    }

    #[test]
    fn test_resolve_payload_prefers_manual_values() {
        let rows = vec![
            row(Some("Balance Sheet"), Some("Current Assets"), Some("Inventories")),
            row(Some("Balance Sheet"), Some("Current Assets"), None),
        ];
        let auto = BulkUpdateService::calculate_auto_population(&rows);
        let manual = BulkUpdatePayload {
            h3: Some("Trade receivables".into()),
            ..BulkUpdatePayload::default()
        };

        let payload = BulkUpdateService::resolve_payload(&auto, &manual);
        assert_eq!(payload.h1.as_deref(), Some("Balance Sheet"));
        assert_eq!(payload.h2.as_deref(), Some("Current Assets"));
        assert_eq!(payload.h3.as_deref(), Some("Trade receivables"));
    }

    #[test]
    fn test_apply_writes_only_payload_fields() {
        let mut first = row(Some("Balance Sheet"), Some("Current Assets"), Some("Inventories"));
        first.h4 = Some("Raw materials".into());
        let mut rows = numbered(vec![first, row(None, None, None)]);
        let mut saved = SavedMappings::new();

        let payload = BulkUpdateService::prepare_payload(None, None, Some("Trade receivables"));
        let updated = BulkUpdateService::apply(&mut rows, &payload, &mut saved).unwrap();

        assert_eq!(updated, 2);
        assert_eq!(rows[0].h2.as_deref(), Some("Current Assets"));
        assert_eq!(rows[0].h3.as_deref(), Some("Trade receivables"));
        assert_eq!(rows[0].h4.as_deref(), Some("Raw materials"));
        assert_eq!(rows[0].auto, Some(AutoFlag::Manual));
        assert_eq!(rows[0].auto_reason.as_deref(), Some(BULK_REASON));
        assert_eq!(rows[1].status, RowStatus::Unmapped);

        assert_eq!(saved.len(), 2);
        assert_eq!(
            saved.get(&rows[0].key()).unwrap().h3.as_deref(),
            Some("Trade receivables")
        );
    }

    #[test]
    fn test_apply_realigns_h1_with_manual_h2() {
        let mut rows = numbered(vec![
            row(Some("Balance Sheet"), Some("Current Assets"), None),
            row(Some("Balance Sheet"), Some("Current Liabilities"), None),
        ]);
        let mut saved = SavedMappings::new();

        let auto = BulkUpdateService::calculate_auto_population(&rows);
        assert_eq!(auto.h1.value.as_deref(), Some("Balance Sheet"));
        let manual = BulkUpdateService::prepare_payload(None, Some("Expenses"), None);
        let payload = BulkUpdateService::resolve_payload(&auto, &manual);
        BulkUpdateService::apply(&mut rows, &payload, &mut saved).unwrap();

        for row in &rows {
            assert_eq!(row.h1.as_deref(), Some("P&L Account"));
            assert_eq!(row.h2.as_deref(), Some("Expenses"));
            assert_eq!(row.status, RowStatus::Mapped);
            assert_eq!(
                saved.get(&row.key()).unwrap().h1.as_deref(),
                Some("P&L Account")
            );
        }
    }

    #[test]
    fn test_apply_keeps_consistent_h1_spelling() {
        let mut rows = vec![row(Some("Profit and Loss"), None, None)];
        let mut saved = SavedMappings::new();
        let payload = BulkUpdateService::prepare_payload(None, Some("Income"), None);
        BulkUpdateService::apply(&mut rows, &payload, &mut saved).unwrap();
        assert_eq!(rows[0].h1.as_deref(), Some("Profit and Loss"));
    }

    #[test]
    fn test_apply_refuses_empty_payload() {
        let mut rows = vec![row(Some("Asset"), None, None)];
        let mut saved = SavedMappings::new();
        assert_eq!(
            BulkUpdateService::apply(&mut rows, &BulkUpdatePayload::default(), &mut saved),
            Err(BulkUpdateError::NothingToApply)
        );
        assert_eq!(
            BulkUpdateService::apply(
                &mut [],
                &BulkUpdateService::prepare_payload(Some("Asset"), None, None),
                &mut saved
            ),
            Err(BulkUpdateError::EmptySelection)
        );
        assert!(saved.is_empty());
    }

    #[test]
    fn test_mixed_selection_with_no_manual_input_has_nothing_to_apply() {
        let rows = vec![
            row(Some("Balance Sheet"), None, None),
            row(Some("P&L Account"), None, None),
        ];
        let auto = BulkUpdateService::calculate_auto_population(&rows);
        let payload = BulkUpdateService::resolve_payload(&auto, &BulkUpdatePayload::default());
        assert!(payload.is_empty());

        let mut selection = rows;
        assert_eq!(
            BulkUpdateService::apply(&mut selection, &payload, &mut SavedMappings::new()),
            Err(BulkUpdateError::NothingToApply)
        );
    }
}
