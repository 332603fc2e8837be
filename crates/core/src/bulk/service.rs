//! Bulk reclassification service.

use super::error::BulkUpdateError;
use super::types::{BulkAutoPopulation, BulkUpdatePayload, ClassificationField, FieldPrefill};
use super::uniformity::{detect_uniform_value, is_strictly_uniform};
use crate::classification::{AutoFlag, LedgerRow, SavedMappings, Statement, derive_h1};

/// Reason recorded on rows changed by a bulk update.
pub const BULK_REASON: &str = "Bulk update applied manually";

/// Service for batch reclassification of a row selection.
pub struct BulkUpdateService;

impl BulkUpdateService {
    /// Works out which of H1/H2/H3 can be pre-filled for a selection.
    ///
    /// H2 only counts as uniform when H1 does. H3 requires every row to carry
    /// the same real value and is never pre-filled automatically.
    #[must_use]
    pub fn calculate_auto_population(rows: &[LedgerRow]) -> BulkAutoPopulation {
        if rows.is_empty() {
            return BulkAutoPopulation {
                h1: FieldPrefill::default(),
                h2: FieldPrefill::default(),
                h3: FieldPrefill::default(),
                apply_enabled: false,
                summary: "Select 1 or more ledgers to enable bulk update".to_string(),
            };
        }

        let total = rows.len();
        let h1 = detect_uniform_value(rows, ClassificationField::H1);
        let h2 = detect_uniform_value(rows, ClassificationField::H2);
        let h3 = detect_uniform_value(rows, ClassificationField::H3);

        let h2_uniform = h1.is_uniform && h2.is_uniform;
        let h3_uniform = is_strictly_uniform(rows, ClassificationField::H3);

        let mut parts = Vec::with_capacity(3);
        parts.push(if h1.is_uniform {
            format!("✓ H1 uniform ({}/{total})", h1.count)
        } else {
            format!("✗ H1 mixed ({} missing)", h1.missing_count)
        });
        parts.push(if h2_uniform {
            format!("✓ H2 uniform ({}/{total})", h2.count)
        } else {
            "✗ H2 mixed or H1 not uniform".to_string()
        });
        parts.push(if h3_uniform {
            format!("✓ H3 uniform ({}/{total})", h3.count)
        } else {
            format!("• H3 needs manual selection ({} missing)", h3.missing_count)
        });

        let result = BulkAutoPopulation {
            h1: FieldPrefill {
                is_uniform: h1.is_uniform,
                value: h1.value,
                should_enable: true,
            },
            h2: FieldPrefill {
                is_uniform: h2_uniform,
                value: if h2_uniform { h2.value } else { None },
                should_enable: true,
            },
            h3: FieldPrefill {
                is_uniform: h3_uniform,
                value: if h3_uniform {
                    rows[0].h3.clone()
                } else {
                    None
                },
                should_enable: false,
            },
            apply_enabled: h1.is_uniform || h2_uniform || h3_uniform,
            summary: parts.join(" | "),
        };

        tracing::debug!(rows = total, summary = %result.summary, "Bulk selection analysed");
        result
    }

    /// Builds a payload from explicit values, ignoring blank ones.
    ///
    /// A payload that writes anything is tagged as a manual change.
    #[must_use]
    pub fn prepare_payload(
        h1: Option<&str>,
        h2: Option<&str>,
        h3: Option<&str>,
    ) -> BulkUpdatePayload {
        let keep = |value: Option<&str>| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        };
        let mut payload = BulkUpdatePayload {
            h1: keep(h1),
            h2: keep(h2),
            h3: keep(h3),
            auto: None,
            auto_reason: None,
        };
        if !payload.is_empty() {
            payload.auto = Some(AutoFlag::Manual);
            payload.auto_reason = Some(BULK_REASON.to_string());
        }
        payload
    }

    /// Combines detected uniform values with manual overrides.
    ///
    /// Manual values win. H3 is only taken from `auto` when it was uniform
    /// across every row.
    #[must_use]
    pub fn resolve_payload(
        auto: &BulkAutoPopulation,
        manual: &BulkUpdatePayload,
    ) -> BulkUpdatePayload {
        Self::prepare_payload(
            pick(manual.h1.as_ref(), &auto.h1),
            pick(manual.h2.as_ref(), &auto.h2),
            pick(manual.h3.as_ref(), &auto.h3),
        )
    }

    /// Writes a payload to every selected row and records the results as
    /// saved manual mappings.
    ///
    /// Only the payload's fields are written; everything else is kept. When
    /// the resulting H2 implies a statement, H1 is corrected to match it.
    pub fn apply(
        rows: &mut [LedgerRow],
        payload: &BulkUpdatePayload,
        saved: &mut SavedMappings,
    ) -> Result<usize, BulkUpdateError> {
        if rows.is_empty() {
            return Err(BulkUpdateError::EmptySelection);
        }
        if payload.is_empty() {
            return Err(BulkUpdateError::NothingToApply);
        }

        for row in rows.iter_mut() {
            for (field, value) in payload.fields() {
                field.write(row, value);
            }
            align_h1_with_h2(row);
            row.auto = Some(AutoFlag::Manual);
            row.auto_reason = Some(
                payload
                    .auto_reason
                    .clone()
                    .unwrap_or_else(|| BULK_REASON.to_string()),
            );
            row.refresh_status();
            saved.record(row.key(), row.classification());
        }

        tracing::info!(rows = rows.len(), "Bulk update applied");
        Ok(rows.len())
    }
}

/// H2 determines the statement, so a pre-filled H1 never contradicts it.
fn align_h1_with_h2(row: &mut LedgerRow) {
    let Some(statement) = row.h2.as_deref().and_then(derive_h1) else {
        return;
    };
    if row.h1.as_deref().and_then(Statement::parse) != Some(statement) {
        row.h1 = Some(statement.as_str().to_string());
    }
}

fn pick<'a>(manual: Option<&'a String>, prefill: &'a FieldPrefill) -> Option<&'a str> {
    manual
        .filter(|v| !v.trim().is_empty())
        .or_else(|| prefill.value.as_ref().filter(|_| prefill.is_uniform))
        .map(String::as_str)
}
