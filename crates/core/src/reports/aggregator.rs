//! Per-period bucket aggregation.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::{Aggregation, PeriodAggregates, Section};
use crate::classification::{AmountField, LedgerRow, RowStatus, Statement};

/// Sums one amount column per bucket key.
///
/// Rows that are not mapped, or that `bucket_of` places in no bucket, are
/// kept out of every named bucket. Their amounts are totalled per statement
/// section and their keys listed so the gap stays visible.
pub fn aggregate<F>(rows: &[LedgerRow], bucket_of: F, field: AmountField) -> Aggregation
where
    F: Fn(&LedgerRow) -> Option<String>,
{
    let mut aggregation = Aggregation::default();

    for row in rows {
        let amount = row.amount(field);
        let bucket = (row.status == RowStatus::Mapped)
            .then(|| bucket_of(row))
            .flatten();

        if let Some(bucket) = bucket {
            *aggregation.buckets.entry(bucket).or_insert(Decimal::ZERO) += amount;
        } else {
            let section = Section::from(row.h1.as_deref().and_then(Statement::parse));
            *aggregation
                .uncategorised
                .entry(section)
                .or_insert(Decimal::ZERO) += amount;
            aggregation.uncategorised_rows.push(row.key());
        }
    }

    for (section, total) in &aggregation.uncategorised {
        if !total.is_zero() {
            warn!(
                section = ?section,
                total = %total,
                "Uncategorised balance left out of statement lines"
            );
        }
    }

    debug!(
        rows = rows.len(),
        buckets = aggregation.buckets.len(),
        uncategorised_rows = aggregation.uncategorised_rows.len(),
        "Aggregated period"
    );

    aggregation
}

/// Aggregates the current and prior period independently.
pub fn aggregate_periods<F>(
    current: &[LedgerRow],
    previous: &[LedgerRow],
    bucket_of: F,
    field: AmountField,
) -> PeriodAggregates
where
    F: Fn(&LedgerRow) -> Option<String>,
{
    PeriodAggregates {
        current: aggregate(current, &bucket_of, field),
        previous: aggregate(previous, &bucket_of, field),
    }
}

/// Buckets a mapped row by its `H2 / H3` pair.
///
/// Useful for trial-balance style summaries that do not follow a statement
/// structure.
#[must_use]
pub fn face_and_note_bucket(row: &LedgerRow) -> Option<String> {
    match (row.h2.as_deref(), row.h3.as_deref()) {
        (Some(face), Some(note)) if !face.trim().is_empty() && !note.trim().is_empty() => {
            Some(format!("{} / {}", face.trim(), note.trim()))
        }
        _ => None,
    }
}
