//! Statement generation service.

use std::collections::BTreeMap;

use ledgerlens_shared::types::{Constitution, NoteNumberConfig};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::aggregator::aggregate_periods;
use super::error::ReportError;
use super::labels::{DisplayLabel, LabelCatalog};
use super::notes::{StatementType, note_number_for_line, validate_note_config};
use super::structure::{LineSection, StatementStructure};
use super::types::{
    FinancialStatements, PeriodAggregates, ReportLine, Section, SectionTotal, StatementReport,
};
use crate::classification::{AmountField, LedgerRow, Statement};

/// Service for building financial statements from classified rows.
pub struct ReportService;

impl ReportService {
    /// Builds the Balance Sheet and Statement of Profit and Loss.
    ///
    /// Rows are aggregated by closing balance into the lines of `structure`.
    /// Lines that do not apply to the entity, or that are zero in both
    /// periods, are left out; the rest receive sequential note numbers.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] when the note configuration is invalid.
    pub fn build(
        current: &[LedgerRow],
        previous: &[LedgerRow],
        structure: &StatementStructure,
        labels: &LabelCatalog,
        notes: &NoteNumberConfig,
        constitution: Constitution,
    ) -> Result<FinancialStatements, ReportError> {
        let note_ranges = validate_note_config(notes)?;

        let aggregates = aggregate_periods(
            current,
            previous,
            |row| structure.bucket_of(row),
            AmountField::Closing,
        );

        let balance_sheet = Self::statement_report(
            Statement::BalanceSheet,
            &aggregates,
            structure,
            labels,
            notes,
            constitution,
        );
        let profit_and_loss = Self::statement_report(
            Statement::ProfitAndLoss,
            &aggregates,
            structure,
            labels,
            notes,
            constitution,
        );

        info!(
            constitution = constitution.code(),
            bs_lines = balance_sheet.lines.len(),
            pl_lines = profit_and_loss.lines.len(),
            "Built financial statements"
        );

        Ok(FinancialStatements {
            constitution,
            schedule_iii: constitution.is_schedule_iii(),
            balance_sheet,
            profit_and_loss,
            note_ranges,
            contingent_liabilities_note: note_ranges.contingent_liabilities,
            unassigned_current: aggregates.current.uncategorised_in(Section::Unassigned),
            unassigned_previous: aggregates.previous.uncategorised_in(Section::Unassigned),
        })
    }

    /// Renders one statement from period aggregates.
    ///
    /// Amounts on lines whose label is not applicable to the entity are added
    /// to the statement's uncategorised totals.
    #[must_use]
    pub fn statement_report(
        statement: Statement,
        aggregates: &PeriodAggregates,
        structure: &StatementStructure,
        labels: &LabelCatalog,
        notes: &NoteNumberConfig,
        constitution: Constitution,
    ) -> StatementReport {
        let statement_type = match statement {
            Statement::BalanceSheet => StatementType::BalanceSheet,
            Statement::ProfitAndLoss => StatementType::ProfitAndLoss,
        };
        let section = Section::from(Some(statement));
        let mut uncategorised_current = aggregates.current.uncategorised_in(section);
        let mut uncategorised_previous = aggregates.previous.uncategorised_in(section);
        let mut lines = Vec::new();

        for line in structure.lines_for(statement) {
            let code = line.technical_code;
            let current = aggregates.current.get(code);
            let previous = aggregates.previous.get(code);
            if current.is_zero() && previous.is_zero() {
                continue;
            }

            let label = match labels.display_label(code, constitution, statement) {
                DisplayLabel::Label(label) => label,
                DisplayLabel::NotApplicable => {
                    warn!(
                        technical_code = code,
                        constitution = constitution.code(),
                        "Balance on a line not applicable to the entity"
                    );
                    uncategorised_current += current;
                    uncategorised_previous += previous;
                    continue;
                }
            };

            let note_number = note_number_for_line(statement_type, lines.len(), notes);
            if note_number.is_none() {
                warn!(
                    technical_code = code,
                    statement = %statement_type,
                    "Note range exhausted"
                );
            }

            lines.push(ReportLine {
                technical_code: code.to_string(),
                label: label.to_string(),
                section: line.section,
                note_number,
                current: line.section.present(current),
                previous: line.section.present(previous),
            });
        }

        debug!(statement = %statement, lines = lines.len(), "Rendered statement");

        StatementReport {
            statement,
            totals: Self::section_totals(&lines),
            lines,
            uncategorised_current,
            uncategorised_previous,
        }
    }

    /// Subtotals per section, in presentation order.
    #[must_use]
    pub fn section_totals(lines: &[ReportLine]) -> Vec<SectionTotal> {
        let mut totals: BTreeMap<LineSection, (Decimal, Decimal)> = BTreeMap::new();
        for line in lines {
            let entry = totals.entry(line.section).or_default();
            entry.0 += line.current;
            entry.1 += line.previous;
        }
        totals
            .into_iter()
            .map(|(section, (current, previous))| SectionTotal {
                section,
                current,
                previous,
            })
            .collect()
    }
}
