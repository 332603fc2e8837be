//! Note numbering.
//!
//! Balance Sheet and P&L line items with a value in either period receive
//! sequential note numbers from their configured range. Contingent
//! liabilities take a single slot after both ranges unless one is set
//! explicitly.

use ledgerlens_shared::types::NoteNumberConfig;
use serde::Serialize;

use super::error::ReportError;

/// Statement a note number is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementType {
    /// Balance Sheet.
    BalanceSheet,
    /// Statement of Profit and Loss.
    ProfitAndLoss,
    /// Contingent liabilities note.
    ContingentLiabilities,
}

impl std::fmt::Display for StatementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::ProfitAndLoss => "P&L",
            Self::ContingentLiabilities => "Contingent Liabilities",
        })
    }
}

/// Resolved note ranges.
///
/// An `end` below its `start` denotes an empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoteNumberRange {
    /// First Balance Sheet note.
    pub bs_start: u32,
    /// Last Balance Sheet note.
    pub bs_end: u32,
    /// First P&L note.
    pub pl_start: u32,
    /// Last P&L note.
    pub pl_end: u32,
    /// Contingent liabilities note, when included.
    pub contingent_liabilities: Option<u32>,
}

/// Computes the note ranges for a configuration.
#[must_use]
pub fn calculate_note_number_ranges(config: &NoteNumberConfig) -> NoteNumberRange {
    let contingent_liabilities = config.include_contingent_liabilities.then(|| {
        config
            .contingent_liability_note_no
            .filter(|note| *note != 0)
            .unwrap_or_else(|| {
                config
                    .bs_starting_note
                    .saturating_add(config.bs_note_count)
                    .saturating_add(config.pl_note_count)
            })
    });

    NoteNumberRange {
        bs_start: config.bs_starting_note,
        bs_end: range_end(config.bs_starting_note, config.bs_note_count),
        pl_start: config.pl_starting_note,
        pl_end: range_end(config.pl_starting_note, config.pl_note_count),
        contingent_liabilities,
    }
}

fn range_end(start: u32, count: u32) -> u32 {
    start.saturating_add(count).saturating_sub(1)
}

/// Note number of the `index`-th numbered line of a statement.
///
/// Returns `None` past the end of the range. Contingent liabilities only have
/// a note at index 0.
#[must_use]
pub fn note_number_for_line(
    statement: StatementType,
    index: usize,
    config: &NoteNumberConfig,
) -> Option<u32> {
    let (start, count) = match statement {
        StatementType::BalanceSheet => (config.bs_starting_note, config.bs_note_count),
        StatementType::ProfitAndLoss => (config.pl_starting_note, config.pl_note_count),
        StatementType::ContingentLiabilities => {
            return if index == 0 {
                calculate_note_number_ranges(config).contingent_liabilities
            } else {
                None
            };
        }
    };
    let index = u32::try_from(index).ok()?;
    if index >= count {
        return None;
    }
    start.checked_add(index)
}

/// Every note number a statement may use, in order.
#[must_use]
pub fn all_note_numbers(statement: StatementType, config: &NoteNumberConfig) -> Vec<u32> {
    let ranges = calculate_note_number_ranges(config);
    match statement {
        StatementType::BalanceSheet if config.bs_note_count > 0 => {
            (ranges.bs_start..=ranges.bs_end).collect()
        }
        StatementType::ProfitAndLoss if config.pl_note_count > 0 => {
            (ranges.pl_start..=ranges.pl_end).collect()
        }
        StatementType::ContingentLiabilities => {
            ranges.contingent_liabilities.into_iter().collect()
        }
        _ => Vec::new(),
    }
}

/// "Note n", or "-" when no note applies.
#[must_use]
pub fn display_note_number(note: Option<u32>) -> String {
    note.map_or_else(|| "-".to_string(), |n| format!("Note {n}"))
}

/// One-line description of a configuration.
#[must_use]
pub fn note_config_summary(config: &NoteNumberConfig) -> String {
    let ranges = calculate_note_number_ranges(config);
    let contingent = ranges
        .contingent_liabilities
        .map(|note| format!(", Contingent Liabilities: {note}"))
        .unwrap_or_default();
    format!(
        "BS Notes: {}-{}, P&L Notes: {}-{}{contingent}",
        ranges.bs_start, ranges.bs_end, ranges.pl_start, ranges.pl_end
    )
}

/// Checks that the ranges are disjoint and the contingent slot is free.
///
/// # Errors
///
/// Returns [`ReportError::OverlappingRanges`] when the two statement ranges
/// share a number, [`ReportError::ContingentSlotCollision`] when the
/// contingent note falls inside either range, and
/// [`ReportError::ZeroStartingNote`] for a zero start.
pub fn validate_note_config(config: &NoteNumberConfig) -> Result<NoteNumberRange, ReportError> {
    if config.bs_starting_note == 0 {
        return Err(ReportError::ZeroStartingNote(StatementType::BalanceSheet));
    }
    if config.pl_starting_note == 0 {
        return Err(ReportError::ZeroStartingNote(StatementType::ProfitAndLoss));
    }

    let ranges = calculate_note_number_ranges(config);
    let bs = (config.bs_note_count > 0).then_some((ranges.bs_start, ranges.bs_end));
    let pl = (config.pl_note_count > 0).then_some((ranges.pl_start, ranges.pl_end));

    if let (Some((bs_start, bs_end)), Some((pl_start, pl_end))) = (bs, pl)
        && bs_start <= pl_end
        && pl_start <= bs_end
    {
        return Err(ReportError::OverlappingRanges {
            bs_start,
            bs_end,
            pl_start,
            pl_end,
        });
    }

    if let Some(note) = ranges.contingent_liabilities {
        for (statement, range) in [
            (StatementType::BalanceSheet, bs),
            (StatementType::ProfitAndLoss, pl),
        ] {
            if range.is_some_and(|(start, end)| (start..=end).contains(&note)) {
                return Err(ReportError::ContingentSlotCollision { note, statement });
            }
        }
    }

    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config(bs: (u32, u32), pl: (u32, u32), contingent: bool) -> NoteNumberConfig {
        NoteNumberConfig {
            bs_starting_note: bs.0,
            bs_note_count: bs.1,
            pl_starting_note: pl.0,
            pl_note_count: pl.1,
            include_contingent_liabilities: contingent,
            contingent_liability_note_no: None,
        }
    }

    #[test]
    fn test_default_ranges() {
        let ranges = calculate_note_number_ranges(&NoteNumberConfig::default());
        assert_eq!((ranges.bs_start, ranges.bs_end), (3, 22));
        assert_eq!((ranges.pl_start, ranges.pl_end), (23, 37));
        assert_eq!(ranges.contingent_liabilities, None);
    }

    #[test]
    fn test_contingent_slot_follows_both_ranges() {
        let ranges = calculate_note_number_ranges(&config((3, 20), (23, 15), true));
        assert_eq!(ranges.contingent_liabilities, Some(38));
    }

    #[test]
    fn test_contingent_override() {
        let mut cfg = config((3, 20), (23, 15), true);
        cfg.contingent_liability_note_no = Some(45);
        assert_eq!(calculate_note_number_ranges(&cfg).contingent_liabilities, Some(45));

        cfg.include_contingent_liabilities = false;
        assert_eq!(calculate_note_number_ranges(&cfg).contingent_liabilities, None);
    }

    #[test]
    fn test_zero_contingent_override_uses_default_slot() {
        let mut cfg = config((3, 20), (23, 15), true);
        cfg.contingent_liability_note_no = Some(0);
        assert_eq!(calculate_note_number_ranges(&cfg).contingent_liabilities, Some(38));
        assert!(validate_note_config(&cfg).is_ok());
    }

    #[rstest]
    #[case(StatementType::BalanceSheet, 0, Some(3))]
    #[case(StatementType::BalanceSheet, 19, Some(22))]
    #[case(StatementType::BalanceSheet, 20, None)]
    #[case(StatementType::ProfitAndLoss, 0, Some(23))]
    #[case(StatementType::ProfitAndLoss, 14, Some(37))]
    #[case(StatementType::ProfitAndLoss, 15, None)]
    #[case(StatementType::ContingentLiabilities, 0, Some(38))]
    #[case(StatementType::ContingentLiabilities, 1, None)]
    fn test_note_number_for_line(
        #[case] statement: StatementType,
        #[case] index: usize,
        #[case] expected: Option<u32>,
    ) {
        let cfg = config((3, 20), (23, 15), true);
        assert_eq!(note_number_for_line(statement, index, &cfg), expected);
    }

    #[test]
    fn test_zero_count_range_has_no_notes() {
        let cfg = config((3, 0), (23, 15), false);
        assert_eq!(note_number_for_line(StatementType::BalanceSheet, 0, &cfg), None);
        assert!(all_note_numbers(StatementType::BalanceSheet, &cfg).is_empty());
    }

    #[test]
    fn test_all_note_numbers() {
        let cfg = config((1, 3), (4, 2), true);
        assert_eq!(all_note_numbers(StatementType::BalanceSheet, &cfg), vec![1, 2, 3]);
        assert_eq!(all_note_numbers(StatementType::ProfitAndLoss, &cfg), vec![4, 5]);
        assert_eq!(all_note_numbers(StatementType::ContingentLiabilities, &cfg), vec![6]);
    }

    #[test]
    fn test_display_and_summary() {
        assert_eq!(display_note_number(Some(7)), "Note 7");
        assert_eq!(display_note_number(None), "-");
        assert_eq!(
            note_config_summary(&config((3, 20), (23, 15), true)),
            "BS Notes: 3-22, P&L Notes: 23-37, Contingent Liabilities: 38"
        );
        assert_eq!(
            note_config_summary(&NoteNumberConfig::default()),
            "BS Notes: 3-22, P&L Notes: 23-37"
        );
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let err = validate_note_config(&config((3, 20), (20, 5), false)).unwrap_err();
        assert!(matches!(err, ReportError::OverlappingRanges { .. }));
    }

    #[test]
    fn test_validate_rejects_contingent_collision() {
        // Default slot 3 + 20 + 15 = 38 lands inside 30..=44.
        let err = validate_note_config(&config((3, 20), (30, 15), true)).unwrap_err();
        assert_eq!(
            err,
            ReportError::ContingentSlotCollision {
                note: 38,
                statement: StatementType::ProfitAndLoss
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero_start() {
        assert_eq!(
            validate_note_config(&config((0, 5), (10, 5), false)),
            Err(ReportError::ZeroStartingNote(StatementType::BalanceSheet))
        );
    }

    #[test]
    fn test_validate_accepts_default() {
        assert!(validate_note_config(&NoteNumberConfig::default()).is_ok());
    }
}
