//! Value normalization and uniformity detection.

use std::collections::HashSet;

use super::types::{ClassificationField, UniformityResult};
use crate::classification::LedgerRow;

const EMPTY_MARKERS: [&str; 5] = ["null", "undefined", "n/a", "na", "-"];

const PLACEHOLDERS: [&str; 11] = [
    "h1",
    "h2",
    "h3",
    "select h1",
    "select h2",
    "select h3",
    "select h1/h2",
    "select h1 h2",
    "select category",
    "select subcategory",
    "enter subcategory",
];

/// Lowercases, trims, unifies quote characters and collapses whitespace.
#[must_use]
pub fn normalize_value(value: &str) -> String {
    value
        .to_lowercase()
        .replace(['\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '"', '`'], "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True for absent, blank and "null"-like values.
#[must_use]
pub fn is_empty(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(raw) => {
            let normalized = normalize_value(raw);
            normalized.is_empty() || EMPTY_MARKERS.contains(&normalized.as_str())
        }
    }
}

/// True for empty values and UI placeholder text such as "Select H1".
#[must_use]
pub fn is_placeholder(value: Option<&str>) -> bool {
    is_empty(value)
        || value.is_some_and(|raw| PLACEHOLDERS.contains(&normalize_value(raw).as_str()))
}

/// Checks whether a field holds one distinct value across the selection.
#[must_use]
pub fn detect_uniform_value(rows: &[LedgerRow], field: ClassificationField) -> UniformityResult {
    if rows.is_empty() {
        return UniformityResult {
            is_uniform: false,
            value: None,
            count: 0,
            missing_count: 0,
            reason: "No ledgers selected".to_string(),
        };
    }

    let present: Vec<&str> = rows
        .iter()
        .filter_map(|row| field.read(row))
        .filter(|value| !is_placeholder(Some(value)))
        .collect();
    let missing_count = rows.len() - present.len();

    if present.is_empty() {
        return UniformityResult {
            is_uniform: false,
            value: None,
            count: rows.len(),
            missing_count,
            reason: format!("All {field} values are empty or missing"),
        };
    }

    let distinct: HashSet<String> = present.iter().map(|v| normalize_value(v)).collect();
    if distinct.len() == 1 {
        UniformityResult {
            is_uniform: true,
            value: Some(present[0].to_string()),
            count: present.len(),
            missing_count,
            reason: format!("{field} is uniform across {} ledger(s)", present.len()),
        }
    } else {
        UniformityResult {
            is_uniform: false,
            value: None,
            count: rows.len(),
            missing_count,
            reason: format!("{field} values differ ({} unique values found)", distinct.len()),
        }
    }
}

/// True when every row has a real value and they all normalize identically.
#[must_use]
pub fn is_strictly_uniform(rows: &[LedgerRow], field: ClassificationField) -> bool {
    let mut values = rows.iter().map(|row| field.read(row));
    let Some(first) = values.next() else {
        return false;
    };
    if is_placeholder(first) {
        return false;
    }
    let expected = normalize_value(first.unwrap_or_default());
    values.all(|value| !is_placeholder(value) && normalize_value(value.unwrap_or_default()) == expected)
}
