//! Bulk update types.

use serde::{Deserialize, Serialize};

use crate::classification::LedgerRow;

/// Classification level that bulk updates can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationField {
    /// Statement.
    H1,
    /// Face group.
    H2,
    /// Note group.
    H3,
}

impl ClassificationField {
    /// Field label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
        }
    }

    /// Reads the field from a row.
    #[must_use]
    pub fn read(self, row: &LedgerRow) -> Option<&str> {
        match self {
            Self::H1 => row.h1.as_deref(),
            Self::H2 => row.h2.as_deref(),
            Self::H3 => row.h3.as_deref(),
        }
    }

    fn slot(self, row: &mut LedgerRow) -> &mut Option<String> {
        match self {
            Self::H1 => &mut row.h1,
            Self::H2 => &mut row.h2,
            Self::H3 => &mut row.h3,
        }
    }

    /// Overwrites the field on a row.
    pub fn write(self, row: &mut LedgerRow, value: &str) {
        *self.slot(row) = Some(value.to_string());
    }
}

impl std::fmt::Display for ClassificationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniformity of one field across a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniformityResult {
    /// Exactly one distinct non-empty value exists.
    pub is_uniform: bool,
    /// First non-empty original value, when uniform.
    pub value: Option<String>,
    /// Non-empty rows when uniform, otherwise the selection size.
    pub count: usize,
    /// Rows with an empty or placeholder value.
    pub missing_count: usize,
    /// Human-readable explanation.
    pub reason: String,
}

/// Pre-fill state of one field in the bulk update form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldPrefill {
    /// Whether the field counts as uniform.
    pub is_uniform: bool,
    /// Value to pre-fill.
    pub value: Option<String>,
    /// Whether the value may be pre-filled automatically.
    pub should_enable: bool,
}

/// Result of analysing a selection for bulk update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkAutoPopulation {
    /// Statement pre-fill.
    pub h1: FieldPrefill,
    /// Face group pre-fill.
    pub h2: FieldPrefill,
    /// Note group pre-fill.
    pub h3: FieldPrefill,
    /// Whether applying is allowed without manual input.
    pub apply_enabled: bool,
    /// One-line status text.
    pub summary: String,
}

/// Values a bulk update writes to every selected row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdatePayload {
    /// Statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h1: Option<String>,
    /// Face group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h2: Option<String>,
    /// Note group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h3: Option<String>,
    /// Origin tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto: Option<crate::classification::AutoFlag>,
    /// Origin explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_reason: Option<String>,
}

impl BulkUpdatePayload {
    /// True when no classification field would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }

    /// Fields this payload writes, in H1..H3 order.
    pub fn fields(&self) -> impl Iterator<Item = (ClassificationField, &str)> {
        [
            (ClassificationField::H1, self.h1.as_deref()),
            (ClassificationField::H2, self.h2.as_deref()),
            (ClassificationField::H3, self.h3.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
    }
}
