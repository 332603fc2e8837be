//! Rule table error types.

use thiserror::Error;

/// Errors raised while loading an externally supplied rule table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleTableError {
    /// A rule has an empty source group pattern.
    #[error("Rule {index} has an empty source group")]
    EmptyPattern {
        /// Position of the rule in the input.
        index: usize,
    },

    /// A face group value is not one of the known face groups.
    #[error("Rule '{source_group}' has unknown face group '{face_group}'")]
    UnknownFaceGroup {
        /// Rule source group.
        source_group: String,
        /// Offending face group value.
        face_group: String,
    },

    /// A rule declares balance logic without a complete reclassify target.
    #[error("Rule '{0}' has balance logic but no complete reclassify target")]
    MissingReclassification(String),

    /// Two rules share the same normalized source group.
    #[error("Duplicate source group pattern '{0}'")]
    DuplicatePattern(String),

    /// The table could not be parsed.
    #[error("Invalid rule table: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for RuleTableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<RuleTableError> for ledgerlens_shared::AppError {
    fn from(err: RuleTableError) -> Self {
        Self::RuleTable(err.to_string())
    }
}
