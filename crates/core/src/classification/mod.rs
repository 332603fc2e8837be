//! Ledger classification.
//!
//! This module turns trial-balance rows into a 5-level classification:
//! - H1 Statement (Balance Sheet / P&L Account)
//! - H2 Face group
//! - H3 Note group
//! - H4 Sub-note
//! - H5 reserved detail level
//!
//! Resolution follows a fixed priority chain (saved mapping, special cases,
//! balance logic, mapping table) followed by user-defined rules for rows
//! that stay unmapped.

pub mod error;
pub mod keywords;
pub mod rules;
pub mod service;
pub mod steps;
pub mod types;
pub mod user_rules;


pub use error::RuleTableError;
pub use rules::{BalanceLogic, MappingRule, MappingRuleRecord, RuleTable};
pub use service::{Classifier, ReclassificationEntry, ReclassificationSummary};
pub use steps::{ClassificationStep, Resolution, ResolutionSource};
pub use types::*;
pub use user_rules::{ClassificationRule, RuleScope, RuleTarget, apply_user_rules};
