//! Financial statement generation.
//!
//! This module provides pure business logic for turning classified rows into
//! statements:
//! - Per-period aggregation into statement line buckets
//! - Schedule III statement structure
//! - Note numbering
//! - Corporate / non-corporate display labels

pub mod aggregator;
pub mod error;
pub mod labels;
pub mod notes;
pub mod service;
pub mod structure;
pub mod types;


pub use aggregator::{aggregate, aggregate_periods, face_and_note_bucket};
pub use error::ReportError;
pub use labels::{DisplayLabel, LabelCatalog, LabelMapping};
pub use notes::{
    NoteNumberRange, StatementType, all_note_numbers, calculate_note_number_ranges,
    display_note_number, note_config_summary, note_number_for_line, validate_note_config,
};
pub use service::ReportService;
pub use structure::{LineSection, StatementLine, StatementStructure};
pub use types::*;
