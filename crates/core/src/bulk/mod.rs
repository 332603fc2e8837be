//! Bulk reclassification.
//!
//! Detects which classification levels are uniform across a user-selected
//! set of rows so a batch update can pre-fill only what is safe:
//! - H1 pre-fills whenever it is uniform
//! - H2 pre-fills only when H1 is uniform too
//! - H3 never pre-fills from a partial match

pub mod error;
pub mod service;
pub mod types;
pub mod uniformity;

#[cfg(test)]
mod tests;

pub use error::BulkUpdateError;
pub use service::BulkUpdateService;
pub use types::*;
pub use uniformity::{detect_uniform_value, is_empty, is_placeholder, normalize_value};
