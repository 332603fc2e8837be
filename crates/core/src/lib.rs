//! Core business logic for Ledgerlens.
//!
//! This crate contains the ledger classification and statement aggregation
//! engine with ZERO I/O. All rule tables, priority resolution and
//! aggregation live here.
//!
//! # Modules
//!
//! - `classification` - Rule tables and the 5-level ledger classifier
//! - `bulk` - Uniformity detection and bulk reclassification
//! - `reports` - Statement aggregation, note numbering and display labels

pub mod bulk;
pub mod classification;
pub mod reports;
