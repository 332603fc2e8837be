//! Shared types, errors, and configuration for Ledgerlens.
//!
//! This crate provides common types used across all other crates:
//! - Composite ledger keys used to persist manual classifications
//! - Note numbering configuration
//! - Entity constitutions
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
