//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::{Constitution, NoteNumberConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Engagement-scoped settings.
    #[serde(default)]
    pub engagement: EngagementConfig,
    /// Rule table locations.
    #[serde(default)]
    pub rules: RulesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Engagement configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngagementConfig {
    /// Legal constitution of the audited entity.
    #[serde(default)]
    pub constitution: Constitution,
    /// Note numbering ranges for the financial statements.
    #[serde(default)]
    pub note_numbering: NoteNumberConfig,
}

/// Rule table configuration.
///
/// When a path is absent the built-in tables are used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    /// JSON file replacing the built-in group mapping table.
    pub mapping_table_path: Option<PathBuf>,
    /// JSON file with user-defined classification rules.
    pub user_rules_path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON formatted log lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "ledgerlens=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEDGERLENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
