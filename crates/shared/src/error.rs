//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input file or record could not be read.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A rule table failed validation at load time.
    #[error("Rule table error: {0}")]
    RuleTable(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business rule violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) | Self::NotFound(_) => 65,
            Self::Configuration(_) | Self::RuleTable(_) => 78,
            Self::BusinessRule(_) => 2,
            Self::Internal(_) => 70,
        }
    }

    /// Returns the stable error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::RuleTable(_) => "RULE_TABLE_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::InvalidInput(String::new()), 65, "INVALID_INPUT")]
    #[case(AppError::Configuration(String::new()), 78, "CONFIGURATION_ERROR")]
    #[case(AppError::RuleTable(String::new()), 78, "RULE_TABLE_ERROR")]
    #[case(AppError::NotFound(String::new()), 65, "NOT_FOUND")]
    #[case(AppError::BusinessRule(String::new()), 2, "BUSINESS_RULE_VIOLATION")]
    #[case(AppError::Internal(String::new()), 70, "INTERNAL_ERROR")]
    fn test_error_codes(#[case] err: AppError, #[case] exit: i32, #[case] code: &str) {
        assert_eq!(err.exit_code(), exit);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::InvalidInput("msg".into()).to_string(),
            "Invalid input: msg"
        );
        assert_eq!(
            AppError::Configuration("msg".into()).to_string(),
            "Configuration error: msg"
        );
        assert_eq!(
            AppError::RuleTable("msg".into()).to_string(),
            "Rule table error: msg"
        );
        assert_eq!(
            AppError::BusinessRule("msg".into()).to_string(),
            "Business rule violation: msg"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        assert!(matches!(AppError::from(err), AppError::InvalidInput(_)));
    }
}
