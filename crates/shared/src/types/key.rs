//! Composite ledger key.
//!
//! A ledger is identified across re-imports by its name together with the
//! source group it was imported under. Saved manual classifications are
//! joined back to fresh imports through this key.

use serde::{Deserialize, Serialize};

/// Separator between ledger name and source group.
pub const KEY_SEPARATOR: char = '|';

/// Stable identity of a ledger row: `ledger_name|primary_group`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeKey(String);

impl CompositeKey {
    /// Builds a key from a ledger name and its source group, trimming both parts.
    #[must_use]
    pub fn new(ledger_name: &str, primary_group: &str) -> Self {
        Self(format!(
            "{}{KEY_SEPARATOR}{}",
            ledger_name.trim(),
            primary_group.trim()
        ))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the key back into ledger name and source group.
    #[must_use]
    pub fn parts(&self) -> (&str, &str) {
        self.0
            .split_once(KEY_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }
}

impl std::fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CompositeKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_trims_parts() {
        let key = CompositeKey::new("  Office Rent ", " Indirect Expenses  ");
        assert_eq!(key.as_str(), "Office Rent|Indirect Expenses");
    }

    #[test]
    fn test_key_parts() {
        let key = CompositeKey::new("HDFC Bank", "Bank Accounts");
        assert_eq!(key.parts(), ("HDFC Bank", "Bank Accounts"));
    }

    #[test]
    fn test_key_equality_ignores_padding() {
        assert_eq!(
            CompositeKey::new("Cash", "Cash-in-Hand"),
            CompositeKey::new("Cash ", "Cash-in-Hand ")
        );
    }

    #[test]
    fn test_key_serializes_as_string() {
        let key = CompositeKey::new("Cash", "Cash-in-Hand");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"Cash|Cash-in-Hand\"");
    }
}
