//! User-defined classification rules.
//!
//! Rules are matched by case-insensitive substring on the ledger name, the
//! parent group and the primary group. They only fill rows the classifier
//! left without a face group and note group.

use serde::{Deserialize, Serialize};

use super::types::{AutoFlag, LedgerRow, derive_h1, is_blank};

/// Note appended when a rule defers H2/H3 to the user.
pub const PENDING_NOTE: &str = "User_Defined - set H2/H3 manually";

/// Target value of a user rule level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleTarget {
    /// The user must choose the value manually.
    Pending,
    /// A concrete value.
    Resolved(String),
}

impl From<String> for RuleTarget {
    fn from(raw: String) -> Self {
        let compact: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if compact == "userdefined" {
            Self::Pending
        } else {
            Self::Resolved(raw)
        }
    }
}

impl From<RuleTarget> for String {
    fn from(target: RuleTarget) -> Self {
        match target {
            RuleTarget::Pending => "User_Defined".to_string(),
            RuleTarget::Resolved(value) => value,
        }
    }
}

/// Where a rule applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    /// Shared across all clients.
    #[default]
    Global,
    /// Specific to one client.
    Client,
}

/// A user-defined classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Rule identifier shown in audit notes.
    pub id: String,
    /// Substring of the primary group.
    #[serde(default)]
    pub primary_group_contains: Option<String>,
    /// Substring of the parent group.
    #[serde(default)]
    pub parent_group_contains: Option<String>,
    /// Substring of the ledger name.
    #[serde(default)]
    pub ledger_name_contains: Option<String>,
    /// Statement target.
    #[serde(default)]
    pub h1: Option<RuleTarget>,
    /// Face group target.
    #[serde(default)]
    pub h2: Option<RuleTarget>,
    /// Note group target.
    #[serde(default)]
    pub h3: Option<RuleTarget>,
    /// Rule scope.
    #[serde(default)]
    pub scope: RuleScope,
}

impl ClassificationRule {
    /// Whether every defined matcher is a substring of its field.
    ///
    /// A rule with no matchers matches every row.
    #[must_use]
    pub fn matches(&self, row: &LedgerRow) -> bool {
        contains(self.primary_group_contains.as_deref(), &row.primary_group)
            && contains(
                self.parent_group_contains.as_deref(),
                row.parent_group.as_deref().unwrap_or_default(),
            )
            && contains(self.ledger_name_contains.as_deref(), &row.ledger_name)
    }
}

fn contains(needle: Option<&str>, haystack: &str) -> bool {
    match needle.map(str::trim) {
        None | Some("") => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

/// Applies the first matching rule to a row, filling only empty fields.
///
/// No-op when the row already has H2 or H3, or when `rules` is empty.
/// A missing H1 is derived from the filled H2. Returns the rule that was
/// applied.
pub fn apply_user_rules<'a>(
    row: &mut LedgerRow,
    rules: &'a [ClassificationRule],
) -> Option<&'a ClassificationRule> {
    if rules.is_empty() || !is_blank(row.h2.as_deref()) || !is_blank(row.h3.as_deref()) {
        return None;
    }

    let rule = rules.iter().find(|rule| rule.matches(row))?;
    let mut pending = false;

    fill(&mut row.h1, rule.h1.as_ref(), &mut pending, false);
    fill(&mut row.h2, rule.h2.as_ref(), &mut pending, true);
    fill(&mut row.h3, rule.h3.as_ref(), &mut pending, true);
    if is_blank(row.h1.as_deref())
        && let Some(statement) = row.h2.as_deref().and_then(derive_h1)
    {
        row.h1 = Some(statement.as_str().to_string());
    }

    if pending {
        row.append_note(PENDING_NOTE);
    }
    row.auto = Some(AutoFlag::Yes);
    row.auto_reason = Some(format!("User rule {}", rule.id));
    row.refresh_status();

    Some(rule)
}

fn fill(
    field: &mut Option<String>,
    target: Option<&RuleTarget>,
    pending: &mut bool,
    flags_pending: bool,
) {
    if !is_blank(field.as_deref()) {
        return;
    }
    match target {
        Some(RuleTarget::Resolved(value)) if !value.trim().is_empty() => {
            *field = Some(value.clone());
        }
        Some(RuleTarget::Pending) if flags_pending => *pending = true,
        _ => {}
    }
}
