//! Entity constitutions and their reporting label sets.

use serde::{Deserialize, Serialize};

/// Legal constitution of the audited entity.
///
/// Unknown values fall back to [`Constitution::Company`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Constitution {
    /// Company (Schedule III).
    #[default]
    Company,
    /// Limited liability partnership.
    Llp,
    /// Partnership firm.
    Partnership,
    /// Sole proprietorship.
    Proprietorship,
    /// Trust.
    Trust,
    /// Society.
    Society,
}

/// Which of the two display label sets an entity uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSet {
    /// Corporate (Schedule III) labels.
    Corporate,
    /// Non-corporate entity labels.
    Nce,
}

impl Constitution {
    /// All known constitutions.
    pub const ALL: [Self; 6] = [
        Self::Company,
        Self::Llp,
        Self::Partnership,
        Self::Proprietorship,
        Self::Trust,
        Self::Society,
    ];

    /// Resolves a constitution code, defaulting to `Company` when unknown.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "llp" => Self::Llp,
            "partnership" => Self::Partnership,
            "proprietorship" => Self::Proprietorship,
            "trust" => Self::Trust,
            "society" => Self::Society,
            _ => Self::Company,
        }
    }

    /// Returns the stable code of this constitution.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Llp => "llp",
            Self::Partnership => "partnership",
            Self::Proprietorship => "proprietorship",
            Self::Trust => "trust",
            Self::Society => "society",
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::Llp => "Limited Liability Partnership",
            Self::Partnership => "Partnership Firm",
            Self::Proprietorship => "Proprietorship",
            Self::Trust => "Trust",
            Self::Society => "Society",
        }
    }

    /// Label set used when rendering statements for this entity.
    #[must_use]
    pub const fn label_set(self) -> LabelSet {
        match self {
            Self::Company => LabelSet::Corporate,
            _ => LabelSet::Nce,
        }
    }

    /// Whether Schedule III presentation applies.
    #[must_use]
    pub const fn is_schedule_iii(self) -> bool {
        matches!(self, Self::Company)
    }
}

impl From<String> for Constitution {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl std::fmt::Display for Constitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("company", Constitution::Company, LabelSet::Corporate)]
    #[case("LLP", Constitution::Llp, LabelSet::Nce)]
    #[case("partnership", Constitution::Partnership, LabelSet::Nce)]
    #[case("proprietorship", Constitution::Proprietorship, LabelSet::Nce)]
    #[case(" trust ", Constitution::Trust, LabelSet::Nce)]
    #[case("society", Constitution::Society, LabelSet::Nce)]
    #[case("cooperative", Constitution::Company, LabelSet::Corporate)]
    #[case("", Constitution::Company, LabelSet::Corporate)]
    fn test_from_code(#[case] code: &str, #[case] expected: Constitution, #[case] set: LabelSet) {
        let constitution = Constitution::from_code(code);
        assert_eq!(constitution, expected);
        assert_eq!(constitution.label_set(), set);
    }

    #[test]
    fn test_code_roundtrip() {
        for constitution in Constitution::ALL {
            assert_eq!(Constitution::from_code(constitution.code()), constitution);
        }
    }

    #[test]
    fn test_only_company_is_schedule_iii() {
        let schedule_iii: Vec<_> = Constitution::ALL
            .into_iter()
            .filter(|c| c.is_schedule_iii())
            .collect();
        assert_eq!(schedule_iii, vec![Constitution::Company]);
    }

    #[test]
    fn test_deserialize_unknown_defaults_to_company() {
        let constitution: Constitution = serde_json::from_str("\"huf\"").unwrap();
        assert_eq!(constitution, Constitution::Company);
    }
}
