//! Compatibility Validator: how plausible an (industry, occupation) pairing is.
//!
//! Rules are data: each maps an industry code prefix to the occupation groups
//! (code prefixes) that plausibly work in it. The most specific matching
//! industry prefix decides. Industries no rule covers are neutral.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ConfigurationError;
use crate::taxonomy::CODE_DIGITS;

/// Confidence points for a pairing the table lists as plausible.
pub const PLAUSIBLE_BONUS: f64 = 10.0;
/// Confidence points for a mapped industry whose plausible set excludes the occupation.
pub const IMPLAUSIBLE_PENALTY: f64 = -25.0;

/// Built-in rules: (industry prefix, plausible occupation groups).
const BUILTIN_RULES: &[(&str, &[&str])] = &[
    // manufacturing
    ("1", &["214", "215", "311", "312", "313", "72", "75", "81", "82", "93"]),
    ("2", &["214", "215", "311", "312", "313", "72", "74", "81", "82", "93"]),
    ("3", &["214", "215", "311", "312", "313", "71", "74", "81", "93"]),
    // retail and food service
    ("47", &["333", "334", "432", "52", "93"]),
    ("56", &["343", "51", "94"]),
    // information and communications
    ("62", &["251", "252", "242", "243", "351", "352"]),
    ("63", &["251", "252", "242", "351", "352"]),
    // finance and insurance
    ("64", &["241", "242", "331", "332", "334", "411", "421"]),
    ("65", &["241", "242", "331", "332", "334", "411"]),
    ("66", &["241", "242", "331", "332", "334", "411"]),
    // professional services
    ("69", &["241", "261", "331", "334", "411"]),
    ("70", &["241", "242", "243", "333", "334"]),
    ("71", &["214", "216", "311", "312"]),
    // public administration
    ("841", &["242", "251", "261", "334", "411", "412"]),
    // education and health
    ("85", &["23", "334", "411"]),
    ("861", &["221", "222", "226", "321", "322", "532"]),
    ("862", &["221", "222", "226", "321", "322"]),
];

/// Occupation groups plausible in every industry. Managers work everywhere.
const UNIVERSAL_GROUPS: &[&str] = &["1"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRule {
    pub industry_prefix: String,
    pub occupation_groups: Vec<String>,
}

/// On-disk form of the rule set, loaded from `COMPATIBILITY_TABLE_PATH`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityTable {
    #[serde(default)]
    pub universal_groups: Vec<String>,
    pub rules: Vec<CompatibilityRule>,
}

impl CompatibilityTable {
    pub fn builtin() -> Self {
        Self {
            universal_groups: UNIVERSAL_GROUPS.iter().map(|g| g.to_string()).collect(),
            rules: BUILTIN_RULES
                .iter()
                .map(|(prefix, groups)| CompatibilityRule {
                    industry_prefix: prefix.to_string(),
                    occupation_groups: groups.iter().map(|g| g.to_string()).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompatibilityValidator {
    /// Sorted longest prefix first, so the first match is the most specific.
    rules: Vec<CompatibilityRule>,
    universal_groups: Vec<String>,
}

impl CompatibilityValidator {
    pub fn builtin() -> Self {
        Self::build(CompatibilityTable::builtin())
    }

    pub fn from_table(table: CompatibilityTable) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        for rule in &table.rules {
            if !is_code_prefix(&rule.industry_prefix) {
                return Err(ConfigurationError::CompatibilityTable(format!(
                    "industry prefix '{}' must be 1 to {CODE_DIGITS} digits",
                    rule.industry_prefix
                )));
            }
            if !seen.insert(rule.industry_prefix.as_str()) {
                return Err(ConfigurationError::CompatibilityTable(format!(
                    "industry prefix '{}' appears more than once",
                    rule.industry_prefix
                )));
            }
            if let Some(bad) = rule.occupation_groups.iter().find(|g| !is_code_prefix(g)) {
                return Err(ConfigurationError::CompatibilityTable(format!(
                    "occupation group '{bad}' under industry prefix '{}' must be 1 to {CODE_DIGITS} digits",
                    rule.industry_prefix
                )));
            }
        }
        if let Some(bad) = table.universal_groups.iter().find(|g| !is_code_prefix(g)) {
            return Err(ConfigurationError::CompatibilityTable(format!(
                "universal occupation group '{bad}' must be 1 to {CODE_DIGITS} digits"
            )));
        }

        Ok(Self::build(table))
    }

    fn build(table: CompatibilityTable) -> Self {
        let mut rules = table.rules;
        rules.sort_by(|a, b| {
            b.industry_prefix
                .len()
                .cmp(&a.industry_prefix.len())
                .then_with(|| a.industry_prefix.cmp(&b.industry_prefix))
        });

        Self {
            rules,
            universal_groups: table.universal_groups,
        }
    }

    /// Reads a JSON rule set. Replaces the built-in rules entirely.
    pub fn load_json(path: &Path) -> Result<Self, ConfigurationError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::CompatibilityTable(format!("{}: {e}", path.display()))
        })?;
        let table: CompatibilityTable = serde_json::from_str(&raw).map_err(|e| {
            ConfigurationError::CompatibilityTable(format!("{}: {e}", path.display()))
        })?;
        let validator = Self::from_table(table)?;
        info!(
            "Loaded {} compatibility rules from {}",
            validator.rules.len(),
            path.display()
        );
        Ok(validator)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Confidence delta for the pairing: `PLAUSIBLE_BONUS`, `IMPLAUSIBLE_PENALTY`,
    /// or 0 when the occupation is unknown or no rule covers the industry.
    pub fn adjust(&self, industry_code: &str, occupation_code: Option<&str>) -> f64 {
        let Some(occupation_code) = occupation_code else {
            return 0.0;
        };
        let Some(rule) = self
            .rules
            .iter()
            .find(|r| industry_code.starts_with(r.industry_prefix.as_str()))
        else {
            return 0.0;
        };

        let plausible = self
            .universal_groups
            .iter()
            .chain(rule.occupation_groups.iter())
            .any(|group| occupation_code.starts_with(group.as_str()));

        if plausible {
            PLAUSIBLE_BONUS
        } else {
            IMPLAUSIBLE_PENALTY
        }
    }
}

fn is_code_prefix(prefix: &str) -> bool {
    (1..=CODE_DIGITS).contains(&prefix.len()) && prefix.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(CompatibilityValidator::from_table(CompatibilityTable::builtin()).is_ok());
        assert_eq!(
            CompatibilityValidator::builtin().rule_count(),
            BUILTIN_RULES.len()
        );
    }

    #[test]
    fn test_plausible_pair_gets_bonus() {
        let validator = CompatibilityValidator::builtin();
        assert_eq!(validator.adjust("64191", Some("24131")), PLAUSIBLE_BONUS);
        assert_eq!(validator.adjust("62011", Some("25121")), PLAUSIBLE_BONUS);
    }

    #[test]
    fn test_implausible_pair_gets_penalty() {
        let validator = CompatibilityValidator::builtin();
        // a cook at a commercial bank
        assert_eq!(validator.adjust("64191", Some("51201")), IMPLAUSIBLE_PENALTY);
    }

    #[test]
    fn test_managers_are_plausible_everywhere() {
        let validator = CompatibilityValidator::builtin();
        assert_eq!(validator.adjust("86101", Some("12111")), PLAUSIBLE_BONUS);
        assert_eq!(validator.adjust("10711", Some("12122")), PLAUSIBLE_BONUS);
    }

    #[test]
    fn test_unmapped_or_unknown_is_neutral() {
        let validator = CompatibilityValidator::builtin();
        assert_eq!(validator.adjust("99000", Some("25121")), 0.0);
        assert_eq!(validator.adjust("64191", None), 0.0);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let validator = CompatibilityValidator::from_table(CompatibilityTable {
            universal_groups: vec![],
            rules: vec![
                CompatibilityRule {
                    industry_prefix: "8".to_string(),
                    occupation_groups: vec!["9".to_string()],
                },
                CompatibilityRule {
                    industry_prefix: "861".to_string(),
                    occupation_groups: vec!["222".to_string()],
                },
            ],
        })
        .unwrap();
        assert_eq!(validator.adjust("86101", Some("22210")), PLAUSIBLE_BONUS);
        assert_eq!(validator.adjust("86101", Some("91000")), IMPLAUSIBLE_PENALTY);
        assert_eq!(validator.adjust("85000", Some("91000")), PLAUSIBLE_BONUS);
    }

    #[test]
    fn test_invalid_tables_are_rejected() {
        let bad_prefix = CompatibilityTable {
            universal_groups: vec![],
            rules: vec![CompatibilityRule {
                industry_prefix: "6a".to_string(),
                occupation_groups: vec!["241".to_string()],
            }],
        };
        assert!(matches!(
            CompatibilityValidator::from_table(bad_prefix),
            Err(ConfigurationError::CompatibilityTable(_))
        ));

        let duplicate = CompatibilityTable {
            universal_groups: vec![],
            rules: vec![
                CompatibilityRule {
                    industry_prefix: "64".to_string(),
                    occupation_groups: vec!["241".to_string()],
                },
                CompatibilityRule {
                    industry_prefix: "64".to_string(),
                    occupation_groups: vec!["331".to_string()],
                },
            ],
        };
        assert!(CompatibilityValidator::from_table(duplicate).is_err());
    }

    #[test]
    fn test_load_json_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"rules": [{"industry_prefix": "56", "occupation_groups": ["512"]}]}"#,
        )
        .unwrap();

        let validator = CompatibilityValidator::load_json(file.path()).unwrap();
        assert_eq!(validator.rule_count(), 1);
        assert_eq!(validator.adjust("56111", Some("51201")), PLAUSIBLE_BONUS);
        // no universal groups in the override
        assert_eq!(validator.adjust("56111", Some("12111")), IMPLAUSIBLE_PENALTY);
    }

    #[test]
    fn test_load_json_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(matches!(
            CompatibilityValidator::load_json(file.path()),
            Err(ConfigurationError::CompatibilityTable(_))
        ));
    }
}
