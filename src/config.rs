//! Loading a [`FieldRuleSet`] from JSON.
//!
//! The document maps field ids to ordered rule lists. Fields that are not
//! mentioned get an empty chain.
//!
//! ```json
//! {
//!   "cardNumber": [
//!     { "rule": "required", "message": "Enter your card number" },
//!     { "rule": "cardNumber", "message": "Incorrect card number", "strictness": "prefix" }
//!   ],
//!   "cardCvc": [
//!     { "rule": "cvv", "message": "Incorrect CVV", "network": "amex" }
//!   ],
//!   "cardExpiryDate": [
//!     { "rule": "expiryDate", "message": "Incorrect expiry date", "today": "2025-06" }
//!   ]
//! }
//! ```
//!
//! Rule names: `required`, `email`, `cardNumber` (optional `strictness`:
//! `prefix` or `exactLength`), `expiryDate` (optional `today` as
//! `YYYY-MM`), `cvv`/`cvc` (optional `network`).
//!
//! # Example
//!
//! ```
//! use card_form::field::{FieldId, FieldRuleSet};
//!
//! let rules = FieldRuleSet::from_json(
//!     r#"{"cardHolder": [{"rule": "required", "message": "Enter your full name"}]}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(rules.validate(FieldId::CardHolder, "").message(), Some("Enter your full name"));
//! assert!(rules.validate(FieldId::CardNumber, "").is_valid());
//! ```

use crate::detect::Strictness;
use crate::error::ConfigError;
use crate::expiry::YearMonth;
use crate::field::{FieldId, FieldRuleSet, FIELD_COUNT};
use crate::validate::Validator;
use crate::CardNetwork;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// One entry of a field's rule list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RuleEntry {
    rule: String,
    message: String,
    #[serde(default)]
    strictness: Option<Strictness>,
    #[serde(default)]
    network: Option<String>,
    #[serde(default)]
    today: Option<String>,
}

impl RuleEntry {
    fn into_validator(self, field: FieldId) -> Result<Validator, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidRule {
            field: field.to_string(),
            reason,
        };

        let allowed: &[&str] = match self.rule.as_str() {
            "cardNumber" => &["strictness"],
            "expiryDate" => &["today"],
            "cvv" | "cvc" => &["network"],
            _ => &[],
        };
        for (setting, present) in [
            ("strictness", self.strictness.is_some()),
            ("network", self.network.is_some()),
            ("today", self.today.is_some()),
        ] {
            if present && !allowed.contains(&setting) {
                return Err(invalid(format!(
                    "'{}' does not apply to rule '{}'",
                    setting, self.rule
                )));
            }
        }

        let validator = match self.rule.as_str() {
            "required" => Validator::required(self.message),
            "email" => Validator::email(self.message),
            "cardNumber" => {
                Validator::card_number_with(self.message, self.strictness.unwrap_or_default())
            }
            "expiryDate" => match self.today {
                Some(today) => {
                    let today: YearMonth = today
                        .parse()
                        .map_err(|e| invalid(format!("bad 'today' value '{}': {}", today, e)))?;
                    Validator::expiry_date_at(self.message, today)
                }
                None => Validator::expiry_date(self.message),
            },
            "cvv" | "cvc" => match self.network {
                Some(network) => {
                    let network: CardNetwork =
                        network.parse().map_err(|e| invalid(format!("{}", e)))?;
                    Validator::cvv_for(self.message, network)
                }
                None => Validator::cvv(self.message),
            },
            _ => {
                return Err(ConfigError::UnknownRule {
                    field: field.to_string(),
                    rule: self.rule.clone(),
                })
            }
        };

        Ok(validator)
    }
}

impl FieldRuleSet {
    /// Parses a rule set from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let document: BTreeMap<String, Vec<RuleEntry>> =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_document(document)
    }

    /// Parses a rule set from a reader yielding JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let document: BTreeMap<String, Vec<RuleEntry>> =
            serde_json::from_reader(reader).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_document(document)
    }

    /// Reads and parses a JSON rule-set file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn from_document(document: BTreeMap<String, Vec<RuleEntry>>) -> Result<Self, ConfigError> {
        let mut rules = Self::empty();
        let mut seen = [false; FIELD_COUNT];
        for (key, entries) in document {
            let field: FieldId = key.parse()?;
            if std::mem::replace(&mut seen[field as usize], true) {
                return Err(ConfigError::DuplicateField {
                    field: field.to_string(),
                    key,
                });
            }
            let chain = entries
                .into_iter()
                .map(|entry| entry.into_validator(field))
                .collect::<Result<Vec<_>, _>>()?;

            #[cfg(feature = "tracing")]
            tracing::debug!(field = field.as_str(), rules = chain.len(), "configured field");

            rules.set(field, chain);
        }
        Ok(rules)
    }
}
