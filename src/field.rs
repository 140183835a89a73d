//! Form fields and the rule chains attached to them.
//!
//! [`FieldId`] is the closed set of fields the card form knows about.
//! [`FieldRuleSet`] maps every one of them to an ordered list of
//! [`Validator`]s; a field without validators is always valid.
//!
//! # Example
//!
//! ```
//! use card_form::field::{default_rules, FieldId};
//!
//! let rules = default_rules();
//! let outcome = rules.validate(FieldId::CardHolder, "");
//! assert_eq!(outcome.message(), Some("Enter your full name"));
//! ```

use crate::error::ParseFieldError;
use crate::validate::{evaluate, ValidationOutcome, Validator};
use crate::CardNetwork;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

/// Number of fields in the form.
pub const FIELD_COUNT: usize = 5;

/// Formatted length of a complete expiry date (`MM/YY`).
pub const EXPIRY_FIELD_LENGTH: usize = 5;

/// A field of the card form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldId {
    /// The card number, grouped with spaces.
    #[cfg_attr(feature = "serde", serde(rename = "cardNumber"))]
    CardNumber,
    /// Name printed on the card.
    #[cfg_attr(feature = "serde", serde(rename = "cardHolder"))]
    CardHolder,
    /// `MM/YY`.
    #[cfg_attr(feature = "serde", serde(rename = "cardExpiryDate"))]
    CardExpiryDate,
    /// CVV/CVC/CID.
    #[cfg_attr(feature = "serde", serde(rename = "cardCVVCode"))]
    CardCvvCode,
    /// Contact email.
    #[cfg_attr(feature = "serde", serde(rename = "email"))]
    Email,
}

impl FieldId {
    /// All fields in form order.
    pub const ALL: [FieldId; FIELD_COUNT] = [
        FieldId::CardNumber,
        FieldId::CardHolder,
        FieldId::CardExpiryDate,
        FieldId::CardCvvCode,
        FieldId::Email,
    ];

    /// The string identifier of the field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CardNumber => "cardNumber",
            Self::CardHolder => "cardHolder",
            Self::CardExpiryDate => "cardExpiryDate",
            Self::CardCvvCode => "cardCVVCode",
            Self::Email => "email",
        }
    }

    /// The field focus moves to once this one is complete.
    pub const fn next(&self) -> Option<FieldId> {
        match self {
            Self::CardNumber => Some(Self::CardHolder),
            Self::CardExpiryDate => Some(Self::CardCvvCode),
            _ => None,
        }
    }

    /// Length at which the field counts as complete, given the current
    /// card network. Free-text fields have no limit.
    pub fn max_length(&self, network: CardNetwork) -> Option<usize> {
        match self {
            Self::CardNumber => Some(network.mask().formatted_width()),
            Self::CardExpiryDate => Some(EXPIRY_FIELD_LENGTH),
            Self::CardCvvCode => Some(network.cvv_length()),
            Self::CardHolder | Self::Email => None,
        }
    }

    /// Returns true for fields whose values must not be logged or shown.
    pub const fn is_sensitive(&self) -> bool {
        matches!(self, Self::CardNumber | Self::CardCvvCode)
    }

    #[inline]
    const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cardNumber" => Ok(Self::CardNumber),
            "cardHolder" => Ok(Self::CardHolder),
            "cardExpiryDate" => Ok(Self::CardExpiryDate),
            "cardCVVCode" | "cardCvc" => Ok(Self::CardCvvCode),
            "email" => Ok(Self::Email),
            _ => Err(ParseFieldError {
                input: s.to_string(),
            }),
        }
    }
}

/// Ordered validators for every field of the form.
#[derive(Debug, Clone, Default)]
pub struct FieldRuleSet {
    chains: [Vec<Validator>; FIELD_COUNT],
}

impl FieldRuleSet {
    /// A rule set with no validators at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replaces the chain of `field`, builder style.
    ///
    /// ```
    /// use card_form::field::{FieldId, FieldRuleSet};
    /// use card_form::validate::Validator;
    ///
    /// let rules = FieldRuleSet::empty()
    ///     .with_rules(FieldId::Email, [Validator::email("Incorrect email")]);
    /// assert!(rules.validate(FieldId::Email, "me@example.org").is_valid());
    /// assert!(rules.validate(FieldId::CardNumber, "").is_valid());
    /// ```
    pub fn with_rules(mut self, field: FieldId, rules: impl IntoIterator<Item = Validator>) -> Self {
        self.set(field, rules.into_iter().collect());
        self
    }

    /// Replaces the chain of `field`.
    pub fn set(&mut self, field: FieldId, rules: Vec<Validator>) {
        self.chains[field.index()] = rules;
    }

    /// Appends a validator to the chain of `field`.
    pub fn push(&mut self, field: FieldId, validator: Validator) {
        self.chains[field.index()].push(validator);
    }

    /// The chain of `field`, in evaluation order.
    #[inline]
    pub fn rules(&self, field: FieldId) -> &[Validator] {
        &self.chains[field.index()]
    }

    /// Runs the chain of `field` over `value`.
    pub fn validate(&self, field: FieldId, value: &str) -> ValidationOutcome {
        let outcome = evaluate(self.rules(field), value);

        #[cfg(feature = "tracing")]
        tracing::debug!(field = field.as_str(), valid = outcome.is_valid(), "field validated");

        outcome
    }

    /// The built-in configuration of the card form.
    pub fn standard() -> Self {
        Self::empty()
            .with_rules(
                FieldId::CardNumber,
                [
                    Validator::required("Enter your card number"),
                    Validator::card_number("Incorrect card number"),
                ],
            )
            .with_rules(
                FieldId::CardHolder,
                [Validator::required("Enter your full name")],
            )
            .with_rules(
                FieldId::CardExpiryDate,
                [
                    Validator::required("Enter your expiry date"),
                    Validator::expiry_date("Incorrect expiry date"),
                ],
            )
            .with_rules(
                FieldId::CardCvvCode,
                [
                    Validator::required("Enter your CVV"),
                    Validator::cvv("Incorrect CVV"),
                ],
            )
            .with_rules(
                FieldId::Email,
                [
                    Validator::required("Enter your email"),
                    Validator::email("Incorrect email"),
                ],
            )
    }
}

static DEFAULT_RULES: Lazy<FieldRuleSet> = Lazy::new(FieldRuleSet::standard);

/// The shared, read-only built-in rule set.
#[inline]
pub fn default_rules() -> &'static FieldRuleSet {
    &DEFAULT_RULES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::YearMonth;

    #[test]
    fn test_field_ids_round_trip() {
        for field in FieldId::ALL {
            assert_eq!(field.as_str().parse::<FieldId>().unwrap(), field);
            assert_eq!(field.to_string(), field.as_str());
        }
    }

    #[test]
    fn test_cvc_alias() {
        assert_eq!("cardCvc".parse::<FieldId>().unwrap(), FieldId::CardCvvCode);
    }

    #[test]
    fn test_unknown_field() {
        let err = "cardPin".parse::<FieldId>().unwrap_err();
        assert_eq!(err.input, "cardPin");
        // ids are case-sensitive
        assert!("CardNumber".parse::<FieldId>().is_err());
    }

    #[test]
    fn test_next_field() {
        assert_eq!(FieldId::CardNumber.next(), Some(FieldId::CardHolder));
        assert_eq!(FieldId::CardExpiryDate.next(), Some(FieldId::CardCvvCode));
        assert_eq!(FieldId::CardCvvCode.next(), None);
        assert_eq!(FieldId::Email.next(), None);
    }

    #[test]
    fn test_max_length() {
        assert_eq!(FieldId::CardNumber.max_length(CardNetwork::Visa), Some(19));
        assert_eq!(FieldId::CardNumber.max_length(CardNetwork::Unknown), Some(19));
        assert_eq!(FieldId::CardNumber.max_length(CardNetwork::Amex), Some(17));
        assert_eq!(FieldId::CardExpiryDate.max_length(CardNetwork::Visa), Some(5));
        assert_eq!(FieldId::CardCvvCode.max_length(CardNetwork::Amex), Some(4));
        assert_eq!(FieldId::CardCvvCode.max_length(CardNetwork::Visa), Some(3));
        assert_eq!(FieldId::CardHolder.max_length(CardNetwork::Visa), None);
    }

    #[test]
    fn test_empty_rule_set_accepts_everything() {
        let rules = FieldRuleSet::empty();
        for field in FieldId::ALL {
            assert!(rules.rules(field).is_empty());
            assert!(rules.validate(field, "").is_valid());
        }
    }

    #[test]
    fn test_default_messages() {
        let rules = default_rules();
        let cases = [
            (FieldId::CardNumber, "", "Enter your card number"),
            (FieldId::CardNumber, "4111 1111 1111 1112", "Incorrect card number"),
            (FieldId::CardHolder, "  ", "Enter your full name"),
            (FieldId::CardExpiryDate, "", "Enter your expiry date"),
            (FieldId::CardExpiryDate, "13/25", "Incorrect expiry date"),
            (FieldId::CardCvvCode, "", "Enter your CVV"),
            (FieldId::CardCvvCode, "12", "Incorrect CVV"),
            (FieldId::Email, "", "Enter your email"),
            (FieldId::Email, "nobody", "Incorrect email"),
        ];
        for (field, value, message) in cases {
            assert_eq!(rules.validate(field, value).message(), Some(message), "{}", field);
        }
    }

    #[test]
    fn test_default_accepts_good_values() {
        let rules = default_rules();
        assert!(rules.validate(FieldId::CardNumber, "4111 1111 1111 1111").is_valid());
        assert!(rules.validate(FieldId::CardHolder, "JANE DOE").is_valid());
        let now = YearMonth::now();
        let next_year = YearMonth::new(now.year() + 1, now.month()).unwrap();
        assert!(rules.validate(FieldId::CardExpiryDate, &next_year.to_short()).is_valid());
        assert!(rules.validate(FieldId::CardCvvCode, "1234").is_valid());
        assert!(rules.validate(FieldId::Email, "jane@example.com").is_valid());
    }

    #[test]
    fn test_push_and_set() {
        let mut rules = FieldRuleSet::empty();
        rules.push(FieldId::CardHolder, Validator::required("a"));
        rules.push(FieldId::CardHolder, Validator::custom("b", |s| s.len() > 3));
        assert_eq!(rules.rules(FieldId::CardHolder).len(), 2);
        assert_eq!(rules.validate(FieldId::CardHolder, "Al").message(), Some("b"));

        rules.set(FieldId::CardHolder, Vec::new());
        assert!(rules.validate(FieldId::CardHolder, "").is_valid());
    }

    #[test]
    fn test_rule_set_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldRuleSet>();
        assert_send_sync::<FieldId>();
    }
}
