//! Field validators and rule-chain evaluation.
//!
//! A [`Validator`] pairs a predicate ([`Rule`]) with the message shown when
//! it fails. The message is always supplied by the caller; validators never
//! invent their own text.
//!
//! A field is checked by running its validators in order with [`evaluate`].
//! Evaluation stops at the first failing validator and reports that
//! validator's message, so `required` placed first hides every later rule
//! for an empty field.
//!
//! # Example
//!
//! ```
//! use card_form::validate::{evaluate, ValidationOutcome, Validator};
//!
//! let rules = [
//!     Validator::required("Enter your card number"),
//!     Validator::card_number("Incorrect card number"),
//! ];
//!
//! assert_eq!(
//!     evaluate(&rules, ""),
//!     ValidationOutcome::Invalid("Enter your card number".to_string())
//! );
//! assert_eq!(
//!     evaluate(&rules, "4111 1111 1111 1112"),
//!     ValidationOutcome::Invalid("Incorrect card number".to_string())
//! );
//! assert!(evaluate(&rules, "4111 1111 1111 1111").is_valid());
//! ```

use crate::detect::{classify_with, Strictness};
use crate::expiry::{is_valid_expiry, is_valid_expiry_at, YearMonth};
use crate::format::sanitize;
use crate::{cvv, luhn, CardNetwork};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// `local@domain.tld`, case-insensitive. The domain is one or more
/// letter/digit/hyphen labels followed by a top-level label of two or more
/// letters.
const EMAIL_REGEX: &str =
    r"(?i)^[a-z0-9_.!#$%&'*+/=?^`{|}~-]+@(?:[a-z0-9-]+\.)+[a-z]{2,}$";

static EMAIL_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(EMAIL_REGEX).ok());

/// The predicate part of a [`Validator`].
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The trimmed value is not empty.
    Required,
    /// The value looks like an email address.
    Email,
    /// The digits belong to a known network (under the given strictness)
    /// and pass the Luhn checksum.
    CardNumber(Strictness),
    /// `MM/YY` not before the reference month. `None` means the current
    /// month of the local clock, read at every check.
    ExpiryDate(Option<YearMonth>),
    /// Exactly 3 or 4 digits.
    Cvv,
    /// Exactly the CVV length of the given network.
    CvvFor(CardNetwork),
    /// Any other check.
    Custom(fn(&str) -> bool),
}

impl Rule {
    /// Runs the predicate.
    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::Required => !value.trim().is_empty(),
            Self::Email => is_email(value),
            Self::CardNumber(strictness) => is_valid_card_number(value, *strictness),
            Self::ExpiryDate(Some(today)) => is_valid_expiry_at(value, *today),
            Self::ExpiryDate(None) => is_valid_expiry(value),
            Self::Cvv => cvv::is_valid_cvv(value),
            Self::CvvFor(network) => cvv::is_valid_cvv_for(value, *network),
            Self::Custom(predicate) => predicate(value),
        }
    }

    /// Short name of the rule kind, as used in configuration files.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::CardNumber(_) => "cardNumber",
            Self::ExpiryDate(_) => "expiryDate",
            Self::Cvv | Self::CvvFor(_) => "cvv",
            Self::Custom(_) => "custom",
        }
    }
}

/// A predicate plus the message reported when it fails.
#[derive(Debug, Clone)]
pub struct Validator {
    rule: Rule,
    message: String,
}

impl Validator {
    /// Creates a validator from any rule.
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }

    /// Fails on empty or whitespace-only values.
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(Rule::Required, message)
    }

    /// Fails unless the value is a plausible email address.
    pub fn email(message: impl Into<String>) -> Self {
        Self::new(Rule::Email, message)
    }

    /// Fails unless the value is a complete card number of a known network
    /// with a valid checksum. Separators in the value are ignored.
    pub fn card_number(message: impl Into<String>) -> Self {
        Self::card_number_with(message, Strictness::ExactLength)
    }

    /// Like [`Validator::card_number`], with an explicit strictness.
    pub fn card_number_with(message: impl Into<String>, strictness: Strictness) -> Self {
        Self::new(Rule::CardNumber(strictness), message)
    }

    /// Fails unless the value is an `MM/YY` date in the current month or
    /// later.
    pub fn expiry_date(message: impl Into<String>) -> Self {
        Self::new(Rule::ExpiryDate(None), message)
    }

    /// Like [`Validator::expiry_date`], comparing against a fixed month.
    pub fn expiry_date_at(message: impl Into<String>, today: YearMonth) -> Self {
        Self::new(Rule::ExpiryDate(Some(today)), message)
    }

    /// Fails unless the value is 3 or 4 digits.
    pub fn cvv(message: impl Into<String>) -> Self {
        Self::new(Rule::Cvv, message)
    }

    /// Alias of [`Validator::cvv`].
    pub fn cvc(message: impl Into<String>) -> Self {
        Self::cvv(message)
    }

    /// Fails unless the value has exactly the CVV length of `network`.
    pub fn cvv_for(message: impl Into<String>, network: CardNetwork) -> Self {
        Self::new(Rule::CvvFor(network), message)
    }

    /// Wraps an arbitrary predicate.
    pub fn custom(message: impl Into<String>, predicate: fn(&str) -> bool) -> Self {
        Self::new(Rule::Custom(predicate), message)
    }

    /// Returns true if the value passes this validator.
    #[inline]
    pub fn validate(&self, value: &str) -> bool {
        self.rule.check(value)
    }

    /// The predicate.
    #[inline]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The message reported on failure.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of checking one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", content = "message", rename_all = "lowercase"))]
pub enum ValidationOutcome {
    /// Every validator passed (or the field has none).
    #[default]
    Valid,
    /// The message of the first validator that failed.
    Invalid(String),
}

impl ValidationOutcome {
    /// Returns true for `Valid`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The error message, if any.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid(message) => write!(f, "invalid: {}", message),
        }
    }
}

/// Runs a rule chain over a value, stopping at the first failure.
///
/// An empty chain is always valid.
pub fn evaluate(rules: &[Validator], value: &str) -> ValidationOutcome {
    match rules.iter().find(|validator| !validator.validate(value)) {
        Some(failed) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(rule = failed.rule().name(), "rule failed");
            ValidationOutcome::Invalid(failed.message().to_string())
        }
        None => ValidationOutcome::Valid,
    }
}

/// Returns true if `value` (separators allowed) is a card number of a known
/// network with a valid Luhn checksum.
///
/// With [`Strictness::Prefix`] any length up to the network's maximum is
/// accepted; with [`Strictness::ExactLength`] the length must be one the
/// network issues.
pub fn is_valid_card_number(value: &str, strictness: Strictness) -> bool {
    let digits = sanitize(value);
    let network = classify_with(&digits, strictness);

    network.is_known() && digits.len() <= network.max_digits() && luhn::check_luhn(&digits)
}

/// Returns true if `value` looks like an email address.
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_2025() -> YearMonth {
        YearMonth::new(2025, 6).unwrap()
    }

    #[test]
    fn test_email_pattern_compiles() {
        assert!(EMAIL_PATTERN.is_some());
    }

    #[test]
    fn test_required() {
        let v = Validator::required("Enter value");
        assert!(!v.validate(""));
        assert!(!v.validate("   \t"));
        assert!(v.validate("x"));
        assert!(v.validate("  x  "));
    }

    #[test]
    fn test_email() {
        assert!(is_email("user@example.com"));
        assert!(is_email("USER@EXAMPLE.COM"));
        assert!(is_email("first.last+tag@mail.example.co"));
        assert!(is_email("o'brien_{x}@ex-ample.io"));
        assert!(!is_email("user@example"));
        assert!(!is_email("user@example.c"));
        assert!(!is_email("user@example.c0m"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("user example@example.com"));
        assert!(!is_email("user@exa_mple.com"));
        assert!(!is_email(""));
    }

    #[test]
    fn test_card_number_exact_length() {
        let v = Validator::card_number("Incorrect card number");
        assert!(v.validate("4111111111111111"));
        assert!(v.validate("4111 1111 1111 1111"));
        assert!(v.validate("4222222222222"));
        assert!(v.validate("5500000000000004"));
        assert!(v.validate("3400 000000 00009"));
        assert!(v.validate("6011000000000004"));

        assert!(!v.validate("4111111111111112"));
        assert!(!v.validate(""));
        // Luhn-valid but unknown prefix
        assert!(!v.validate("0000000000000000"));
        // Luhn-valid, known prefix, wrong length
        assert!(!v.validate("42"));
    }

    #[test]
    fn test_card_number_prefix_only() {
        let v = Validator::card_number_with("Incorrect card number", Strictness::Prefix);
        assert!(v.validate("42"));
        assert!(v.validate("4111111111111111"));
        assert!(!v.validate("41111111111111111111"));
        assert!(!v.validate(""));
    }

    #[test]
    fn test_expiry_date_at() {
        let v = Validator::expiry_date_at("Incorrect expiry date", june_2025());
        assert!(v.validate("06/25"));
        assert!(!v.validate("05/25"));
        assert!(v.validate("07/25"));
        assert!(!v.validate("13/25"));
        assert!(!v.validate("0625"));
    }

    #[test]
    fn test_cvv() {
        let v = Validator::cvc("Incorrect CVV");
        assert!(v.validate("123"));
        assert!(v.validate("1234"));
        assert!(!v.validate("12"));
        assert!(!v.validate("12a"));

        let amex = Validator::cvv_for("Incorrect CVV", CardNetwork::Amex);
        assert!(amex.validate("1234"));
        assert!(!amex.validate("123"));
    }

    #[test]
    fn test_custom() {
        let v = Validator::custom("Latin letters only", |s| {
            s.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
        });
        assert!(v.validate("JANE DOE"));
        assert!(!v.validate("J4NE"));
        assert_eq!(v.rule().name(), "custom");
    }

    #[test]
    fn test_evaluate_empty_chain_is_valid() {
        assert_eq!(evaluate(&[], ""), ValidationOutcome::Valid);
    }

    #[test]
    fn test_evaluate_required() {
        let rules = [Validator::required("Enter value")];
        assert_eq!(
            evaluate(&rules, ""),
            ValidationOutcome::Invalid("Enter value".to_string())
        );
        assert_eq!(evaluate(&rules, "x"), ValidationOutcome::Valid);
    }

    #[test]
    fn test_evaluate_fail_fast() {
        let rules = [
            Validator::required("msgA"),
            Validator::card_number("msgB"),
        ];
        assert_eq!(evaluate(&rules, "").message(), Some("msgA"));
        assert_eq!(evaluate(&rules, "4111").message(), Some("msgB"));
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let rules = [Validator::required("a"), Validator::cvv("b")];
        for _ in 0..3 {
            assert_eq!(evaluate(&rules, "12").message(), Some("b"));
            assert!(evaluate(&rules, "123").is_valid());
        }
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(ValidationOutcome::Valid.to_string(), "valid");
        assert_eq!(
            ValidationOutcome::Invalid("Incorrect CVV".to_string()).to_string(),
            "invalid: Incorrect CVV"
        );
        assert_eq!(ValidationOutcome::default(), ValidationOutcome::Valid);
    }

    #[test]
    fn test_validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
        assert_send_sync::<ValidationOutcome>();
    }
}
