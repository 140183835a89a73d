//! The card entry form: per-field values, formatting on input, validation on
//! blur and submit.
//!
//! [`CardForm`] is what an input layer (DOM bindings, a terminal UI, a test)
//! drives. It never touches any display itself; every call returns what the
//! caller should show.
//!
//! - [`CardForm::input`] formats the new value of a field and tells the
//!   caller whether focus should move on.
//! - [`CardForm::blur`] validates the field being left.
//! - [`CardForm::submit`] validates everything.
//! - [`CardForm::focus`] reports which side of the card to show.
//!
//! Once the card number identifies a network, the CVV field is cut and
//! checked at that network's exact CVV length.
//!
//! # Example
//!
//! ```
//! use card_form::form::{CardFace, CardForm};
//! use card_form::field::FieldId;
//!
//! let mut form = CardForm::new();
//!
//! let effect = form.input(FieldId::CardNumber, "4111111111111111");
//! assert_eq!(effect.value, "4111 1111 1111 1111");
//! assert_eq!(effect.advance_to, Some(FieldId::CardHolder));
//!
//! assert_eq!(form.focus(FieldId::CardCvvCode), CardFace::Back);
//! form.input(FieldId::CardCvvCode, "12");
//! assert_eq!(form.blur(FieldId::CardCvvCode).message(), Some("Incorrect CVV"));
//!
//! assert!(!form.submit().is_valid());
//! ```

use crate::cvv::MAX_CVV_DIGITS;
use crate::detect::classify;
use crate::field::{default_rules, FieldId, FieldRuleSet, FIELD_COUNT};
use crate::format::{format_card_number, format_cvv_code, format_expiry_date, sanitize};
use crate::validate::{evaluate, Rule, ValidationOutcome, Validator};
use crate::CardNetwork;
use std::fmt;
use zeroize::Zeroize;

/// Which side of the card the preview should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardFace {
    /// Number, holder and expiry side.
    #[default]
    Front,
    /// CVV side.
    Back,
}

/// What the caller should do after an input event.
#[derive(Clone, PartialEq, Eq)]
pub struct InputEffect {
    /// The formatted value to write back into the control.
    pub value: String,
    /// Field to move focus to, when this one just became complete.
    pub advance_to: Option<FieldId>,
}

impl fmt::Debug for InputEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputEffect")
            .field("value", &format_args!("<{} chars>", self.value.len()))
            .field("advance_to", &self.advance_to)
            .finish()
    }
}

/// Outcome of every field after a full validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormReport {
    outcomes: [ValidationOutcome; FIELD_COUNT],
}

impl FormReport {
    /// The outcome of one field.
    #[inline]
    pub fn outcome(&self, field: FieldId) -> &ValidationOutcome {
        &self.outcomes[field as usize]
    }

    /// Returns true if every field is valid.
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(ValidationOutcome::is_valid)
    }

    /// All outcomes in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &ValidationOutcome)> {
        FieldId::ALL.into_iter().zip(self.outcomes.iter())
    }

    /// The failing fields and their messages, in form order.
    pub fn errors(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.iter()
            .filter_map(|(field, outcome)| outcome.message().map(|message| (field, message)))
    }

    /// Number of failing fields.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }
}

impl fmt::Display for FormReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        for (i, (field, message)) in self.errors().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FormReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (field, outcome) in self.iter() {
            map.serialize_entry(field.as_str(), &outcome.message())?;
        }
        map.end()
    }
}

/// Validates a set of field values in one pass.
///
/// `value_of` supplies the current value of each field. The card number's
/// network narrows the CVV check the same way [`CardForm`] does.
pub fn validate_values<'a, F>(rules: &FieldRuleSet, value_of: F) -> FormReport
where
    F: Fn(FieldId) -> &'a str,
{
    let network = classify(&sanitize(value_of(FieldId::CardNumber)));
    let mut report = FormReport::default();
    for field in FieldId::ALL {
        report.outcomes[field as usize] = validate_field(rules, field, value_of(field), network);
    }
    report
}

/// Runs one field's chain, with any network-agnostic CVV rule replaced by
/// the exact length of a known network.
fn validate_field(
    rules: &FieldRuleSet,
    field: FieldId,
    value: &str,
    network: CardNetwork,
) -> ValidationOutcome {
    if field != FieldId::CardCvvCode || !network.is_known() {
        return rules.validate(field, value);
    }

    let narrowed: Vec<Validator> = rules
        .rules(field)
        .iter()
        .map(|validator| match validator.rule() {
            Rule::Cvv => Validator::cvv_for(validator.message(), network),
            _ => validator.clone(),
        })
        .collect();
    let outcome = evaluate(&narrowed, value);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        field = field.as_str(),
        network = network.id(),
        valid = outcome.is_valid(),
        "field validated"
    );

    outcome
}

/// State of one card entry form.
///
/// Values are wiped from memory when the form is reset or dropped, and
/// `Debug` output shows only their lengths.
#[derive(Clone)]
pub struct CardForm {
    rules: FieldRuleSet,
    values: [String; FIELD_COUNT],
    // CVV digits as typed, up to the longest length any network uses
    cvv_digits: String,
    outcomes: [Option<ValidationOutcome>; FIELD_COUNT],
    network: CardNetwork,
    focused: Option<FieldId>,
}

impl CardForm {
    /// A form using the built-in rules.
    pub fn new() -> Self {
        Self::with_rules(default_rules().clone())
    }

    /// A form using a custom rule set.
    pub fn with_rules(rules: FieldRuleSet) -> Self {
        Self {
            rules,
            values: Default::default(),
            cvv_digits: String::new(),
            outcomes: Default::default(),
            network: CardNetwork::Unknown,
            focused: None,
        }
    }

    /// Applies an input event: formats `raw` for `field`, stores it and
    /// returns the value to display.
    pub fn input(&mut self, field: FieldId, raw: &str) -> InputEffect {
        let value = match field {
            FieldId::CardNumber => {
                let formatted = format_card_number(raw);
                self.set_network(classify(&sanitize(&formatted)));
                formatted
            }
            FieldId::CardExpiryDate => format_expiry_date(raw),
            FieldId::CardCvvCode => {
                self.cvv_digits.zeroize();
                self.cvv_digits = sanitize(raw);
                self.cvv_digits.truncate(MAX_CVV_DIGITS);
                format_cvv_code(&self.cvv_digits, self.network)
            }
            FieldId::CardHolder | FieldId::Email => raw.to_string(),
        };

        let advance_to = match field.max_length(self.network) {
            Some(max) if value.len() == max => field.next(),
            _ => None,
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            field = field.as_str(),
            length = value.len(),
            advance_to = advance_to.map(|next| next.as_str()),
            "field input"
        );

        self.store(field, value.clone());
        InputEffect { value, advance_to }
    }

    /// Marks `field` as focused and returns the card side to show.
    pub fn focus(&mut self, field: FieldId) -> CardFace {
        self.focused = Some(field);
        self.face()
    }

    /// Leaves `field`, validating its current value.
    pub fn blur(&mut self, field: FieldId) -> &ValidationOutcome {
        if self.focused == Some(field) {
            self.focused = None;
        }
        let outcome = self.validate(field);
        self.outcomes[field as usize].insert(outcome)
    }

    /// Validates every field and records the outcomes.
    pub fn submit(&mut self) -> FormReport {
        let mut report = FormReport::default();
        for field in FieldId::ALL {
            let outcome = self.validate(field);
            report.outcomes[field as usize] = outcome.clone();
            self.outcomes[field as usize] = Some(outcome);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            valid = report.is_valid(),
            errors = report.error_count(),
            "form submitted"
        );

        report
    }

    /// Clears every value, outcome and the focus.
    pub fn reset(&mut self) {
        for value in &mut self.values {
            value.zeroize();
        }
        self.cvv_digits.zeroize();
        self.outcomes = Default::default();
        self.network = CardNetwork::Unknown;
        self.focused = None;
    }

    /// The side of the card to show for the current focus.
    pub fn face(&self) -> CardFace {
        match self.focused {
            Some(FieldId::CardCvvCode) => CardFace::Back,
            _ => CardFace::Front,
        }
    }

    /// Network of the current card number.
    #[inline]
    pub fn network(&self) -> CardNetwork {
        self.network
    }

    /// The stored (formatted) value of a field.
    #[inline]
    pub fn value(&self, field: FieldId) -> &str {
        &self.values[field as usize]
    }

    /// Outcome of the last blur or submit of a field, if any.
    #[inline]
    pub fn outcome(&self, field: FieldId) -> Option<&ValidationOutcome> {
        self.outcomes[field as usize].as_ref()
    }

    /// The currently focused field.
    #[inline]
    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    /// The rules this form validates with.
    #[inline]
    pub fn rules(&self) -> &FieldRuleSet {
        &self.rules
    }

    fn validate(&self, field: FieldId) -> ValidationOutcome {
        validate_field(&self.rules, field, self.value(field), self.network)
    }

    fn store(&mut self, field: FieldId, value: String) {
        let slot = &mut self.values[field as usize];
        slot.zeroize();
        *slot = value;
    }

    fn set_network(&mut self, network: CardNetwork) {
        if network == self.network {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.network.id(), to = network.id(), "card network changed");

        self.network = network;
        // Re-cut from the typed digits so a longer CVV length brings them back
        let cvv = format_cvv_code(&self.cvv_digits, network);
        self.store(FieldId::CardCvvCode, cvv);
    }
}

impl Default for CardForm {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CardForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("CardForm");
        for field in FieldId::ALL {
            debug.field(
                field.as_str(),
                &format_args!("<{} chars>", self.value(field).len()),
            );
        }
        debug
            .field("network", &self.network)
            .field("focused", &self.focused)
            .finish()
    }
}

impl Drop for CardForm {
    fn drop(&mut self) {
        for value in &mut self.values {
            value.zeroize();
        }
        self.cvv_digits.zeroize();
    }
}
