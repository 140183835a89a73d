//! WebAssembly bindings for the card form.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { CardFormHandle, format_card_number, validate_field } from 'card_form';
//!
//! await init();
//!
//! cardNumberInput.addEventListener('input', (event) => {
//!     event.target.value = format_card_number(event.target.value);
//! });
//!
//! const result = validate_field("cardCVVCode", "12");
//! if (!result.valid) {
//!     console.log(result.message);  // "Incorrect CVV"
//! }
//!
//! // Or let the form model drive focus, validation and the card flip
//! const form = new CardFormHandle();
//! const effect = form.input("cardNumber", "4111111111111111");
//! if (effect.advance_to) {
//!     document.getElementById(effect.advance_to).focus();
//! }
//! ```

#![cfg(feature = "wasm")]

use crate::field::{default_rules, FieldId};
use crate::form::{validate_values, CardFace, CardForm, FormReport};
use crate::validate::ValidationOutcome;
use crate::CardNetwork;
use wasm_bindgen::prelude::*;

fn parse_field(field_id: &str) -> Result<FieldId, JsValue> {
    field_id
        .parse::<FieldId>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Outcome of validating one field, returned to JavaScript.
#[wasm_bindgen]
pub struct FieldResult {
    valid: bool,
    message: Option<String>,
}

#[wasm_bindgen]
impl FieldResult {
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.valid
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> Option<String> {
        self.message.clone()
    }
}

impl From<&ValidationOutcome> for FieldResult {
    fn from(outcome: &ValidationOutcome) -> Self {
        Self {
            valid: outcome.is_valid(),
            message: outcome.message().map(str::to_string),
        }
    }
}

/// Outcome of validating the whole form.
#[wasm_bindgen]
pub struct FormResult {
    valid: bool,
    errors: js_sys::Object,
}

#[wasm_bindgen]
impl FormResult {
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// `{ fieldId: message }` for every failing field.
    #[wasm_bindgen(getter)]
    pub fn errors(&self) -> js_sys::Object {
        self.errors.clone()
    }
}

impl FormResult {
    fn from_report(report: &FormReport) -> Result<Self, JsValue> {
        let errors = js_sys::Object::new();
        for (field, message) in report.errors() {
            js_sys::Reflect::set(
                &errors,
                &JsValue::from_str(field.as_str()),
                &JsValue::from_str(message),
            )?;
        }
        Ok(Self {
            valid: report.is_valid(),
            errors,
        })
    }
}

/// What the page should do after an input event.
#[wasm_bindgen]
pub struct InputResult {
    value: String,
    advance_to: Option<String>,
}

#[wasm_bindgen]
impl InputResult {
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> String {
        self.value.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn advance_to(&self) -> Option<String> {
        self.advance_to.clone()
    }
}

/// Formats a card number as the user types.
///
/// # Example
/// ```javascript
/// format_card_number("378282246310005")  // "3782 822463 10005"
/// ```
#[wasm_bindgen]
pub fn format_card_number(raw: &str) -> String {
    crate::format::format_card_number(raw)
}

/// Formats an expiry date as the user types (`"1225"` becomes `"12/25"`).
#[wasm_bindgen]
pub fn format_expiry_date(raw: &str) -> String {
    crate::format::format_expiry_date(raw)
}

/// Formats a CVV, cut to the length of the network of `card_number`.
#[wasm_bindgen]
pub fn format_cvv_code(raw: &str, card_number: &str) -> String {
    let network = crate::detect::classify(&crate::format::sanitize(card_number));
    crate::format::format_cvv_code(raw, network)
}

/// Lowercase network id of a (partial) card number, e.g. `"visa"` or
/// `"unknown"`.
#[wasm_bindgen]
pub fn classify_network(card_number: &str) -> String {
    crate::detect::classify(&crate::format::sanitize(card_number))
        .id()
        .to_string()
}

/// Checks a card number with the Luhn algorithm.
#[wasm_bindgen]
pub fn check_luhn(card_number: &str) -> bool {
    crate::luhn::check_luhn(card_number)
}

/// Validates one field against the built-in rules.
///
/// # Example
/// ```javascript
/// const result = validate_field("email", "");
/// console.log(result.message);  // "Enter your email"
/// ```
#[wasm_bindgen]
pub fn validate_field(field_id: &str, value: &str) -> Result<FieldResult, JsValue> {
    let field = parse_field(field_id)?;
    Ok(FieldResult::from(&default_rules().validate(field, value)))
}

/// Validates a `{ fieldId: value }` object against the built-in rules.
///
/// Missing or non-string values count as empty.
#[wasm_bindgen]
pub fn validate_form(values: &js_sys::Object) -> Result<FormResult, JsValue> {
    let mut collected: [String; crate::field::FIELD_COUNT] = Default::default();
    for field in FieldId::ALL {
        let value = js_sys::Reflect::get(values, &JsValue::from_str(field.as_str()))?;
        collected[field as usize] = value.as_string().unwrap_or_default();
    }
    if collected[FieldId::CardCvvCode as usize].is_empty() {
        let alias = js_sys::Reflect::get(values, &JsValue::from_str("cardCvc"))?;
        collected[FieldId::CardCvvCode as usize] = alias.as_string().unwrap_or_default();
    }

    let report = validate_values(default_rules(), |field| collected[field as usize].as_str());
    FormResult::from_report(&report)
}

/// A stateful card form for one page.
#[wasm_bindgen]
pub struct CardFormHandle {
    inner: CardForm,
}

#[wasm_bindgen]
impl CardFormHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CardForm::new(),
        }
    }

    /// Formats and stores an input value.
    pub fn input(&mut self, field_id: &str, raw: &str) -> Result<InputResult, JsValue> {
        let effect = self.inner.input(parse_field(field_id)?, raw);
        Ok(InputResult {
            value: effect.value,
            advance_to: effect.advance_to.map(|field| field.as_str().to_string()),
        })
    }

    /// Focuses a field. Returns true when the back of the card should show.
    pub fn focus(&mut self, field_id: &str) -> Result<bool, JsValue> {
        Ok(self.inner.focus(parse_field(field_id)?) == CardFace::Back)
    }

    /// Validates the field being left.
    pub fn blur(&mut self, field_id: &str) -> Result<FieldResult, JsValue> {
        let field = parse_field(field_id)?;
        Ok(FieldResult::from(self.inner.blur(field)))
    }

    /// Validates every field.
    pub fn submit(&mut self) -> Result<FormResult, JsValue> {
        FormResult::from_report(&self.inner.submit())
    }

    /// Lowercase id of the current card network.
    #[wasm_bindgen(getter)]
    pub fn network(&self) -> String {
        self.inner.network().id().to_string()
    }

    /// Card face preview of the current number.
    pub fn preview_number(&self) -> String {
        crate::mask::preview_card_number(self.inner.value(FieldId::CardNumber))
    }

    /// Clears the form.
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

impl Default for CardFormHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic test number for a network name (`"visa"`, `"amex"`, ...).
#[wasm_bindgen]
pub fn generate_test_card(network: &str) -> Result<String, JsValue> {
    let network: CardNetwork = network
        .parse()
        .map_err(|e: crate::error::ParseNetworkError| JsValue::from_str(&e.to_string()))?;
    crate::generate::test_number(network)
        .ok_or_else(|| JsValue::from_str("no test number for an unknown network"))
}
