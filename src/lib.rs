//! # card_form
//!
//! The logic behind a payment card entry form: keystroke formatting, card
//! network detection and per-field validation rule chains. No UI is
//! included; the input layer calls in and writes back what it gets.
//!
//! ## Features
//!
//! - Card number, expiry and CVV formatting while typing
//! - Visa, Mastercard, American Express and Discover detection
//! - Luhn checksum
//! - Ordered validator chains per field, first failure wins
//! - Form model with auto-advance, blur/submit validation and card flip
//! - Multiple interfaces: library, CLI, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use card_form::field::{default_rules, FieldId};
//! use card_form::format::{format_card_number, format_expiry_date};
//! use card_form::{classify, CardNetwork};
//!
//! // Format on every keystroke
//! assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//! assert_eq!(format_expiry_date("1225"), "12/25");
//!
//! // Detect the network from the prefix
//! assert_eq!(classify("37"), CardNetwork::Amex);
//!
//! // Validate on blur
//! let outcome = default_rules().validate(FieldId::CardNumber, "4111 1111 1111 1112");
//! assert_eq!(outcome.message(), Some("Incorrect card number"));
//! ```
//!
//! ## Custom Rules
//!
//! ```rust
//! use card_form::field::{FieldId, FieldRuleSet};
//! use card_form::validate::{evaluate, ValidationOutcome, Validator};
//!
//! let rules = [Validator::required("a"), Validator::card_number("b")];
//! assert_eq!(evaluate(&rules, ""), ValidationOutcome::Invalid("a".to_string()));
//!
//! let set = FieldRuleSet::empty()
//!     .with_rules(FieldId::CardHolder, [Validator::required("Enter your full name")]);
//! assert!(set.validate(FieldId::CardHolder, "JANE DOE").is_valid());
//! ```
//!
//! ## Form Model
//!
//! ```rust
//! use card_form::form::CardForm;
//! use card_form::field::FieldId;
//!
//! let mut form = CardForm::new();
//! let effect = form.input(FieldId::CardExpiryDate, "925");
//! assert_eq!(effect.value, "09/25");
//! assert_eq!(effect.advance_to, Some(FieldId::CardCvvCode));
//! ```
//!
//! ## Supported Card Networks
//!
//! | Network | Prefix | Length | Grouping | CVV |
//! |---------|--------|--------|----------|-----|
//! | Visa | 4 | 13, 16 | 4-4-4-4 | 3 |
//! | Mastercard | 51-55 | 16 | 4-4-4-4 | 3 |
//! | American Express | 34, 37 | 15 | 4-6-5 | 4 |
//! | Discover | 6011, 65xx | 16 | 4-4-4-4 | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Debug events for validation and form transitions |
//! | `config` | JSON rule-set configuration |
//! | `parallel` | Rayon-based batch evaluation |
//! | `generate` | Random test card generation |
//! | `cli` | Command-line tool |
//! | `wasm` | WebAssembly support |
//!
//! ## Security
//!
//! - Form and submission values are zeroized when dropped or replaced
//! - `Debug` output of forms and submissions shows lengths only
//! - Tracing events never carry field values
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
#[cfg(feature = "config")]
pub mod config;
pub mod cvv;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod field;
pub mod form;
pub mod format;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod network;
pub mod validate;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use detect::{classify, classify_strict, Strictness};
pub use error::{ConfigError, ParseFieldError, ParseNetworkError};
pub use field::{default_rules, FieldId, FieldRuleSet};
pub use form::{CardFace, CardForm, FormReport, InputEffect};
pub use network::CardNetwork;
pub use validate::{evaluate, ValidationOutcome, Validator};
