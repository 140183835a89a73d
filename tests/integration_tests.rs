//! Integration tests for card_form.
//!
//! These tests drive the crate the way an input layer would: keystrokes in,
//! formatted values and validation messages out.

use card_form::{
    batch::{count_valid, validate_submissions, Submission},
    detect::{classify_with, Strictness},
    expiry::YearMonth,
    format, luhn, mask,
    validate::{evaluate, is_email, Validator},
    classify, classify_strict, default_rules, CardFace, CardForm, CardNetwork, FieldId,
    FieldRuleSet, ValidationOutcome,
};

// =============================================================================
// TEST CARD NUMBERS
// =============================================================================
// Official test numbers from payment processors. They pass Luhn but are not
// real cards.

mod test_cards {
    pub const VISA_1: &str = "4111111111111111";
    pub const VISA_2: &str = "4012888888881881";
    pub const VISA_13: &str = "4222222222222";
    pub const VISA_3: &str = "4242424242424242";

    pub const MC_1: &str = "5555555555554444";
    pub const MC_2: &str = "5105105105105100";
    pub const MC_3: &str = "5500000000000004";

    pub const AMEX_1: &str = "378282246310005";
    pub const AMEX_2: &str = "371449635398431";
    pub const AMEX_3: &str = "340000000000009";

    pub const DISCOVER_1: &str = "6011111111111117";
    pub const DISCOVER_2: &str = "6011000990139424";

    // Valid Luhn, but outside the recognised networks
    pub const DINERS: &str = "30569309025904";
    pub const JCB: &str = "3530111333300000";
    pub const MC_2SERIES: &str = "2223000048400011";
}

use test_cards::*;

fn june_2025() -> YearMonth {
    YearMonth::new(2025, 6).unwrap()
}

/// Built-in rules with the expiry check pinned to June 2025.
fn pinned_rules() -> FieldRuleSet {
    default_rules().clone().with_rules(
        FieldId::CardExpiryDate,
        [
            Validator::required("Enter your expiry date"),
            Validator::expiry_date_at("Incorrect expiry date", june_2025()),
        ],
    )
}

/// Feeds `text` into a field one character at a time, like a user typing.
fn type_into(form: &mut CardForm, field: FieldId, text: &str) -> Option<FieldId> {
    let mut advance = None;
    for c in text.chars() {
        let current = format!("{}{}", form.value(field), c);
        advance = form.input(field, &current).advance_to;
    }
    advance
}

// =============================================================================
// NETWORK DETECTION
// =============================================================================

#[test]
fn test_recognised_networks() {
    for number in [VISA_1, VISA_2, VISA_13, VISA_3] {
        assert_eq!(classify_strict(number), CardNetwork::Visa, "{}", number);
    }
    for number in [MC_1, MC_2, MC_3] {
        assert_eq!(classify_strict(number), CardNetwork::Mastercard, "{}", number);
    }
    for number in [AMEX_1, AMEX_2, AMEX_3] {
        assert_eq!(classify_strict(number), CardNetwork::Amex, "{}", number);
    }
    for number in [DISCOVER_1, DISCOVER_2] {
        assert_eq!(classify_strict(number), CardNetwork::Discover, "{}", number);
    }
}

#[test]
fn test_unrecognised_networks() {
    for number in [DINERS, JCB, MC_2SERIES] {
        assert!(luhn::check_luhn(number));
        assert_eq!(classify(number), CardNetwork::Unknown, "{}", number);
    }
}

#[test]
fn test_detection_is_prefix_stable() {
    // Once a prefix is recognised, typing more digits never changes it
    for number in [VISA_1, MC_1, AMEX_1, DISCOVER_1] {
        let full = classify(number);
        let first = (1..=number.len())
            .position(|n| classify(&number[..n]) == full)
            .unwrap();
        for n in first + 1..=number.len() {
            assert_eq!(classify(&number[..n]), full);
        }
    }
}

#[test]
fn test_strictness_variants() {
    assert_eq!(classify_with("4111", Strictness::Prefix), CardNetwork::Visa);
    assert_eq!(classify_with("4111", Strictness::ExactLength), CardNetwork::Unknown);
    assert_eq!(classify_with(VISA_13, Strictness::ExactLength), CardNetwork::Visa);
}

// =============================================================================
// FORMATTING
// =============================================================================

#[test]
fn test_format_all_networks() {
    assert_eq!(format::format_card_number(VISA_1), "4111 1111 1111 1111");
    assert_eq!(format::format_card_number(MC_1), "5555 5555 5555 4444");
    assert_eq!(format::format_card_number(AMEX_1), "3782 822463 10005");
    assert_eq!(format::format_card_number(DISCOVER_1), "6011 1111 1111 1117");
    assert_eq!(format::format_card_number(VISA_13), "4222 2222 2222 2");
}

#[test]
fn test_format_pasted_input() {
    assert_eq!(format::format_card_number("4111-1111-1111-1111"), "4111 1111 1111 1111");
    assert_eq!(format::format_card_number(" 4111.1111.1111.1111 "), "4111 1111 1111 1111");
    assert_eq!(format::format_card_number("card: 3782 8224 6310 005"), "3782 822463 10005");
}

#[test]
fn test_expiry_typing_sequence() {
    let steps = [("1", "1"), ("12", "12"), ("122", "12/2"), ("12/25", "12/25")];
    for (raw, expected) in steps {
        assert_eq!(format::format_expiry_date(raw), expected);
    }
    assert_eq!(format::format_expiry_date("4"), "04");
}

#[test]
fn test_previews() {
    assert_eq!(mask::preview_card_number(""), "#### #### #### ####");
    assert_eq!(mask::preview_card_number("411111"), "4111 11## #### ####");
    assert_eq!(mask::preview_card_number("37"), "37## ###### #####");
    assert_eq!(mask::preview_expiry(""), "MM/YY");
    assert_eq!(mask::preview_expiry("1"), "1M/YY");
    assert_eq!(mask::preview_expiry("122"), "12/2Y");
    assert_eq!(mask::preview_cvv("12", CardNetwork::Visa), "**");
    assert_eq!(mask::preview_cvv("12345", CardNetwork::Amex), "****");
}

// =============================================================================
// RULE CHAINS
// =============================================================================

#[test]
fn test_default_rules_end_to_end() {
    let rules = pinned_rules();

    let cases: &[(FieldId, &str, Option<&str>)] = &[
        (FieldId::CardNumber, "", Some("Enter your card number")),
        (FieldId::CardNumber, "4111 1111 1111 1112", Some("Incorrect card number")),
        (FieldId::CardNumber, "3056 9309 0259 04", Some("Incorrect card number")),
        (FieldId::CardNumber, "4111 1111 1111 1111", None),
        (FieldId::CardHolder, "", Some("Enter your full name")),
        (FieldId::CardHolder, "JANE DOE", None),
        (FieldId::CardExpiryDate, "", Some("Enter your expiry date")),
        (FieldId::CardExpiryDate, "05/25", Some("Incorrect expiry date")),
        (FieldId::CardExpiryDate, "00/26", Some("Incorrect expiry date")),
        (FieldId::CardExpiryDate, "06/25", None),
        (FieldId::CardCvvCode, "", Some("Enter your CVV")),
        (FieldId::CardCvvCode, "12", Some("Incorrect CVV")),
        (FieldId::CardCvvCode, "123", None),
        (FieldId::Email, "", Some("Enter your email")),
        (FieldId::Email, "jane@", Some("Incorrect email")),
        (FieldId::Email, "jane@example.com", None),
    ];

    for &(field, value, expected) in cases {
        assert_eq!(
            rules.validate(field, value).message(),
            expected,
            "{} = {:?}",
            field,
            value
        );
    }
}

#[test]
fn test_whitespace_only_is_empty() {
    let rules = default_rules();
    assert_eq!(
        rules.validate(FieldId::CardHolder, " \t\n ").message(),
        Some("Enter your full name")
    );
}

#[test]
fn test_custom_chain_order_matters() {
    let strict_first = [
        Validator::card_number("bad number"),
        Validator::required("missing"),
    ];
    assert_eq!(evaluate(&strict_first, "").message(), Some("bad number"));

    let required_first = [
        Validator::required("missing"),
        Validator::card_number("bad number"),
    ];
    assert_eq!(evaluate(&required_first, "").message(), Some("missing"));
}

#[test]
fn test_email_samples() {
    let good = [
        "simple@example.com",
        "very.common@example.com",
        "x@example.co",
        "long.email-address-with-hyphens@and.subdomains.example.com",
        "user.name+tag+sorting@example.com",
        "MIXED@Example.ORG",
    ];
    for email in good {
        assert!(is_email(email), "{}", email);
    }

    let bad = [
        "plainaddress",
        "@missing-local.org",
        "missing-at.example.com",
        "two@@example.com",
        "trailing@example.",
        "short-tld@example.c",
        "space in@example.com",
    ];
    for email in bad {
        assert!(!is_email(email), "{}", email);
    }
}

#[test]
fn test_validation_outcome_is_plain_value() {
    let outcome = default_rules().validate(FieldId::CardCvvCode, "abcd");
    assert_eq!(outcome, ValidationOutcome::Invalid("Incorrect CVV".to_string()));
    assert_eq!(outcome.clone(), outcome);
}

// =============================================================================
// FORM MODEL
// =============================================================================

#[test]
fn test_typing_a_full_card() {
    let mut form = CardForm::with_rules(pinned_rules());

    assert_eq!(form.focus(FieldId::CardNumber), CardFace::Front);
    assert_eq!(
        type_into(&mut form, FieldId::CardNumber, AMEX_1),
        Some(FieldId::CardHolder)
    );
    assert_eq!(form.value(FieldId::CardNumber), "3782 822463 10005");
    assert_eq!(form.network(), CardNetwork::Amex);
    assert!(form.blur(FieldId::CardNumber).is_valid());

    form.focus(FieldId::CardHolder);
    type_into(&mut form, FieldId::CardHolder, "JANE DOE");
    assert!(form.blur(FieldId::CardHolder).is_valid());

    form.focus(FieldId::CardExpiryDate);
    assert_eq!(
        type_into(&mut form, FieldId::CardExpiryDate, "0627"),
        Some(FieldId::CardCvvCode)
    );
    assert_eq!(form.value(FieldId::CardExpiryDate), "06/27");

    assert_eq!(form.focus(FieldId::CardCvvCode), CardFace::Back);
    type_into(&mut form, FieldId::CardCvvCode, "12345");
    assert_eq!(form.value(FieldId::CardCvvCode), "1234");
    assert!(form.blur(FieldId::CardCvvCode).is_valid());
    assert_eq!(form.face(), CardFace::Front);

    form.input(FieldId::Email, "jane@example.com");
    let report = form.submit();
    assert!(report.is_valid(), "{}", report);
}

#[test]
fn test_typing_expiry_with_leading_digit() {
    let mut form = CardForm::new();
    // "9" becomes "09", so two more digits complete the field
    assert_eq!(type_into(&mut form, FieldId::CardExpiryDate, "9"), None);
    assert_eq!(form.value(FieldId::CardExpiryDate), "09");
    assert_eq!(
        type_into(&mut form, FieldId::CardExpiryDate, "30"),
        Some(FieldId::CardCvvCode)
    );
    assert_eq!(form.value(FieldId::CardExpiryDate), "09/30");
}

#[test]
fn test_submit_empty_form() {
    let mut form = CardForm::new();
    let report = form.submit();
    assert!(!report.is_valid());
    assert_eq!(
        report.to_string(),
        "cardNumber: Enter your card number; cardHolder: Enter your full name; \
         cardExpiryDate: Enter your expiry date; cardCVVCode: Enter your CVV; \
         email: Enter your email"
    );
}

#[test]
fn test_empty_rule_set_form_always_valid() {
    let mut form = CardForm::with_rules(FieldRuleSet::empty());
    assert!(form.submit().is_valid());
    form.input(FieldId::CardNumber, "garbage");
    assert!(form.blur(FieldId::CardNumber).is_valid());
}

// =============================================================================
// BATCH
// =============================================================================

#[test]
fn test_batch_matches_form() {
    let rules = pinned_rules();
    let numbers = [VISA_1, MC_1, AMEX_1, DISCOVER_1, DINERS, "4111111111111112"];

    let submissions: Vec<Submission> = numbers
        .iter()
        .map(|number| {
            Submission::new()
                .with(FieldId::CardNumber, format::format_card_number(number))
                .with(FieldId::CardHolder, "JANE DOE")
                .with(FieldId::CardExpiryDate, "12/30")
                .with(FieldId::CardCvvCode, if number.starts_with('3') { "1234" } else { "123" })
                .with(FieldId::Email, "jane@example.com")
        })
        .collect();

    let reports = validate_submissions(&rules, &submissions);
    for (submission, report) in submissions.iter().zip(&reports) {
        let mut form = CardForm::with_rules(rules.clone());
        for field in FieldId::ALL {
            form.input(field, submission.get(field));
        }
        assert_eq!(&form.submit(), report);
    }

    // Diners "3056..." is Unknown, so its 4 digit CVV is cut to 3 by the form
    // but accepted by the 3-or-4 rule in the batch; both reject the number
    assert_eq!(count_valid(&rules, &submissions), (4, 2));
}
