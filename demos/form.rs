//! Drive a card form the way an input layer would.
//!
//! Run with: cargo run --example form

use card_form::{mask, CardForm, FieldId};

fn main() {
    let mut form = CardForm::new();

    // Keystrokes arrive one character at a time and the displayed value is
    // replaced with the formatted value after each one.
    let mut shown = String::new();
    for key in "4111111111111111".chars() {
        shown.push(key);
        let effect = form.input(FieldId::CardNumber, &shown);
        shown = effect.value;
        println!(
            "{:<22} {:<12} {}",
            shown,
            form.network().name(),
            mask::preview_card_number(&shown)
        );
        if let Some(next) = effect.advance_to {
            println!("-> focus {}", next);
            form.focus(next);
        }
    }

    form.input(FieldId::CardHolder, "JANE DOE");
    form.blur(FieldId::CardHolder);

    let effect = form.input(FieldId::CardExpiryDate, "1230");
    println!("expiry {} (advance: {:?})", effect.value, effect.advance_to);

    let face = form.focus(FieldId::CardCvvCode);
    println!("card turns to {:?}", face);
    form.input(FieldId::CardCvvCode, "12345");
    println!("cvv kept as {}", form.value(FieldId::CardCvvCode));
    form.blur(FieldId::CardCvvCode);

    form.input(FieldId::Email, "jane.doe@example");
    let report = form.submit();
    println!("submit: {}", report);

    form.input(FieldId::Email, "jane.doe@example.com");
    let report = form.submit();
    println!("submit: {}", report);
}
