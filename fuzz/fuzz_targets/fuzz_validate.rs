//! Fuzz target for the rule chains and the form model.
//!
//! Every field must produce an outcome for any input, never a panic.

#![no_main]

use card_form::field::{default_rules, FieldId};
use card_form::form::CardForm;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let rules = default_rules();
    for field in FieldId::ALL {
        let _ = rules.validate(field, data);
    }

    let mut form = CardForm::new();
    for field in FieldId::ALL {
        let effect = form.input(field, data);
        assert_eq!(form.value(field), effect.value);
        let _ = form.blur(field);
    }
    let _ = form.submit();
});
