//! Fuzz target for keystroke formatting.
//!
//! Formatters must never panic and must keep the digit prefix of the input.

#![no_main]

use card_form::{format, mask, CardNetwork};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let digits = format::sanitize(data);
    assert_eq!(format::sanitize(&digits), digits, "sanitize must be idempotent");

    let formatted = format::format_card_number(data);
    assert!(digits.starts_with(&format::sanitize(&formatted)));
    assert!(!formatted.ends_with(' '));
    assert_eq!(format::format_card_number(&formatted), formatted);

    let expiry = format::format_expiry_date(data);
    assert!(expiry.len() <= 5);

    for network in CardNetwork::ALL {
        let _ = format::format_for_network(data, network);
        assert!(format::format_cvv_code(data, network).len() <= network.cvv_length());
        let _ = mask::preview_cvv(data, network);
    }

    let _ = format::split_into_groups(data);
    let _ = mask::preview_card_number(data);
    assert_eq!(mask::preview_expiry(data).chars().count(), 5);
});
