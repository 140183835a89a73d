//! Fuzz target for expiry parsing.

#![no_main]

use card_form::expiry::{self, YearMonth};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(parsed) = expiry::parse_expiry(data) {
        assert!((1..=12).contains(&parsed.month()));
    }

    let today = YearMonth::new(2025, 6).unwrap();
    let _ = expiry::validate_expiry_at(data, today);
    let _ = data.parse::<YearMonth>();

    // Whatever the formatter produces parses or fails cleanly
    let formatted = card_form::format::format_expiry_date(data);
    let _ = expiry::is_valid_expiry_at(&formatted, today);
});
