//! Fuzz target for the Luhn checksum.

#![no_main]

use card_form::luhn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = luhn::is_valid(data);
    let _ = luhn::checksum(data);

    // Appending the check digit always yields a valid number
    let digits: Vec<u8> = data.iter().map(|b| b % 10).collect();
    let mut full = digits.clone();
    full.push(luhn::check_digit(&digits));
    assert!(luhn::is_valid(&full));

    if let Ok(s) = std::str::from_utf8(data) {
        let _ = luhn::check_luhn(s);
    }
});
