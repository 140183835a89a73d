//! Fuzz target for security code parsing.

#![no_main]

use card_form::{cvv, CardNetwork};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(code) = cvv::parse_cvv(data) {
        assert!((cvv::MIN_CVV_DIGITS..=cvv::MAX_CVV_DIGITS).contains(&code.len()));
        assert!(!format!("{:?}", code).contains(data));
    }

    for network in CardNetwork::ALL {
        if cvv::is_valid_cvv_for(data, network) {
            assert_eq!(data.len(), network.cvv_length());
            assert!(cvv::is_valid_cvv(data));
        }
    }
});
