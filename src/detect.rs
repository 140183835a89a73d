//! Card network detection from the digit prefix.
//!
//! Detection runs on every keystroke, so it only looks at the leading
//! digits and never fails: anything that does not match a known prefix is
//! [`CardNetwork::Unknown`].
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! | Order | Network | Prefix |
//! |-------|---------|--------|
//! | 1 | Visa | 4 |
//! | 2 | Mastercard | 51-55 |
//! | 3 | American Express | 34, 37 |
//! | 4 | Discover | 6011, 65 followed by two digits |

use crate::CardNetwork;

/// How much of the card number has to match before a network is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Strictness {
    /// A known prefix is enough (live typing).
    Prefix,
    /// The prefix must match and the total length must be one the network
    /// issues (final acceptance).
    #[default]
    ExactLength,
}

/// Detects the card network from a digit string.
///
/// Only the prefix is inspected; the length of `digits` does not matter.
///
/// # Example
///
/// ```
/// use card_form::detect::classify;
/// use card_form::CardNetwork;
///
/// assert_eq!(classify("4111"), CardNetwork::Visa);
/// assert_eq!(classify("37"), CardNetwork::Amex);
/// assert_eq!(classify("65"), CardNetwork::Unknown);
/// assert_eq!(classify("6500"), CardNetwork::Discover);
/// ```
#[inline]
pub fn classify(digits: &str) -> CardNetwork {
    // Order matters: keep it in sync with the table in the module docs
    match digits.as_bytes() {
        [b'4', ..] => CardNetwork::Visa,
        [b'5', b'1'..=b'5', ..] => CardNetwork::Mastercard,
        [b'3', b'4' | b'7', ..] => CardNetwork::Amex,
        [b'6', b'0', b'1', b'1', ..] => CardNetwork::Discover,
        [b'6', b'5', b'0'..=b'9', b'0'..=b'9', ..] => CardNetwork::Discover,
        _ => CardNetwork::Unknown,
    }
}

/// Detects the card network and additionally requires an exact length.
///
/// A number whose prefix matches but whose length the network does not issue
/// (for example a 15 digit number starting with 4) is `Unknown`.
///
/// # Example
///
/// ```
/// use card_form::detect::classify_strict;
/// use card_form::CardNetwork;
///
/// assert_eq!(classify_strict("4111111111111111"), CardNetwork::Visa);
/// assert_eq!(classify_strict("411111111111111"), CardNetwork::Unknown);
/// ```
#[inline]
pub fn classify_strict(digits: &str) -> CardNetwork {
    let network = classify(digits);
    if network.is_valid_length(digits.len()) {
        network
    } else {
        CardNetwork::Unknown
    }
}

/// Detects the card network under the given strictness.
#[inline]
pub fn classify_with(digits: &str, strictness: Strictness) -> CardNetwork {
    match strictness {
        Strictness::Prefix => classify(digits),
        Strictness::ExactLength => classify_strict(digits),
    }
}
