//! Keystroke formatting for the card number, expiry date and CVV fields.
//!
//! Every function here takes whatever the input control currently holds
//! (pasted text, a half-typed value, a value this module formatted on the
//! previous keystroke) and returns the string to write back. Nothing is
//! remembered between calls.
//!
//! # Format Conventions
//!
//! - **Visa/Mastercard/Discover** (16 digits): `XXXX XXXX XXXX XXXX`
//! - **American Express** (15 digits): `XXXX XXXXXX XXXXX`
//! - **Expiry**: `MM/YY`
//!
//! # Example
//!
//! ```
//! use card_form::format::{format_card_number, format_expiry_date, sanitize};
//!
//! assert_eq!(sanitize("4111-1111 abc"), "41111111");
//! assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//! assert_eq!(format_expiry_date("1225"), "12/25");
//! ```

use crate::detect::classify;
use crate::CardNetwork;

/// Separator written between card number groups.
pub const GROUP_SEPARATOR: &str = " ";

/// Separator written between expiry month and year.
pub const EXPIRY_SEPARATOR: char = '/';

/// Digits kept by the expiry field (`MMYY`).
pub const EXPIRY_DIGITS: usize = 4;

/// Removes every character that is not an ASCII digit.
///
/// Order is preserved and no length limit is applied.
///
/// # Example
///
/// ```
/// use card_form::format::sanitize;
///
/// assert_eq!(sanitize("4111 1111 1111 1111"), "4111111111111111");
/// assert_eq!(sanitize("12/25"), "1225");
/// assert_eq!(sanitize("no digits"), "");
/// ```
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats a card number as the user types.
///
/// The network is detected from the prefix, extra digits beyond the
/// network's maximum are dropped, and the rest is grouped with single
/// spaces. There is never a trailing space.
///
/// # Example
///
/// ```
/// use card_form::format::format_card_number;
///
/// assert_eq!(format_card_number("41111"), "4111 1");
/// assert_eq!(format_card_number("4111111111111111111"), "4111 1111 1111 1111");
/// assert_eq!(format_card_number("340000000000009"), "3400 000000 00009");
/// ```
pub fn format_card_number(raw: &str) -> String {
    let digits = sanitize(raw);
    let network = classify(&digits);
    group_digits(&digits, network).join(GROUP_SEPARATOR)
}

/// Formats a card number using the grouping of a specific network.
///
/// Useful when the network is already known from somewhere else; the
/// prefix of `raw` is not inspected.
///
/// # Example
///
/// ```
/// use card_form::format::format_for_network;
/// use card_form::CardNetwork;
///
/// assert_eq!(
///     format_for_network("123456789012345", CardNetwork::Amex),
///     "1234 567890 12345"
/// );
/// ```
pub fn format_for_network(raw: &str, network: CardNetwork) -> String {
    let digits = sanitize(raw);
    group_digits(&digits, network).join(GROUP_SEPARATOR)
}

/// Splits the card number into its display groups.
///
/// Returns only groups that contain at least one digit.
///
/// # Example
///
/// ```
/// use card_form::format::split_into_groups;
///
/// assert_eq!(split_into_groups("4111111111111111"), vec!["4111", "1111", "1111", "1111"]);
/// assert_eq!(split_into_groups("3782822"), vec!["3782", "822"]);
/// ```
pub fn split_into_groups(raw: &str) -> Vec<String> {
    let digits = sanitize(raw);
    let network = classify(&digits);
    group_digits(&digits, network)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Cuts an all-digit string into the network's groups, after truncating it
/// to the network's maximum length.
fn group_digits(digits: &str, network: CardNetwork) -> Vec<&str> {
    let mask = network.mask();
    // Sanitized input is ASCII, so byte offsets are char offsets
    let digits = &digits[..digits.len().min(mask.max_digits())];

    let mut groups = Vec::with_capacity(mask.number_groups.len());
    let mut pos = 0;
    for &size in mask.number_groups {
        if pos >= digits.len() {
            break;
        }
        let end = (pos + size).min(digits.len());
        groups.push(&digits[pos..end]);
        pos = end;
    }
    groups
}

/// Formats an expiry date as the user types.
///
/// A single leading digit above `1` cannot start a valid month and is padded
/// to `0X`. At most four digits are kept; once more than two are present a
/// `/` separates month and year. Partial input stays partial.
///
/// # Example
///
/// ```
/// use card_form::format::format_expiry_date;
///
/// assert_eq!(format_expiry_date("1"), "1");
/// assert_eq!(format_expiry_date("12"), "12");
/// assert_eq!(format_expiry_date("123"), "12/3");
/// assert_eq!(format_expiry_date("12/256"), "12/25");
/// assert_eq!(format_expiry_date("7"), "07");
/// ```
pub fn format_expiry_date(raw: &str) -> String {
    let mut digits = sanitize(raw);

    if digits.as_bytes().first().is_some_and(|&d| d > b'1') {
        digits.insert(0, '0');
    }
    digits.truncate(EXPIRY_DIGITS);

    if digits.len() > 2 {
        digits.insert(2, EXPIRY_SEPARATOR);
    }
    digits
}

/// Formats a CVV/CID as the user types: digits only, cut to the network's
/// CVV length (4 for American Express, 3 otherwise).
///
/// # Example
///
/// ```
/// use card_form::format::format_cvv_code;
/// use card_form::CardNetwork;
///
/// assert_eq!(format_cvv_code("12a34", CardNetwork::Visa), "123");
/// assert_eq!(format_cvv_code("12a34", CardNetwork::Amex), "1234");
/// ```
pub fn format_cvv_code(raw: &str, network: CardNetwork) -> String {
    let mut digits = sanitize(raw);
    digits.truncate(network.cvv_length());
    digits
}
