//! Network display masks and card-face preview strings.
//!
//! Every [`CardNetwork`] has exactly one [`NetworkMask`] describing how its
//! number is grouped on screen and how long its CVV is. The table is built at
//! compile time and never changes.
//!
//! The preview helpers render what the card illustration next to the form
//! shows while the user types: digits typed so far, with the rest of the
//! network's layout filled by placeholders.
//!
//! # Example
//!
//! ```
//! use card_form::mask::{preview_card_number, preview_expiry};
//!
//! assert_eq!(preview_card_number("411111"), "4111 11## #### ####");
//! assert_eq!(preview_card_number("3782"), "3782 ###### #####");
//! assert_eq!(preview_expiry("12/3"), "12/3Y");
//! ```

use crate::detect::classify;
use crate::format::{format_cvv_code, format_expiry_date, sanitize};
use crate::CardNetwork;

/// Placeholder for an untyped card number digit.
pub const DIGIT_PLACEHOLDER: char = '#';

/// Character shown for each typed CVV digit.
pub const CVV_MASK_CHAR: char = '*';

/// Placeholder layout of an empty expiry date.
pub const EXPIRY_PLACEHOLDER: &str = "MM/YY";

/// Display layout for one card network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkMask {
    /// The network this mask belongs to.
    pub network: CardNetwork,
    /// Digit group lengths, left to right.
    pub number_groups: &'static [usize],
    /// Number of CVV/CID digits.
    pub cvv_length: usize,
}

impl NetworkMask {
    /// Total digits covered by the grouping, i.e. the longest number the
    /// card number field keeps.
    pub const fn max_digits(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.number_groups.len() {
            total += self.number_groups[i];
            i += 1;
        }
        total
    }

    /// Width of a fully typed, formatted number (digits plus separators).
    pub const fn formatted_width(&self) -> usize {
        let groups = self.number_groups.len();
        let separators = if groups == 0 { 0 } else { groups - 1 };
        self.max_digits() + separators
    }
}

const STANDARD_GROUPS: &[usize] = &[4, 4, 4, 4];
const AMEX_GROUPS: &[usize] = &[4, 6, 5];

/// Mask table, indexed by `CardNetwork as usize`.
pub static NETWORK_MASKS: [NetworkMask; 5] = [
    NetworkMask {
        network: CardNetwork::Visa,
        number_groups: STANDARD_GROUPS,
        cvv_length: 3,
    },
    NetworkMask {
        network: CardNetwork::Mastercard,
        number_groups: STANDARD_GROUPS,
        cvv_length: 3,
    },
    NetworkMask {
        network: CardNetwork::Amex,
        number_groups: AMEX_GROUPS,
        cvv_length: 4,
    },
    NetworkMask {
        network: CardNetwork::Discover,
        number_groups: STANDARD_GROUPS,
        cvv_length: 3,
    },
    NetworkMask {
        network: CardNetwork::Unknown,
        number_groups: STANDARD_GROUPS,
        cvv_length: 3,
    },
];

/// Renders the card number as shown on the card face.
///
/// Typed digits fill the network's groups left to right; the remaining
/// positions show [`DIGIT_PLACEHOLDER`]. Digits past the network's maximum
/// are dropped, as in the input field.
pub fn preview_card_number(raw: &str) -> String {
    let digits = sanitize(raw);
    let mask = classify(&digits).mask();
    let mut typed = digits.chars();

    let mut result = String::with_capacity(mask.formatted_width());
    for (i, &size) in mask.number_groups.iter().enumerate() {
        if i > 0 {
            result.push(' ');
        }
        for _ in 0..size {
            result.push(typed.next().unwrap_or(DIGIT_PLACEHOLDER));
        }
    }
    result
}

/// Renders the expiry date as shown on the card face.
///
/// The formatted value is laid over [`EXPIRY_PLACEHOLDER`], so a partial
/// entry keeps the untyped letters: `"1"` becomes `"1M/YY"`.
pub fn preview_expiry(raw: &str) -> String {
    let formatted = format_expiry_date(raw);
    let mut typed = formatted.chars();
    EXPIRY_PLACEHOLDER
        .chars()
        .map(|placeholder| typed.next().unwrap_or(placeholder))
        .collect()
}

/// Renders the CVV as shown on the back of the card: one
/// [`CVV_MASK_CHAR`] per typed digit.
pub fn preview_cvv(raw: &str, network: CardNetwork) -> String {
    let digits = format_cvv_code(raw, network);
    std::iter::repeat(CVV_MASK_CHAR)
        .take(digits.len())
        .collect()
}
