//! Test card numbers.
//!
//! Generated numbers carry a network's prefix, have one of its issued
//! lengths and end in a correct Luhn check digit, so they pass the
//! `card_number` rule. They are not connected to any account.
//!
//! Deterministic generation is always available; random generation needs
//! the `generate` feature.
//!
//! # Example
//!
//! ```
//! use card_form::generate::{test_number, CardGenerator};
//! use card_form::luhn::check_luhn;
//! use card_form::CardNetwork;
//!
//! let number = test_number(CardNetwork::Amex).unwrap();
//! assert_eq!(number, "340000000000009");
//! assert!(check_luhn(&number));
//!
//! let short_visa = CardGenerator::new(CardNetwork::Visa)
//!     .length(13)
//!     .generate_deterministic()
//!     .unwrap();
//! assert_eq!(short_visa.len(), 13);
//! ```

use crate::luhn;
use crate::CardNetwork;

#[cfg(feature = "generate")]
use rand::Rng;

/// Issuer prefix used for each network, or `None` for `Unknown`.
pub const fn prefix_for(network: CardNetwork) -> Option<&'static str> {
    match network {
        CardNetwork::Visa => Some("4"),
        CardNetwork::Mastercard => Some("51"),
        CardNetwork::Amex => Some("34"),
        CardNetwork::Discover => Some("6011"),
        CardNetwork::Unknown => None,
    }
}

/// The number for `network` with every body digit zero.
///
/// Returns `None` for `Unknown`.
pub fn test_number(network: CardNetwork) -> Option<String> {
    CardGenerator::new(network).generate_deterministic()
}

/// A random number for `network`.
///
/// Returns `None` for `Unknown`.
#[cfg(feature = "generate")]
pub fn random_number(network: CardNetwork) -> Option<String> {
    CardGenerator::new(network).generate()
}

/// `count` random numbers for `network`.
#[cfg(feature = "generate")]
pub fn random_numbers(network: CardNetwork, count: usize) -> Vec<String> {
    let generator = CardGenerator::new(network);
    (0..count).filter_map(|_| generator.generate()).collect()
}

/// Fills `prefix` up to `length` digits from `fill` and appends the check
/// digit. `None` if the prefix has no digits or leaves no room.
fn complete_number(prefix: &str, length: usize, mut fill: impl FnMut() -> u8) -> Option<String> {
    let mut digits: Vec<u8> = prefix
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();

    if digits.is_empty() || digits.len() >= length {
        return None;
    }

    while digits.len() < length - 1 {
        digits.push(fill());
    }
    digits.push(luhn::check_digit(&digits));

    Some(digits.iter().map(|&d| (b'0' + d) as char).collect())
}

/// Builder for numbers with a custom prefix or length.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    prefix: String,
    length: usize,
}

impl CardGenerator {
    /// A generator using the network's prefix and longest issued length.
    pub fn new(network: CardNetwork) -> Self {
        Self {
            prefix: prefix_for(network).unwrap_or_default().to_string(),
            length: network.max_digits(),
        }
    }

    /// A generator for an arbitrary prefix, 16 digits long.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            length: 16,
        }
    }

    /// Sets the total length.
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Sets the prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The number with every body digit zero.
    pub fn generate_deterministic(&self) -> Option<String> {
        complete_number(&self.prefix, self.length, || 0)
    }

    /// A number with random body digits from the thread RNG.
    #[cfg(feature = "generate")]
    pub fn generate(&self) -> Option<String> {
        self.generate_with_rng(&mut rand::thread_rng())
    }

    /// A number with random body digits from `rng`, for reproducible runs
    /// with a seeded RNG.
    #[cfg(feature = "generate")]
    pub fn generate_with_rng<R: Rng>(&self, rng: &mut R) -> Option<String> {
        complete_number(&self.prefix, self.length, || rng.gen_range(0..10))
    }
}
