//! Security code (CVV/CVC/CID) checks.
//!
//! Before the card number is known a code of 3 or 4 digits is accepted.
//! Once a network is detected the code must have exactly that network's
//! length: 4 for American Express, 3 for the rest.
//!
//! # Example
//!
//! ```
//! use card_form::cvv::{is_valid_cvv, is_valid_cvv_for, parse_cvv};
//! use card_form::CardNetwork;
//!
//! assert!(is_valid_cvv("123"));
//! assert!(is_valid_cvv("1234"));
//! assert!(is_valid_cvv_for("1234", CardNetwork::Amex));
//! assert!(!is_valid_cvv_for("1234", CardNetwork::Visa));
//!
//! let code = parse_cvv("0421").unwrap();
//! assert!(code.fits(CardNetwork::Amex));
//! assert_eq!(code.to_string(), "****");
//! ```

use crate::CardNetwork;
use std::fmt;
use std::ops::RangeInclusive;
use zeroize::Zeroize;

/// Shortest code any network issues.
pub const MIN_CVV_DIGITS: usize = 3;

/// Longest code any network issues.
pub const MAX_CVV_DIGITS: usize = 4;

/// A well-formed security code. The digits are wiped on drop and never
/// printed.
#[derive(Clone)]
pub struct SecurityCode {
    digits: [u8; MAX_CVV_DIGITS],
    len: u8,
}

impl SecurityCode {
    /// Number of digits in the code.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false: a parsed code has at least three digits.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The digit values.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len()]
    }

    /// Returns true if the code has the length `network` prints.
    #[inline]
    pub fn fits(&self, network: CardNetwork) -> bool {
        self.len() == network.cvv_length()
    }
}

impl fmt::Debug for SecurityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecurityCode(<{} digits>)", self.len)
    }
}

impl fmt::Display for SecurityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.len {
            f.write_str("*")?;
        }
        Ok(())
    }
}

impl Drop for SecurityCode {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

/// Why a security code was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CvvError {
    /// Nothing was entered.
    Empty,
    /// Something other than an ASCII digit was entered.
    NotDigit {
        /// Byte offset of the offending character.
        offset: usize,
    },
    /// The number of digits is outside the allowed range.
    Length {
        /// Digits entered.
        found: usize,
        /// Lengths allowed.
        allowed: RangeInclusive<usize>,
        /// The network the length was checked against, if any.
        network: Option<CardNetwork>,
    },
}

impl fmt::Display for CvvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("security code is empty"),
            Self::NotDigit { offset } => {
                write!(f, "security code has a non-digit at offset {}", offset)
            }
            Self::Length {
                found,
                allowed,
                network,
            } => {
                if allowed.start() == allowed.end() {
                    write!(f, "expected {} digits", allowed.start())?;
                } else {
                    write!(f, "expected {} to {} digits", allowed.start(), allowed.end())?;
                }
                if let Some(network) = network {
                    write!(f, " for {}", network.name())?;
                }
                write!(f, ", found {}", found)
            }
        }
    }
}

impl std::error::Error for CvvError {}

fn parse_within(
    input: &str,
    allowed: RangeInclusive<usize>,
    network: Option<CardNetwork>,
) -> Result<SecurityCode, CvvError> {
    if input.is_empty() {
        return Err(CvvError::Empty);
    }
    if let Some(offset) = input.bytes().position(|b| !b.is_ascii_digit()) {
        return Err(CvvError::NotDigit { offset });
    }
    if !allowed.contains(&input.len()) {
        return Err(CvvError::Length {
            found: input.len(),
            allowed,
            network,
        });
    }

    let mut code = SecurityCode {
        digits: [0; MAX_CVV_DIGITS],
        len: input.len() as u8,
    };
    for (slot, b) in code.digits.iter_mut().zip(input.bytes()) {
        *slot = b - b'0';
    }
    Ok(code)
}

/// Parses a code of 3 or 4 digits. Separators and whitespace are rejected,
/// not stripped.
pub fn parse_cvv(input: &str) -> Result<SecurityCode, CvvError> {
    parse_within(input, MIN_CVV_DIGITS..=MAX_CVV_DIGITS, None)
}

/// Parses a code that must have exactly the length of `network`.
///
/// `Unknown` expects 3 digits.
pub fn parse_cvv_for(input: &str, network: CardNetwork) -> Result<SecurityCode, CvvError> {
    let length = network.cvv_length();
    parse_within(input, length..=length, Some(network))
}

/// Returns true for 3 or 4 ASCII digits.
#[inline]
pub fn is_valid_cvv(input: &str) -> bool {
    parse_cvv(input).is_ok()
}

/// Returns true for exactly `network.cvv_length()` ASCII digits.
#[inline]
pub fn is_valid_cvv_for(input: &str, network: CardNetwork) -> bool {
    parse_cvv_for(input, network).is_ok()
}
