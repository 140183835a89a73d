//! Card network identification.
//!
//! This module provides the `CardNetwork` enum for the four networks the
//! entry form recognises, plus an `Unknown` fallback for every other prefix.

use crate::error::ParseNetworkError;
use crate::mask::{NetworkMask, NETWORK_MASKS};
use std::fmt;
use std::str::FromStr;

/// Card networks recognised by the entry form.
///
/// Each variant carries its own digit grouping, card length and CVV length
/// through its [`NetworkMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardNetwork {
    /// Visa - Prefix 4, lengths 13, 16
    Visa,
    /// Mastercard - Prefix 51-55, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Discover - Prefix 6011, 65xx, length 16
    Discover,
    /// No recognised prefix (yet).
    #[default]
    Unknown,
}

impl CardNetwork {
    /// All variants, known networks first.
    pub const ALL: [CardNetwork; 5] = [
        Self::Visa,
        Self::Mastercard,
        Self::Amex,
        Self::Discover,
        Self::Unknown,
    ];

    /// Returns the card lengths accepted for this network.
    ///
    /// `Unknown` accepts no length at all.
    #[inline]
    pub const fn valid_lengths(&self) -> &'static [u8] {
        match self {
            Self::Visa => &[13, 16],
            Self::Mastercard => &[16],
            Self::Amex => &[15],
            Self::Discover => &[16],
            Self::Unknown => &[],
        }
    }

    /// Returns true if the given length is valid for this network.
    #[inline]
    pub const fn is_valid_length(&self, length: usize) -> bool {
        let valid = self.valid_lengths();
        let mut i = 0;
        while i < valid.len() {
            if valid[i] as usize == length {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Returns the display mask (grouping and CVV length) for this network.
    #[inline]
    pub fn mask(&self) -> &'static NetworkMask {
        &NETWORK_MASKS[*self as usize]
    }

    /// Maximum number of digits the card number field accepts.
    #[inline]
    pub fn max_digits(&self) -> usize {
        self.mask().max_digits()
    }

    /// Number of digits in this network's CVV/CID.
    #[inline]
    pub fn cvv_length(&self) -> usize {
        self.mask().cvv_length
    }

    /// Returns true for every variant except `Unknown`.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns a human-readable name for the network.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the lowercase identifier used by the CLI, WASM bindings and
    /// configuration files.
    #[inline]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CardNetwork {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "visa" => Ok(Self::Visa),
            "mastercard" | "mc" => Ok(Self::Mastercard),
            "amex" | "american express" => Ok(Self::Amex),
            "discover" => Ok(Self::Discover),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseNetworkError {
                input: s.to_string(),
            }),
        }
    }
}
