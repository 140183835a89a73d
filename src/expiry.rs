//! Expiry dates and the not-in-past rule.
//!
//! The expiry field holds `MM/YY` (as produced by
//! [`format_expiry_date`](crate::format::format_expiry_date)) and parses to a
//! [`YearMonth`]. A card stays usable through its expiry month, so an expiry
//! equal to the current month passes and anything earlier fails.
//!
//! The current month comes from the local clock. Every check has an `_at`
//! variant taking the reference month explicitly.
//!
//! # Example
//!
//! ```
//! use card_form::expiry::{parse_expiry, validate_expiry_at, YearMonth};
//!
//! let june_2025 = YearMonth::new(2025, 6).unwrap();
//!
//! assert_eq!(parse_expiry("06/25"), Ok(june_2025));
//! assert!(validate_expiry_at("06/25", june_2025).is_ok());
//! assert!(validate_expiry_at("05/25", june_2025).is_err());
//! ```

use chrono::{Datelike, Local};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Two-digit expiry years are read as `2000 + YY`.
pub const CENTURY: u16 = 2000;

/// A calendar month. Used both for parsed expiry dates and for the
/// reference month they are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    // Field order gives the derived ordering: year first, then month
    year: u16,
    month: u8,
}

impl YearMonth {
    /// Returns `None` unless `month` is 1-12.
    pub const fn new(year: u16, month: u8) -> Option<Self> {
        match month {
            1..=12 => Some(Self { year, month }),
            _ => None,
        }
    }

    /// The current month according to the local clock.
    pub fn now() -> Self {
        let today = Local::now();
        Self {
            year: u16::try_from(today.year()).unwrap_or(u16::MAX),
            // chrono months are already 1-based
            month: today.month() as u8,
        }
    }

    /// Four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// `MM/YY`, the way the expiry field shows it.
    pub fn to_short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year % 100)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ExpiryError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ExpiryError::Empty);
        }

        let (year, month) = s.split_once('-').ok_or(ExpiryError::InvalidFormat)?;
        let year = digit_value(year, 4..=4).ok_or(ExpiryError::InvalidFormat)?;
        let month = digit_value(month, 1..=2).ok_or(ExpiryError::InvalidFormat)?;

        Self::new(year, month as u8).ok_or(ExpiryError::InvalidMonth(month as u8))
    }
}

/// Why an expiry value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    /// Nothing was entered.
    Empty,
    /// Not `MM/YY`.
    InvalidFormat,
    /// The month is not 1-12.
    InvalidMonth(u8),
    /// The expiry is before the reference month.
    Expired(YearMonth),
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "expiry date is empty"),
            Self::InvalidFormat => write!(f, "invalid expiry format (expected MM/YY)"),
            Self::InvalidMonth(m) => write!(f, "invalid month {}: must be 1-12", m),
            Self::Expired(expiry) => write!(f, "card expired ({})", expiry.to_short()),
        }
    }
}

impl std::error::Error for ExpiryError {}

/// Value of an all-digit string whose length is in `len`.
fn digit_value(s: &str, len: RangeInclusive<usize>) -> Option<u16> {
    if !len.contains(&s.len()) {
        return None;
    }
    s.bytes().try_fold(0u16, |acc, b| {
        b.is_ascii_digit().then(|| acc * 10 + u16::from(b - b'0'))
    })
}

/// Parses an `MM/YY` expiry date.
///
/// The month may be one or two digits, the year must be exactly two.
/// Whitespace around either part is ignored.
///
/// ```
/// use card_form::expiry::{parse_expiry, ExpiryError};
///
/// let expiry = parse_expiry("12/25").unwrap();
/// assert_eq!((expiry.year(), expiry.month()), (2025, 12));
///
/// assert_eq!(parse_expiry("13/25"), Err(ExpiryError::InvalidMonth(13)));
/// assert_eq!(parse_expiry("1225"), Err(ExpiryError::InvalidFormat));
/// ```
pub fn parse_expiry(input: &str) -> Result<YearMonth, ExpiryError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ExpiryError::Empty);
    }

    let (month, year) = input.split_once('/').ok_or(ExpiryError::InvalidFormat)?;
    let month = digit_value(month.trim(), 1..=2).ok_or(ExpiryError::InvalidFormat)? as u8;
    let yy = digit_value(year.trim(), 2..=2).ok_or(ExpiryError::InvalidFormat)?;

    YearMonth::new(CENTURY + yy, month).ok_or(ExpiryError::InvalidMonth(month))
}

/// Parses an expiry date and rejects it if it is before `today`.
pub fn validate_expiry_at(input: &str, today: YearMonth) -> Result<YearMonth, ExpiryError> {
    let expiry = parse_expiry(input)?;
    if expiry < today {
        return Err(ExpiryError::Expired(expiry));
    }
    Ok(expiry)
}

/// Parses an expiry date and rejects it if it is before the current month.
pub fn validate_expiry(input: &str) -> Result<YearMonth, ExpiryError> {
    validate_expiry_at(input, YearMonth::now())
}

/// Returns true if `input` is a well-formed expiry not before `today`.
#[inline]
pub fn is_valid_expiry_at(input: &str, today: YearMonth) -> bool {
    validate_expiry_at(input, today).is_ok()
}

/// Returns true if `input` is a well-formed expiry not before the current
/// month.
#[inline]
pub fn is_valid_expiry(input: &str) -> bool {
    validate_expiry(input).is_ok()
}
