//! Luhn checksum.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to catch single-digit typos in card numbers.
//!
//! This module deliberately does not reject empty input: an empty digit
//! sequence sums to 0, which is divisible by 10. Callers that need a non-empty
//! number guard for it through the `required` and `card_number` rules.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Checks a card number string with the Luhn algorithm.
///
/// Characters other than ASCII digits are skipped, so both `"4111111111111111"`
/// and `"4111 1111 1111 1111"` can be passed directly.
///
/// # Example
///
/// ```
/// use card_form::luhn::check_luhn;
///
/// assert!(check_luhn("4111111111111111"));
/// assert!(!check_luhn("4111111111111112"));
/// assert!(check_luhn(""));
/// ```
pub fn check_luhn(digits: &str) -> bool {
    let values: Vec<u8> = digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    is_valid(&values)
}

/// Validates a sequence of digit values (0-9) with the Luhn algorithm.
///
/// # Algorithm
///
/// 1. Starting from the rightmost digit (check digit), moving left
/// 2. Double every second digit
/// 3. If doubling results in a number > 9, subtract 9
/// 4. Sum all digits
/// 5. If the sum is divisible by 10, the number is valid
#[inline]
pub fn is_valid(digits: &[u8]) -> bool {
    checksum(digits) % 10 == 0
}

/// Computes the Luhn sum for a sequence of digits (not reduced modulo 10).
///
/// Values above 9 are clamped through the table index, so the function never
/// panics on malformed slices.
#[inline]
pub fn checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            let digit = digit.min(9);
            // Positions 1, 3, 5, ... from the right are doubled
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Computes the check digit for a partial number.
///
/// Given digits without the check digit, returns the digit that makes the
/// full number pass [`is_valid`].
///
/// # Example
///
/// ```
/// use card_form::luhn::check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(check_digit(&partial), 1);
/// ```
pub fn check_digit(digits: &[u8]) -> u8 {
    // Appending a check digit shifts every existing digit one position left,
    // so the rightmost existing digit becomes a doubled one.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            let digit = digit.min(9);
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
