//! Batch evaluation of many independent form submissions.
//!
//! Each [`Submission`] is checked exactly as [`CardForm::submit`] would check
//! the same values, so a server can re-validate what the browser sent.
//! With the `parallel` feature the work is spread across the rayon pool;
//! results are identical either way and always in input order.
//!
//! [`CardForm::submit`]: crate::form::CardForm::submit
//!
//! # Example
//!
//! ```
//! use card_form::batch::{count_valid, validate_submissions, Submission};
//! use card_form::field::{FieldId, FieldRuleSet};
//! use card_form::validate::Validator;
//!
//! let rules = FieldRuleSet::empty().with_rules(
//!     FieldId::CardNumber,
//!     [Validator::card_number("Incorrect card number")],
//! );
//!
//! let submissions = vec![
//!     Submission::new().with(FieldId::CardNumber, "4111 1111 1111 1111"),
//!     Submission::new().with(FieldId::CardNumber, "4111 1111 1111 1112"),
//! ];
//!
//! let reports = validate_submissions(&rules, &submissions);
//! assert!(reports[0].is_valid());
//! assert!(!reports[1].is_valid());
//! assert_eq!(count_valid(&rules, &submissions), (1, 1));
//! ```

use crate::field::{FieldId, FieldRuleSet, FIELD_COUNT};
use crate::form::{validate_values, FormReport};
use std::fmt;
use zeroize::Zeroize;

/// The values of one submitted form. Missing fields are empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Submission {
    values: [String; FIELD_COUNT],
}

impl Submission {
    /// An empty submission.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, builder style.
    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = &mut self.values[field as usize];
        slot.zeroize();
        *slot = value.into();
    }

    /// The value of a field.
    #[inline]
    pub fn get(&self, field: FieldId) -> &str {
        &self.values[field as usize]
    }

    /// Validates this submission.
    pub fn validate(&self, rules: &FieldRuleSet) -> FormReport {
        validate_values(rules, |field| self.get(field))
    }
}

impl<S: Into<String>> FromIterator<(FieldId, S)> for Submission {
    fn from_iter<I: IntoIterator<Item = (FieldId, S)>>(iter: I) -> Self {
        let mut submission = Self::new();
        for (field, value) in iter {
            submission.set(field, value);
        }
        submission
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Submission");
        for field in FieldId::ALL {
            debug.field(field.as_str(), &format_args!("<{} chars>", self.get(field).len()));
        }
        debug.finish()
    }
}

impl Drop for Submission {
    fn drop(&mut self) {
        for value in &mut self.values {
            value.zeroize();
        }
    }
}

/// Validates every submission, returning reports in input order.
///
/// Runs in parallel when the `parallel` feature is enabled.
pub fn validate_submissions(rules: &FieldRuleSet, submissions: &[Submission]) -> Vec<FormReport> {
    #[cfg(feature = "tracing")]
    tracing::debug!(count = submissions.len(), "validating submissions");

    collect_reports(rules, submissions)
}

#[cfg(feature = "parallel")]
fn collect_reports(rules: &FieldRuleSet, submissions: &[Submission]) -> Vec<FormReport> {
    use rayon::prelude::*;
    submissions.par_iter().map(|s| s.validate(rules)).collect()
}

#[cfg(not(feature = "parallel"))]
fn collect_reports(rules: &FieldRuleSet, submissions: &[Submission]) -> Vec<FormReport> {
    submissions.iter().map(|s| s.validate(rules)).collect()
}

/// Counts valid and invalid submissions without keeping the reports.
///
/// # Returns
///
/// Tuple of (valid_count, invalid_count)
pub fn count_valid(rules: &FieldRuleSet, submissions: &[Submission]) -> (usize, usize) {
    #[cfg(feature = "parallel")]
    let valid = {
        use rayon::prelude::*;
        submissions
            .par_iter()
            .filter(|s| s.validate(rules).is_valid())
            .count()
    };

    #[cfg(not(feature = "parallel"))]
    let valid = submissions
        .iter()
        .filter(|s| s.validate(rules).is_valid())
        .count();

    (valid, submissions.len() - valid)
}

/// Splits submissions into the indexes of valid ones and the reports of
/// invalid ones.
pub fn partition_submissions(
    rules: &FieldRuleSet,
    submissions: &[Submission],
) -> (Vec<usize>, Vec<(usize, FormReport)>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for (i, report) in validate_submissions(rules, submissions).into_iter().enumerate() {
        if report.is_valid() {
            valid.push(i);
        } else {
            invalid.push((i, report));
        }
    }

    (valid, invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::YearMonth;
    use crate::field::default_rules;
    use crate::validate::Validator;

    fn rules() -> FieldRuleSet {
        default_rules().clone().with_rules(
            FieldId::CardExpiryDate,
            [
                Validator::required("Enter your expiry date"),
                Validator::expiry_date_at("Incorrect expiry date", YearMonth::new(2025, 6).unwrap()),
            ],
        )
    }

    fn complete(number: &str, cvv: &str) -> Submission {
        [
            (FieldId::CardNumber, number),
            (FieldId::CardHolder, "JANE DOE"),
            (FieldId::CardExpiryDate, "06/25"),
            (FieldId::CardCvvCode, cvv),
            (FieldId::Email, "jane@example.com"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_validate_submissions_in_order() {
        let submissions = vec![
            complete("4111 1111 1111 1111", "123"),
            complete("4111 1111 1111 1112", "123"),
            Submission::new(),
            complete("3782 822463 10005", "1234"),
        ];
        let reports = validate_submissions(&rules(), &submissions);

        assert_eq!(reports.len(), 4);
        assert!(reports[0].is_valid());
        assert_eq!(
            reports[1].outcome(FieldId::CardNumber).message(),
            Some("Incorrect card number")
        );
        assert_eq!(reports[2].error_count(), FIELD_COUNT);
        assert!(reports[3].is_valid());
    }

    #[test]
    fn test_amex_cvv_must_be_four_digits() {
        let report = complete("3782 822463 10005", "123").validate(&rules());
        assert_eq!(report.outcome(FieldId::CardCvvCode).message(), Some("Incorrect CVV"));
    }

    #[test]
    fn test_count_valid() {
        let submissions = vec![
            complete("4111111111111111", "123"),
            complete("5500000000000004", "123"),
            complete("1234567890123456", "123"),
        ];
        assert_eq!(count_valid(&rules(), &submissions), (2, 1));
        assert_eq!(count_valid(&rules(), &[]), (0, 0));
    }

    #[test]
    fn test_partition_submissions() {
        let submissions = vec![
            complete("4111111111111111", "123"),
            complete("4111111111111111", "12"),
        ];
        let (valid, invalid) = partition_submissions(&rules(), &submissions);
        assert_eq!(valid, vec![0]);
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].0, 1);
    }

    #[test]
    fn test_submission_set_and_debug() {
        let mut submission = Submission::new().with(FieldId::CardCvvCode, "999");
        assert_eq!(submission.get(FieldId::CardCvvCode), "999");
        assert_eq!(submission.get(FieldId::Email), "");

        submission.set(FieldId::CardCvvCode, "000");
        assert_eq!(submission.get(FieldId::CardCvvCode), "000");
        assert!(!format!("{:?}", submission).contains("000"));
    }
}
