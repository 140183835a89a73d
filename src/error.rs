//! Error types for parsing identifiers and rule-set configuration.
//!
//! Field validation itself never fails: a failing rule is reported as a
//! [`ValidationOutcome`](crate::ValidationOutcome), not as an error. The types
//! here cover the places where outside text has to be turned into typed
//! values (field ids, network names, JSON configuration).

use std::fmt;

/// A field identifier string did not name a known form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError {
    /// The identifier that was rejected.
    pub input: String,
}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown field '{}' (expected cardNumber, cardHolder, cardExpiryDate, cardCVVCode or email)",
            self.input.escape_default()
        )
    }
}

impl std::error::Error for ParseFieldError {}

/// A card network name was not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNetworkError {
    /// The name that was rejected.
    pub input: String,
}

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown card network '{}' (expected visa, mastercard, amex or discover)",
            self.input.escape_default()
        )
    }
}

impl std::error::Error for ParseNetworkError {}

/// Errors that can occur while loading a rule-set configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the configuration source failed.
    Io(std::io::Error),

    /// The document is not valid JSON or does not have the expected shape.
    Parse(String),

    /// A top-level key does not name a form field.
    UnknownField(ParseFieldError),

    /// Two keys (a field id and its alias) configure the same field.
    DuplicateField {
        /// The field configured twice.
        field: String,
        /// The key seen second.
        key: String,
    },

    /// A rule entry names a rule kind that does not exist.
    UnknownRule {
        /// The field the rule was configured for.
        field: String,
        /// The rejected rule name.
        rule: String,
    },

    /// A rule entry is missing a setting its kind requires, or has a bad one.
    InvalidRule {
        /// The field the rule was configured for.
        field: String,
        /// What is wrong with the entry.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read rule configuration: {}", e),
            Self::Parse(msg) => write!(f, "invalid rule configuration: {}", msg),
            Self::UnknownField(e) => write!(f, "invalid rule configuration: {}", e),
            Self::DuplicateField { field, key } => {
                write!(f, "field {} is configured more than once (again as '{}')", field, key)
            }
            Self::UnknownRule { field, rule } => {
                write!(f, "unknown rule '{}' configured for field {}", rule, field)
            }
            Self::InvalidRule { field, reason } => {
                write!(f, "invalid rule for field {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::UnknownField(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseFieldError> for ConfigError {
    fn from(e: ParseFieldError) -> Self {
        Self::UnknownField(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParseFieldError {
                input: "cardPin".to_string()
            }
            .to_string(),
            "unknown field 'cardPin' (expected cardNumber, cardHolder, cardExpiryDate, cardCVVCode or email)"
        );

        assert_eq!(
            ParseNetworkError {
                input: "jcb".to_string()
            }
            .to_string(),
            "unknown card network 'jcb' (expected visa, mastercard, amex or discover)"
        );

        assert_eq!(
            ConfigError::UnknownRule {
                field: "email".to_string(),
                rule: "phone".to_string()
            }
            .to_string(),
            "unknown rule 'phone' configured for field email"
        );

        assert_eq!(
            ConfigError::DuplicateField {
                field: "cardCVVCode".to_string(),
                key: "cardCvc".to_string()
            }
            .to_string(),
            "field cardCVVCode is configured more than once (again as 'cardCvc')"
        );
    }

    #[test]
    fn test_config_error_source() {
        use std::error::Error;

        let err = ConfigError::from(ParseFieldError {
            input: "x".to_string(),
        });
        assert!(err.source().is_some());
        assert!(ConfigError::Parse("eof".to_string()).source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParseFieldError>();
        assert_send_sync::<ParseNetworkError>();
        assert_send_sync::<ConfigError>();
    }
}
