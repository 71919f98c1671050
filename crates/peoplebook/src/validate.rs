//! Field validation for new records.
//!
//! The [`Validator`] checks the three fields a user types when adding a
//! person. Each check returns the cleaned value or a validation error the
//! shell answers with a re-prompt.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::RecordsConfig;
use crate::error::{Error, Result};
use crate::record::Gender;

/// Plain alphabetic token.
const TOKEN_PATTERN: &str = r"^\p{Alphabetic}+$";

/// Alphabetic token with apostrophes allowed between letters.
const TOKEN_WITH_APOSTROPHE_PATTERN: &str = r"^\p{Alphabetic}+(?:['’]\p{Alphabetic}+)*$";

/// How many name tokens a record's name must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NamePolicy {
    /// "Name Surname": exactly two tokens.
    #[default]
    #[serde(rename = "full")]
    FullName,
    /// A single first name.
    #[serde(rename = "first")]
    FirstName,
}

impl NamePolicy {
    /// Number of whitespace-separated tokens a name must have.
    #[must_use]
    pub fn token_count(self) -> usize {
        match self {
            Self::FullName => 2,
            Self::FirstName => 1,
        }
    }

    /// Text shown when asking for a name.
    #[must_use]
    pub fn prompt(self) -> &'static str {
        match self {
            Self::FullName => "Enter Name and Surname (e.g., Ivan Petrenko): ",
            Self::FirstName => "Enter Name (e.g., Ivan): ",
        }
    }

    /// Text shown when asking which record to delete.
    #[must_use]
    pub fn delete_prompt(self) -> &'static str {
        match self {
            Self::FullName => "Enter Name and Surname to delete: ",
            Self::FirstName => "Enter Name to delete: ",
        }
    }

    /// Text shown when a name is rejected.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::FullName => {
                "Enter valid Name and Surname (letters only, separated by a space)."
            }
            Self::FirstName => "Enter a valid Name (letters only).",
        }
    }
}

/// Validates user-entered record fields.
#[derive(Debug, Clone)]
pub struct Validator {
    policy: NamePolicy,
    token: Regex,
    min_height: f64,
    max_height: f64,
}

impl Validator {
    /// Build a validator from the records configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the name pattern fails to compile.
    pub fn new(config: &RecordsConfig) -> Result<Self> {
        let pattern = if config.allow_apostrophes {
            TOKEN_WITH_APOSTROPHE_PATTERN
        } else {
            TOKEN_PATTERN
        };
        let token = Regex::new(pattern).map_err(|e| Error::ConfigValidation {
            message: format!("invalid name pattern: {e}"),
        })?;

        Ok(Self {
            policy: config.name_policy,
            token,
            min_height: config.min_height,
            max_height: config.max_height,
        })
    }

    /// The name policy in force.
    #[must_use]
    pub fn policy(&self) -> NamePolicy {
        self.policy
    }

    /// Accepted height range, inclusive.
    #[must_use]
    pub fn height_range(&self) -> (f64, f64) {
        (self.min_height, self.max_height)
    }

    /// Check a name and return it trimmed, with single spaces between tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if the name is empty, has the wrong
    /// number of tokens, or a token contains anything but letters.
    pub fn name(&self, input: &str) -> Result<String> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(Error::invalid_name(input, "name is empty"));
        }

        let expected = self.policy.token_count();
        if tokens.len() != expected {
            return Err(Error::invalid_name(
                input,
                format!("expected {expected} word(s), got {}", tokens.len()),
            ));
        }

        if let Some(bad) = tokens.iter().find(|t| !self.token.is_match(t)) {
            trace!("rejected name token {:?}", bad);
            return Err(Error::invalid_name(input, "letters only"));
        }

        Ok(tokens.join(" "))
    }

    /// Check a gender answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGender`] unless the input is `m` or `f`.
    pub fn gender(&self, input: &str) -> Result<Gender> {
        input.parse()
    }

    /// Check a height answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HeightNotNumber`] if the input does not parse as a
    /// finite number, or [`Error::HeightOutOfRange`] if it is outside the
    /// configured bounds.
    pub fn height(&self, input: &str) -> Result<f64> {
        let value: f64 = input
            .trim()
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| Error::HeightNotNumber {
                input: input.trim().to_string(),
            })?;

        if value < self.min_height || value > self.max_height {
            return Err(Error::HeightOutOfRange {
                value,
                min: self.min_height,
                max: self.max_height,
            });
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> Validator {
        Validator::new(&RecordsConfig::default()).unwrap()
    }

    #[test]
    fn test_full_name_accepted() {
        assert_eq!(validator().name("  Ivan   Petrenko ").unwrap(), "Ivan Petrenko");
    }

    #[test]
    fn test_unicode_name_accepted() {
        assert_eq!(
            validator().name("Іван Петренко").unwrap(),
            "Іван Петренко"
        );
    }

    #[test]
    fn test_name_rejects_empty() {
        let err = validator().name("   ").unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_name_rejects_digits() {
        assert!(validator().name("Ivan 123").is_err());
        assert!(validator().name("12 34").is_err());
    }

    #[test]
    fn test_name_rejects_wrong_token_count() {
        assert!(validator().name("Ivan").is_err());
        assert!(validator().name("Ivan Ivanovych Petrenko").is_err());
    }

    #[test]
    fn test_first_name_policy() {
        let config = RecordsConfig {
            name_policy: NamePolicy::FirstName,
            ..RecordsConfig::default()
        };
        let v = Validator::new(&config).unwrap();
        assert_eq!(v.name("Anna").unwrap(), "Anna");
        assert!(v.name("Anna Ivanova").is_err());
    }

    #[test]
    fn test_apostrophes_rejected_by_default() {
        assert!(validator().name("Conor O'Neil").is_err());
    }

    #[test]
    fn test_apostrophes_allowed_when_enabled() {
        let config = RecordsConfig {
            allow_apostrophes: true,
            ..RecordsConfig::default()
        };
        let v = Validator::new(&config).unwrap();
        assert_eq!(v.name("Conor O'Neil").unwrap(), "Conor O'Neil");
        assert!(v.name("Conor 'Neil").is_err());
        assert!(v.name("Conor Neil'").is_err());
    }

    #[test]
    fn test_gender() {
        let v = validator();
        assert_eq!(v.gender("M").unwrap(), Gender::Male);
        assert_eq!(v.gender(" f ").unwrap(), Gender::Female);
        assert!(v.gender("x").is_err());
        assert!(v.gender("female").is_err());
    }

    #[test]
    fn test_height_boundaries_inclusive() {
        let v = validator();
        assert!((v.height("50").unwrap() - 50.0).abs() < f64::EPSILON);
        assert!((v.height("250").unwrap() - 250.0).abs() < f64::EPSILON);
        assert!(matches!(
            v.height("49"),
            Err(Error::HeightOutOfRange { .. })
        ));
        assert!(matches!(
            v.height("251"),
            Err(Error::HeightOutOfRange { .. })
        ));
    }

    #[test]
    fn test_height_fractional() {
        assert!((validator().height(" 172.5 ").unwrap() - 172.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_height_not_number() {
        let v = validator();
        assert!(matches!(v.height("tall"), Err(Error::HeightNotNumber { .. })));
        assert!(matches!(v.height(""), Err(Error::HeightNotNumber { .. })));
        assert!(matches!(v.height("NaN"), Err(Error::HeightNotNumber { .. })));
        assert!(matches!(v.height("inf"), Err(Error::HeightNotNumber { .. })));
    }

    #[test]
    fn test_custom_height_range() {
        let config = RecordsConfig {
            min_height: 100.0,
            max_height: 200.0,
            ..RecordsConfig::default()
        };
        let v = Validator::new(&config).unwrap();
        assert!(v.height("99").is_err());
        assert!(v.height("200").is_ok());
        assert_eq!(v.height_range(), (100.0, 200.0));
    }
}
