//! Core record types for peoplebook.
//!
//! This module defines the data structures stored in the people file: one
//! [`Record`] per person and the [`Gender`] enum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::Error;

/// Gender of a person, stored as `"m"` or `"f"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    /// Stored as `"m"`.
    #[default]
    #[serde(rename = "m")]
    Male,
    /// Stored as `"f"`.
    #[serde(rename = "f")]
    Female,
}

impl Gender {
    /// The single-letter code used on disk and at the prompt.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
        }
    }

    /// The adjective used in menu labels and result keys.
    #[must_use]
    pub fn adjective(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" => Ok(Self::Male),
            "f" => Ok(Self::Female),
            _ => Err(Error::InvalidGender {
                input: s.to_string(),
            }),
        }
    }
}

/// A stored field: either the expected type or whatever JSON was there.
///
/// Values of the wrong type are kept so that rewriting the file never loses
/// them. They are shown verbatim and ignored by every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field<T> {
    /// A value of the expected type.
    Valid(T),
    /// Any other JSON value, including `null`.
    Other(Value),
}

impl<T> Field<T> {
    /// The value, if it has the expected type.
    #[must_use]
    pub fn valid(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Other(_) => None,
        }
    }
}

/// Deserialize a field that is present in the object, keeping `null` as
/// [`Field::Other`] instead of turning it into `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Field<T>>, D::Error>
where
    D: Deserializer<'de>,
    Field<T>: Deserialize<'de>,
{
    Field::deserialize(deserializer).map(Some)
}

/// One person in the collection.
///
/// Records created through the add operation always carry every field.
/// Records read from disk may lack fields or hold values of another type;
/// those are kept as found and shown with placeholders or verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(
        rename = "Name",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    name: Option<Field<String>>,

    #[serde(
        rename = "Gender",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    gender: Option<Field<Gender>>,

    #[serde(
        rename = "Height",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    height: Option<Field<Number>>,

    /// Keys other than `Name`, `Gender` and `Height`.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Record {
    /// Create a complete record.
    #[must_use]
    pub fn new(name: impl Into<String>, gender: Gender, height: f64) -> Self {
        Self {
            name: Some(Field::Valid(name.into())),
            gender: Some(Field::Valid(gender)),
            height: height_number(height).map(Field::Valid),
            extra: Map::new(),
        }
    }

    /// Full name, if present and a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref()?.valid().map(String::as_str)
    }

    /// Gender, if present and `m` or `f`.
    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_ref()?.valid().copied()
    }

    /// Height in centimetres, if present and numeric.
    #[must_use]
    pub fn height(&self) -> Option<f64> {
        self.height.as_ref()?.valid()?.as_f64()
    }

    /// Check whether this record's name equals `name`, ignoring case.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name()
            .is_some_and(|own| own.to_lowercase() == name.to_lowercase())
    }

    /// Check whether this record's name contains `needle`, ignoring case.
    #[must_use]
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name()
            .is_some_and(|own| own.to_lowercase().contains(&needle.to_lowercase()))
    }

    /// Height if this record matches `gender` and has a usable height.
    #[must_use]
    pub fn height_for(&self, gender: Gender) -> Option<f64> {
        match (self.gender(), self.height()) {
            (Some(g), Some(h)) if g == gender && h.is_finite() => Some(h),
            _ => None,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = show_field(self.name.as_ref(), "Unknown", Clone::clone);
        let gender = show_field(self.gender.as_ref(), "-", |g| g.code().to_string());
        let height = show_field(self.height.as_ref(), "-", |n| match n.as_f64() {
            Some(h) => format_height(h),
            None => n.to_string(),
        });
        write!(f, "Name: {name}, Gender: {gender}, Height: {height} cm")
    }
}

/// Text for a field: `missing` if absent, strings without quotes, other
/// JSON as written.
fn show_field<T>(field: Option<&Field<T>>, missing: &str, show: impl Fn(&T) -> String) -> String {
    match field {
        None => missing.to_string(),
        Some(Field::Valid(value)) => show(value),
        Some(Field::Other(Value::String(s))) => s.clone(),
        Some(Field::Other(other)) => other.to_string(),
    }
}

/// JSON number for a height, written as an integer when it is whole.
///
/// Returns `None` for non-finite heights.
#[must_use]
pub fn height_number(height: f64) -> Option<Number> {
    if height.fract() == 0.0 && height.abs() < 9_007_199_254_740_992.0 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = height as i64;
        Some(Number::from(whole))
    } else {
        Number::from_f64(height)
    }
}

/// Format a height without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_height(height: f64) -> String {
    if height.fract() == 0.0 && height.abs() < 1e15 {
        format!("{height:.0}")
    } else {
        height.to_string()
    }
}
