//! Domain validation errors.

use super::country::CountryCode;
use std::fmt;

/// Errors that can occur during domain value object and record validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace.
    EmptyField(&'static str),

    /// The country is not one of the supported country codes.
    UnsupportedCountry(String),

    /// The phone number does not match the format of its country.
    InvalidPhone {
        country: CountryCode,
        phone: String,
    },

    /// A numeric field lies outside its accepted range.
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    /// A date could not be parsed as `YYYY-MM-DD`.
    InvalidDate(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{} cannot be empty", field),
            Self::UnsupportedCountry(country) => {
                write!(f, "Unsupported country: {} (expected FR or UK)", country)
            }
            Self::InvalidPhone { country, phone } => {
                write!(f, "Invalid {} phone number: {}", country.adjective(), phone)
            }
            Self::OutOfRange {
                field,
                min,
                max,
                value,
            } => write!(
                f,
                "{} must be between {} and {} (got {})",
                field, min, max, value
            ),
            Self::InvalidDate(date) => {
                write!(f, "Invalid date: {} (expected YYYY-MM-DD)", date)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
