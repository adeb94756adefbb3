//! Phone number validation per country.
//!
//! Numbers are first reduced to their canonical digit string (ASCII digits and `+`
//! only), then matched in full against the pattern of the selected country:
//!
//! - `FR`: `+33` or `0`, a digit in `1-9`, then 8 more digits.
//! - `UK`: `+44` or `0`, the digit `7`, then 9 more digits (mobile numbers only).
//!
//! Any other country is a plain `false`, never an error.

use super::country::CountryCode;
use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

static FR_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+33|0)[1-9][0-9]{8}$").expect("Failed to compile French phone regex")
});

static UK_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+44|0)7[0-9]{9}$").expect("Failed to compile British phone regex")
});

/// Outcome of checking a phone number against a country selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneCheck {
    Valid,
    Malformed,
    UnsupportedCountry,
}

/// Strip everything that is not an ASCII digit or `+`.
///
/// ```
/// use registry_mcp_server::domain::phone::canonicalize;
///
/// assert_eq!(canonicalize("+33 6 12-34 (56) 78"), "+33612345678");
/// ```
pub fn canonicalize(phone_number: &str) -> String {
    phone_number
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check whether `phone_number` is well formed for `country`.
pub fn matches_country(phone_number: &str, country: CountryCode) -> bool {
    let canonical = canonicalize(phone_number);
    match country {
        CountryCode::Fr => FR_PHONE_REGEX.is_match(&canonical),
        CountryCode::Uk => UK_PHONE_REGEX.is_match(&canonical),
    }
}

/// Check a phone number against a raw country selector, keeping the
/// unsupported-country case distinct from a malformed number.
pub fn check_phone_number(phone_number: &str, country: &str) -> PhoneCheck {
    match country.parse::<CountryCode>() {
        Ok(code) if matches_country(phone_number, code) => PhoneCheck::Valid,
        Ok(_) => PhoneCheck::Malformed,
        Err(_) => PhoneCheck::UnsupportedCountry,
    }
}

/// Return `true` iff `phone_number` is a valid number for `country`.
///
/// Unsupported countries yield `false`, the same as a malformed number.
///
/// ```
/// use registry_mcp_server::domain::is_valid_phone_number;
///
/// assert!(is_valid_phone_number("0612345678", "FR"));
/// assert!(is_valid_phone_number("+44 7123 456789", "UK"));
/// assert!(!is_valid_phone_number("0612345678", "US"));
/// ```
pub fn is_valid_phone_number(phone_number: &str, country: &str) -> bool {
    check_phone_number(phone_number, country) == PhoneCheck::Valid
}

/// A phone number that has been validated for a specific country.
///
/// The number is kept as entered; use [`PhoneNumber::canonical`] for the
/// digits-and-plus form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    raw: String,
    country: CountryCode,
}

impl PhoneNumber {
    /// Create a new PhoneNumber, validating it against the country format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` naming the country if the
    /// number does not match.
    pub fn for_country(
        phone: impl Into<String>,
        country: CountryCode,
    ) -> Result<Self, ValidationError> {
        let raw = phone.into();

        if !matches_country(&raw, country) {
            return Err(ValidationError::InvalidPhone {
                country,
                phone: raw,
            });
        }

        Ok(Self { raw, country })
    }

    /// Get the phone number as entered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn country(&self) -> CountryCode {
        self.country
    }

    /// Get the canonical digit string (may start with `+`).
    pub fn canonical(&self) -> String {
        canonicalize(&self.raw)
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
