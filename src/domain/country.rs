//! CountryCode value object.

use super::errors::ValidationError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Countries whose phone formats the registry knows how to validate.
///
/// Parsing is exact and case-sensitive: only `"FR"` and `"UK"` are accepted.
///
/// # Example
///
/// ```
/// use registry_mcp_server::domain::CountryCode;
///
/// let country: CountryCode = "FR".parse().unwrap();
/// assert_eq!(country, CountryCode::Fr);
/// assert!("US".parse::<CountryCode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum CountryCode {
    #[serde(rename = "FR")]
    Fr,
    #[serde(rename = "UK")]
    Uk,
}

impl CountryCode {
    /// The two-letter code as stored and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fr => "FR",
            Self::Uk => "UK",
        }
    }

    /// International dialing prefix, including the leading `+`.
    pub fn dialing_prefix(&self) -> &'static str {
        match self {
            Self::Fr => "+33",
            Self::Uk => "+44",
        }
    }

    /// Adjective used in user-facing messages.
    pub fn adjective(&self) -> &'static str {
        match self {
            Self::Fr => "French",
            Self::Uk => "British",
        }
    }
}

impl FromStr for CountryCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FR" => Ok(Self::Fr),
            "UK" => Ok(Self::Uk),
            other => Err(ValidationError::UnsupportedCountry(other.to_string())),
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
