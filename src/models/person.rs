//! Person model, the parent record of contacts and personnel.

use crate::domain::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format accepted for membership dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A person in the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    /// Unique identifier assigned by the store
    pub id: i64,

    /// Family name
    pub last_name: String,

    /// Given name
    pub first_name: String,

    /// Date the person joined, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_date: Option<NaiveDate>,
}

impl Person {
    /// Create a new person with no membership date.
    pub fn new(id: i64, last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id,
            last_name: last_name.into(),
            first_name: first_name.into(),
            membership_date: None,
        }
    }

    /// "First Last", as shown in titles.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Request payload for creating a person.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPerson {
    pub last_name: String,
    pub first_name: String,
    pub membership_date: Option<NaiveDate>,
}

impl NewPerson {
    /// Trim names and check that neither is empty.
    pub fn normalized(self) -> Result<Self, Vec<ValidationError>> {
        let last_name = self.last_name.trim().to_string();
        let first_name = self.first_name.trim().to_string();

        let mut errors = Vec::new();
        if last_name.is_empty() {
            errors.push(ValidationError::EmptyField("last_name"));
        }
        if first_name.is_empty() {
            errors.push(ValidationError::EmptyField("first_name"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            last_name,
            first_name,
            membership_date: self.membership_date,
        })
    }
}

/// Parse an optional membership date.
///
/// An absent or blank value clears the date.
pub fn parse_membership_date(value: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ValidationError::InvalidDate(raw.to_string())),
    }
}
