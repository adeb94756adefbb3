//! Contact model: address and phone details of a person.

use crate::domain::{CountryCode, PhoneNumber, ValidationError};
use serde::{Deserialize, Serialize};

/// Contact details attached to exactly one person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    /// Unique identifier assigned by the store
    pub id: i64,

    /// Owning person
    pub person_id: i64,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Country, which also selects the phone format
    pub country: CountryCode,

    /// Phone number as entered, valid for `country`
    pub phone_number: String,
}

/// Request payload for creating a contact.
///
/// `country` stays a raw string so an unsupported value can be reported as a
/// validation message rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewContact {
    pub address: String,
    pub city: String,
    pub country: String,
    pub phone_number: String,
}

/// Partial update for a contact. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactChanges {
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
}

impl NewContact {
    /// Validate every field and build the contact for `person_id`.
    ///
    /// The returned contact has `id == 0`; the store assigns the real one.
    pub fn into_contact(self, person_id: i64) -> Result<Contact, Vec<ValidationError>> {
        build_contact(
            0,
            person_id,
            self.address,
            self.city,
            &self.country,
            self.phone_number,
        )
    }
}

impl ContactChanges {
    /// Merge the changes onto `current` and revalidate the result.
    pub fn apply_to(self, current: &Contact) -> Result<Contact, Vec<ValidationError>> {
        let country = self
            .country
            .unwrap_or_else(|| current.country.as_str().to_string());

        build_contact(
            current.id,
            current.person_id,
            self.address.unwrap_or_else(|| current.address.clone()),
            self.city.unwrap_or_else(|| current.city.clone()),
            &country,
            self.phone_number
                .unwrap_or_else(|| current.phone_number.clone()),
        )
    }
}

fn build_contact(
    id: i64,
    person_id: i64,
    address: String,
    city: String,
    country: &str,
    phone_number: String,
) -> Result<Contact, Vec<ValidationError>> {
    let address = address.trim().to_string();
    let city = city.trim().to_string();
    let phone_number = phone_number.trim().to_string();

    let mut errors = Vec::new();
    if address.is_empty() {
        errors.push(ValidationError::EmptyField("address"));
    }
    if city.is_empty() {
        errors.push(ValidationError::EmptyField("city"));
    }

    let country = match country.parse::<CountryCode>() {
        Ok(code) => Some(code),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    if phone_number.is_empty() {
        errors.push(ValidationError::EmptyField("phone_number"));
    } else if let Some(code) = country {
        if let Err(e) = PhoneNumber::for_country(phone_number.as_str(), code) {
            errors.push(e);
        }
    }

    match country {
        Some(country) if errors.is_empty() => Ok(Contact {
            id,
            person_id,
            address,
            city,
            country,
            phone_number,
        }),
        _ => Err(errors),
    }
}
