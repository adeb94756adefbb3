//! Contact service layer.
//!
//! Enforces that a contact belongs to an existing person and that a person
//! owns at most one contact.

use crate::error::{RegistryError, RegistryResult};
use crate::models::{Contact, ContactChanges, NewContact, Person};
use crate::repositories::{ContactRepository, PersonRepository};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Message returned when a person already owns a contact.
pub const CONTACT_EXISTS_MESSAGE: &str = "This person already has a contact. Edit it instead.";

/// A contact together with its owner.
#[derive(Debug, Clone, Serialize)]
pub struct ContactDetails {
    pub contact: Contact,
    pub person: Person,
}

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Get a contact and the person it belongs to.
    async fn get_contact(&self, id: i64) -> RegistryResult<ContactDetails>;

    /// Create the contact of a person.
    ///
    /// Fails with `NotFound` if the person does not exist and with
    /// `AlreadyExists` if the person already has a contact.
    async fn create_contact(&self, person_id: i64, contact: NewContact)
        -> RegistryResult<Contact>;

    /// Apply changes to an existing contact and revalidate it.
    async fn update_contact(&self, id: i64, changes: ContactChanges) -> RegistryResult<Contact>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    persons: Arc<dyn PersonRepository>,
    contacts: Arc<dyn ContactRepository>,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(persons: Arc<dyn PersonRepository>, contacts: Arc<dyn ContactRepository>) -> Self {
        Self { persons, contacts }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn get_contact(&self, id: i64) -> RegistryResult<ContactDetails> {
        let contact = self.contacts.get(id).await?;
        let person = self.persons.get(contact.person_id).await?;
        Ok(ContactDetails { contact, person })
    }

    async fn create_contact(
        &self,
        person_id: i64,
        contact: NewContact,
    ) -> RegistryResult<Contact> {
        self.persons.get(person_id).await?;

        if self.contacts.find_by_person(person_id).await?.is_some() {
            warn!(person_id, "Rejected second contact for person");
            return Err(RegistryError::AlreadyExists(
                CONTACT_EXISTS_MESSAGE.to_string(),
            ));
        }

        let contact = contact.into_contact(person_id)?;
        let created = self.contacts.create(&contact).await?;
        info!(contact_id = created.id, person_id, "Created contact");
        Ok(created)
    }

    async fn update_contact(&self, id: i64, changes: ContactChanges) -> RegistryResult<Contact> {
        let current = self.contacts.get(id).await?;
        let contact = changes.apply_to(&current)?;
        let updated = self.contacts.update(&contact).await?;
        info!(contact_id = id, "Updated contact");
        Ok(updated)
    }
}
