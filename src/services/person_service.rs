//! Person service layer.
//!
//! Business logic for listing, creating and looking up persons.

use crate::error::RegistryResult;
use crate::matching::{MatchResult, PersonMatcher, PersonQuery};
use crate::models::{parse_membership_date, Contact, NewPerson, Person, Personnel};
use crate::repositories::{ContactRepository, PersonRepository, PersonnelRepository};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// A person together with the records it owns.
#[derive(Debug, Clone, Serialize)]
pub struct PersonDetails {
    pub person: Person,
    pub contact: Option<Contact>,
    pub personnel: Option<Personnel>,
}

/// Response for a person lookup.
#[derive(Debug, Clone, Serialize)]
pub struct FindPersonResponse {
    pub matches: Vec<MatchResult>,
    pub total_found: usize,
}

/// Person service trait for business operations.
#[async_trait]
pub trait PersonService: Send + Sync {
    /// List every person, in the order `PersonRepository::list` guarantees
    /// (last name, then first name).
    async fn list_persons(&self) -> RegistryResult<Vec<Person>>;

    /// Get a person with its contact and personnel records.
    async fn get_person_details(&self, id: i64) -> RegistryResult<PersonDetails>;

    /// Create a new person.
    async fn create_person(&self, person: NewPerson) -> RegistryResult<Person>;

    /// Set or clear a person's membership date.
    ///
    /// `None` or a blank string clears the date; anything else must be `YYYY-MM-DD`.
    async fn update_membership_date(
        &self,
        id: i64,
        membership_date: Option<String>,
    ) -> RegistryResult<Person>;

    /// Find persons by fuzzy name and/or exact phone number.
    async fn find_person(
        &self,
        name: Option<String>,
        phone: Option<String>,
    ) -> RegistryResult<FindPersonResponse>;
}

/// Default implementation of PersonService.
pub struct PersonServiceImpl {
    persons: Arc<dyn PersonRepository>,
    contacts: Arc<dyn ContactRepository>,
    personnel: Arc<dyn PersonnelRepository>,
    matcher: PersonMatcher,
    max_match_results: usize,
    match_confidence_threshold: u8,
}

impl PersonServiceImpl {
    /// Create a new person service.
    pub fn new(
        persons: Arc<dyn PersonRepository>,
        contacts: Arc<dyn ContactRepository>,
        personnel: Arc<dyn PersonnelRepository>,
        max_match_results: usize,
        match_confidence_threshold: u8,
    ) -> Self {
        Self {
            persons,
            contacts,
            personnel,
            matcher: PersonMatcher::new(),
            max_match_results,
            match_confidence_threshold,
        }
    }
}

#[async_trait]
impl PersonService for PersonServiceImpl {
    async fn list_persons(&self) -> RegistryResult<Vec<Person>> {
        let persons = self.persons.list().await?;
        debug!(count = persons.len(), "Listed persons");
        Ok(persons)
    }

    async fn get_person_details(&self, id: i64) -> RegistryResult<PersonDetails> {
        let person = self.persons.get(id).await?;
        let (contact, personnel) = futures::try_join!(
            self.contacts.find_by_person(id),
            self.personnel.find_by_person(id)
        )?;

        Ok(PersonDetails {
            person,
            contact,
            personnel,
        })
    }

    async fn create_person(&self, person: NewPerson) -> RegistryResult<Person> {
        let person = person.normalized()?;
        let created = self.persons.create(&person).await?;
        info!(person_id = created.id, "Created person");
        Ok(created)
    }

    async fn update_membership_date(
        &self,
        id: i64,
        membership_date: Option<String>,
    ) -> RegistryResult<Person> {
        let membership_date = parse_membership_date(membership_date.as_deref())?;

        let mut person = self.persons.get(id).await?;
        person.membership_date = membership_date;
        let updated = self.persons.update(&person).await?;

        info!(
            person_id = id,
            cleared = updated.membership_date.is_none(),
            "Updated membership date"
        );
        Ok(updated)
    }

    async fn find_person(
        &self,
        name: Option<String>,
        phone: Option<String>,
    ) -> RegistryResult<FindPersonResponse> {
        let query = PersonQuery {
            name: name.filter(|n| !n.trim().is_empty()),
            phone: phone.filter(|p| !p.trim().is_empty()),
        };

        if query.name.is_none() && query.phone.is_none() {
            return Ok(FindPersonResponse {
                matches: Vec::new(),
                total_found: 0,
            });
        }

        let (persons, contacts) = futures::try_join!(self.persons.list(), self.contacts.list())?;
        let matches = self.matcher.find_matches(
            &query,
            &persons,
            &contacts,
            self.max_match_results,
            self.match_confidence_threshold,
        );

        debug!(
            name = ?query.name,
            phone = ?query.phone,
            found = matches.len(),
            "Person lookup finished"
        );

        let total_found = matches.len();
        Ok(FindPersonResponse {
            matches,
            total_found,
        })
    }
}
