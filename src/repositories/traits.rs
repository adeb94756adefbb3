use crate::error::RegistryResult;
use crate::models::*;
use async_trait::async_trait;

/// Repository for managing persons.
///
/// Provides abstraction over person storage and retrieval,
/// enabling different implementations (SQLite, mock).
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Retrieve a single person by ID, failing with `NotFound` if absent.
    async fn get(&self, id: i64) -> RegistryResult<Person>;

    /// Retrieve all persons ordered by last name, then first name, then ID.
    ///
    /// Callers rely on this order and do not sort again.
    async fn list(&self) -> RegistryResult<Vec<Person>>;

    /// Create a new person.
    async fn create(&self, person: &NewPerson) -> RegistryResult<Person>;

    /// Update an existing person.
    async fn update(&self, person: &Person) -> RegistryResult<Person>;

    /// Delete a person together with its contact and personnel.
    async fn delete(&self, id: i64) -> RegistryResult<()>;
}

/// Repository for managing contacts.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve a single contact by ID, failing with `NotFound` if absent.
    async fn get(&self, id: i64) -> RegistryResult<Contact>;

    /// Retrieve all contacts.
    async fn list(&self) -> RegistryResult<Vec<Contact>>;

    /// Find the contact owned by a person, if any.
    async fn find_by_person(&self, person_id: i64) -> RegistryResult<Option<Contact>>;

    /// Create a new contact; the returned contact carries its assigned ID.
    async fn create(&self, contact: &Contact) -> RegistryResult<Contact>;

    /// Update an existing contact.
    async fn update(&self, contact: &Contact) -> RegistryResult<Contact>;
}

/// Repository for managing personnel details.
#[async_trait]
pub trait PersonnelRepository: Send + Sync {
    /// Retrieve personnel details by ID, failing with `NotFound` if absent.
    async fn get(&self, id: i64) -> RegistryResult<Personnel>;

    /// Find the personnel details owned by a person, if any.
    async fn find_by_person(&self, person_id: i64) -> RegistryResult<Option<Personnel>>;

    /// Create new personnel details; the returned record carries its assigned ID.
    async fn create(&self, personnel: &Personnel) -> RegistryResult<Personnel>;

    /// Update existing personnel details.
    async fn update(&self, personnel: &Personnel) -> RegistryResult<Personnel>;
}
