use crate::error::{RegistryError, RegistryResult};
use crate::models::Contact;
use crate::repositories::traits::ContactRepository;
use crate::store::AsyncSqliteStore;
use async_trait::async_trait;

/// Contact repository implementation backed by SQLite.
pub struct SqliteContactRepository {
    store: AsyncSqliteStore,
}

impl SqliteContactRepository {
    /// Create a new SqliteContactRepository over the given store.
    pub fn new(store: AsyncSqliteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn get(&self, id: i64) -> RegistryResult<Contact> {
        self.store
            .run(move |s| s.get_contact(id))
            .await?
            .ok_or_else(|| RegistryError::not_found("Contact", id))
    }

    async fn list(&self) -> RegistryResult<Vec<Contact>> {
        self.store.run(|s| s.list_contacts()).await
    }

    async fn find_by_person(&self, person_id: i64) -> RegistryResult<Option<Contact>> {
        self.store
            .run(move |s| s.find_contact_by_person(person_id))
            .await
    }

    async fn create(&self, contact: &Contact) -> RegistryResult<Contact> {
        let contact = contact.clone();
        self.store.run(move |s| s.insert_contact(&contact)).await
    }

    async fn update(&self, contact: &Contact) -> RegistryResult<Contact> {
        let contact = contact.clone();
        let id = contact.id;

        let (updated, contact) = self
            .store
            .run(move |s| s.update_contact(&contact).map(|changed| (changed, contact)))
            .await?;

        if !updated {
            return Err(RegistryError::not_found("Contact", id));
        }
        Ok(contact)
    }
}
