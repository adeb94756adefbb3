use crate::error::{RegistryError, RegistryResult};
use crate::models::{NewPerson, Person};
use crate::repositories::traits::PersonRepository;
use crate::store::AsyncSqliteStore;
use async_trait::async_trait;

/// Person repository implementation backed by SQLite.
///
/// This repository delegates all operations to the AsyncSqliteStore,
/// turning missing rows into `RegistryError::NotFound`.
pub struct SqlitePersonRepository {
    store: AsyncSqliteStore,
}

impl SqlitePersonRepository {
    /// Create a new SqlitePersonRepository over the given store.
    pub fn new(store: AsyncSqliteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PersonRepository for SqlitePersonRepository {
    async fn get(&self, id: i64) -> RegistryResult<Person> {
        self.store
            .run(move |s| s.get_person(id))
            .await?
            .ok_or_else(|| RegistryError::not_found("Person", id))
    }

    async fn list(&self) -> RegistryResult<Vec<Person>> {
        self.store.run(|s| s.list_persons()).await
    }

    async fn create(&self, person: &NewPerson) -> RegistryResult<Person> {
        let person = person.clone();
        self.store.run(move |s| s.insert_person(&person)).await
    }

    async fn update(&self, person: &Person) -> RegistryResult<Person> {
        let person = person.clone();
        let id = person.id;

        let (updated, person) = self
            .store
            .run(move |s| s.update_person(&person).map(|changed| (changed, person)))
            .await?;

        if !updated {
            return Err(RegistryError::not_found("Person", id));
        }
        Ok(person)
    }

    async fn delete(&self, id: i64) -> RegistryResult<()> {
        if !self.store.run(move |s| s.delete_person(id)).await? {
            return Err(RegistryError::not_found("Person", id));
        }
        Ok(())
    }
}
