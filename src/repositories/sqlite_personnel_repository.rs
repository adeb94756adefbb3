use crate::error::{RegistryError, RegistryResult};
use crate::models::Personnel;
use crate::repositories::traits::PersonnelRepository;
use crate::store::AsyncSqliteStore;
use async_trait::async_trait;

/// Personnel repository implementation backed by SQLite.
pub struct SqlitePersonnelRepository {
    store: AsyncSqliteStore,
}

impl SqlitePersonnelRepository {
    /// Create a new SqlitePersonnelRepository over the given store.
    pub fn new(store: AsyncSqliteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PersonnelRepository for SqlitePersonnelRepository {
    async fn get(&self, id: i64) -> RegistryResult<Personnel> {
        self.store
            .run(move |s| s.get_personnel(id))
            .await?
            .ok_or_else(|| RegistryError::not_found("Personnel", id))
    }

    async fn find_by_person(&self, person_id: i64) -> RegistryResult<Option<Personnel>> {
        self.store
            .run(move |s| s.find_personnel_by_person(person_id))
            .await
    }

    async fn create(&self, personnel: &Personnel) -> RegistryResult<Personnel> {
        let personnel = personnel.clone();
        self.store.run(move |s| s.insert_personnel(&personnel)).await
    }

    async fn update(&self, personnel: &Personnel) -> RegistryResult<Personnel> {
        let personnel = personnel.clone();
        let id = personnel.id;

        let (updated, personnel) = self
            .store
            .run(move |s| {
                s.update_personnel(&personnel)
                    .map(|changed| (changed, personnel))
            })
            .await?;

        if !updated {
            return Err(RegistryError::not_found("Personnel", id));
        }
        Ok(personnel)
    }
}
