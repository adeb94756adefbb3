//! Personnel service layer.
//!
//! Heights arrive as bare magnitudes and are normalized to meters before
//! anything is stored.

use crate::domain::convert_to_meters;
use crate::error::{RegistryError, RegistryResult};
use crate::models::{NewPersonnel, Person, Personnel, PersonnelChanges};
use crate::repositories::{PersonRepository, PersonnelRepository};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Message returned when a person already owns personnel details.
pub const PERSONNEL_EXISTS_MESSAGE: &str =
    "This person already has personnel details. Edit them instead.";

/// Personnel details together with their owner.
#[derive(Debug, Clone, Serialize)]
pub struct PersonnelDetails {
    pub personnel: Personnel,
    pub person: Person,
}

/// Personnel service trait for business operations.
#[async_trait]
pub trait PersonnelService: Send + Sync {
    /// Get personnel details and the person they belong to.
    async fn get_personnel(&self, id: i64) -> RegistryResult<PersonnelDetails>;

    /// Create the personnel details of a person.
    ///
    /// The height is converted to meters first; an uninterpretable height
    /// fails with `InvalidMagnitude` and nothing is stored.
    async fn create_personnel(
        &self,
        person_id: i64,
        personnel: NewPersonnel,
    ) -> RegistryResult<Personnel>;

    /// Apply changes to existing personnel details.
    async fn update_personnel(
        &self,
        id: i64,
        changes: PersonnelChanges,
    ) -> RegistryResult<Personnel>;
}

/// Default implementation of PersonnelService.
pub struct PersonnelServiceImpl {
    persons: Arc<dyn PersonRepository>,
    personnel: Arc<dyn PersonnelRepository>,
}

impl PersonnelServiceImpl {
    /// Create a new personnel service.
    pub fn new(
        persons: Arc<dyn PersonRepository>,
        personnel: Arc<dyn PersonnelRepository>,
    ) -> Self {
        Self { persons, personnel }
    }

    fn normalize_height(height: f64) -> RegistryResult<f64> {
        let meters = convert_to_meters(height).map_err(|e| {
            warn!(height, "Rejected height magnitude");
            RegistryError::from(e)
        })?;
        debug!(height, meters, "Normalized height");
        Ok(meters)
    }
}

#[async_trait]
impl PersonnelService for PersonnelServiceImpl {
    async fn get_personnel(&self, id: i64) -> RegistryResult<PersonnelDetails> {
        let personnel = self.personnel.get(id).await?;
        let person = self.persons.get(personnel.person_id).await?;
        Ok(PersonnelDetails { personnel, person })
    }

    async fn create_personnel(
        &self,
        person_id: i64,
        personnel: NewPersonnel,
    ) -> RegistryResult<Personnel> {
        self.persons.get(person_id).await?;

        if self.personnel.find_by_person(person_id).await?.is_some() {
            warn!(person_id, "Rejected second personnel record for person");
            return Err(RegistryError::AlreadyExists(
                PERSONNEL_EXISTS_MESSAGE.to_string(),
            ));
        }

        let record = Personnel {
            id: 0,
            person_id,
            age: personnel.age,
            height_m: Self::normalize_height(personnel.height)?,
            weight_kg: personnel.weight_kg,
        };
        record.validate()?;

        let created = self.personnel.create(&record).await?;
        info!(personnel_id = created.id, person_id, "Created personnel");
        Ok(created)
    }

    async fn update_personnel(
        &self,
        id: i64,
        changes: PersonnelChanges,
    ) -> RegistryResult<Personnel> {
        let mut record = self.personnel.get(id).await?;

        if let Some(age) = changes.age {
            record.age = age;
        }
        if let Some(height) = changes.height {
            record.height_m = Self::normalize_height(height)?;
        }
        if let Some(weight_kg) = changes.weight_kg {
            record.weight_kg = weight_kg;
        }
        record.validate()?;

        let updated = self.personnel.update(&record).await?;
        info!(personnel_id = id, "Updated personnel");
        Ok(updated)
    }
}
