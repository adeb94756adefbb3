use async_trait::async_trait;
use registry_mcp_server::error::{RegistryError, RegistryResult};
use registry_mcp_server::models::Personnel;
use registry_mcp_server::repositories::PersonnelRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock personnel repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockPersonnelRepository {
    records: Arc<Mutex<HashMap<i64, Personnel>>>,
    next_id: Arc<Mutex<i64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockPersonnelRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a personnel record to the mock repository, keeping its ID.
    pub fn add_personnel(&self, personnel: Personnel) {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id = (*next_id).max(personnel.id + 1);
        self.records.lock().unwrap().insert(personnel.id, personnel);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockPersonnelRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonnelRepository for MockPersonnelRepository {
    async fn get(&self, id: i64) -> RegistryResult<Personnel> {
        self.track_call("get");

        let records = self.records.lock().unwrap();
        records
            .get(&id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found("Personnel", id))
    }

    async fn find_by_person(&self, person_id: i64) -> RegistryResult<Option<Personnel>> {
        self.track_call("find_by_person");

        let records = self.records.lock().unwrap();
        Ok(records
            .values()
            .find(|p| p.person_id == person_id)
            .cloned())
    }

    async fn create(&self, personnel: &Personnel) -> RegistryResult<Personnel> {
        self.track_call("create");

        let mut next_id = self.next_id.lock().unwrap();
        let created = Personnel {
            id: *next_id,
            ..personnel.clone()
        };
        *next_id += 1;

        self.records
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, personnel: &Personnel) -> RegistryResult<Personnel> {
        self.track_call("update");

        let mut records = self.records.lock().unwrap();
        match records.get_mut(&personnel.id) {
            Some(stored) => {
                *stored = personnel.clone();
                Ok(personnel.clone())
            }
            None => Err(RegistryError::not_found("Personnel", personnel.id)),
        }
    }
}
