use async_trait::async_trait;
use registry_mcp_server::error::{RegistryError, RegistryResult};
use registry_mcp_server::models::{NewPerson, Person};
use registry_mcp_server::repositories::PersonRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock person repository for testing.
///
/// Provides an in-memory implementation of PersonRepository that can be
/// easily configured with test data and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockPersonRepository {
    persons: Arc<Mutex<HashMap<i64, Person>>>,
    next_id: Arc<Mutex<i64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockPersonRepository {
    /// Create a new empty MockPersonRepository.
    pub fn new() -> Self {
        Self {
            persons: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a person to the mock repository, keeping its ID.
    pub fn add_person(&self, person: Person) {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id = (*next_id).max(person.id + 1);
        self.persons.lock().unwrap().insert(person.id, person);
    }

    /// Number of stored persons.
    pub fn len(&self) -> usize {
        self.persons.lock().unwrap().len()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockPersonRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonRepository for MockPersonRepository {
    async fn get(&self, id: i64) -> RegistryResult<Person> {
        self.track_call("get");

        let persons = self.persons.lock().unwrap();
        persons
            .get(&id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found("Person", id))
    }

    async fn list(&self) -> RegistryResult<Vec<Person>> {
        self.track_call("list");

        let persons = self.persons.lock().unwrap();
        let mut result: Vec<Person> = persons.values().cloned().collect();
        result.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(result)
    }

    async fn create(&self, person: &NewPerson) -> RegistryResult<Person> {
        self.track_call("create");

        let mut next_id = self.next_id.lock().unwrap();
        let created = Person {
            id: *next_id,
            last_name: person.last_name.clone(),
            first_name: person.first_name.clone(),
            membership_date: person.membership_date,
        };
        *next_id += 1;

        self.persons
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, person: &Person) -> RegistryResult<Person> {
        self.track_call("update");

        let mut persons = self.persons.lock().unwrap();
        match persons.get_mut(&person.id) {
            Some(stored) => {
                *stored = person.clone();
                Ok(person.clone())
            }
            None => Err(RegistryError::not_found("Person", person.id)),
        }
    }

    async fn delete(&self, id: i64) -> RegistryResult<()> {
        self.track_call("delete");

        let mut persons = self.persons.lock().unwrap();
        persons
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RegistryError::not_found("Person", id))
    }
}
