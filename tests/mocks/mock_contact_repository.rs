use async_trait::async_trait;
use registry_mcp_server::error::{RegistryError, RegistryResult};
use registry_mcp_server::models::Contact;
use registry_mcp_server::repositories::ContactRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// In-memory ContactRepository that assigns IDs on create and tracks method
/// calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<HashMap<i64, Contact>>>,
    next_id: Arc<Mutex<i64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a contact to the mock repository, keeping its ID.
    pub fn add_contact(&self, contact: Contact) {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id = (*next_id).max(contact.id + 1);
        self.contacts.lock().unwrap().insert(contact.id, contact);
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn get(&self, id: i64) -> RegistryResult<Contact> {
        self.track_call("get");

        let contacts = self.contacts.lock().unwrap();
        contacts
            .get(&id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found("Contact", id))
    }

    async fn list(&self) -> RegistryResult<Vec<Contact>> {
        self.track_call("list");

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.values().cloned().collect())
    }

    async fn find_by_person(&self, person_id: i64) -> RegistryResult<Option<Contact>> {
        self.track_call("find_by_person");

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .values()
            .find(|c| c.person_id == person_id)
            .cloned())
    }

    async fn create(&self, contact: &Contact) -> RegistryResult<Contact> {
        self.track_call("create");

        let mut next_id = self.next_id.lock().unwrap();
        let created = Contact {
            id: *next_id,
            ..contact.clone()
        };
        *next_id += 1;

        self.contacts
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, contact: &Contact) -> RegistryResult<Contact> {
        self.track_call("update");

        let mut contacts = self.contacts.lock().unwrap();
        match contacts.get_mut(&contact.id) {
            Some(stored) => {
                *stored = contact.clone();
                Ok(contact.clone())
            }
            None => Err(RegistryError::not_found("Contact", contact.id)),
        }
    }
}
