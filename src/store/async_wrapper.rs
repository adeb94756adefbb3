//! Async wrapper around the synchronous SqliteStore.
//!
//! Every operation is moved onto `tokio::task::spawn_blocking`, so SQLite I/O
//! never blocks the async runtime. The connection is shared behind a mutex and
//! used by one blocking task at a time.

use super::SqliteStore;
use crate::error::{RegistryError, RegistryResult, StoreError, StoreResult};
use std::sync::{Arc, Mutex};

/// Cloneable async handle to a [`SqliteStore`].
#[derive(Clone)]
pub struct AsyncSqliteStore {
    store: Arc<Mutex<SqliteStore>>,
}

impl AsyncSqliteStore {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `op` against the store on the blocking thread pool.
    pub async fn run<T, F>(&self, op: F) -> RegistryResult<T>
    where
        F: FnOnce(&SqliteStore) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();

        tokio::task::spawn_blocking(move || {
            let guard = store.lock().map_err(|_| StoreError::LockPoisoned)?;
            op(&guard)
        })
        .await
        .map_err(|e| RegistryError::Task(format!("Task join error: {}", e)))?
        .map_err(RegistryError::from)
    }
}
