//! Error types for the Registry MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::{SizeError, ValidationError};
use thiserror::Error;

/// Errors returned by repositories and services.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Record not found
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The one-per-person rule would be broken
    #[error("{0}")]
    AlreadyExists(String),

    /// One or more field constraints failed
    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Height magnitude could not be interpreted
    #[error(transparent)]
    InvalidMagnitude(#[from] SizeError),

    /// Storage layer failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Blocking task failed to complete
    #[error("Task error: {0}")]
    Task(String),
}

impl RegistryError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Messages intended for the end user, one per failed constraint.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.iter().map(|e| e.to_string()).collect(),
            other => vec![other.to_string()],
        }
    }
}

impl From<ValidationError> for RegistryError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(vec![err])
    }
}

impl From<Vec<ValidationError>> for RegistryError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by the SQLite store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored row could not be mapped back to a record
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The connection mutex was poisoned by a panicking holder
    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with RegistryError
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
