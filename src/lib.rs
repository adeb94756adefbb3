//! Registry MCP Server - a Model Context Protocol server for a small people registry.
//!
//! The registry stores persons, their contact details and their personnel
//! attributes in SQLite. Each person owns at most one contact and at most one
//! personnel record.
//!
//! # Architecture
//!
//! - **domain**: Phone number validation (FR/UK) and height normalization to meters
//! - **models**: Person, contact and personnel records with field constraints
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **store**: SQLite persistence with an async wrapper
//! - **repositories**: Async data access traits and their SQLite implementations
//! - **services**: Business operations and one-per-person checks
//! - **matching**: Fuzzy person lookup by name and exact lookup by phone
//! - **server**: MCP protocol server

pub mod config;
pub mod domain;
pub mod error;
pub mod matching;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod store;

pub use config::Config;
pub use domain::{convert_to_meters, is_valid_phone_number, CountryCode, SizeError};
pub use error::{ConfigError, RegistryError, RegistryResult, StoreError};
pub use matching::{MatchResult, PersonMatcher};
pub use models::{Contact, Person, Personnel};
pub use server::RegistryMcpServer;
pub use store::{AsyncSqliteStore, SqliteStore};
