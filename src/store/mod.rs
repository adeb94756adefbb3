//! SQLite storage for registry records.
//!
//! `SqliteStore` is synchronous and owns a single connection. Async code goes
//! through [`AsyncSqliteStore`], which runs each operation on the blocking
//! thread pool.
//!
//! # Examples
//!
//! ```no_run
//! use registry_mcp_server::store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! assert!(store.list_persons().unwrap().is_empty());
//! ```

mod async_wrapper;

pub use async_wrapper::AsyncSqliteStore;

use crate::domain::CountryCode;
use crate::error::{StoreError, StoreResult};
use crate::models::person::DATE_FORMAT;
use crate::models::{Contact, NewPerson, Person, Personnel};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const PERSON_COLUMNS: &str = "id, last_name, first_name, membership_date";
const CONTACT_COLUMNS: &str = "id, person_id, address, city, country, phone_number";
const PERSONNEL_COLUMNS: &str = "id, person_id, age, height_m, weight_kg";

/// SQLite-backed store for persons, contacts and personnel.
///
/// Foreign keys are enabled, so deleting a person cascades to its contact and
/// personnel rows. `person_id` is unique in both child tables.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply the schema.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> StoreResult<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    // ==================== Persons ====================

    /// All persons, ordered by last name then first name.
    pub fn list_persons(&self) -> StoreResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM person ORDER BY last_name ASC, first_name ASC, id ASC",
            PERSON_COLUMNS
        ))?;
        let persons = stmt
            .query_map([], person_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(persons)
    }

    pub fn get_person(&self, id: i64) -> StoreResult<Option<Person>> {
        let person = self
            .conn
            .query_row(
                &format!("SELECT {} FROM person WHERE id = ?1", PERSON_COLUMNS),
                params![id],
                person_from_row,
            )
            .optional()?;
        Ok(person)
    }

    pub fn insert_person(&self, person: &NewPerson) -> StoreResult<Person> {
        self.conn.execute(
            "INSERT INTO person (last_name, first_name, membership_date) VALUES (?1, ?2, ?3)",
            params![
                &person.last_name,
                &person.first_name,
                person.membership_date.map(format_date),
            ],
        )?;

        Ok(Person {
            id: self.conn.last_insert_rowid(),
            last_name: person.last_name.clone(),
            first_name: person.first_name.clone(),
            membership_date: person.membership_date,
        })
    }

    /// Returns `false` if no row has the person's ID.
    pub fn update_person(&self, person: &Person) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "UPDATE person SET last_name = ?1, first_name = ?2, membership_date = ?3 WHERE id = ?4",
            params![
                &person.last_name,
                &person.first_name,
                person.membership_date.map(format_date),
                person.id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a person and, by cascade, its contact and personnel.
    pub fn delete_person(&self, id: i64) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM person WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    // ==================== Contacts ====================

    pub fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM contact ORDER BY id ASC",
            CONTACT_COLUMNS
        ))?;
        let contacts = stmt
            .query_map([], contact_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    pub fn get_contact(&self, id: i64) -> StoreResult<Option<Contact>> {
        self.query_contact("id", id)
    }

    pub fn find_contact_by_person(&self, person_id: i64) -> StoreResult<Option<Contact>> {
        self.query_contact("person_id", person_id)
    }

    fn query_contact(&self, key: &str, value: i64) -> StoreResult<Option<Contact>> {
        let contact = self
            .conn
            .query_row(
                &format!("SELECT {} FROM contact WHERE {} = ?1", CONTACT_COLUMNS, key),
                params![value],
                contact_from_row,
            )
            .optional()?;
        Ok(contact)
    }

    /// Insert a contact, ignoring `contact.id`, and return it with its new ID.
    pub fn insert_contact(&self, contact: &Contact) -> StoreResult<Contact> {
        self.conn.execute(
            "INSERT INTO contact (person_id, address, city, country, phone_number)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                contact.person_id,
                &contact.address,
                &contact.city,
                contact.country.as_str(),
                &contact.phone_number,
            ],
        )?;

        Ok(Contact {
            id: self.conn.last_insert_rowid(),
            ..contact.clone()
        })
    }

    pub fn update_contact(&self, contact: &Contact) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "UPDATE contact SET address = ?1, city = ?2, country = ?3, phone_number = ?4
             WHERE id = ?5",
            params![
                &contact.address,
                &contact.city,
                contact.country.as_str(),
                &contact.phone_number,
                contact.id,
            ],
        )?;
        Ok(changed > 0)
    }

    // ==================== Personnel ====================

    pub fn get_personnel(&self, id: i64) -> StoreResult<Option<Personnel>> {
        self.query_personnel("id", id)
    }

    pub fn find_personnel_by_person(&self, person_id: i64) -> StoreResult<Option<Personnel>> {
        self.query_personnel("person_id", person_id)
    }

    fn query_personnel(&self, key: &str, value: i64) -> StoreResult<Option<Personnel>> {
        let personnel = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM personnel WHERE {} = ?1",
                    PERSONNEL_COLUMNS, key
                ),
                params![value],
                personnel_from_row,
            )
            .optional()?;
        Ok(personnel)
    }

    /// Insert personnel details, ignoring `personnel.id`, and return them with their new ID.
    pub fn insert_personnel(&self, personnel: &Personnel) -> StoreResult<Personnel> {
        self.conn.execute(
            "INSERT INTO personnel (person_id, age, height_m, weight_kg) VALUES (?1, ?2, ?3, ?4)",
            params![
                personnel.person_id,
                personnel.age,
                personnel.height_m,
                personnel.weight_kg,
            ],
        )?;

        Ok(Personnel {
            id: self.conn.last_insert_rowid(),
            ..personnel.clone()
        })
    }

    pub fn update_personnel(&self, personnel: &Personnel) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "UPDATE personnel SET age = ?1, height_m = ?2, weight_kg = ?3 WHERE id = ?4",
            params![
                personnel.age,
                personnel.height_m,
                personnel.weight_kg,
                personnel.id,
            ],
        )?;
        Ok(changed > 0)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn conversion_failure(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    let membership_date: Option<String> = row.get(3)?;
    let membership_date = membership_date
        .map(|raw| NaiveDate::parse_from_str(&raw, DATE_FORMAT))
        .transpose()
        .map_err(|e| conversion_failure(3, e))?;

    Ok(Person {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        membership_date,
    })
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    let country: String = row.get(4)?;
    let country = country
        .parse::<CountryCode>()
        .map_err(|e| conversion_failure(4, e))?;

    Ok(Contact {
        id: row.get(0)?,
        person_id: row.get(1)?,
        address: row.get(2)?,
        city: row.get(3)?,
        country,
        phone_number: row.get(5)?,
    })
}

fn personnel_from_row(row: &Row<'_>) -> rusqlite::Result<Personnel> {
    Ok(Personnel {
        id: row.get(0)?,
        person_id: row.get(1)?,
        age: row.get(2)?,
        height_m: row.get(3)?,
        weight_kg: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_person(last: &str, first: &str) -> (SqliteStore, Person) {
        let store = SqliteStore::new(":memory:").unwrap();
        let person = store
            .insert_person(&NewPerson {
                last_name: last.to_string(),
                first_name: first.to_string(),
                membership_date: None,
            })
            .unwrap();
        (store, person)
    }

    fn sample_contact(person_id: i64) -> Contact {
        Contact {
            id: 0,
            person_id,
            address: "1 High Street".to_string(),
            city: "London".to_string(),
            country: CountryCode::Uk,
            phone_number: "07123456789".to_string(),
        }
    }

    fn sample_personnel(person_id: i64) -> Personnel {
        Personnel {
            id: 0,
            person_id,
            age: 40,
            height_m: 1.8,
            weight_kg: 82.5,
        }
    }

    #[test]
    fn test_persons_sorted_by_name() {
        let (store, _) = store_with_person("Martin", "Luc");
        for (last, first) in [("Bernard", "Zoé"), ("Bernard", "Anne")] {
            store
                .insert_person(&NewPerson {
                    last_name: last.to_string(),
                    first_name: first.to_string(),
                    membership_date: None,
                })
                .unwrap();
        }

        let names: Vec<String> = store
            .list_persons()
            .unwrap()
            .iter()
            .map(Person::full_name)
            .collect();
        assert_eq!(names, vec!["Anne Bernard", "Zoé Bernard", "Luc Martin"]);
    }

    #[test]
    fn test_membership_date_round_trip() {
        let (store, mut person) = store_with_person("Martin", "Luc");
        person.membership_date = NaiveDate::from_ymd_opt(2022, 5, 17);
        assert!(store.update_person(&person).unwrap());

        let stored = store.get_person(person.id).unwrap().unwrap();
        assert_eq!(stored.membership_date, person.membership_date);
    }

    #[test]
    fn test_update_missing_person_reports_false() {
        let store = SqliteStore::new(":memory:").unwrap();
        assert!(!store.update_person(&Person::new(99, "Nobody", "Here")).unwrap());
    }

    #[test]
    fn test_contact_lookup_by_person() {
        let (store, person) = store_with_person("Smith", "Jane");
        let contact = store.insert_contact(&sample_contact(person.id)).unwrap();
        assert!(contact.id > 0);

        let found = store.find_contact_by_person(person.id).unwrap().unwrap();
        assert_eq!(found, contact);
        assert!(store.find_contact_by_person(person.id + 1).unwrap().is_none());
    }

    #[test]
    fn test_second_contact_violates_unique_person() {
        let (store, person) = store_with_person("Smith", "Jane");
        store.insert_contact(&sample_contact(person.id)).unwrap();
        let result = store.insert_contact(&sample_contact(person.id));
        assert!(matches!(result, Err(StoreError::Database(_))));
    }

    #[test]
    fn test_contact_requires_existing_person() {
        let store = SqliteStore::new(":memory:").unwrap();
        assert!(store.insert_contact(&sample_contact(12)).is_err());
    }

    #[test]
    fn test_personnel_round_trip() {
        let (store, person) = store_with_person("Smith", "Jane");
        let mut personnel = store.insert_personnel(&sample_personnel(person.id)).unwrap();

        personnel.weight_kg = 80.0;
        assert!(store.update_personnel(&personnel).unwrap());

        let stored = store.get_personnel(personnel.id).unwrap().unwrap();
        assert_eq!(stored, personnel);
    }

    #[test]
    fn test_delete_person_cascades() {
        let (store, person) = store_with_person("Smith", "Jane");
        let contact = store.insert_contact(&sample_contact(person.id)).unwrap();
        let personnel = store.insert_personnel(&sample_personnel(person.id)).unwrap();

        assert!(store.delete_person(person.id).unwrap());
        assert!(store.get_contact(contact.id).unwrap().is_none());
        assert!(store.get_personnel(personnel.id).unwrap().is_none());
    }
}
