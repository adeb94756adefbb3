//! Data models for registry records.
//!
//! A `Person` owns at most one `Contact` and at most one `Personnel` record.

pub mod contact;
pub mod person;
pub mod personnel;

pub use contact::{Contact, ContactChanges, NewContact};
pub use person::{parse_membership_date, NewPerson, Person};
pub use personnel::{NewPersonnel, Personnel, PersonnelChanges};
