mod sqlite_contact_repository;
mod sqlite_person_repository;
mod sqlite_personnel_repository;
mod traits;

pub use sqlite_contact_repository::SqliteContactRepository;
pub use sqlite_person_repository::SqlitePersonRepository;
pub use sqlite_personnel_repository::SqlitePersonnelRepository;
pub use traits::{ContactRepository, PersonRepository, PersonnelRepository};
