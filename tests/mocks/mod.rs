//! In-memory repository mocks shared by the integration tests.

mod mock_contact_repository;
mod mock_person_repository;
mod mock_personnel_repository;

#[allow(unused_imports)]
pub use mock_contact_repository::MockContactRepository;
#[allow(unused_imports)]
pub use mock_person_repository::MockPersonRepository;
#[allow(unused_imports)]
pub use mock_personnel_repository::MockPersonnelRepository;
