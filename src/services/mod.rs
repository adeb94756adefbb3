//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories and the core validators. They provide a clean boundary between
//! the MCP handlers and the data access layer.

mod contact_service;
mod person_service;
mod personnel_service;

pub use contact_service::{
    ContactDetails, ContactService, ContactServiceImpl, CONTACT_EXISTS_MESSAGE,
};
pub use person_service::{FindPersonResponse, PersonDetails, PersonService, PersonServiceImpl};
pub use personnel_service::{
    PersonnelDetails, PersonnelService, PersonnelServiceImpl, PERSONNEL_EXISTS_MESSAGE,
};
