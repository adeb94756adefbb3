//! Domain value objects and validators.
//!
//! This module holds the two pure routines the rest of the registry builds on:
//! per-country phone number validation and unit-ambiguous height normalization.
//! Neither touches storage or shared state, so both are safe to call from any
//! number of tasks at once.

pub mod country;
pub mod errors;
pub mod phone;
pub mod size;

pub use country::CountryCode;
pub use errors::ValidationError;
pub use phone::{check_phone_number, is_valid_phone_number, PhoneCheck, PhoneNumber};
pub use size::{classify_magnitude, convert_to_meters, MagnitudeReason, MagnitudeUnit, SizeError};
