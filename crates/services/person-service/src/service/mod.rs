//! Service layer for person operations.

mod person_service;

pub use person_service::{PersonManager, PersonService};
