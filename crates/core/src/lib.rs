//! # Patients Core
//!
//! Core business logic for the patients registry.
//!
//! This crate contains pure data operations:
//! - Validation of new patient records
//! - The symptom codec between structured lists and the stored text column
//! - SQLite storage of the single `patients` table
//!
//! **No API concerns**: HTTP servers, routing and response codes belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod patient;
pub mod repositories;
pub mod symptoms;
pub mod validation;

pub use config::CoreConfig;
pub use constants::DEFAULT_DATABASE_PATH;
pub use error::{PatientError, PatientResult};
pub use patient::PatientService;
pub use validation::{NewPatient, ValidationErrors};
