//! Patient service.
//!
//! This module provides the main service for patient operations. Each call
//! opens its own database connection and drops it before returning, whatever
//! the outcome.

use crate::config::CoreConfig;
use crate::db::{initialise_schema, open_connection};
use crate::error::{PatientError, PatientResult};
use crate::repositories::patients::{self, PatientRecord};
use crate::symptoms;
use crate::validation::validate_new_patient;
use api_shared::{CreatePatientReq, PatientRes};
use std::sync::Arc;

impl From<PatientRecord> for PatientRes {
    fn from(record: PatientRecord) -> Self {
        PatientRes {
            id: record.id,
            symptoms: symptoms::decode(&record.symptoms_text),
            name: record.name,
            age: record.age,
            created_at: record.created_at,
        }
    }
}

/// Pure patient data operations - no API concerns
#[derive(Clone, Debug)]
pub struct PatientService {
    cfg: Arc<CoreConfig>,
}

impl PatientService {
    /// Creates a new instance of PatientService.
    ///
    /// # Returns
    /// A new `PatientService` instance ready to handle patient operations.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Creates the patients table if it does not exist yet.
    ///
    /// Intended to run once at process startup.
    pub fn initialise_database(&self) -> PatientResult<()> {
        let conn = open_connection(&self.cfg)?;
        initialise_schema(&conn)?;
        tracing::info!("database ready at {}", self.cfg.database_path().display());
        Ok(())
    }

    /// Validates and stores a new patient.
    ///
    /// # Returns
    ///
    /// The stored record with its assigned `id` and `created_at`, symptoms
    /// decoded from their stored form.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::Validation` without touching storage if the
    /// request violates any field constraint, or a storage error if the
    /// insert fails.
    pub fn create_patient(&self, req: CreatePatientReq) -> PatientResult<PatientRes> {
        let new_patient = validate_new_patient(req).map_err(PatientError::Validation)?;
        let symptoms_text = symptoms::encode_input(new_patient.symptoms);

        let conn = open_connection(&self.cfg)?;
        let record = patients::insert_patient(
            &conn,
            new_patient.name.as_str(),
            i64::from(new_patient.age.years()),
            &symptoms_text,
        )?;
        tracing::debug!("created patient {}", record.id);

        Ok(record.into())
    }

    /// Fetches a single patient, or `None` if no record has this id.
    pub fn get_patient(&self, id: i64) -> PatientResult<Option<PatientRes>> {
        let conn = open_connection(&self.cfg)?;
        Ok(patients::get_patient(&conn, id)?.map(PatientRes::from))
    }

    /// Lists patients newest first, optionally filtered by a name substring.
    pub fn list_patients(&self, name_filter: Option<&str>) -> PatientResult<Vec<PatientRes>> {
        let conn = open_connection(&self.cfg)?;
        let records = patients::list_patients(&conn, name_filter)?;
        Ok(records.into_iter().map(PatientRes::from).collect())
    }

    pub fn count_patients(&self) -> PatientResult<i64> {
        let conn = open_connection(&self.cfg)?;
        patients::count_patients(&conn)
    }
}
