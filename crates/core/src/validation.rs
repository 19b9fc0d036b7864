//! Input validation for new patient records.
//!
//! This module checks a [`CreatePatientReq`] against the record constraints
//! before anything reaches storage. Every violation is collected, so callers
//! can report all offending fields at once.
//!
//! Error locations are relative to the request body (`["name"]`,
//! `["symptoms", 2]`); transport layers prefix them as needed.

use api_shared::{CreatePatientReq, LocItem, SymptomsInput, ValidationErrorItem};
use patients_types::{Age, AgeError, PatientName, TextError};

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: PatientName,
    pub age: Age,
    pub symptoms: SymptomsInput,
}

/// One or more field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationErrorItem>);

impl ValidationErrors {
    pub fn items(&self) -> &[ValidationErrorItem] {
        &self.0
    }

    pub fn into_items(self) -> Vec<ValidationErrorItem> {
        self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|item| format!("{}: {}", format_loc(&item.loc), item.msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Renders a location as a dotted path, e.g. `symptoms.1`.
pub fn format_loc(loc: &[LocItem]) -> String {
    loc.iter()
        .map(|segment| match segment {
            LocItem::Key(key) => key.clone(),
            LocItem::Index(index) => index.to_string(),
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Checks a name on its own, with the same rules as [`validate_new_patient`].
pub fn check_name(name: &str) -> Option<ValidationErrorItem> {
    PatientName::new(name).err().map(name_error)
}

/// Checks an age on its own, with the same rules as [`validate_new_patient`].
pub fn check_age(age: i64) -> Option<ValidationErrorItem> {
    Age::new(age).err().map(age_error)
}

/// Checks symptoms on their own, with the same rules as [`validate_new_patient`].
pub fn check_symptoms(symptoms: &SymptomsInput) -> Vec<ValidationErrorItem> {
    let mut errors = Vec::new();
    match symptoms {
        SymptomsInput::One(symptom) => {
            if symptom.is_empty() {
                errors.push(ValidationErrorItem::new(
                    vec!["symptoms".into()],
                    TextError::Empty.to_string(),
                    "string_too_short",
                ));
            }
        }
        SymptomsInput::Many(list) => {
            if list.is_empty() {
                errors.push(ValidationErrorItem::new(
                    vec!["symptoms".into()],
                    "List should have at least 1 item after validation, not 0",
                    "too_short",
                ));
            }
            for (index, symptom) in list.iter().enumerate() {
                if symptom.is_empty() {
                    errors.push(ValidationErrorItem::new(
                        vec!["symptoms".into(), index.into()],
                        TextError::Empty.to_string(),
                        "string_too_short",
                    ));
                }
            }
        }
    }
    errors
}

/// Validates a create request.
///
/// # Errors
///
/// Returns every violated constraint:
/// - `name` must have 1 to 120 characters,
/// - `age` must be within 0 to 130,
/// - `symptoms` must be a non-empty string or a non-empty list of non-empty strings.
pub fn validate_new_patient(req: CreatePatientReq) -> Result<NewPatient, ValidationErrors> {
    let mut errors = Vec::new();

    let name = match PatientName::new(req.name) {
        Ok(name) => Some(name),
        Err(e) => {
            errors.push(name_error(e));
            None
        }
    };

    let age = match Age::new(req.age) {
        Ok(age) => Some(age),
        Err(e) => {
            errors.push(age_error(e));
            None
        }
    };

    errors.extend(check_symptoms(&req.symptoms));

    match (name, age) {
        (Some(name), Some(age)) if errors.is_empty() => Ok(NewPatient {
            name,
            age,
            symptoms: req.symptoms,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

fn name_error(err: TextError) -> ValidationErrorItem {
    let kind = match err {
        TextError::Empty => "string_too_short",
        TextError::TooLong { .. } => "string_too_long",
    };
    ValidationErrorItem::new(vec!["name".into()], err.to_string(), kind)
}

fn age_error(err: AgeError) -> ValidationErrorItem {
    let kind = match err {
        AgeError::Negative => "greater_than_equal",
        AgeError::TooHigh { .. } => "less_than_equal",
    };
    ValidationErrorItem::new(vec!["age".into()], err.to_string(), kind)
}
