//! Request and response bodies exchanged over the patients API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Health check payload returned by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub message: String,
}

/// Symptoms as sent by a client: either one free-text string or a list.
///
/// A single string is stored as-is (trimmed); it is not split on commas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SymptomsInput {
    One(String),
    Many(Vec<String>),
}

impl SymptomsInput {
    /// Flattens the input into a list of symptom strings.
    ///
    /// A single string becomes a one-element list; list elements are passed
    /// through untouched. Trimming happens later, in the codec.
    pub fn into_list(self) -> Vec<String> {
        match self {
            SymptomsInput::One(symptom) => vec![symptom],
            SymptomsInput::Many(symptoms) => symptoms,
        }
    }
}

/// Body of `POST /patients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    #[schema(example = "Juan Pérez")]
    pub name: String,
    #[schema(example = 28)]
    pub age: i64,
    pub symptoms: SymptomsInput,
}

/// A stored patient record as returned by every patient endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub symptoms: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Query string of `GET /patients`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPatientsQuery {
    /// Case-insensitive substring of the patient name
    pub name: Option<String>,
}

impl ListPatientsQuery {
    /// Builds the query from raw key/value pairs. A repeated `name` keeps its
    /// last value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let name = pairs
            .into_iter()
            .filter(|(key, _)| key == "name")
            .map(|(_, value)| value)
            .last();
        Self { name }
    }
}

/// One segment of the location of an invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum LocItem {
    Key(String),
    Index(usize),
}

impl From<&str> for LocItem {
    fn from(key: &str) -> Self {
        LocItem::Key(key.to_string())
    }
}

impl From<usize> for LocItem {
    fn from(index: usize) -> Self {
        LocItem::Index(index)
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorItem {
    pub loc: Vec<LocItem>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationErrorItem {
    pub fn new(loc: Vec<LocItem>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

/// Body of a `422` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorRes {
    pub detail: Vec<ValidationErrorItem>,
}

/// Body of `404` and `500` responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptoms_accepts_string_or_list() {
        let one: CreatePatientReq =
            serde_json::from_str(r#"{"name":"Ana","age":3,"symptoms":"fiebre, tos"}"#).unwrap();
        assert_eq!(one.symptoms, SymptomsInput::One("fiebre, tos".into()));

        let many: CreatePatientReq =
            serde_json::from_str(r#"{"name":"Ana","age":3,"symptoms":["fiebre","tos"]}"#)
                .unwrap();
        assert_eq!(
            many.symptoms,
            SymptomsInput::Many(vec!["fiebre".into(), "tos".into()])
        );
    }

    #[test]
    fn test_symptoms_rejects_other_json_types() {
        assert!(serde_json::from_str::<CreatePatientReq>(
            r#"{"name":"Ana","age":3,"symptoms":5}"#
        )
        .is_err());
        assert!(serde_json::from_str::<CreatePatientReq>(
            r#"{"name":"Ana","age":3,"symptoms":[1, 2]}"#
        )
        .is_err());
    }

    #[test]
    fn test_into_list_does_not_split_single_string() {
        assert_eq!(
            SymptomsInput::One("fiebre, tos".into()).into_list(),
            vec!["fiebre, tos".to_string()]
        );
    }

    #[test]
    fn test_list_query_keeps_last_name() {
        let pairs = vec![
            ("name".to_string(), "a".to_string()),
            ("page".to_string(), "2".to_string()),
            ("name".to_string(), "b".to_string()),
        ];
        assert_eq!(ListPatientsQuery::from_pairs(pairs).name.as_deref(), Some("b"));
        assert_eq!(ListPatientsQuery::from_pairs(Vec::new()).name, None);
    }

    #[test]
    fn test_validation_error_item_serialises_type_and_mixed_loc() {
        let item = ValidationErrorItem::new(
            vec!["body".into(), "symptoms".into(), 1.into()],
            "String should have at least 1 character",
            "string_too_short",
        );
        assert_eq!(
            serde_json::to_value(item).unwrap(),
            serde_json::json!({
                "loc": ["body", "symptoms", 1],
                "msg": "String should have at least 1 character",
                "type": "string_too_short"
            })
        );
    }
}
