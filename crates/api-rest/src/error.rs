//! HTTP error mapping.
//!
//! Every handler failure is turned into one of three responses: `422` with
//! per-field detail, `404` with a message, or an opaque `500`.

use api_shared::{ErrorRes, LocItem, ValidationErrorItem, ValidationErrorRes};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use patients_core::PatientError;

/// Message returned when a patient id does not exist.
pub const NOT_FOUND_DETAIL: &str = "Paciente no encontrado";

const INTERNAL_DETAIL: &str = "Internal server error";

#[derive(Debug)]
pub enum ApiError {
    /// Request content failed validation (`422`)
    Validation(Vec<ValidationErrorItem>),
    /// No patient with the requested id (`404`)
    NotFound,
    /// A request axum refused before it reached validation, with its own status
    Rejected(StatusCode, String),
    /// Storage or runtime failure (`500`); details are only logged
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Rejected(status, _) => *status,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Validation failure of request body fields, located under `body`.
    pub fn invalid_body(items: Vec<ValidationErrorItem>) -> Self {
        ApiError::Validation(
            items
                .into_iter()
                .map(|mut item| {
                    item.loc.insert(0, LocItem::from("body"));
                    item
                })
                .collect(),
        )
    }
}

impl From<PatientError> for ApiError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::Validation(errors) => ApiError::invalid_body(errors.into_items()),
            other => {
                tracing::error!("Patient storage error: {:?}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ApiError::Validation(vec![
                ValidationErrorItem::new(vec!["body".into()], err.body_text(), "model_type"),
            ]),
            JsonRejection::JsonSyntaxError(err) => ApiError::Validation(vec![
                ValidationErrorItem::new(vec!["body".into()], err.body_text(), "json_invalid"),
            ]),
            other => ApiError::Rejected(other.status(), other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(vec![ValidationErrorItem::new(
            vec!["path".into(), "patient_id".into()],
            rejection.body_text(),
            "int_parsing",
        )])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(vec![ValidationErrorItem::new(
            vec!["query".into()],
            rejection.body_text(),
            "query_invalid",
        )])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(detail) => {
                (status, Json(ValidationErrorRes { detail })).into_response()
            }
            ApiError::NotFound => (
                status,
                Json(ErrorRes {
                    detail: NOT_FOUND_DETAIL.into(),
                }),
            )
                .into_response(),
            ApiError::Rejected(_, detail) => (status, Json(ErrorRes { detail })).into_response(),
            ApiError::Internal => (
                status,
                Json(ErrorRes {
                    detail: INTERNAL_DETAIL.into(),
                }),
            )
                .into_response(),
        }
    }
}
