//! Route handlers.
//!
//! Storage work runs on the blocking thread pool; each call opens and closes
//! its own connection inside [`PatientService`].

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};

use crate::body::decode_create_patient;
use crate::error::ApiError;
use crate::AppState;
use api_shared::{
    CreatePatientReq, ErrorRes, HealthRes, HealthService, ListPatientsQuery, PatientRes,
    ValidationErrorRes,
};
use patients_core::{PatientResult, PatientService};

async fn run_blocking<T, F>(service: &PatientService, op: F) -> Result<T, ApiError>
where
    F: FnOnce(PatientService) -> PatientResult<T> + Send + 'static,
    T: Send + 'static,
{
    let service = service.clone();
    tokio::task::spawn_blocking(move || op(service))
        .await
        .map_err(|e| {
            tracing::error!("Blocking task failed: {:?}", e);
            ApiError::Internal
        })?
        .map_err(ApiError::from)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns a static payload and never touches storage, so it stays cheap
/// for monitoring and load balancer checks.
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/patients",
    tag = "patients",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = PatientRes),
        (status = 422, description = "Validation error", body = ValidationErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Register a new patient
///
/// Validates the body, stores the symptoms in their joined text form and
/// returns the stored record with symptoms as a list.
///
/// # Errors
/// Returns `422 Unprocessable Entity` listing every missing, mistyped or
/// invalid field (nothing is stored), or `500 Internal Server Error` if the
/// insert fails.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientRes>), ApiError> {
    let Json(body) = payload?;
    let req = decode_create_patient(body).map_err(ApiError::invalid_body)?;
    let patient = run_blocking(&state.patient_service, move |svc| svc.create_patient(req)).await?;
    tracing::info!("Created patient {}", patient.id);
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    get,
    path = "/patients",
    tag = "patients",
    params(ListPatientsQuery),
    responses(
        (status = 200, description = "Patients, newest first", body = [PatientRes]),
        (status = 422, description = "Malformed query string", body = ValidationErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List patients
///
/// Returns every patient, newest first. With `name`, only patients whose name
/// contains it (case-insensitively) are returned. A repeated `name` uses its
/// last value. No pagination.
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<PatientRes>>, ApiError> {
    let Query(pairs) = pairs?;
    let query = ListPatientsQuery::from_pairs(pairs);
    let patients = run_blocking(&state.patient_service, move |svc| {
        svc.list_patients(query.name.as_deref())
    })
    .await?;
    Ok(Json(patients))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    tag = "patients",
    params(
        ("id" = i64, Path, description = "Patient id")
    ),
    responses(
        (status = 200, description = "Patient found", body = PatientRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 422, description = "Id is not an integer", body = ValidationErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Fetch one patient by id
///
/// # Errors
/// Returns `404 Not Found` when no patient has this id.
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PatientRes>, ApiError> {
    let Path(id) = id?;
    run_blocking(&state.patient_service, move |svc| svc.get_patient(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
