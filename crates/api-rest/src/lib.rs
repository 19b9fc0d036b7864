//! # API REST
//!
//! REST API implementation for the patients registry.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (status codes, JSON error bodies, CORS, request tracing)
//!
//! Uses `patients-core` for all data operations and `api-shared` for wire types.

#![warn(rust_2018_idioms)]

pub mod body;
pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    CreatePatientReq, ErrorRes, HealthRes, LocItem, PatientRes, SymptomsInput,
    ValidationErrorItem, ValidationErrorRes,
};
use patients_core::PatientService;

pub use error::{ApiError, NOT_FOUND_DETAIL};

/// Application state shared across REST API handlers
///
/// Holds the `PatientService`, which carries only configuration; database
/// connections are opened per request.
#[derive(Clone)]
pub struct AppState {
    patient_service: PatientService,
}

impl AppState {
    pub fn new(patient_service: PatientService) -> Self {
        Self { patient_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Patients API",
        description = "REST API to register and query patients with symptoms",
        version = "1.0.0"
    ),
    paths(
        handlers::health,
        handlers::create_patient,
        handlers::list_patients,
        handlers::get_patient
    ),
    components(schemas(
        HealthRes,
        CreatePatientReq,
        SymptomsInput,
        PatientRes,
        ErrorRes,
        LocItem,
        ValidationErrorItem,
        ValidationErrorRes
    )),
    tags(
        (name = "health", description = "Service liveness"),
        (name = "patients", description = "Patient registration and lookup")
    )
)]
pub struct ApiDoc;

/// Builds the application router with all routes and middleware.
///
/// `/health` serves the same payload as `/` for load balancers that expect it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route(
            "/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route("/patients/:id", get(handlers::get_patient))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
