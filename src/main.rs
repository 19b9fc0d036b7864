use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use patients_core::{CoreConfig, PatientService, config::database_path_from_env_value};

/// Main entry point for the patients REST service
///
/// Resolves configuration once, creates the `patients` table if it is
/// missing, then serves the REST API until the process is stopped.
///
/// # Environment Variables
/// - `PATIENTS_REST_ADDR`: Server address (default: "0.0.0.0:8000")
/// - `PATIENTS_DATABASE_PATH`: SQLite database file (default: "patients.db")
/// - `RUST_LOG`: Log filter directives
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the database cannot be opened or its schema created,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patients=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("PATIENTS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let database_path = database_path_from_env_value(std::env::var("PATIENTS_DATABASE_PATH").ok());

    let cfg = Arc::new(CoreConfig::new(database_path)?);
    let patient_service = PatientService::new(cfg);
    patient_service.initialise_database()?;

    let app = router(AppState::new(patient_service));

    tracing::info!("++ Starting Patients REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
