use crate::dto::HealthRes;

/// Simple health service shared by the REST API and the CLI
///
/// This service provides a standardised way to check the health status of the
/// patients service. It never touches storage.
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is up.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "ok".into(),
            message: "Patients API up".into(),
        }
    }
}
