//! # API Shared
//!
//! Shared definitions for the patients API and tools.
//!
//! Contains:
//! - Wire types (`dto` module) with serde and OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `patients-core`, `api-rest` and the CLI for common functionality.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
