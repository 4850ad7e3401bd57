//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! - **[`server`]**: router assembly with OpenAPI UIs, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security header layers
//! - **[`errors`]**: [`AppError`] and the JSON error envelope
//! - **[`extractors`]**: [`UuidPath`], [`ValidatedJson`], [`PageQuery`]
//! - **[`audit`]**: audit records for mutations

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{PageQuery, SortOrder, UuidPath, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, client_ip};
