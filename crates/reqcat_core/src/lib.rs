//! Core domain logic for the requirements catalog.
//! This crate is the single source of truth for business invariants.

use serde::Serialize;

pub mod config;
pub mod db;
pub mod logging;
pub mod mirror;
pub mod model;
pub mod repo;
pub mod service;

pub use config::Config;
pub use logging::{default_log_level, init_logging, logging_status};
pub use mirror::workbook::ExcelMirror;
pub use mirror::{MirrorOutcome, MirrorStatus};
pub use model::requirement::{
    Requirement, RequirementDraft, RequirementId, RequirementPatch, RequirementValidationError,
};
pub use repo::requirement_repo::{
    RepoError, RepoResult, RequirementListQuery, RequirementRepository,
    SqliteRequirementRepository,
};
pub use service::requirement_service::RequirementService;
pub use service::submission_service::{SubmissionReceipt, SubmissionService};
pub use service::{ServiceError, ServiceResult};

/// Health payload served on the root endpoint by transport adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}

/// Returns the health-check payload.
pub fn health() -> HealthStatus {
    HealthStatus {
        status: "healthy",
        message: "Requirements Gathering API",
    }
}

/// Minimal liveness probe for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, health, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn health_reports_healthy() {
        let status = health();
        assert_eq!(status.status, "healthy");
        assert!(!status.message.is_empty());
    }
}
