//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and mirror calls into use-case level APIs.
//! - Map layer errors to a single boundary error with an HTTP-style
//!   status, so a transport adapter stays free of design content.
//!
//! # Invariants
//! - Mirror failures are data, never errors (see [`crate::mirror`]).

use crate::model::requirement::{RequirementId, RequirementValidationError};
use crate::repo::requirement_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod requirement_service;
pub mod submission_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Boundary error for all service workflows.
#[derive(Debug)]
pub enum ServiceError {
    /// Malformed or incomplete input; client error.
    Validation(RequirementValidationError),
    /// Referenced id does not exist; client error.
    NotFound(RequirementId),
    /// Underlying persistence failure; server error.
    Storage(RepoError),
}

impl ServiceError {
    /// HTTP-style status code for a thin transport adapter.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::NotFound(_) => 404,
            Self::Storage(_) => 500,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "requirement not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<RequirementValidationError> for ServiceError {
    fn from(value: RequirementValidationError) -> Self {
        Self::Validation(value)
    }
}
