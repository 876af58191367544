//! Query/update/delete workflow over the record store.
//!
//! # Responsibility
//! - Provide read, filter, update and delete entry points for boundary
//!   callers.
//!
//! # Invariants
//! - Pure pass-through to the repository; no mirror interaction.
//! - Repository errors surface as [`ServiceError`] with an HTTP-style
//!   status mapping.

use crate::model::requirement::{Requirement, RequirementId, RequirementPatch};
use crate::repo::requirement_repo::{RequirementListQuery, RequirementRepository};
use crate::service::ServiceResult;

/// Use-case service for requirement reads and mutations.
pub struct RequirementService<R: RequirementRepository> {
    repo: R,
}

impl<R: RequirementRepository> RequirementService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one requirement by id.
    pub fn get(&self, id: RequirementId) -> ServiceResult<Requirement> {
        Ok(self.repo.get(id)?)
    }

    /// Lists requirements newest first, optionally filtered.
    pub fn list(&self, query: &RequirementListQuery) -> ServiceResult<Vec<Requirement>> {
        Ok(self.repo.list(query)?)
    }

    /// Applies a partial update and returns the new record state.
    pub fn update(
        &self,
        id: RequirementId,
        patch: &RequirementPatch,
    ) -> ServiceResult<Requirement> {
        Ok(self.repo.update(id, patch)?)
    }

    /// Deletes one requirement permanently. The mirror keeps any rows it
    /// already has.
    pub fn delete(&self, id: RequirementId) -> ServiceResult<()> {
        Ok(self.repo.delete(id)?)
    }
}
