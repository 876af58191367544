//! Submission workflow: validate, persist, mirror.
//!
//! # Responsibility
//! - Run the linear submission pipeline and shape the composite receipt.
//!
//! # Invariants
//! - The mirror is only reached after a successful store insert; a failed
//!   insert never produces an orphan spreadsheet row.
//! - A mirror failure never fails the submission; the receipt reports it
//!   as data.

use crate::mirror::workbook::ExcelMirror;
use crate::mirror::MirrorOutcome;
use crate::model::requirement::{Requirement, RequirementDraft};
use crate::repo::requirement_repo::RequirementRepository;
use crate::service::{ServiceError, ServiceResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Composite result of one submission: the persisted record plus the
/// mirror outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub requirement: Requirement,
    pub excel_processing: MirrorOutcome,
}

/// Use-case service for the submission workflow.
pub struct SubmissionService<R: RequirementRepository> {
    repo: R,
    mirror: ExcelMirror,
}

impl<R: RequirementRepository> SubmissionService<R> {
    /// Creates a service from an injected repository and mirror.
    pub fn new(repo: R, mirror: ExcelMirror) -> Self {
        Self { repo, mirror }
    }

    /// Runs the submission pipeline.
    ///
    /// # Contract
    /// - Validates the draft against the required-field schema.
    /// - Inserts into the store; on failure the submission fails and the
    ///   mirror is never touched.
    /// - Appends the submitted field values to the mirror; the outcome is
    ///   captured in the receipt and does not affect success.
    pub fn submit(&self, draft: &RequirementDraft) -> ServiceResult<SubmissionReceipt> {
        draft.validate().map_err(ServiceError::Validation)?;

        let requirement = self.repo.insert(draft)?;

        let mut fields = BTreeMap::new();
        for (field, value) in draft.named_fields() {
            fields.insert(field.to_string(), value.to_string());
        }
        let excel_processing = self.mirror.append(&fields);

        info!(
            "event=submission module=service status=ok id={} mirror_status={:?}",
            requirement.id, excel_processing.status
        );

        Ok(SubmissionReceipt {
            requirement,
            excel_processing,
        })
    }
}
