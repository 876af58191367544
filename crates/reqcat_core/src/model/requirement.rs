//! Requirement domain model.
//!
//! # Responsibility
//! - Define the persisted requirement record and the draft/patch input
//!   shapes used by the submission and update workflows.
//! - Validate required-field presence before any persistence attempt.
//!
//! # Invariants
//! - `id` is unique, immutable and monotonic with insertion order.
//! - `created_at` is epoch milliseconds, assigned once at insert time.
//! - A valid draft has all six descriptive fields non-blank.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier for a requirement row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RequirementId = i64;

/// Field keys of the requirement form, in canonical column order.
///
/// The order is shared by the spreadsheet mirror header and row layout.
pub const REQUIREMENT_FIELDS: &[&str] = &[
    "attribute",
    "description",
    "domain",
    "source_system",
    "source_entity",
    "responsible_analyst",
];

/// Persisted requirement record.
///
/// All descriptive fields are free text; identity and timestamp are
/// assigned by the store and never accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Store-assigned row id.
    pub id: RequirementId,
    /// Target attribute/field name being requested.
    pub attribute: String,
    /// Business description of the attribute.
    pub description: String,
    /// Business domain (e.g. Sales, Finance).
    pub domain: String,
    /// System the data originates from.
    pub source_system: String,
    /// Entity/table within the source system.
    pub source_entity: String,
    /// Analyst accountable for the requirement.
    pub responsible_analyst: String,
    /// Insert timestamp in epoch milliseconds, assigned by the store.
    pub created_at: i64,
}

/// Submission input: the six descriptive fields, all required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementDraft {
    pub attribute: String,
    pub description: String,
    pub domain: String,
    pub source_system: String,
    pub source_entity: String,
    pub responsible_analyst: String,
}

/// Partial update input; only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementPatch {
    pub attribute: Option<String>,
    pub description: Option<String>,
    pub domain: Option<String>,
    pub source_system: Option<String>,
    pub source_entity: Option<String>,
    pub responsible_analyst: Option<String>,
}

/// Validation error for requirement input shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementValidationError {
    /// A required field is absent or blank after trimming.
    MissingField(&'static str),
    /// A patch provided a field with a blank value.
    BlankField(&'static str),
}

impl Display for RequirementValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::BlankField(field) => write!(f, "field must not be blank: {field}"),
        }
    }
}

impl Error for RequirementValidationError {}

impl RequirementDraft {
    /// Checks required-field presence for the submission boundary.
    ///
    /// A field counts as missing when it is empty or whitespace-only.
    /// Reports the first missing field in canonical column order.
    pub fn validate(&self) -> Result<(), RequirementValidationError> {
        for (field, value) in self.named_fields() {
            if value.trim().is_empty() {
                return Err(RequirementValidationError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Returns `(field key, value)` pairs in canonical column order.
    pub fn named_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("attribute", self.attribute.as_str()),
            ("description", self.description.as_str()),
            ("domain", self.domain.as_str()),
            ("source_system", self.source_system.as_str()),
            ("source_entity", self.source_entity.as_str()),
            ("responsible_analyst", self.responsible_analyst.as_str()),
        ]
    }
}

impl RequirementPatch {
    /// Returns whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.named_fields().iter().all(|(_, value)| value.is_none())
    }

    /// Rejects provided-but-blank values.
    ///
    /// Absent fields are fine; update semantics leave them untouched.
    pub fn validate(&self) -> Result<(), RequirementValidationError> {
        for (field, value) in self.named_fields() {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(RequirementValidationError::BlankField(field));
                }
            }
        }
        Ok(())
    }

    /// Returns `(field key, value)` pairs in canonical column order.
    pub fn named_fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("attribute", self.attribute.as_deref()),
            ("description", self.description.as_deref()),
            ("domain", self.domain.as_deref()),
            ("source_system", self.source_system.as_deref()),
            ("source_entity", self.source_entity.as_deref()),
            ("responsible_analyst", self.responsible_analyst.as_deref()),
        ]
    }
}
