//! Spreadsheet mirror for submitted requirements.
//!
//! # Responsibility
//! - Keep a human-readable xlsx export in sync with the store,
//!   best-effort.
//! - Convert every mirror failure into a status value instead of an
//!   error.
//!
//! # Invariants
//! - Mirror failures never propagate to callers; the authoritative store
//!   write is never blocked or rolled back by the mirror.
//! - Appends from concurrent processes are NOT serialized; the file can
//!   lose rows under parallel writers. Known hazard, accepted for an
//!   export file.

use serde::{Deserialize, Serialize};

pub mod workbook;

/// Status of one mirror append attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorStatus {
    /// Row written to the workbook.
    Inserted,
    /// Append failed; the store row still exists.
    Error,
}

/// Result of a mirror append, reported as data in the submission
/// response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorOutcome {
    pub status: MirrorStatus,
    pub message: String,
}

impl MirrorOutcome {
    /// Returns whether the append reached the workbook.
    pub fn is_inserted(&self) -> bool {
        self.status == MirrorStatus::Inserted
    }
}
