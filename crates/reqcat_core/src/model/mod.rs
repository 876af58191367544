//! Domain model for analyst-submitted data requirements.
//!
//! # Responsibility
//! - Define the canonical requirement record and its input/patch shapes.
//! - Own required-field validation for the submission boundary.
//!
//! # Invariants
//! - Every persisted requirement is identified by a store-assigned `id`.
//! - `created_at` is assigned server-side and never supplied by callers.

pub mod requirement;
