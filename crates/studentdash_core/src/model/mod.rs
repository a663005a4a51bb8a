//! Domain model for student records.
//!
//! # Responsibility
//! - Define canonical data structures shared by storage, service, filtering
//!   and presentation code.
//!
//! # Invariants
//! - Every persisted record is identified by a stable store-assigned `RecordId`.
//! - Records are read-only once loaded; filtering never mutates them.

pub mod record;
