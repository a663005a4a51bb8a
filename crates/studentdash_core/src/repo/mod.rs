//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for student records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Writes run `NewRecord::validate()` before persistence.
//! - Reads reject invalid persisted state instead of masking it.

pub mod record_repo;
