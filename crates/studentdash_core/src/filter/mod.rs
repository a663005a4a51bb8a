//! Client-side multi-filter query engine.
//!
//! # Responsibility
//! - Hold the full record set and an ordered list of column/value predicates.
//! - Derive the visible subset as the conjunction of all active predicates.
//!
//! # Invariants
//! - The full record set is never mutated by filtering.
//! - Predicates with an unset column or an empty value are no-ops.
//! - The visible subset is recomputed on every mutation and is a pure
//!   function of (records, predicates).

mod engine;
mod predicate;

pub use engine::FilterEngine;
pub use predicate::{FilterPredicate, PredicateField};
