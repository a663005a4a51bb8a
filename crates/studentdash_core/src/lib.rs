//! Core domain logic for studentdash.
//! Records, storage, filtering and dashboard projections live here; the
//! server and CLI crates only wire them to their transports.

pub mod api;
pub mod dashboard;
pub mod db;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use api::{ErrorEnvelope, UsersEnvelope};
pub use dashboard::{
    ChartBar, Dashboard, TableRow, CHART_AXIS_MAX, EMPTY_CHART_MESSAGE, FETCH_FAILED_MESSAGE,
};
pub use db::{open_db, open_db_in_memory, open_db_with_retry, DbError, RetryPolicy};
pub use fetch::{FetchError, RecordSource};
pub use filter::{FilterEngine, FilterPredicate, PredicateField};
pub use logging::{default_log_dir, default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{
    Column, Gender, NewRecord, Record, RecordId, RecordValidationError, Subject,
};
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use service::record_service::{RecordService, RecordServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
