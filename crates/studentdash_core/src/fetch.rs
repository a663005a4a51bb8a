//! Record source contract used by the dashboard.
//!
//! # Responsibility
//! - Abstract "fetch every record" over local stores and remote servers.
//! - Collapse every failure into one opaque, human-readable error.
//!
//! # Invariants
//! - A source either yields the full record set or fails; partial results
//!   are never returned.

use crate::model::record::Record;
use crate::repo::record_repo::RecordRepository;
use crate::service::record_service::RecordService;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque fetch failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for FetchError {}

/// Anything able to deliver the full record set in one call.
pub trait RecordSource {
    fn fetch_records(&self) -> Result<Vec<Record>, FetchError>;
}

impl<R: RecordRepository> RecordSource for RecordService<R> {
    fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        self.fetch_all().map_err(|err| FetchError::new(err.to_string()))
    }
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        (**self).fetch_records()
    }
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        (**self).fetch_records()
    }
}
