//! Student record use-case service.
//!
//! # Responsibility
//! - Serve the "fetch all records" use case behind `GET /users`.
//! - Seed the store from a batch of record inputs.
//!
//! # Invariants
//! - An empty store is reported as `NoRecords`, never as an empty success.
//! - Imports validate the whole batch first and commit it atomically.

use crate::model::record::{NewRecord, Record, RecordId, RecordValidationError};
use crate::repo::record_repo::{RecordRepository, RepoError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for record use-cases.
#[derive(Debug)]
pub enum RecordServiceError {
    /// The store holds no records.
    NoRecords,
    /// Import input at `index` failed validation.
    InvalidInput {
        index: usize,
        source: RecordValidationError,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for RecordServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRecords => f.write_str("No users found"),
            Self::InvalidInput { index, source } => {
                write!(f, "invalid record at position {index}: {source}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RecordServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoRecords => None,
            Self::InvalidInput { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for RecordServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper over a record repository.
pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every record ordered by id ascending.
    ///
    /// # Errors
    /// - `NoRecords` when the store is empty.
    /// - `Repo` on storage failure.
    pub fn fetch_all(&self) -> Result<Vec<Record>, RecordServiceError> {
        info!("event=records_fetch module=service status=start");

        let records = self.repo.list_records().map_err(|err| {
            error!("event=records_fetch module=service status=error error={err}");
            RecordServiceError::from(err)
        })?;

        if records.is_empty() {
            warn!("event=records_fetch module=service status=empty");
            return Err(RecordServiceError::NoRecords);
        }

        info!(
            "event=records_fetch module=service status=ok count={}",
            records.len()
        );
        Ok(records)
    }

    /// Inserts a batch of records and returns their assigned ids in input order.
    pub fn import(&self, records: &[NewRecord]) -> Result<Vec<RecordId>, RecordServiceError> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|source| RecordServiceError::InvalidInput { index, source })?;
        }

        let ids = self.repo.create_records(records).map_err(|err| {
            error!("event=records_import module=service status=error error={err}");
            RecordServiceError::from(err)
        })?;

        info!(
            "event=records_import module=service status=ok count={}",
            ids.len()
        );
        Ok(ids)
    }

    pub fn count(&self) -> Result<u64, RecordServiceError> {
        Ok(self.repo.count_records()?)
    }
}
