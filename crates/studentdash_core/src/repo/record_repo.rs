//! Record repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the store-level `fetchAll` read and the seeding write path over
//!   the `students` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `list_records` is ordered by `id` ascending.
//! - `create_records` commits the whole batch or nothing.
//! - Enum columns are stored as wire labels and must parse back exactly.

use crate::db::DbError;
use crate::model::record::{Gender, NewRecord, Record, RecordId, RecordValidationError, Subject};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECORD_SELECT_SQL: &str = "SELECT
    id,
    name,
    grade,
    age,
    gender,
    subject,
    marks
FROM students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for student records.
pub trait RecordRepository {
    /// Validates, normalizes and inserts one record; returns the assigned id.
    fn create_record(&self, record: &NewRecord) -> RepoResult<RecordId>;
    /// Inserts a batch in one transaction; returns ids in input order.
    fn create_records(&self, records: &[NewRecord]) -> RepoResult<Vec<RecordId>>;
    /// Returns every record ordered by id ascending.
    fn list_records(&self) -> RepoResult<Vec<Record>>;
    fn count_records(&self) -> RepoResult<u64>;
}

/// SQLite-backed record repository.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn create_record(&self, record: &NewRecord) -> RepoResult<RecordId> {
        insert_record(self.conn, record)
    }

    fn create_records(&self, records: &[NewRecord]) -> RepoResult<Vec<RecordId>> {
        for record in records {
            record.validate()?;
        }

        // The repository only holds a shared borrow, so open the transaction unchecked.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            ids.push(insert_record(&tx, record)?);
        }
        tx.commit()?;

        Ok(ids)
    }

    fn list_records(&self) -> RepoResult<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn count_records(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative record count `{count}`")))
    }
}

fn insert_record(conn: &Connection, record: &NewRecord) -> RepoResult<RecordId> {
    record.validate()?;
    let record = record.normalized();

    conn.execute(
        "INSERT INTO students (
            name,
            grade,
            age,
            gender,
            subject,
            marks
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            record.name.as_str(),
            record.grade.as_str(),
            record.age,
            record.gender.label(),
            record.subject.label(),
            record.marks,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<Record> {
    let id: RecordId = row.get("id")?;

    let gender = match row.get::<_, Option<String>>("gender")? {
        Some(label) => Gender::from_label(&label).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid gender `{label}` in students.gender (id {id})"))
        })?,
        None => Gender::default(),
    };

    let subject_label: String = row.get("subject")?;
    let subject = Subject::from_label(&subject_label).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid subject `{subject_label}` in students.subject (id {id})"
        ))
    })?;

    let age = match row.get::<_, Option<i64>>("age")? {
        Some(value) => Some(u32::try_from(value).map_err(|_| {
            RepoError::InvalidData(format!("invalid age `{value}` in students.age (id {id})"))
        })?),
        None => None,
    };

    Ok(Record {
        id,
        name: row.get("name")?,
        grade: row.get("grade")?,
        age,
        gender,
        subject,
        marks: row.get("marks")?,
    })
}
