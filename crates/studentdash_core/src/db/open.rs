//! Connection bootstrap utilities for the record store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas and run migrations before handing out a
//!   connection.
//! - Retry file opens under a bounded, fixed-interval policy.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - Schema-version conflicts are never retried.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Bounded retry policy for store bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Values below 1 act as 1.
    pub max_attempts: u32,
    /// Fixed pause between two attempts.
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_millis(5_000),
        }
    }
}

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_logged("file", || Connection::open(path.as_ref()))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_logged("memory", Connection::open_in_memory)
}

/// Opens a database file, retrying failed attempts per `policy`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` immediately, without retrying.
/// - `RetriesExhausted` wrapping the last failure once every attempt failed.
pub fn open_db_with_retry(path: impl AsRef<Path>, policy: &RetryPolicy) -> DbResult<Connection> {
    let path = path.as_ref();
    let max_attempts = policy.max_attempts.max(1);

    let mut attempt = 1;
    loop {
        match open_db(path) {
            Ok(conn) => return Ok(conn),
            Err(err @ DbError::UnsupportedSchemaVersion { .. }) => return Err(err),
            Err(err) if attempt >= max_attempts => {
                error!(
                    "event=db_open_retry module=db status=exhausted attempts={} error={}",
                    attempt, err
                );
                return Err(DbError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(err),
                });
            }
            Err(err) => {
                warn!(
                    "event=db_open_retry module=db status=retry attempt={} max_attempts={} retry_in_ms={} error={}",
                    attempt,
                    max_attempts,
                    policy.interval.as_millis(),
                    err
                );
                thread::sleep(policy.interval);
                attempt += 1;
            }
        }
    }
}

fn open_logged(
    mode: &str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}
