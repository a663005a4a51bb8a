//! Record sources the CLI can read from.
//!
//! # Invariants
//! - Every failure surfaces as a `FetchError`; nothing here panics.
//! - Local stores are opened per fetch, so `reload` sees fresh rows.

use crate::args::SourceArgs;
use log::{info, warn};
use reqwest::blocking::Client;
use std::path::PathBuf;
use std::time::Duration;
use studentdash_core::api::UsersEnvelope;
use studentdash_core::{
    open_db, FetchError, Record, RecordService, RecordSource, SqliteRecordRepository,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Picks the local store when `--db` is given, the server otherwise.
pub fn open_source(args: &SourceArgs) -> Result<Box<dyn RecordSource>, FetchError> {
    match &args.db {
        Some(path) => Ok(Box::new(LocalRecordSource::new(path.clone()))),
        None => Ok(Box::new(HttpRecordSource::new(&args.url)?)),
    }
}

/// Reads an existing SQLite store directly.
pub struct LocalRecordSource {
    db_path: PathBuf,
}

impl LocalRecordSource {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

impl RecordSource for LocalRecordSource {
    fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        if !self.db_path.is_file() {
            return Err(FetchError::new(format!(
                "store `{}` does not exist",
                self.db_path.display()
            )));
        }
        let conn = open_db(&self.db_path).map_err(|err| FetchError::new(err.to_string()))?;
        RecordService::new(SqliteRecordRepository::new(&conn)).fetch_records()
    }
}

/// Fetches records from a studentdash server with one `GET {base}/users`.
pub struct HttpRecordSource {
    client: Client,
    users_url: String,
}

impl HttpRecordSource {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| FetchError::new(format!("failed to build http client: {err}")))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            users_url: users_url(base_url),
        }
    }
}

impl RecordSource for HttpRecordSource {
    fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        info!(
            "event=http_fetch module=cli status=start url={}",
            self.users_url
        );

        let response = self
            .client
            .get(&self.users_url)
            .send()
            .map_err(|err| fetch_failed(&self.users_url, err))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "event=http_fetch module=cli status=error url={} http_status={}",
                self.users_url,
                status.as_u16()
            );
            return Err(FetchError::new(format!(
                "GET {} returned {status}",
                self.users_url
            )));
        }

        let envelope: UsersEnvelope = response
            .json()
            .map_err(|err| fetch_failed(&self.users_url, err))?;
        info!(
            "event=http_fetch module=cli status=ok count={}",
            envelope.data.len()
        );
        Ok(envelope.data)
    }
}

fn fetch_failed(url: &str, err: reqwest::Error) -> FetchError {
    warn!("event=http_fetch module=cli status=error url={url} error={err}");
    FetchError::new(format!("GET {url} failed: {err}"))
}

fn users_url(base_url: &str) -> String {
    format!("{}/users", base_url.trim_end_matches('/'))
}
