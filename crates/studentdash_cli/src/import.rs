use crate::error::CliError;
use log::info;
use std::path::Path;
use studentdash_core::{open_db, NewRecord, RecordId, RecordService, SqliteRecordRepository};

/// Seeds the store at `db_path` from a JSON array file.
///
/// The batch is committed in one transaction: any invalid entry or failed
/// insert leaves the store unchanged.
pub fn import_file(db_path: &Path, file: &Path) -> Result<Vec<RecordId>, CliError> {
    let raw = std::fs::read_to_string(file).map_err(|source| CliError::ReadFile {
        path: file.to_path_buf(),
        source,
    })?;
    let records: Vec<NewRecord> =
        serde_json::from_str(&raw).map_err(|source| CliError::ParseRecords {
            path: file.to_path_buf(),
            source,
        })?;

    let conn = open_db(db_path)?;
    let ids = RecordService::new(SqliteRecordRepository::new(&conn)).import(&records)?;
    info!(
        "event=import module=cli status=ok file={} count={}",
        file.display(),
        ids.len()
    );
    Ok(ids)
}
