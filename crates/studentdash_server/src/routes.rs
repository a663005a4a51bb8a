use crate::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use log::info;
use std::path::Path;
use studentdash_core::api::UsersEnvelope;
use studentdash_core::{open_db, Record, RecordService, SqliteRecordRepository};

/// `GET /users`: every record ordered by id.
pub async fn users_handler(State(state): State<AppState>) -> Result<Json<UsersEnvelope>, AppError> {
    info!("event=http_request module=server route=/users status=start");

    let db_path = state.db_path().to_path_buf();
    let records = tokio::task::spawn_blocking(move || load_records(&db_path))
        .await
        .map_err(|err| AppError::Worker(err.to_string()))??;

    info!(
        "event=http_request module=server route=/users status=ok count={}",
        records.len()
    );
    Ok(Json(UsersEnvelope::fetched(records)))
}

pub async fn not_found_handler() -> AppError {
    AppError::RouteNotFound
}

fn load_records(db_path: &Path) -> Result<Vec<Record>, AppError> {
    let conn = open_db(db_path)?;
    let service = RecordService::new(SqliteRecordRepository::new(&conn));
    Ok(service.fetch_all()?)
}
