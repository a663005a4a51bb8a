//! HTTP error mapping.
//!
//! # Invariants
//! - Missing data and unknown routes are `404` with status `fail`.
//! - Every other failure is `500` with status `error` and a fixed message;
//!   details only reach the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};
use studentdash_core::api::{
    ErrorEnvelope, INTERNAL_ERROR_MESSAGE, NOT_FOUND_MESSAGE, NO_USERS_MESSAGE,
};
use studentdash_core::{DbError, RecordServiceError};

#[derive(Debug)]
pub enum AppError {
    /// No route matched the request.
    RouteNotFound,
    Service(RecordServiceError),
    Db(DbError),
    /// A blocking worker panicked or was cancelled.
    Worker(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RouteNotFound => f.write_str(NOT_FOUND_MESSAGE),
            Self::Service(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Worker(message) => write!(f, "blocking worker failed: {message}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::RouteNotFound | Self::Worker(_) => None,
        }
    }
}

impl From<RecordServiceError> for AppError {
    fn from(value: RecordServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorEnvelope) {
        match self {
            Self::RouteNotFound => (StatusCode::NOT_FOUND, ErrorEnvelope::fail(NOT_FOUND_MESSAGE)),
            Self::Service(RecordServiceError::NoRecords) => {
                (StatusCode::NOT_FOUND, ErrorEnvelope::fail(NO_USERS_MESSAGE))
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorEnvelope::error(INTERNAL_ERROR_MESSAGE),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            error!(
                "event=http_error module=server status={} error={}",
                status.as_u16(),
                self
            );
        }
        (status, Json(body)).into_response()
    }
}
