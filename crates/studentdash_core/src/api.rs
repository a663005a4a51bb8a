//! JSON envelopes shared by the HTTP server and its clients.
//!
//! # Invariants
//! - Success bodies are `{ "data": [...], "message": ... }`.
//! - Error bodies are `{ "status": "fail" | "error", "message": ... }`.

use crate::model::record::Record;
use serde::{Deserialize, Serialize};

pub const USERS_FETCHED_MESSAGE: &str = "Users fetched successfully";
pub const NO_USERS_MESSAGE: &str = "No users found";
pub const NOT_FOUND_MESSAGE: &str = "Not Found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body of a successful `GET /users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersEnvelope {
    pub data: Vec<Record>,
    #[serde(default)]
    pub message: String,
}

impl UsersEnvelope {
    pub fn fetched(data: Vec<Record>) -> Self {
        Self {
            data,
            message: USERS_FETCHED_MESSAGE.to_string(),
        }
    }
}

/// Body of any failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: String,
    pub message: String,
}

impl ErrorEnvelope {
    /// Client-side failure (4xx).
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: "fail".to_string(),
            message: message.into(),
        }
    }

    /// Server-side failure (5xx).
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
