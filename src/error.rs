// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Store and engine failures. Command handlers wrap these in `anyhow`
/// context before they reach the user.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: i64 },

    #[error("{0}")]
    Validation(String),

    /// The store could not commit because of concurrent access. Retried
    /// internally; surfaced only after retries are exhausted.
    #[error("write conflict: {0}")]
    Conflict(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> LedgerError {
        LedgerError::Validation(msg.into())
    }

    pub fn not_found(collection: &'static str, id: i64) -> LedgerError {
        LedgerError::NotFound { collection, id }
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> LedgerError {
        use rusqlite::ErrorCode;
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => {
                LedgerError::Conflict(err.to_string())
            }
            _ => LedgerError::Unavailable(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> LedgerError {
        LedgerError::Unavailable(format!("bad document body: {}", err))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
