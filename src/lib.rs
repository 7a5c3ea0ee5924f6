pub mod connections;
pub mod conversations;
pub mod db;
pub mod profiles;
pub mod session;

use axum::{extract::FromRef, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use sqlx::SqlitePool;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

pub type AppResult<T> = Result<T, AppError>;

/// Everything a core operation can fail with. Validation, duplicate,
/// authorization and invalid-transition failures are terminal; `Conflict`
/// and `Transient` are the only variants a caller may sensibly retry.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("a pending or accepted connection already exists for this pair")]
    DuplicateConnection,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("only the receiver of a connection request may respond to it")]
    Authorization,
    #[error("connection is no longer pending")]
    InvalidStateTransition,
    #[error("connection was updated by someone else, reload and retry")]
    Conflict,
    #[error("not signed in")]
    Unauthorized,
    #[error("store unavailable: {0}")]
    Transient(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        use AppError::*;
        match self {
            Validation(_) => StatusCode::BAD_REQUEST,
            DuplicateConnection | InvalidStateTransition | Conflict => StatusCode::CONFLICT,
            NotFound(_) => StatusCode::NOT_FOUND,
            Authorization => StatusCode::FORBIDDEN,
            Unauthorized => StatusCode::UNAUTHORIZED,
            Transient(_) => StatusCode::SERVICE_UNAVAILABLE,
            Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Conflict | AppError::Transient(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => AppError::Transient("pool timed out".to_owned()),
            sqlx::Error::PoolClosed => AppError::Transient("pool closed".to_owned()),
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Internal(err.into())
    }
}
