use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Request-level failures. Validation problems on the login/register forms
/// never reach this type — those re-render the form with an inline message.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource absent, including "already deleted by someone else".
    #[error("{0} not found.")]
    NotFound(&'static str),

    /// Owner-or-admin check failed.
    #[error("You do not have permission to delete this {0}.")]
    Forbidden(&'static str),

    /// Malformed request payload.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] anyhow::Error),

    #[error(transparent)]
    Template(#[from] askama::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()).into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Database(e) => {
                error!("database error: {e:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            AppError::Template(e) => {
                error!("template rendering failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            AppError::Internal(msg) => {
                error!("{msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

/// Blocking DB work runs on the blocking pool; a join failure is a bug, not
/// a user error.
pub(crate) fn join_error(e: tokio::task::JoinError) -> AppError {
    AppError::Internal(format!("spawn_blocking join error: {e}"))
}
