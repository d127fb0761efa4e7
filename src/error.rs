//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::expense::ValidationError;

/// The message sent to the client for errors that are the server's fault.
///
/// The underlying cause is logged, never sent to the client.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error: ";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The expense in the request breaks one of the expense rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body is not JSON or does not have the shape of an expense.
    #[error("invalid request body")]
    InvalidRequestBody,

    /// A path parameter (e.g., the expense ID) could not be parsed.
    #[error("invalid params")]
    InvalidParams,

    /// The requested resource was not found.
    ///
    /// Internally, this error occurs when a query returns no rows.
    #[error("not found")]
    NotFound,

    /// The authorization header is missing or is not a valid token.
    #[error("missing or invalid token authentication")]
    Unauthorized,

    /// An error annotated with the name of the operation that produced it.
    ///
    /// Use [Error::is_not_found] rather than matching on [Error::NotFound]
    /// directly so that wrapped not found errors are still recognised.
    #[error("{operation}: {source}")]
    Context {
        /// The operation that failed, e.g. `get_expense(1)`.
        operation: String,
        /// The error returned by the operation.
        source: Box<Error>,
    },

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The tags of an expense could not be converted to JSON for storage.
    #[error("could not encode tags as JSON: {0}")]
    TagsEncoding(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The database operation was aborted because the request was dropped.
    #[error("the database operation was cancelled")]
    Cancelled,

    /// The blocking task running a database operation panicked or was aborted.
    #[error("the database task failed: {0}")]
    TaskFailed(String),
}

impl Error {
    /// Wrap the error with the name of the `operation` that produced it.
    pub fn context(self, operation: impl Into<String>) -> Self {
        Error::Context {
            operation: operation.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error, or any error it wraps, is [Error::NotFound].
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound => true,
            Error::Context { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InvalidRequestBody | Error::InvalidParams => {
                StatusCode::BAD_REQUEST
            }
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            error if error.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.code == rusqlite::ErrorCode::OperationInterrupted =>
            {
                Error::Cancelled
            }
            error => Error::SqlError(error),
        }
    }
}

/// The JSON body of every error response, e.g. `{"code":404,"message":"not found"}`.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody<'a> {
    pub code: u16,
    pub message: &'a str,
}

/// Create a JSON error response with `status` as both the status code and the body's code.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    let body = ErrorBody {
        code: status.as_u16(),
        message,
    };

    (status, Json(body)).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::NOT_FOUND => error_response(status, &Error::NotFound.to_string()),
            StatusCode::INTERNAL_SERVER_ERROR => {
                // Any errors that reach here are not intended to be shown to the client.
                tracing::error!("An unexpected error occurred: {}", self);
                error_response(status, INTERNAL_SERVER_ERROR_MESSAGE)
            }
            _ => error_response(status, &self.to_string()),
        }
    }
}
