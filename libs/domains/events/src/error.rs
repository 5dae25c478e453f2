use axum::{
    extract::rejection::QueryRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use sea_orm::{DbErr, RuntimeErr, sqlx};
use std::borrow::Borrow;
use thiserror::Error;

/// SQLSTATE class for data exceptions: a bound value the server could not
/// interpret (bad syntax, out of range, invalid encoding).
const DATA_EXCEPTION_CLASS: &str = "22";

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    MissingParameters(#[from] QueryRejection),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    /// Classify an error returned while executing a query.
    ///
    /// Data exceptions (SQLSTATE class 22) become `InvalidInput` carrying the
    /// server's primary message; everything else stays a database error.
    pub fn from_query_error(err: DbErr) -> Self {
        match data_exception_message(&err) {
            Some(message) => EventError::InvalidInput(message),
            None => EventError::Database(err),
        }
    }
}

fn data_exception_message(err: &DbErr) -> Option<String> {
    let DbErr::Query(RuntimeErr::SqlxError(source)) = err else {
        return None;
    };

    let source: &sqlx::Error = Borrow::borrow(source);
    match source {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .filter(|code| code.starts_with(DATA_EXCEPTION_CLASS))
            .map(|_| db_err.message().to_string()),
        _ => None,
    }
}

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Connection(msg) => {
                AppError::ServiceUnavailable(format!("Database connection failed: {}", msg))
            }
            EventError::InvalidInput(msg) => AppError::BadRequest(msg),
            EventError::MissingParameters(rejection) => AppError::QueryExtractorRejection(rejection),
            EventError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        match self {
            // Plain-text body so clients that only read the status still get a readable reason
            EventError::Connection(msg) => {
                tracing::error!(error = %msg, "Database connection failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    format!("Database connection failed: {}", msg),
                )
                    .into_response()
            }
            other => AppError::from(other).into_response(),
        }
    }
}
