use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidPeriod(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    ScheduleConflict(String),
    #[error("{0}")]
    PermissionDenied(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("transaction error")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AppError::InvalidPeriod(_)
            | AppError::InvalidRequest(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::ScheduleConflict(_) | AppError::InvalidState(_) => StatusCode::CONFLICT,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            e @ (AppError::ConversionEntityError(_)
            | AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e, error.message = %e,
                    "unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status_code, self.to_string()).into_response()
    }
}
