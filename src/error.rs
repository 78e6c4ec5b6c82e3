use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum PollError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Referenced row does not exist: {0}")]
    ForeignKeyViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl From<SqlxError> for PollError {
    fn from(e: SqlxError) -> Self {
        match &e {
            SqlxError::Database(db_err) if db_err.kind() == ErrorKind::ForeignKeyViolation => {
                PollError::ForeignKeyViolation(db_err.message().to_string())
            }
            _ => PollError::Database(e),
        }
    }
}

impl From<JsonRejection> for PollError {
    fn from(rejection: JsonRejection) -> Self {
        PollError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for PollError {
    fn from(rejection: PathRejection) -> Self {
        PollError::Validation(rejection.body_text())
    }
}

impl PollError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) | Self::Config(_) => "INTERNAL_ERROR",
            Self::ForeignKeyViolation(_) => "FOREIGN_KEY",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ForeignKeyViolation(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for PollError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "An internal server error occurred.".to_string()
        } else {
            self.to_string()
        };
        let body = ApiErrorBody {
            code: self.code().to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
