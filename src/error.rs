use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// A failure the client is told about: a message plus the HTTP status to send.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    pub message: String,
    #[serde(serialize_with = "serialize_status")]
    pub status_code: StatusCode,
}

impl ApiError {
    /// Defaults to 400 Bad Request.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message).with_status(StatusCode::NOT_FOUND)
    }
}

fn serialize_status<S: serde::Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", .0.message)]
    Api(ApiError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::Api(ApiError::new(message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::Api(ApiError::not_found(message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let internal = |kind: &str, e: &dyn std::fmt::Display| {
            tracing::error!("{}: {}", kind, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
                .into_response()
        };

        match self {
            AppError::Api(err) => {
                tracing::debug!(status = %err.status_code, "{}", err.message);
                (err.status_code, Json(err)).into_response()
            }
            AppError::Database(e) => internal("Database error", &e),
            AppError::Pool(e) => internal("Pool error", &e),
            AppError::Hash(e) => internal("Password hashing error", &e),
            AppError::Internal(msg) => internal("Internal error", &msg),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
