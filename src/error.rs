use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Closed set of failure kinds surfaced by the API.
///
/// Every core operation either returns its success structure or exactly one
/// of these. The `Database` variant keeps the underlying error for logging;
/// only its generic message reaches the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Credential(String),
    #[error("{0}")]
    Permission(String),
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Database {
        message: String,
        detail: anyhow::Error,
    },
}

impl ApiError {
    pub fn database(message: impl Into<String>, detail: impl Into<anyhow::Error>) -> Self {
        Self::Database {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Credential(_) => StatusCode::UNAUTHORIZED,
            Self::Permission(_) => StatusCode::FORBIDDEN,
            Self::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::BAD_REQUEST,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Credential(_) => "CREDENTIAL_ERROR",
            Self::Permission(_) => "PERMISSION_ERROR",
            Self::Input(_) => "INPUT_ERROR",
            Self::NotFound(_) => "NOT_FOUND_ERROR",
            Self::Database { .. } => "DATABASE_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    error_code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Database { message, detail } = &self {
            error!(detail = %detail, "{message}");
        }
        let body = ErrorBody {
            error_code: self.error_code(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
