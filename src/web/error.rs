use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::core::ShoppingError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("shopping list error: {0}")]
    Domain(#[from] ShoppingError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Domain(err) => match &err {
                ShoppingError::NotFound(_) | ShoppingError::IndexOutOfRange { .. } => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                ShoppingError::InvalidItem(_) | ShoppingError::InvalidRecord(_) => {
                    error!(error = %err, "session data rejected by shopping list model");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "session data is corrupted".to_string(),
                    )
                }
            },
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
