use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upload I/O error: {0}")]
    FileIo(#[from] std::io::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON error envelope returned for every non-2xx response.
///
/// `error` carries the underlying cause string for storage and I/O failures;
/// not-found and auth rejections only carry `mensaje`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub mensaje: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, mensaje, error) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                let causa = match e.source() {
                    Some(src) => format!("{}: {}", e, src),
                    None => e.to_string(),
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error al realizar la operación en la base de datos".to_string(),
                    Some(causa),
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::FileIo(ref e) => {
                tracing::error!("Upload I/O error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error al subir la imagen".to_string(),
                    Some(e.to_string()),
                )
            }
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { mensaje, error })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
