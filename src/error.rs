//! Errors as the HTTP layer reports them.
//!
//! Server-side failures are logged with their cause and answered with a fixed
//! message, so datastore text never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::users::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid user id: {0}")]
    InvalidIdentifier(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier(_) | ApiError::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(StoreError::DuplicateEmail) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::HashingFailure(_))
            | ApiError::Store(StoreError::StorageFailure(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::InvalidIdentifier(_) => "Invalid user id".into(),
            ApiError::InvalidPayload(msg) => msg.clone(),
            ApiError::Store(StoreError::DuplicateEmail) => "Email already in use".into(),
            ApiError::Store(StoreError::NotFound(_)) => "User not found".into(),
            ApiError::Store(StoreError::HashingFailure(e)) => {
                error!(error = %e, "password hashing failed");
                "Could not process password".into()
            }
            ApiError::Store(StoreError::StorageFailure(e)) => {
                error!(error = %e, "storage failure");
                "Internal storage error".into()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
