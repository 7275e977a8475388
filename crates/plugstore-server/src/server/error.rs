//! API error taxonomy and its HTTP mapping.
//!
//! Client input errors surface as 4xx with a short message; downstream
//! failures (database, SMTP) surface as generic 5xx with the detail logged
//! server-side only. A partial failure inside the relations synchronizer is
//! not distinguished from any other database failure.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use plugstore_core::db::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::mailer::MailError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Login failure; deliberately identical for unknown usernames and wrong
    /// passwords.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Gate rejection; missing and invalid tokens are indistinguishable.
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    /// A required backing service is not configured.
    #[error("{0}")]
    Unavailable(&'static str),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid credentials".to_owned())
            }
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_owned()),
            Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            Self::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.to_owned()),
            Self::Database(DatabaseError::NotFound(what)) => {
                (StatusCode::NOT_FOUND, format!("{what} not found"))
            }
            Self::Database(e) => {
                error!(error = %e, "Database failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
            }
            Self::Mail(e) => {
                error!(error = %e, "Email delivery failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "email delivery failed".to_owned(),
                )
            }
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
