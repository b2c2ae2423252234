//! API-level error type and its HTTP rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt::Display;
use thiserror::Error;

/// Everything a request handler can fail with.
///
/// Every failure is caught at the handler boundary and rendered as a JSON
/// body here; nothing propagates past it, and no handler error is fatal to
/// the process.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A path identifier that does not conform to the store's 24-character
    /// hex encoding, on routes that validate before touching the store.
    #[error("{0}")]
    InvalidId(&'static str),
    /// No matching document or entry.
    #[error("{0}")]
    NotFound(&'static str),
    /// The collection has nothing in it. Reported as a 404 with a `message`
    /// body rather than an empty 200 array.
    #[error("{0}")]
    NoPosts(&'static str),
    /// A store failure, reported with the failing route's context message.
    #[error("{context}")]
    Store {
        context: &'static str,
        details: Option<String>,
    },
}

impl ApiError {
    /// Wraps a store failure, logging the underlying cause.
    pub fn store(context: &'static str, err: impl Display) -> Self {
        tracing::error!(error = %err, "{context}");

        ApiError::Store {
            context,
            details: None,
        }
    }

    /// Same as [`store`](ApiError::store), but the driver message is also
    /// echoed to the client in a `details` field.
    pub fn store_with_details(context: &'static str, err: impl Display) -> Self {
        tracing::error!(error = %err, "{context}");

        ApiError::Store {
            context,
            details: Some(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidId(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NoPosts(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Store { context, details } => {
                let body = match details {
                    Some(details) => json!({ "error": context, "details": details }),
                    None => json!({ "error": context }),
                };

                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
