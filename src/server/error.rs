//! API error type and its JSON rendering

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::views::ViewError;

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Errors returned by API handlers, rendered as `{"error": ...}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Details are logged; clients only see `message`
    #[error("{message}: {cause:#}")]
    Internal {
        message: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message,
            cause: cause.into(),
        }
    }

    /// Map a [`ViewError`], using `message` for storage failures
    pub fn from_view(message: &'static str) -> impl FnOnce(ViewError) -> Self {
        move |error| match error {
            ViewError::MissingSlug | ViewError::UnknownPeriod(_) => {
                Self::BadRequest(error.to_string())
            }
            ViewError::Store(cause) => Self::Internal { message, cause },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::BadRequest(message) | Self::NotFound(message) => message.as_str(),
            Self::Internal { message, cause } => {
                tracing::error!("{}: {:#}", message, cause);
                *message
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
