use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use snip_core::{ResolveError, ShortenError};
use tracing::warn;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    Shorten(ShortenError),
    Resolve(ResolveError),
    /// The request body was not the JSON we expect.
    Malformed(JsonRejection),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Shorten(e) => match e {
                ShortenError::InvalidUrl(_)
                | ShortenError::InvalidValidity(_)
                | ShortenError::InvalidShortCode(_) => StatusCode::BAD_REQUEST,
                ShortenError::CodeTaken(_) => StatusCode::CONFLICT,
                ShortenError::GenerationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            },
            AppError::Resolve(e) => match e {
                ResolveError::NotFound(_) => StatusCode::NOT_FOUND,
                ResolveError::Expired(_) => StatusCode::GONE,
            },
            AppError::Malformed(rejection) => rejection.status(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Shorten(e) => e.kind(),
            AppError::Resolve(e) => e.kind(),
            AppError::Malformed(_) => "invalid_request",
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Shorten(e) => e.to_string(),
            AppError::Resolve(e) => e.to_string(),
            AppError::Malformed(rejection) => rejection.body_text(),
        }
    }
}

impl From<ShortenError> for AppError {
    fn from(e: ShortenError) -> Self {
        AppError::Shorten(e)
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        AppError::Resolve(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Malformed(rejection)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self.message(), kind = self.kind(), "request failed");
        }

        let body = ErrorResponse {
            error: self.kind(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
