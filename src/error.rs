use crate::github::GitHubError;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Error returned by dashboard handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// GitHub request failed
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),
    /// Page template failed to render
    #[error("Render error: {0}")]
    Render(#[from] tera::Error),
    /// Request parameter rejected
    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::GitHub(_) => "UPSTREAM_ERROR",
            Self::Render(_) => "RENDER_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        tracing::error!("{}", self);

        let error_response = ErrorResponse {
            error: ErrorBody {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };

        match self {
            Self::GitHub(_) => HttpResponse::BadGateway().json(error_response),
            Self::Render(_) => HttpResponse::InternalServerError().json(error_response),
            Self::Validation(_) => HttpResponse::BadRequest().json(error_response),
        }
    }
}
