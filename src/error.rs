use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced by the store and mapped onto HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid input field, client-fixable
    #[error("{0}")]
    Validation(String),

    /// Referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Document store connectivity or query failure
    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize)]
pub struct FailureBody {
    pub message: String,
    pub error: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub const GENERIC_FAILURE: &str = "Error processing request";

impl AppError {
    /// Builds the response for this error, using `context` as the message
    /// of a 500 body. Client errors carry their own message.
    pub fn into_response(self, context: &str) -> HttpResponse {
        self.response(context)
    }

    fn response(&self, context: &str) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Validation(message) | AppError::NotFound(message) => {
                HttpResponse::build(status).json(MessageBody::new(message.clone()))
            }
            err => {
                tracing::error!("{}: {}", context, err);
                HttpResponse::build(status).json(FailureBody {
                    message: context.to_string(),
                    error: err.to_string(),
                })
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.response(GENERIC_FAILURE)
    }
}
