use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}: {error}")]
    BadRequest { message: String, error: String },

    #[error("{message}: {error}")]
    Internal { message: String, error: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, error: impl ToString) -> Self {
        AppError::BadRequest {
            message: message.into(),
            error: error.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>, error: impl ToString) -> Self {
        AppError::Internal {
            message: message.into(),
            error: error.to_string(),
        }
    }

    /// Maps a data-service failure, keeping `message` as the caller-facing
    /// summary. Only malformed input is a client error; everything else,
    /// including invalid writes, is reported as a server error.
    pub fn from_domain(message: impl Into<String>, e: DomainError) -> Self {
        match e {
            DomainError::BadRequest(_) => AppError::bad_request(message, e),
            DomainError::InvalidRequest(_)
            | DomainError::NotConfigured(_)
            | DomainError::Storage(_) => AppError::internal(message, e),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub message: String,
    pub error: String,
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest { message, error } => {
                HttpResponse::BadRequest().json(ErrorEnvelope {
                    message: message.clone(),
                    error: error.clone(),
                })
            }
            AppError::Internal { message, error } => {
                HttpResponse::InternalServerError().json(ErrorEnvelope {
                    message: message.clone(),
                    error: error.clone(),
                })
            }
        }
    }
}
