//! Platform Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::api::common::ApiError;
use crate::service::auth::TokenError;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upstream failure: {message}")]
    Upstream { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlatformError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated { message: message.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream { message: message.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// HTTP status and stable error code for this error
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthenticated { .. } | Self::TokenExpired | Self::InvalidToken { .. } => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
            }
            Self::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Upstream { .. } => (StatusCode::BAD_GATEWAY, "UPSTREAM_FAILURE"),
            Self::Database(_)
            | Self::Serialization(_)
            | Self::Deserialization(_)
            | Self::Json(_)
            | Self::Configuration { .. }
            | Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<TokenError> for PlatformError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::TokenExpired,
            TokenError::Invalid(message) => Self::InvalidToken { message },
        }
    }
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();

        // Auth failures carry a fixed message; internals are logged, not echoed
        let message = match &self {
            Self::Unauthenticated { .. } | Self::TokenExpired | Self::InvalidToken { .. } => {
                "unauthorized access".to_string()
            }
            Self::Forbidden { .. } => "forbidden access".to_string(),
            Self::Validation { message } => message.clone(),
            Self::NotFound { .. } => self.to_string(),
            _ => {
                error!(error = %self, "Request failed");
                match status {
                    StatusCode::BAD_GATEWAY => "upstream failure".to_string(),
                    _ => "internal error".to_string(),
                }
            }
        };

        let body = ApiError {
            error: code.to_string(),
            message,
            details: None,
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;
