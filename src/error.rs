//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("catalog load: {0}")]
    Load(String),
    #[error("catalog parse: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("duplicate collection: {0}")]
    DuplicateCollection(String),
    #[error("invalid field {entity}.{field}: {reason}")]
    InvalidField {
        entity: String,
        field: String,
        reason: String,
    },
    #[error("invalid sample #{index} for {entity}: {reason}")]
    InvalidSample {
        entity: String,
        index: usize,
        reason: String,
    },
    #[error("validation: {0}")]
    Validation(String),
    #[error("setting {key}: {reason}")]
    Setting { key: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("corrupt document {id} in {collection}: payload is not an object")]
    Corrupt { collection: String, id: String },
    #[error("invalid collection name: {0}")]
    InvalidCollection(String),
}

/// One failed check on one input field. Nested fields use dotted paths (`specifications.year`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
    #[error("{0}")]
    BadRequest(String),
    #[error("request body too large")]
    PayloadTooLarge,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Store(_) => "internal_error",
            AppError::NotFound(_) => "not_found",
            AppError::Validation { .. } => "validation_error",
            AppError::BadRequest(_) => "bad_request",
            AppError::PayloadTooLarge => "payload_too_large",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (error, details) = match self {
            AppError::Store(_) => {
                tracing::error!(error = %self, code, "request failed");
                ("internal server error".to_string(), None)
            }
            AppError::Validation { message, errors } => (message, Some(errors)),
            other => (other.to_string(), None),
        };
        let body = ErrorBody {
            success: false,
            error,
            code,
            details,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classes_map_to_statuses() {
        let validation = AppError::Validation {
            message: "Invalid guitar data".into(),
            errors: vec![FieldError::new("price", "Price must be positive")],
        };
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BadRequest("invalid id".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("Guitar".into()).status(), StatusCode::NOT_FOUND);
        let store = AppError::Store(StoreError::InvalidCollection("Bad Name".into()));
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::PayloadTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(AppError::NotFound("Guitar".into()).to_string(), "Guitar not found");
    }
}
