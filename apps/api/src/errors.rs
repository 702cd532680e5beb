use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::taxonomy::TaxonomyKind;

/// Reference-data failure at load time. Fatal: no classification can run without both tables.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{kind} taxonomy file not found: {path}")]
    MissingTable { kind: TaxonomyKind, path: String },

    #[error("failed to read {kind} taxonomy: {source}")]
    Read {
        kind: TaxonomyKind,
        #[source]
        source: csv::Error,
    },

    #[error("{kind} taxonomy is empty")]
    EmptyTable { kind: TaxonomyKind },

    #[error("{kind} taxonomy row {row}: malformed code '{code}' (expected 5 digits)")]
    MalformedCode {
        kind: TaxonomyKind,
        row: usize,
        code: String,
    },

    #[error("{kind} taxonomy row {row}: duplicate code '{code}'")]
    DuplicateCode {
        kind: TaxonomyKind,
        row: usize,
        code: String,
    },

    #[error("{kind} taxonomy row {row}: code '{code}' has no title")]
    MissingTitle {
        kind: TaxonomyKind,
        row: usize,
        code: String,
    },

    #[error("expected the {expected} taxonomy but was given the {found} taxonomy")]
    KindMismatch {
        expected: TaxonomyKind,
        found: TaxonomyKind,
    },

    #[error("invalid compatibility table: {0}")]
    CompatibilityTable(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Classification itself never produces one of these: low-quality input yields
/// a low-confidence result, not an error. These cover malformed requests only.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::Configuration(e) => {
                tracing::error!("Configuration error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "Reference data is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
