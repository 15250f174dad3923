//! Error handling for the crop yield prediction service.
//!
//! Every failure the service can produce is one of the variants of
//! [`YieldError`]. Request-scoped failures map onto HTTP responses through
//! [`IntoResponse`]; artifact and configuration failures only occur during
//! startup and abort the process before the listener is bound.

use std::path::{Path, PathBuf};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{CategoryErrorBody, ErrorBody, ValidationErrorBody};

/// A single field that failed shape or range validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// The error taxonomy of the service.
#[derive(Error, Debug)]
pub enum YieldError {
    /// A field was absent, wrong-typed, or outside its declared range.
    #[error("validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// A categorical value is not a key of its lookup table.
    #[error(
        "Invalid value '{value}' for {field} (table {table}). Please check the documentation for valid values."
    )]
    UnknownCategory {
        field: String,
        table: String,
        value: String,
    },

    /// An artifact could not be read, parsed, or checked at startup.
    #[error("failed to load {artifact} artifact from {}: {reason}", .path.display())]
    ArtifactLoad {
        artifact: String,
        path: PathBuf,
        reason: String,
    },

    /// Invalid process configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Any other failure while encoding, scaling, or predicting.
    #[error("prediction failed: {0}")]
    Unclassified(String),
}

/// Type alias for Results using YieldError
pub type Result<T> = std::result::Result<T, YieldError>;

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl YieldError {
    /// Creates a validation error for a single field
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        YieldError::Validation(vec![FieldViolation::new(field, reason)])
    }

    /// Creates an unknown category error
    #[must_use]
    pub fn unknown_category(
        field: impl Into<String>,
        table: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        YieldError::UnknownCategory {
            field: field.into(),
            table: table.into(),
            value: value.into(),
        }
    }

    /// Creates an artifact load error
    #[must_use]
    pub fn artifact_load(
        artifact: impl Into<String>,
        path: &Path,
        reason: impl Into<String>,
    ) -> Self {
        YieldError::ArtifactLoad {
            artifact: artifact.into(),
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Creates an unclassified error
    #[must_use]
    pub fn unclassified(msg: impl Into<String>) -> Self {
        YieldError::Unclassified(msg.into())
    }

    /// Creates a configuration error
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        YieldError::Config(msg.into())
    }

    /// Stable kind name, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            YieldError::Validation(_) => "ValidationError",
            YieldError::UnknownCategory { .. } => "UnknownCategoryError",
            YieldError::ArtifactLoad { .. } => "ArtifactLoadError",
            YieldError::Config(_) => "ConfigError",
            YieldError::Unclassified(_) => "UnclassifiedError",
        }
    }

    /// Determines if this error was caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            YieldError::Validation(_) | YieldError::UnknownCategory { .. }
        )
    }

    /// HTTP status this error is reported with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            YieldError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            YieldError::UnknownCategory { .. } => StatusCode::BAD_REQUEST,
            YieldError::ArtifactLoad { .. } => StatusCode::SERVICE_UNAVAILABLE,
            YieldError::Config(_) | YieldError::Unclassified(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for YieldError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_client_error() {
            tracing::warn!(kind = self.kind(), error = %self, "rejected prediction request");
        } else {
            tracing::error!(kind = self.kind(), error = %self, "prediction request failed");
        }

        let detail = self.to_string();
        match self {
            YieldError::Validation(violations) => (
                status,
                Json(ValidationErrorBody { detail, violations }),
            )
                .into_response(),
            YieldError::UnknownCategory { field, table, .. } => (
                status,
                Json(CategoryErrorBody {
                    detail,
                    field,
                    table,
                }),
            )
                .into_response(),
            _ => (status, Json(ErrorBody { error: detail })).into_response(),
        }
    }
}
